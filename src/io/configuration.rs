//! Constants and runtime configuration defaults

// Socket label convention
/// Trailing marker of a symmetric socket label
pub const SYMMETRIC_MARKER: char = 's';
/// Trailing marker of the flipped half of a directional socket pair
pub const FLIPPED_MARKER: char = 'f';
/// Separator between a base id and its rotation digit
pub const ROTATION_SEPARATOR: char = '_';

/// Selection weight of a prototype that does not set one
pub const DEFAULT_WEIGHT: f64 = 1.0;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Default number of full solve attempts
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_result";
/// Edge length in pixels of one cell in the preview image
pub const DEFAULT_CELL_SIZE: u32 = 8;
/// Colour of cells without a colour or without a collapsed tile
pub const UNSET_COLOR: [u8; 4] = [0, 0, 0, 0];
/// Brightness factor of the edge marking a cell's orientation
pub const ORIENTATION_SHADE: f32 = 0.55;

/// Log filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "warn";
