//! Input/output operations, configuration and error handling

/// Command-line interface and batch file processing
pub mod cli;
/// Constants and runtime configuration defaults
pub mod configuration;
/// Error types
pub mod error;
/// JSON export of solved grids
pub mod export;
/// PNG preview export
pub mod image;
/// Tracing subscriber setup
pub mod logging;
/// Terminal progress display
pub mod progress;
/// Tileset file format
pub mod tileset;
