//! Error types for registration, grid access and tileset I/O
//!
//! Contradictions are not errors: they surface through the boolean returned
//! by the solver. Errors here are contract violations and I/O failures.

use std::fmt;
use std::path::PathBuf;

/// Main error type for all solver and tileset operations
#[derive(Debug)]
pub enum TileError {
    /// Cell coordinates outside the grid
    OutOfBounds {
        /// Requested column
        x: usize,
        /// Requested row
        y: usize,
        /// Grid width
        width: usize,
        /// Grid height
        height: usize,
    },

    /// Tile id not present in the registry
    UnknownTile {
        /// The unregistered id
        id: String,
    },

    /// Tile id registered twice
    DuplicatePrototype {
        /// The repeated id
        id: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Every attempt ended in a contradiction
    Unsolvable {
        /// Attempts made before giving up
        attempts: usize,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Tileset file is not valid JSON for the expected schema
    TilesetParse {
        /// Path of the tileset file
        path: PathBuf,
        /// Underlying parse error
        source: serde_json::Error,
    },

    /// Results could not be serialized to JSON
    ResultSerialize {
        /// Path the results were meant for
        path: PathBuf,
        /// Underlying serialization error
        source: serde_json::Error,
    },

    /// Failed to save a preview image
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },
}

impl fmt::Display for TileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds {
                x,
                y,
                width,
                height,
            } => {
                write!(f, "Cell ({x}, {y}) is outside the {width}x{height} grid")
            }
            Self::UnknownTile { id } => write!(f, "Unknown tile id '{id}'"),
            Self::DuplicatePrototype { id } => {
                write!(f, "Tile id '{id}' is already registered")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::Unsolvable { attempts } => {
                write!(f, "No consistent tiling found in {attempts} attempt(s)")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::TilesetParse { path, source } => {
                write!(f, "Failed to parse tileset '{}': {source}", path.display())
            }
            Self::ResultSerialize { path, source } => {
                write!(
                    f,
                    "Failed to serialize results for '{}': {source}",
                    path.display()
                )
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for TileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileSystem { source, .. } => Some(source),
            Self::TilesetParse { source, .. } | Self::ResultSerialize { source, .. } => {
                Some(source)
            }
            Self::ImageExport { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for solver results
pub type Result<T> = std::result::Result<T, TileError>;

impl From<std::io::Error> for TileError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> TileError {
    TileError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a file system error for `path`
pub fn file_system_error(
    path: impl Into<PathBuf>,
    operation: &'static str,
    source: std::io::Error,
) -> TileError {
    TileError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}
