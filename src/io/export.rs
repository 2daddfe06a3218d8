//! JSON dump of solved grids for downstream tooling

use crate::algorithm::executor::TileCollapse;
use crate::io::error::{Result, TileError, file_system_error};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Serialized solver output
///
/// `tiles` follows the solver's linear order, `x * height + y`; `null`
/// marks a cell that never collapsed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultGrid {
    /// Grid width
    pub width: usize,
    /// Grid height
    pub height: usize,
    /// Whether the solve completed without contradiction
    pub solved: bool,
    /// Tile id per cell
    pub tiles: Vec<Option<String>>,
}

impl ResultGrid {
    /// Snapshot the solver's current results
    pub fn capture(solver: &TileCollapse) -> Self {
        Self {
            width: solver.width(),
            height: solver.height(),
            solved: solver.is_complete() && !solver.is_failed(),
            tiles: solver.results(),
        }
    }

    /// Tile at `(x, y)`, `None` when unset or out of range
    pub fn tile(&self, x: usize, y: usize) -> Option<&str> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.tiles.get(x * self.height + y)?.as_deref()
    }

    /// Write as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be written
    pub fn write(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self).map_err(|source| TileError::ResultSerialize {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|source| file_system_error(parent, "create directory", source))?;
        }
        std::fs::write(path, text)
            .map_err(|source| file_system_error(path, "write results", source))
    }

    /// Read back a previously written result file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn read(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| file_system_error(path, "read results", source))?;
        serde_json::from_str(&text).map_err(|source| TileError::TilesetParse {
            path: path.to_path_buf(),
            source,
        })
    }
}
