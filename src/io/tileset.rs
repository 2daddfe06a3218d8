//! Tileset files: prototypes, grid size and hard constraints as JSON
//!
//! ```json
//! {
//!   "width": 12, "height": 8,
//!   "prototypes": [
//!     { "id": "road", "sockets": { "left": "1s", "right": "1s", "top": "0s", "bottom": "0s" },
//!       "weight": 2.0, "rotate": true, "color": [90, 90, 90, 255] }
//!   ],
//!   "boundary": ["grass"],
//!   "seeds": [ { "x": 0, "y": 0, "ids": ["grass"] } ]
//! }
//! ```

use crate::algorithm::executor::TileCollapse;
use crate::algorithm::retry::{RetryPlan, SeedConstraint};
use crate::io::configuration::{DEFAULT_MAX_ATTEMPTS, DEFAULT_WEIGHT};
use crate::io::error::{Result, TileError, file_system_error};
use crate::tiles::{Prototype, Rotation, Sides, Socket};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// One prototype entry in a tileset file
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrototypeEntry {
    /// Base id; rotated variants append `_1`, `_2`, `_3`
    pub id: String,
    /// Socket labels per side
    #[serde(default)]
    pub sockets: Sides<Socket>,
    /// Antisocket labels per side
    #[serde(default)]
    pub antisockets: Sides<Socket>,
    /// Selection weight
    #[serde(default = "default_weight")]
    pub weight: f64,
    /// Also register the three rotated variants
    #[serde(default)]
    pub rotate: bool,
    /// Preview colour as RGBA
    #[serde(default)]
    pub color: Option<[u8; 4]>,
}

const fn default_weight() -> f64 {
    DEFAULT_WEIGHT
}

impl PrototypeEntry {
    /// The base prototype described by this entry
    pub fn prototype(&self) -> Prototype {
        Prototype::new(self.id.clone(), self.sockets.clone())
            .with_antisockets(self.antisockets.clone())
            .with_weight(self.weight)
    }

    /// The base prototype, followed by its rotations when requested
    pub fn expand(&self) -> Vec<Prototype> {
        let base = self.prototype();
        if self.rotate {
            base.rotate_360().to_vec()
        } else {
            vec![base]
        }
    }
}

/// Complete tileset description
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tileset {
    /// Grid width
    pub width: usize,
    /// Grid height
    pub height: usize,
    /// Prototype entries in registration order
    pub prototypes: Vec<PrototypeEntry>,
    /// Ids imposed on the outer ring
    #[serde(default)]
    pub boundary: Option<Vec<String>>,
    /// Per-cell hard constraints
    #[serde(default)]
    pub seeds: Vec<SeedConstraint>,
    /// Attempt budget, overridable from the command line
    #[serde(default)]
    pub max_attempts: Option<usize>,
}

impl Tileset {
    /// Load a tileset from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid tileset
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| file_system_error(path, "read tileset", source))?;
        serde_json::from_str(&text).map_err(|source| TileError::TilesetParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a tileset from JSON text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid tileset
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|source| TileError::TilesetParse {
            path: "<inline>".into(),
            source,
        })
    }

    /// Every prototype to register, rotations expanded
    pub fn expanded_prototypes(&self) -> Vec<Prototype> {
        self.prototypes
            .iter()
            .flat_map(PrototypeEntry::expand)
            .collect()
    }

    /// Build a solver sized and populated from this tileset
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are invalid or the prototypes fail
    /// registration
    pub fn build_solver(&self, seed: u64) -> Result<TileCollapse> {
        let mut solver = TileCollapse::with_seed(self.width, self.height, seed)?;
        solver.add_prototypes(self.expanded_prototypes())?;
        Ok(solver)
    }

    /// Retry plan carrying this tileset's constraints
    ///
    /// `max_attempts` overrides the file's own budget when given.
    pub fn retry_plan(&self, max_attempts: Option<usize>) -> RetryPlan {
        RetryPlan {
            max_attempts: max_attempts
                .or(self.max_attempts)
                .unwrap_or(DEFAULT_MAX_ATTEMPTS),
            boundary: self.boundary.clone(),
            seeds: self.seeds.clone(),
        }
    }

    /// Preview colours keyed by base id
    pub fn palette(&self) -> Palette {
        Palette {
            colors: self
                .prototypes
                .iter()
                .filter_map(|entry| entry.color.map(|color| (entry.id.clone(), color)))
                .collect(),
        }
    }
}

/// Preview colours for base tile ids
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Palette {
    colors: HashMap<String, [u8; 4]>,
}

impl Palette {
    /// Assign a colour to a base id
    pub fn insert(&mut self, id: impl Into<String>, color: [u8; 4]) {
        self.colors.insert(id.into(), color);
    }

    /// Colour and orientation for a tile id
    ///
    /// Rotated ids share their base id's colour. Ids without an assigned
    /// colour get a stable colour derived from the base id.
    pub fn lookup(&self, id: &str) -> ([u8; 4], Rotation) {
        let (base, rotation) = Rotation::from_tile_id(id);
        let color = self
            .colors
            .get(base)
            .or_else(|| self.colors.get(id))
            .copied()
            .unwrap_or_else(|| derived_color(base));
        (color, rotation)
    }
}

/// FNV-1a over the id, folded into an opaque RGB colour
fn derived_color(id: &str) -> [u8; 4] {
    let hash = id.bytes().fold(0xcbf2_9ce4_8422_2325_u64, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(0x0100_0000_01b3)
    });
    let [r, g, b, ..] = hash.to_le_bytes();
    [r, g, b, 255]
}
