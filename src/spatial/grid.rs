//! Rectangular grid of cell domains
//!
//! Cells live in an `ndarray::Array2` of shape `(width, height)` in standard
//! layout, so the linear cell order is `x * height + y`. Every domain is a
//! [`TileBitset`] over registry indices.

use ndarray::Array2;

use crate::algorithm::bitset::TileBitset;
use crate::io::configuration::MAX_GRID_DIMENSION;
use crate::io::error::{Result, TileError, invalid_parameter};

/// Grid of per-cell tile domains
#[derive(Debug, Clone)]
pub struct DomainGrid {
    cells: Array2<TileBitset>,
}

impl DomainGrid {
    /// Create a grid with every cell holding `initial`
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or exceeds
    /// [`MAX_GRID_DIMENSION`]
    pub fn new(width: usize, height: usize, initial: &TileBitset) -> Result<Self> {
        validate_dimension("width", width)?;
        validate_dimension("height", height)?;
        Ok(Self {
            cells: Array2::from_elem((width, height), initial.clone()),
        })
    }

    /// Number of columns (`x` extent)
    pub fn width(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of rows (`y` extent)
    pub fn height(&self) -> usize {
        self.cells.ncols()
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Whether `(x, y)` lies on the grid
    pub fn inside(&self, x: usize, y: usize) -> bool {
        x < self.width() && y < self.height()
    }

    /// Whether `(x, y)` lies on the outer ring
    pub fn is_border(&self, x: usize, y: usize) -> bool {
        self.inside(x, y)
            && (x == 0 || y == 0 || x + 1 == self.width() || y + 1 == self.height())
    }

    /// Linear position of a cell, `x * height + y`
    pub fn linear_index(&self, x: usize, y: usize) -> Option<usize> {
        self.inside(x, y).then(|| x * self.height() + y)
    }

    /// Coordinates of a linear position
    pub fn coordinates(&self, index: usize) -> Option<(usize, usize)> {
        (index < self.cell_count()).then(|| (index / self.height(), index % self.height()))
    }

    /// Domain at a cell
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinates are outside the grid
    pub fn domain(&self, x: usize, y: usize) -> Result<&TileBitset> {
        let (width, height) = (self.width(), self.height());
        self.cells
            .get((x, y))
            .ok_or(TileError::OutOfBounds {
                x,
                y,
                width,
                height,
            })
    }

    /// Mutable domain at a cell
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinates are outside the grid
    pub(crate) fn domain_mut(&mut self, x: usize, y: usize) -> Result<&mut TileBitset> {
        let (width, height) = (self.width(), self.height());
        self.cells
            .get_mut((x, y))
            .ok_or(TileError::OutOfBounds {
                x,
                y,
                width,
                height,
            })
    }

    /// Overwrite every domain with `domain`
    pub(crate) fn fill(&mut self, domain: &TileBitset) {
        self.cells.fill(domain.clone());
    }

    /// Cells in linear order as `((x, y), domain)`
    pub fn cells(&self) -> impl Iterator<Item = ((usize, usize), &TileBitset)> {
        self.cells.indexed_iter()
    }

    /// Border coordinates in linear order
    pub fn border(&self) -> Vec<(usize, usize)> {
        self.cells
            .indexed_iter()
            .map(|(coordinates, _)| coordinates)
            .filter(|&(x, y)| self.is_border(x, y))
            .collect()
    }
}

fn validate_dimension(parameter: &'static str, value: usize) -> Result<()> {
    if value == 0 || value > MAX_GRID_DIMENSION {
        return Err(invalid_parameter(
            parameter,
            &value,
            &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
        ));
    }
    Ok(())
}
