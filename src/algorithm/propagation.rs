use crate::{
    algorithm::bitset::TileBitset,
    io::error::Result,
    spatial::{Direction, DomainGrid},
    tiles::PrototypeRegistry,
};
use bitvec::prelude::*;
use std::collections::VecDeque;

/// Summary of one propagation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropagationReport {
    /// Cells popped from the worklist
    pub visited: usize,
    /// Tile candidates removed across all cells
    pub removed: usize,
}

impl PropagationReport {
    /// Fold another report into this one
    pub const fn absorb(&mut self, other: Self) {
        self.visited += other.visited;
        self.removed += other.removed;
    }

    /// Whether any domain shrank
    pub const fn changed(&self) -> bool {
        self.removed > 0
    }
}

/// Queue of cells whose neighbours need revisiting
///
/// A cell is held at most once at a time.
#[derive(Debug)]
pub struct Worklist {
    queue: VecDeque<(usize, usize)>,
    queued: BitVec,
    height: usize,
}

impl Worklist {
    /// Create an empty worklist sized for the grid
    pub fn new(grid: &DomainGrid) -> Self {
        Self {
            queue: VecDeque::new(),
            queued: bitvec![0; grid.cell_count()],
            height: grid.height(),
        }
    }

    /// Queue a cell unless it is already waiting
    pub fn push(&mut self, x: usize, y: usize) {
        let index = x * self.height + y;
        if self.queued.get(index).as_deref() == Some(&false) {
            self.queued.set(index, true);
            self.queue.push_back((x, y));
        }
    }

    /// Remove and return the next cell
    pub fn take_next(&mut self) -> Option<(usize, usize)> {
        let (x, y) = self.queue.pop_front()?;
        let index = x * self.height + y;
        if index < self.queued.len() {
            self.queued.set(index, false);
        }
        Some((x, y))
    }

    /// Check if the worklist is empty
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Get the number of pending cells
    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

/// Restore arc consistency after the domain at `(x, y)` changed
///
/// For every neighbour of a visited cell, candidates that no tile left in the
/// visited cell allows on that side, or that any of them forbids, are
/// removed. Neighbours that shrink are queued in turn. Empty domains do not
/// stop the run; contradictions are left for the caller to detect.
///
/// # Errors
///
/// Returns an error if `(x, y)` is outside the grid
pub fn propagate(
    grid: &mut DomainGrid,
    registry: &PrototypeRegistry,
    x: usize,
    y: usize,
) -> Result<PropagationReport> {
    grid.domain(x, y)?;

    let mut report = PropagationReport::default();
    let mut worklist = Worklist::new(grid);
    worklist.push(x, y);

    while let Some((cx, cy)) = worklist.take_next() {
        report.visited += 1;
        let source = grid.domain(cx, cy)?.clone();

        for direction in Direction::ALL {
            let Some((nx, ny)) = direction.step(cx, cy, grid.width(), grid.height()) else {
                continue;
            };
            let removed = constrain_neighbour(grid, registry, &source, direction, nx, ny)?;
            if removed > 0 {
                report.removed += removed;
                worklist.push(nx, ny);
            }
        }
    }

    Ok(report)
}

/// Narrow the domain at `(nx, ny)` against `source` seen from `direction`
///
/// Returns the number of candidates removed.
fn constrain_neighbour(
    grid: &mut DomainGrid,
    registry: &PrototypeRegistry,
    source: &TileBitset,
    direction: Direction,
    nx: usize,
    ny: usize,
) -> Result<usize> {
    let allowed = registry.allowed_union(source, direction);
    let forbidden = registry.forbidden_union(source, direction);

    let target = grid.domain_mut(nx, ny)?;
    let before = target.count();
    if before == 0 {
        return Ok(0);
    }
    target.intersect_with(&allowed);
    target.subtract(&forbidden);
    Ok(before - target.count())
}
