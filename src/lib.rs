//! Socket-matched tile collapse for rectangular grids
//!
//! Tile prototypes declare a socket per side. The solver narrows every cell
//! to the prototypes compatible with its neighbours, repeatedly collapses the
//! least-determined cell and propagates, until each cell holds one tile or a
//! contradiction appears.
//!
//! ```
//! use sockettile::{Prototype, Sides, TileCollapse};
//!
//! let mut solver = TileCollapse::new(3, 1)?;
//! solver.add_prototypes([
//!     Prototype::new("A", Sides::parse("0s", "0s", "0s", "0s")),
//!     Prototype::new("B", Sides::parse("1s", "1s", "0s", "0s")),
//! ])?;
//! solver.set(0, 0, &["A"])?;
//! assert!(solver.solve()?);
//! assert_eq!(solver.results(), vec![Some("A".to_string()); 3]);
//! # Ok::<(), sockettile::TileError>(())
//! ```

#![forbid(unsafe_code)]

/// Bitsets, propagation, selection policies and the solve loop
pub mod algorithm;
/// Input/output operations and error handling
pub mod io;
/// Weighted sampling helpers
pub mod math;
/// Directions and the domain grid
pub mod spatial;
/// Prototypes, sockets and the compatibility registry
pub mod tiles;

pub use algorithm::executor::TileCollapse;
pub use algorithm::retry::{RetryPlan, SeedConstraint, SolveOutcome, solve_with_retries};
pub use algorithm::selection::{SelectionPolicy, Selector};
pub use io::error::{Result, TileError};
pub use spatial::Direction;
pub use tiles::{Prototype, Rotation, Sides, Socket};
