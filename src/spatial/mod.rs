//! Spatial data structures
//!
//! This module contains spatial-related functionality including:
//! - Cardinal directions and their offsets
//! - The grid of per-cell tile domains

/// Cardinal directions and the offset naming lookup
pub mod direction;
/// Domain grid storage and coordinate helpers
pub mod grid;

pub use direction::Direction;
pub use grid::DomainGrid;
