//! Tile prototypes, socket matching and the compatibility registry

/// Prototype descriptors and rotation variants
pub mod prototype;
/// Prototype table and per-direction adjacency bitsets
pub mod registry;
/// Socket kinds and matching rule
pub mod socket;

pub use prototype::{Prototype, Rotation, Sides};
pub use registry::PrototypeRegistry;
pub use socket::Socket;
