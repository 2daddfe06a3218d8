/// Weighted sampling helpers
pub mod probability;
