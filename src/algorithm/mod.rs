/// Fixed-size bitset for domains and adjacency tables
pub mod bitset;
/// Solver loop: collapse, minimum-entropy scan, results
pub mod executor;
/// Worklist propagation of adjacency constraints
pub mod propagation;
/// Bounded restart policy with reapplied constraints
pub mod retry;
/// Pluggable collapse policies
pub mod selection;
