// Declare the main modules of the crate
pub mod autograd;
pub mod graph;
pub mod ops;

// Re-export the arena and handle types so they are accessible directly via
// `scalargrad_core::Graph` etc.
pub use graph::{Graph, GroupId, NodeId, Operand};

pub mod error;
pub use error::ScalarGradError;
