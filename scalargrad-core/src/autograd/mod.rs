//! Reverse-mode differentiation machinery.
//!
//! [`backward_op`] defines the tagged backward step stored on every node and
//! the dispatcher that executes it; `graph` builds the topological replay
//! plan and drives the reverse sweep; [`grad_check`] validates analytical
//! gradients against finite differences.

pub mod backward_op;
pub mod grad_check;
pub(crate) mod graph;

pub use backward_op::BackwardOp;
pub use grad_check::{check_grad, GradCheckError};
