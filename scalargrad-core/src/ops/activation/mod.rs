// src/ops/activation/mod.rs

//! # Activation Functions
//!
//! Non-linear activations recorded as graph nodes like any other operation.
//!
//! ## Currently Implemented:
//! - [`relu`](relu::relu_op): Rectified Linear Unit.
//! - [`tanh`](tanh::tanh_op): Hyperbolic tangent.
//! - [`softmax`](softmax::softmax_op): Normalized exponentials over a group
//!   of nodes, the one multi-output operation.

pub mod relu;
pub mod softmax;
pub mod tanh;

// Re-export key functions
pub use relu::relu_op;
pub use softmax::softmax_op;
pub use tanh::tanh_op;
