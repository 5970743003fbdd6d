//! # Scalar Operations Module (`ops`)
//!
//! This module is the central hub for the differentiable scalar operations.
//! Operations are grouped into submodules by functionality.
//!
//! ## Structure:
//!
//! - **`_op` Functions:** Each operation has a core function (named `xxx_op`)
//!   that computes the forward value, promotes constant operands to leaf
//!   nodes where allowed, and records the node with its tagged
//!   [`BackwardOp`](crate::autograd::BackwardOp) step. Graph construction is
//!   eager: calling an `_op` function is what builds the graph.
//! - **Graph Methods:** Each `_op` function has a thin forwarding method on
//!   [`Graph`](crate::graph::Graph) (e.g. `graph.add(a, b)`), defined next
//!   to the function it wraps.
//! - **Gradient Rules:** The backward logic does not live here; every rule
//!   is an arm of the dispatcher in [`crate::autograd::backward_op`].
//!
//! ## Key Submodules:
//!
//! - [`arithmetic`]: add, sub, mul, div, neg, pow.
//! - [`activation`]: relu, tanh, softmax.

pub mod activation;
pub mod arithmetic;
