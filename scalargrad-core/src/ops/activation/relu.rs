// scalargrad-core/src/ops/activation/relu.rs

use crate::autograd::BackwardOp;
use crate::graph::{Graph, NodeId};

// --- Forward Operation ---

/// Applies the Rectified Linear Unit activation: `relu(x) = max(0, x)`.
///
/// The gradient gate is strict: only a strictly positive input passes the
/// upstream gradient through, so at exactly zero the subgradient is zero.
pub fn relu_op(graph: &mut Graph, input: NodeId) -> NodeId {
    let value = graph.value(input).max(0.0);
    graph.record(value, vec![input], BackwardOp::Relu { input })
}

// --- Graph Method ---

impl Graph {
    pub fn relu(&mut self, input: NodeId) -> NodeId {
        relu_op(self, input)
    }
}

// --- Tests ---
