// scalargrad-core/src/ops/arithmetic/sub.rs

use crate::graph::{Graph, NodeId, Operand};
use crate::ops::arithmetic::{add::add_op, neg::neg_op};

// --- Forward Operation ---

/// Subtracts `rhs` from `lhs`. Derived: records `lhs + (rhs * -1)`, so no
/// dedicated subtraction step exists in the derivative table.
pub fn sub_op(
    graph: &mut Graph,
    lhs: impl Into<Operand>,
    rhs: impl Into<Operand>,
) -> NodeId {
    let negated = neg_op(graph, rhs);
    add_op(graph, lhs, negated)
}

// --- Graph Method ---

impl Graph {
    pub fn sub(&mut self, lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> NodeId {
        sub_op(self, lhs, rhs)
    }
}

// --- Tests ---
