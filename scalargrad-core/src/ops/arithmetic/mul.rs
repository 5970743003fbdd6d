// scalargrad-core/src/ops/arithmetic/mul.rs

use crate::autograd::BackwardOp;
use crate::graph::{Graph, NodeId, Operand};

// --- Forward Operation ---

/// Multiplies two operands and records the product as a new node.
///
/// Constant operands are promoted to leaf nodes, as for
/// [`add_op`](super::add_op).
pub fn mul_op(
    graph: &mut Graph,
    lhs: impl Into<Operand>,
    rhs: impl Into<Operand>,
) -> NodeId {
    let lhs = graph.promote(lhs.into());
    let rhs = graph.promote(rhs.into());
    let value = graph.value(lhs) * graph.value(rhs);
    graph.record(value, vec![lhs, rhs], BackwardOp::Mul { lhs, rhs })
}

// --- Graph Method ---

impl Graph {
    /// Records `lhs * rhs`; see [`mul_op`].
    pub fn mul(&mut self, lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> NodeId {
        mul_op(self, lhs, rhs)
    }
}

// --- Tests ---

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mul_forward() {
        let mut g = Graph::new();
        let a = g.leaf(2.0);
        let b = g.leaf(3.0);
        let out = mul_op(&mut g, a, b);

        assert_relative_eq!(g.value(out), 6.0);
        assert_eq!(g.op_symbol(out), "*");
    }

    #[test]
    fn test_mul_backward_swaps_operand_values() {
        let mut g = Graph::new();
        let a = g.leaf(2.0);
        let b = g.leaf(3.0);
        let out = g.mul(a, b);

        g.backward(out);

        assert_relative_eq!(g.grad(a), 3.0);
        assert_relative_eq!(g.grad(b), 2.0);
    }

    #[test]
    fn test_mul_by_constant() {
        let mut g = Graph::new();
        let x = g.leaf(2.5);
        let out = g.mul(x, 4.0);

        assert_relative_eq!(g.value(out), 10.0);
        g.backward(out);
        assert_relative_eq!(g.grad(x), 4.0);
    }

    #[test]
    fn test_mul_same_node_differentiates_as_square() {
        let mut g = Graph::new();
        let x = g.leaf(3.0);
        let out = g.mul(x, x);

        g.backward(out);

        assert_relative_eq!(g.value(out), 9.0);
        // d(x^2)/dx = 2x
        assert_relative_eq!(g.grad(x), 6.0);
    }
}
