// scalargrad-core/src/ops/arithmetic/add.rs

use crate::autograd::BackwardOp;
use crate::graph::{Graph, NodeId, Operand};

// --- Forward Operation ---

/// Adds two operands and records the sum as a new node.
///
/// Bare `f64` operands are promoted to fresh leaf nodes, so a constant works
/// on either side: `add_op(g, x, 5.0)` and `add_op(g, 5.0, x)` are both
/// valid and differentiate the same way.
pub fn add_op(
    graph: &mut Graph,
    lhs: impl Into<Operand>,
    rhs: impl Into<Operand>,
) -> NodeId {
    let lhs = graph.promote(lhs.into());
    let rhs = graph.promote(rhs.into());
    let value = graph.value(lhs) + graph.value(rhs);
    graph.record(value, vec![lhs, rhs], BackwardOp::Add { lhs, rhs })
}

// --- Graph Method ---

impl Graph {
    /// Records `lhs + rhs`; see [`add_op`].
    pub fn add(&mut self, lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> NodeId {
        add_op(self, lhs, rhs)
    }
}

// --- Tests ---

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_add_forward() {
        let mut g = Graph::new();
        let a = g.leaf(2.0);
        let b = g.leaf(3.0);
        let out = add_op(&mut g, a, b);

        assert_relative_eq!(g.value(out), 5.0);
        assert_eq!(g.parents(out), &[a, b]);
        assert_eq!(g.op_symbol(out), "+");
    }

    #[test]
    fn test_add_backward() {
        let mut g = Graph::new();
        let a = g.leaf(2.0);
        let b = g.leaf(3.0);
        let out = g.add(a, b);

        g.backward(out);

        assert_relative_eq!(g.grad(a), 1.0);
        assert_relative_eq!(g.grad(b), 1.0);
        assert_relative_eq!(g.grad(out), 1.0);
    }

    #[test]
    fn test_add_constant_on_either_side() {
        let mut g = Graph::new();
        let x = g.leaf(2.0);
        let left = g.add(5.0, x);
        let right = g.add(x, 5.0);

        assert_relative_eq!(g.value(left), 7.0);
        assert_relative_eq!(g.value(right), 7.0);

        g.backward(left);
        assert_relative_eq!(g.grad(x), 1.0);
    }

    #[test]
    fn test_add_same_node_doubles_gradient() {
        let mut g = Graph::new();
        let x = g.leaf(3.0);
        let out = g.add(x, x);

        g.backward(out);

        assert_relative_eq!(g.value(out), 6.0);
        assert_relative_eq!(g.grad(x), 2.0);
    }
}
