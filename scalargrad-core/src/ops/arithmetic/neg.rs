// scalargrad-core/src/ops/arithmetic/neg.rs

use crate::graph::{Graph, NodeId, Operand};
use crate::ops::arithmetic::mul::mul_op;

// --- Forward Operation ---

/// Negates an operand. Derived: records `input * -1`, so the result carries
/// a multiplication step and the graph gains a `-1` leaf.
pub fn neg_op(graph: &mut Graph, input: impl Into<Operand>) -> NodeId {
    mul_op(graph, input, -1.0)
}

// --- Graph Method ---

impl Graph {
    pub fn neg(&mut self, input: impl Into<Operand>) -> NodeId {
        neg_op(self, input)
    }
}

// --- Tests ---

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_neg_forward() {
        let mut g = Graph::new();
        let x = g.leaf(2.0);
        let out = neg_op(&mut g, x);

        assert_relative_eq!(g.value(out), -2.0);
        // Derived from multiplication.
        assert_eq!(g.op_symbol(out), "*");
    }

    #[test]
    fn test_neg_backward() {
        let mut g = Graph::new();
        let x = g.leaf(2.0);
        let out = g.neg(x);

        g.backward(out);

        assert_relative_eq!(g.grad(x), -1.0);
    }

    #[test]
    fn test_neg_constant() {
        let mut g = Graph::new();
        let out = g.neg(3.0);
        assert_relative_eq!(g.value(out), -3.0);
    }

    #[test]
    fn test_neg_twice_round_trips() {
        let mut g = Graph::new();
        let x = g.leaf(1.5);
        let once = g.neg(x);
        let twice = g.neg(once);

        assert_relative_eq!(g.value(twice), 1.5);
        g.backward(twice);
        assert_relative_eq!(g.grad(x), 1.0);
    }
}
