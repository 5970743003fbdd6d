// scalargrad-core/src/ops/activation/tanh.rs

use crate::autograd::BackwardOp;
use crate::graph::{Graph, NodeId};

// --- Forward Operation ---

/// Applies the hyperbolic tangent activation.
///
/// The forward result is cached in the backward step, so the gradient rule
/// `1 - tanh(x)^2` reuses it instead of evaluating the hyperbolic again.
pub fn tanh_op(graph: &mut Graph, input: NodeId) -> NodeId {
    let output = graph.value(input).tanh();
    graph.record(output, vec![input], BackwardOp::Tanh { input, output })
}

// --- Graph Method ---

impl Graph {
    pub fn tanh(&mut self, input: NodeId) -> NodeId {
        tanh_op(self, input)
    }
}

// --- Tests ---

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_tanh_forward() {
        let mut g = Graph::new();
        let zero = g.leaf(0.0);
        let one = g.leaf(1.0);

        let a = tanh_op(&mut g, zero);
        let b = tanh_op(&mut g, one);

        assert_relative_eq!(g.value(a), 0.0);
        assert_relative_eq!(g.value(b), 1.0_f64.tanh());
        assert_eq!(g.op_symbol(b), "tanh");
    }

    #[test]
    fn test_tanh_saturates_at_large_inputs() {
        let mut g = Graph::new();
        let x = g.leaf(20.0);
        let out = g.tanh(x);

        assert_relative_eq!(g.value(out), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_tanh_backward_at_zero_is_one() {
        let mut g = Graph::new();
        let x = g.leaf(0.0);
        let out = g.tanh(x);

        g.backward(out);

        assert_relative_eq!(g.grad(x), 1.0);
    }

    #[test]
    fn test_tanh_backward_uses_forward_value() {
        let mut g = Graph::new();
        let x = g.leaf(0.5);
        let out = g.tanh(x);

        g.backward(out);

        let t = g.value(out);
        assert_relative_eq!(g.grad(x), 1.0 - t * t);
    }
}
