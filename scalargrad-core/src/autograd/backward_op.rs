//! Tagged backward steps and their gradient rules.
//!
//! Every node carries one [`BackwardOp`] recorded at construction time. A
//! step is a plain `Copy` value holding the operand handles plus whatever
//! forward-time constants the gradient rule needs (the `pow` exponent, the
//! cached `tanh` output, the softmax group handle); there are no captured
//! closures or per-op trait objects. The whole derivative table lives in one
//! `match` in `Graph::apply_backward`, so adding an operation means adding
//! a variant and an arm.

use log::trace;

use crate::graph::{Graph, GroupId, NodeId};

/// Backward step of a node: which rule to run and what it reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackwardOp {
    /// Leaf node; nothing to propagate.
    Leaf,
    /// `out = lhs + rhs`
    Add { lhs: NodeId, rhs: NodeId },
    /// `out = lhs * rhs`
    Mul { lhs: NodeId, rhs: NodeId },
    /// `out = base ^ exponent`, exponent a forward-time constant.
    Pow { base: NodeId, exponent: f64 },
    /// `out = max(0, input)`
    Relu { input: NodeId },
    /// `out = tanh(input)`; `output` is the forward result, cached so the
    /// rule is `(1 - output^2)` without recomputing the hyperbolic.
    Tanh { input: NodeId, output: f64 },
    /// One output of a softmax call. The joint rule runs once per group,
    /// keyed by the group handle; see `Graph::softmax_backward`.
    Softmax { group: GroupId },
}

impl BackwardOp {
    /// Short diagnostic label, matching the operation constructors.
    pub fn symbol(&self) -> &'static str {
        match self {
            BackwardOp::Leaf => "",
            BackwardOp::Add { .. } => "+",
            BackwardOp::Mul { .. } => "*",
            BackwardOp::Pow { .. } => "**",
            BackwardOp::Relu { .. } => "ReLU",
            BackwardOp::Tanh { .. } => "tanh",
            BackwardOp::Softmax { .. } => "softmax",
        }
    }
}

// --- Backward Dispatch ---

impl Graph {
    /// Runs the backward step of `id`, accumulating `id`'s gradient into its
    /// operands. Forward values are read-only during the sweep, so operand
    /// values here are exactly the forward-time ones.
    ///
    /// For [`BackwardOp::Softmax`] this delegates to the joint rule of the
    /// node's whole group. The replay plan schedules groups through entries
    /// of their own rather than through member nodes, which is what keeps
    /// the rule at one invocation per pass.
    pub(crate) fn apply_backward(&mut self, id: NodeId) {
        let out_grad = self.grad(id);
        let op = self.data(id).op;
        trace!(
            "apply_backward: node={:?} op={:?} out_grad={}",
            id,
            op.symbol(),
            out_grad
        );
        match op {
            BackwardOp::Leaf => {}
            BackwardOp::Add { lhs, rhs } => {
                // d(l + r)/dl = 1, d(l + r)/dr = 1. When lhs == rhs the two
                // contributions still land separately, giving 2 * out_grad.
                self.add_grad(lhs, out_grad);
                self.add_grad(rhs, out_grad);
            }
            BackwardOp::Mul { lhs, rhs } => {
                // d(l * r)/dl = r, d(l * r)/dr = l.
                let l = self.value(lhs);
                let r = self.value(rhs);
                self.add_grad(lhs, r * out_grad);
                self.add_grad(rhs, l * out_grad);
            }
            BackwardOp::Pow { base, exponent } => {
                // d(b^n)/db = n * b^(n-1). IEEE semantics apply: the rule can
                // produce a non-finite gradient (e.g. 0.0^0.5 forwards fine
                // but differentiates to infinity at zero).
                let b = self.value(base);
                self.add_grad(base, exponent * b.powf(exponent - 1.0) * out_grad);
            }
            BackwardOp::Relu { input } => {
                // Passes the gradient only where the input is strictly
                // positive; at exactly zero the subgradient is zero.
                if self.value(input) > 0.0 {
                    self.add_grad(input, out_grad);
                }
            }
            BackwardOp::Tanh { input, output } => {
                self.add_grad(input, (1.0 - output * output) * out_grad);
            }
            BackwardOp::Softmax { group } => self.softmax_backward(group),
        }
    }

    /// Joint softmax backward: one Jacobian-vector product over the whole
    /// group, reading every output's accumulated gradient and depositing
    /// into every input.
    ///
    /// For outputs `s` and upstream gradients `g`, input `j` receives
    /// `sum_i g[i] * s[i] * (delta_ij - s[j])`. Inputs listed more than once
    /// receive one contribution per position, as for repeated operands of
    /// the binary operations.
    pub(crate) fn softmax_backward(&mut self, group: GroupId) {
        let members = self.group(group).clone();
        let outs: Vec<(f64, f64)> = members
            .outputs
            .iter()
            .map(|&out| (self.value(out), self.grad(out)))
            .collect();
        for (j, &input) in members.inputs.iter().enumerate() {
            let s_j = outs[j].0;
            let mut contribution = 0.0;
            for (i, &(s_i, g_i)) in outs.iter().enumerate() {
                if i == j {
                    contribution += g_i * s_i * (1.0 - s_j);
                } else {
                    contribution -= g_i * s_i * s_j;
                }
            }
            self.add_grad(input, contribution);
        }
    }
}

// --- Tests ---

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_add_step_accumulates_into_both_operands() {
        let mut g = Graph::new();
        let a = g.leaf(1.0);
        let b = g.leaf(2.0);
        let out = g.record(3.0, vec![a, b], BackwardOp::Add { lhs: a, rhs: b });

        g.set_grad(out, 2.0);
        g.apply_backward(out);

        assert_relative_eq!(g.grad(a), 2.0);
        assert_relative_eq!(g.grad(b), 2.0);
    }

    #[test]
    fn test_add_step_with_repeated_operand_contributes_twice() {
        let mut g = Graph::new();
        let x = g.leaf(3.0);
        let out = g.record(6.0, vec![x, x], BackwardOp::Add { lhs: x, rhs: x });

        g.set_grad(out, 1.0);
        g.apply_backward(out);

        assert_relative_eq!(g.grad(x), 2.0);
    }

    #[test]
    fn test_mul_step_uses_forward_values() {
        let mut g = Graph::new();
        let a = g.leaf(3.0);
        let b = g.leaf(4.0);
        let out = g.record(12.0, vec![a, b], BackwardOp::Mul { lhs: a, rhs: b });

        g.set_grad(out, 1.0);
        g.apply_backward(out);

        assert_relative_eq!(g.grad(a), 4.0);
        assert_relative_eq!(g.grad(b), 3.0);
    }

    #[test]
    fn test_pow_step_uses_cached_exponent() {
        let mut g = Graph::new();
        let b = g.leaf(2.0);
        let out = g.record(
            8.0,
            vec![b],
            BackwardOp::Pow {
                base: b,
                exponent: 3.0,
            },
        );

        g.set_grad(out, 1.0);
        g.apply_backward(out);

        // d(b^3)/db = 3 * b^2 = 12 at b = 2.
        assert_relative_eq!(g.grad(b), 12.0);
    }

    #[test]
    fn test_relu_step_gates_on_input_sign() {
        let mut g = Graph::new();
        let x = g.leaf(-1.0);
        let out = g.record(0.0, vec![x], BackwardOp::Relu { input: x });

        g.set_grad(out, 5.0);
        g.apply_backward(out);

        assert_relative_eq!(g.grad(x), 0.0);
    }

    #[test]
    fn test_tanh_step_uses_cached_output() {
        let mut g = Graph::new();
        let x = g.leaf(0.0);
        let out = g.record(
            0.0,
            vec![x],
            BackwardOp::Tanh {
                input: x,
                output: 0.0,
            },
        );

        g.set_grad(out, 1.0);
        g.apply_backward(out);

        // tanh'(0) = 1 - tanh(0)^2 = 1.
        assert_relative_eq!(g.grad(x), 1.0);
    }

    #[test]
    fn test_softmax_step_delegates_to_the_joint_rule() {
        let mut g = Graph::new();
        let x0 = g.leaf(1.0);
        let x1 = g.leaf(2.0);
        let group = g.begin_group(vec![x0, x1]);
        let s0 = g.record(0.3, vec![x0], BackwardOp::Softmax { group });
        let s1 = g.record(0.7, vec![x1], BackwardOp::Softmax { group });
        g.finish_group(group, vec![s0, s1]);

        g.set_grad(s0, 1.0);
        g.apply_backward(s0);

        // A single invocation folds the whole Jacobian-vector product.
        assert_relative_eq!(g.grad(x0), 0.3 * (1.0 - 0.3));
        assert_relative_eq!(g.grad(x1), -0.3 * 0.7);
    }

    #[test]
    fn test_leaf_step_is_a_no_op() {
        let mut g = Graph::new();
        let x = g.leaf(1.0);
        g.set_grad(x, 1.0);
        g.apply_backward(x);
        assert_relative_eq!(g.grad(x), 1.0);
    }
}
