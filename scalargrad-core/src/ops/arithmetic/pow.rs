// scalargrad-core/src/ops/arithmetic/pow.rs

use crate::autograd::BackwardOp;
use crate::error::ScalarGradError;
use crate::graph::{Graph, NodeId, Operand};

// --- Forward Operation ---

/// Raises `base` to `exponent` and records the result as a new node.
///
/// The exponent must be a constant: the derivative table only covers
/// `d(b^n)/db`, so a node exponent is rejected with
/// [`ScalarGradError::InvalidOperand`] before anything is recorded. A
/// constant base is promoted as usual. Raising zero to a negative power is
/// rejected with [`ScalarGradError::DivisionByZero`].
pub fn pow_op(
    graph: &mut Graph,
    base: impl Into<Operand>,
    exponent: impl Into<Operand>,
) -> Result<NodeId, ScalarGradError> {
    // Checked before the base is promoted so the rejected call leaves no
    // residue in the arena.
    let exponent = match exponent.into() {
        Operand::Const(n) => n,
        Operand::Node(_) => {
            return Err(ScalarGradError::InvalidOperand {
                operation: "pow".to_string(),
                reason: "exponent must be a constant, not a graph node".to_string(),
            });
        }
    };
    let base = graph.promote(base.into());
    let base_value = graph.value(base);
    if base_value == 0.0 && exponent < 0.0 {
        return Err(ScalarGradError::DivisionByZero {
            operation: "pow".to_string(),
        });
    }
    let value = base_value.powf(exponent);
    Ok(graph.record(value, vec![base], BackwardOp::Pow { base, exponent }))
}

// --- Graph Method ---

impl Graph {
    /// Records `base ^ exponent`; see [`pow_op`].
    pub fn pow(
        &mut self,
        base: impl Into<Operand>,
        exponent: impl Into<Operand>,
    ) -> Result<NodeId, ScalarGradError> {
        pow_op(self, base, exponent)
    }
}

// --- Tests ---
#[cfg(test)]
#[path = "pow_test.rs"]
mod tests;
