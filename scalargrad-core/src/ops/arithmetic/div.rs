// scalargrad-core/src/ops/arithmetic/div.rs

use crate::error::ScalarGradError;
use crate::graph::{Graph, NodeId, Operand};
use crate::ops::arithmetic::{mul::mul_op, pow::pow_op};

// --- Forward Operation ---

/// Divides `lhs` by `rhs`. Derived: records `lhs * rhs^-1`, reusing the
/// multiplication and power gradient rules.
///
/// A divisor whose forward value is zero is rejected with
/// [`ScalarGradError::DivisionByZero`] before the reciprocal is recorded.
pub fn div_op(
    graph: &mut Graph,
    lhs: impl Into<Operand>,
    rhs: impl Into<Operand>,
) -> Result<NodeId, ScalarGradError> {
    let rhs = graph.promote(rhs.into());
    if graph.value(rhs) == 0.0 {
        return Err(ScalarGradError::DivisionByZero {
            operation: "div".to_string(),
        });
    }
    let inverse = pow_op(graph, rhs, -1.0)?;
    Ok(mul_op(graph, lhs, inverse))
}

// --- Graph Method ---

impl Graph {
    /// Records `lhs / rhs`; see [`div_op`].
    pub fn div(
        &mut self,
        lhs: impl Into<Operand>,
        rhs: impl Into<Operand>,
    ) -> Result<NodeId, ScalarGradError> {
        div_op(self, lhs, rhs)
    }
}

// --- Tests ---
