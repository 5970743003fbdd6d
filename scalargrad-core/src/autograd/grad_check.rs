use log::trace;
use thiserror::Error;

use crate::error::ScalarGradError;
use crate::graph::{Graph, NodeId};

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input at index {input_index}: Analytical grad {analytical_grad:?} != Numerical grad {numerical_grad:?}. Difference: {difference:?}")]
    GradientMismatch {
        input_index: usize,
        analytical_grad: f64,
        numerical_grad: f64,
        difference: f64,
    },

    #[error("Graph construction failed during gradient check: {0}")]
    BuildError(ScalarGradError),

    #[error("Numerical gradient is NaN or infinite for input {input_index}. Details: Loss+: {loss_plus:?}, Loss-: {loss_minus:?}")]
    NumericalGradNaNOrInfinite {
        input_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },

    #[error("Analytical gradient is NaN or infinite for input {input_index}. Value: {value:?}")]
    AnalyticalGradNaNOrInfinite { input_index: usize, value: f64 },
}

impl From<ScalarGradError> for GradCheckError {
    fn from(err: ScalarGradError) -> Self {
        GradCheckError::BuildError(err)
    }
}

/// Checks analytical gradients against numerical gradients using central
/// finite differences.
///
/// `func` receives a fresh graph and one leaf per entry of `inputs` and
/// returns the root node of the expression under test; it runs once for the
/// analytical pass and twice more per input for the `f(x + eps)` /
/// `f(x - eps)` evaluations, so it must be deterministic in its inputs.
///
/// A gradient is rejected when it differs from the numerical estimate both
/// absolutely and relative to the analytical magnitude by more than
/// `tolerance`.
pub fn check_grad<F>(
    func: F,
    inputs: &[f64],
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError>
where
    F: Fn(&mut Graph, &[NodeId]) -> Result<NodeId, ScalarGradError>,
{
    // --- Analytical Pass ---
    let mut graph = Graph::new();
    let leaves: Vec<NodeId> = inputs.iter().map(|&v| graph.leaf(v)).collect();
    let output = func(&mut graph, &leaves)?;
    graph.backward(output);
    let analytical_grads: Vec<f64> = leaves.iter().map(|&leaf| graph.grad(leaf)).collect();

    // --- Numerical Passes ---
    for (i, &analytical_grad) in analytical_grads.iter().enumerate() {
        let loss_plus = {
            let mut perturbed = inputs.to_vec();
            perturbed[i] += epsilon;
            eval_forward(&func, &perturbed)?
        };
        let loss_minus = {
            let mut perturbed = inputs.to_vec();
            perturbed[i] -= epsilon;
            eval_forward(&func, &perturbed)?
        };
        let numerical_grad = (loss_plus - loss_minus) / (2.0 * epsilon);
        trace!(
            "check_grad: input {} analytical={} numerical={}",
            i,
            analytical_grad,
            numerical_grad
        );

        if numerical_grad.is_nan() || numerical_grad.is_infinite() {
            return Err(GradCheckError::NumericalGradNaNOrInfinite {
                input_index: i,
                loss_plus,
                loss_minus,
            });
        }
        if analytical_grad.is_nan() || analytical_grad.is_infinite() {
            return Err(GradCheckError::AnalyticalGradNaNOrInfinite {
                input_index: i,
                value: analytical_grad,
            });
        }

        let difference = (analytical_grad - numerical_grad).abs();
        if difference > tolerance && (difference / (analytical_grad.abs() + epsilon)) > tolerance {
            return Err(GradCheckError::GradientMismatch {
                input_index: i,
                analytical_grad,
                numerical_grad,
                difference,
            });
        }
    }

    Ok(())
}

/// Rebuilds the expression on a fresh graph and returns its forward value.
fn eval_forward<F>(func: &F, inputs: &[f64]) -> Result<f64, GradCheckError>
where
    F: Fn(&mut Graph, &[NodeId]) -> Result<NodeId, ScalarGradError>,
{
    let mut graph = Graph::new();
    let leaves: Vec<NodeId> = inputs.iter().map(|&v| graph.leaf(v)).collect();
    let output = func(&mut graph, &leaves)?;
    Ok(graph.value(output))
}

// --- Tests ---
