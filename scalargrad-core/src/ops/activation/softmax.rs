// scalargrad-core/src/ops/activation/softmax.rs

use crate::autograd::BackwardOp;
use crate::error::ScalarGradError;
use crate::graph::{Graph, NodeId};

// --- Forward Operation ---

/// Applies softmax over a sequence of nodes, producing one output node per
/// input: `out[i] = exp(x[i]) / sum_k exp(x[k])`.
///
/// Inputs are shifted by their maximum before exponentiating, so large
/// values normalize without overflowing; the shift cancels in the quotient.
///
/// This is the one multi-output operation. Each output node records only its
/// own input as parent, which keeps the graph sparse, but the outputs are
/// coupled through the normalizing sum: the true Jacobian is dense. All
/// outputs therefore share one group registered in the graph's side table,
/// and the backward pass runs the joint rule for the whole group exactly
/// once (see `Graph::softmax_backward`).
///
/// An empty input sequence is rejected with
/// [`ScalarGradError::EmptyInput`].
pub fn softmax_op(graph: &mut Graph, inputs: &[NodeId]) -> Result<Vec<NodeId>, ScalarGradError> {
    if inputs.is_empty() {
        return Err(ScalarGradError::EmptyInput {
            operation: "softmax".to_string(),
        });
    }

    let values: Vec<f64> = inputs.iter().map(|&id| graph.value(id)).collect();
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = values.iter().map(|&v| (v - max).exp()).collect();
    let sum: f64 = exps.iter().sum();

    let group = graph.begin_group(inputs.to_vec());
    let outputs: Vec<NodeId> = inputs
        .iter()
        .zip(exps.iter())
        .map(|(&input, &e)| graph.record(e / sum, vec![input], BackwardOp::Softmax { group }))
        .collect();
    graph.finish_group(group, outputs.clone());
    Ok(outputs)
}

// --- Graph Method ---

impl Graph {
    /// Records softmax over `inputs`; see [`softmax_op`].
    pub fn softmax(&mut self, inputs: &[NodeId]) -> Result<Vec<NodeId>, ScalarGradError> {
        softmax_op(self, inputs)
    }
}

// --- Tests ---
#[cfg(test)]
#[path = "softmax_test.rs"]
mod tests;
