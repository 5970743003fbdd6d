use scalargrad_core::{Graph, NodeId};

// Helper to seed a graph with one leaf per value.
// Added allow(dead_code) because usage across different test crates isn't detected easily.
#[allow(dead_code)]
pub(crate) fn leaves(g: &mut Graph, values: &[f64]) -> Vec<NodeId> {
    values.iter().map(|&v| g.leaf(v)).collect()
}
