// src/graph.rs

use std::fmt;

use crate::autograd::BackwardOp;

/// Handle to a node stored in a [`Graph`] arena.
///
/// Handles are minted only by the owning graph and identify a node by its
/// slot, never by its value: two separately-constructed nodes with equal
/// values are distinct. Passing a handle to a graph that did not create it is
/// a caller logic error; the arena does not validate ownership and indexing
/// with a foreign handle panics or silently addresses the wrong node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// Handle to a softmax node group (one per `softmax` call).
///
/// All output nodes of one softmax call carry the same group handle; the
/// joint backward step is keyed by it, not by the member nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(usize);

impl GroupId {
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// One operand of a binary constructor: either an existing node or a bare
/// constant. Constants are promoted to fresh leaf nodes before the operation
/// is recorded, so `add(x, 5.0)` and `add(5.0, x)` both work.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand {
    Node(NodeId),
    Const(f64),
}

impl From<NodeId> for Operand {
    fn from(id: NodeId) -> Self {
        Operand::Node(id)
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Operand::Const(value)
    }
}

/// Record for one scalar node in the arena.
#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    /// The forward-computed scalar.
    pub(crate) value: f64,
    /// Additive gradient accumulator; contributions are summed, never
    /// overwritten, because a node may feed several downstream consumers.
    pub(crate) grad: f64,
    /// Operand handles, unique by identity and in operand order. Empty for
    /// leaves. Drives the backward traversal.
    pub(crate) parents: Vec<NodeId>,
    /// Tagged backward step: the op label plus whatever the gradient rule
    /// needs (operand handles, cached forward-time constants).
    pub(crate) op: BackwardOp,
}

/// Record for one softmax call: the ordered input handles and the output
/// handles produced for them. Owned by the graph's group table.
#[derive(Debug, Clone)]
pub(crate) struct SoftmaxGroup {
    pub(crate) inputs: Vec<NodeId>,
    pub(crate) outputs: Vec<NodeId>,
}

/// Arena holding a scalar computation graph.
///
/// `Graph` owns every node; user code holds plain `Copy` handles
/// ([`NodeId`]) into it. This replaces shared mutable node references:
/// parents are stored as handles, identity is the slot index, and the
/// backward scheduler's visited set is a plain boolean array indexed by
/// handle, so no identity-based hashing or reference cycles can arise.
///
/// Graphs are built eagerly as a side effect of calling the operation
/// constructors (there is no separate "build graph" phase) and are meant to
/// be rebuilt from scratch for every new forward evaluation; nothing is
/// cached across evaluations and nodes are never deleted.
#[derive(Debug, Default)]
pub struct Graph {
    nodes: Vec<NodeData>,
    groups: Vec<SoftmaxGroup>,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty graph with room for `nodes` nodes.
    pub fn with_capacity(nodes: usize) -> Self {
        Graph {
            nodes: Vec::with_capacity(nodes),
            groups: Vec::new(),
        }
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the graph holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Creates a leaf node from a literal value: zero gradient, no parents,
    /// no-op backward step.
    pub fn leaf(&mut self, value: f64) -> NodeId {
        self.record(value, Vec::new(), BackwardOp::Leaf)
    }

    /// The forward value of a node.
    pub fn value(&self, id: NodeId) -> f64 {
        self.nodes[id.index()].value
    }

    /// The accumulated gradient of a node (0.0 until a backward pass has
    /// deposited contributions into it).
    pub fn grad(&self, id: NodeId) -> f64 {
        self.nodes[id.index()].grad
    }

    /// The operand handles that produced a node; empty for leaves.
    pub fn parents(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].parents
    }

    /// Short diagnostic label of the operation that produced a node
    /// (empty string for leaves).
    pub fn op_symbol(&self, id: NodeId) -> &'static str {
        self.nodes[id.index()].op.symbol()
    }

    /// Borrowed diagnostic view of a node, printable via `Display`/`Debug`.
    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { graph: self, id }
    }

    // --- Internal arena plumbing ---

    /// Appends a node record and returns its handle. Duplicate parent
    /// handles are collapsed (parents are a set, unique by identity); the
    /// backward step still contributes once per operand.
    pub(crate) fn record(&mut self, value: f64, parents: Vec<NodeId>, op: BackwardOp) -> NodeId {
        let mut unique = Vec::with_capacity(parents.len());
        for parent in parents {
            if !unique.contains(&parent) {
                unique.push(parent);
            }
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            value,
            grad: 0.0,
            parents: unique,
            op,
        });
        id
    }

    /// Resolves an operand to a node handle, promoting a constant to a
    /// fresh leaf.
    pub(crate) fn promote(&mut self, operand: Operand) -> NodeId {
        match operand {
            Operand::Node(id) => id,
            Operand::Const(value) => self.leaf(value),
        }
    }

    pub(crate) fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }

    /// Accumulates `amount` into a node's gradient. Always `+=`: a node may
    /// receive contributions from several children.
    pub(crate) fn add_grad(&mut self, id: NodeId, amount: f64) {
        self.nodes[id.index()].grad += amount;
    }

    /// Overwrites a node's gradient; used only to seed the backward root.
    pub(crate) fn set_grad(&mut self, id: NodeId, value: f64) {
        self.nodes[id.index()].grad = value;
    }

    /// Opens a softmax group over `inputs`; the outputs are bound once they
    /// have been recorded (they need the group handle in their step).
    pub(crate) fn begin_group(&mut self, inputs: Vec<NodeId>) -> GroupId {
        let id = GroupId(self.groups.len());
        self.groups.push(SoftmaxGroup {
            inputs,
            outputs: Vec::new(),
        });
        id
    }

    pub(crate) fn finish_group(&mut self, group: GroupId, outputs: Vec<NodeId>) {
        self.groups[group.index()].outputs = outputs;
    }

    pub(crate) fn group(&self, group: GroupId) -> &SoftmaxGroup {
        &self.groups[group.index()]
    }
}

/// Borrowed view of one node, for diagnostics only.
pub struct NodeRef<'g> {
    graph: &'g Graph,
    id: NodeId,
}

impl NodeRef<'_> {
    pub fn value(&self) -> f64 {
        self.graph.value(self.id)
    }

    pub fn grad(&self) -> f64 {
        self.graph.grad(self.id)
    }

    pub fn op_symbol(&self) -> &'static str {
        self.graph.op_symbol(self.id)
    }
}

impl fmt::Display for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node(value={:?}, grad={:?})", self.value(), self.grad())
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Node(id={}, op={:?}, value={:?}, grad={:?}, parents={})",
            self.id.index(),
            self.op_symbol(),
            self.value(),
            self.grad(),
            self.graph.parents(self.id).len(),
        )
    }
}

// --- Tests ---
