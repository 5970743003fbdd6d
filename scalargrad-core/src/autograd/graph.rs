// src/autograd/graph.rs

use log::{debug, trace};

use crate::autograd::BackwardOp;
use crate::graph::{Graph, GroupId, NodeId};

/// Work-stack entry for the iterative depth-first traversal. `Enter` expands
/// a node's parents (or, for a softmax member, its whole group); the exit
/// entries append to the order once everything they depend on is placed.
enum Visit {
    Enter(NodeId),
    Exit(NodeId),
    ExitGroup(GroupId),
}

/// One entry of the replay plan: a single node's backward step, or the joint
/// step of a whole softmax group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Step {
    Node(NodeId),
    Group(GroupId),
}

/// Replay schedule for one backward pass over the subgraph reachable from a
/// root.
pub(crate) struct BackwardPlan {
    /// Steps in topological order: every node step appears after the steps
    /// producing its parents, and every group step appears after the steps
    /// producing the group's inputs. Softmax members never appear as node
    /// steps; they replay only through their group's single entry.
    pub(crate) order: Vec<Step>,
}

/// Builds the replay plan of the subgraph reachable from `root`, walking
/// parent edges with an explicit work stack (no recursion, so depth is
/// bounded by heap, not the call stack).
///
/// A softmax group is scheduled as one unit: reaching any member marks every
/// member visited, descends into all of the group's inputs, and appends a
/// single group step once they are placed. The group step therefore precedes
/// every consumer of every member in the emitted order — also when that
/// consumer belongs to another softmax group, whose own step then sorts
/// strictly later. Ordinary nodes emit in the post-order of a depth-first
/// walk that expands parents in operand order; the visited set is a plain
/// boolean array indexed by node handle.
pub(crate) fn build_plan(graph: &Graph, root: NodeId) -> BackwardPlan {
    let mut order = Vec::new();
    let mut visited = vec![false; graph.len()];
    let mut stack = vec![Visit::Enter(root)];

    while let Some(visit) = stack.pop() {
        match visit {
            Visit::Enter(id) => {
                if visited[id.index()] {
                    continue;
                }
                if let BackwardOp::Softmax { group } = graph.data(id).op {
                    let members = graph.group(group);
                    for &output in &members.outputs {
                        visited[output.index()] = true;
                    }
                    stack.push(Visit::ExitGroup(group));
                    for &input in members.inputs.iter().rev() {
                        if !visited[input.index()] {
                            stack.push(Visit::Enter(input));
                        }
                    }
                    continue;
                }
                visited[id.index()] = true;
                stack.push(Visit::Exit(id));
                // Parents go on the stack in reverse operand order so they
                // are expanded in operand order, which keeps the emitted
                // sequence identical to the recursive formulation.
                for &parent in graph.parents(id).iter().rev() {
                    if !visited[parent.index()] {
                        stack.push(Visit::Enter(parent));
                    }
                }
            }
            Visit::Exit(id) => {
                trace!("build_plan: position {} -> {:?}", order.len(), id);
                order.push(Step::Node(id));
            }
            Visit::ExitGroup(group) => {
                trace!("build_plan: position {} -> {:?}", order.len(), group);
                order.push(Step::Group(group));
            }
        }
    }

    BackwardPlan { order }
}

impl Graph {
    /// Runs a backward pass from `root`: seeds `root`'s gradient with `1.0`,
    /// then replays every plan entry in reverse topological order,
    /// accumulating `d(root)/d(node)` into each node's gradient.
    ///
    /// Gradients of nodes outside the reachable subgraph are untouched.
    /// Repeated calls keep accumulating into non-root gradients (the seed
    /// overwrites only the root), so rebuild the graph or account for the
    /// sums when differentiating more than once.
    ///
    /// A softmax group replays as a single entry placed before every
    /// consumer of every member in the topological order, so the reverse
    /// sweep drains all of those consumers first — a downstream softmax
    /// group included, since its own entry sorts later and is swept earlier.
    /// By the time a group's joint step reads its members' gradients they
    /// are final, and the step runs exactly once per pass.
    pub fn backward(&mut self, root: NodeId) {
        let plan = build_plan(self, root);
        debug!(
            "backward() from root {:?}: {} step(s) in the plan",
            root,
            plan.order.len()
        );
        self.set_grad(root, 1.0);
        for &step in plan.order.iter().rev() {
            match step {
                Step::Node(id) => self.apply_backward(id),
                Step::Group(group) => self.softmax_backward(group),
            }
        }
    }
}

// --- Tests ---
