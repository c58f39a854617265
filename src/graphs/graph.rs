//! Immutable graph model produced by the builder.
//!
//! A [`Graph`] owns its nodes by value in row order and resolves edge
//! targets by name lookup, so cycles are just strings pointing backwards.
//! [`GraphSet`] collects every graph defined by one tabular source.
//! [`GraphDescription`] is the read-only projection served by the
//! `describe` entry point for external tooling.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::node::Node;

/// An immutable workflow graph.
///
/// Nodes are stored in a `Vec` in first-seen row order with a name → slot
/// index for lookup; iteration order is therefore deterministic, which
/// the selection algorithm relies on for tie-breaking.
///
/// Unreachable nodes are allowed (shared error handlers referenced only
/// via dynamic routing); the entry node is guaranteed to exist.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    name: String,
    nodes: Vec<Node>,
    index: FxHashMap<String, usize>,
    entry: String,
}

impl Graph {
    /// Internal (crate) factory used by the builder once invariants hold.
    pub(crate) fn from_parts(name: String, nodes: Vec<Node>, entry: String) -> Self {
        let index = nodes
            .iter()
            .enumerate()
            .map(|(slot, node)| (node.name.clone(), slot))
            .collect();
        Self {
            name,
            nodes,
            index,
            entry,
        }
    }

    /// The graph's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the designated entry node.
    #[must_use]
    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Nodes in first-seen row order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Look up a node by name.
    #[must_use]
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.index.get(name).map(|slot| &self.nodes[*slot])
    }

    /// Slot of a node in [`nodes`](Self::nodes) order.
    pub(crate) fn slot(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Returns `true` if a node with the given name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of nodes in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Build the read-only description served by `describe`.
    ///
    /// Calling this twice with no intervening mutation (there is none:
    /// the graph is immutable) yields identical structures.
    #[must_use]
    pub fn describe(&self) -> GraphDescription {
        GraphDescription {
            name: self.name.clone(),
            entry: self.entry.clone(),
            nodes: self.nodes.iter().map(|n| n.name.clone()).collect(),
            edges: self
                .nodes
                .iter()
                .flat_map(|n| {
                    let mut outgoing: Vec<_> = n
                        .edges
                        .iter()
                        .map(|(label, target)| EdgeDescription {
                            from: n.name.clone(),
                            label: label.encode(),
                            to: target.clone(),
                        })
                        .collect();
                    // FxHashMap iteration order is arbitrary; sort for stable output.
                    outgoing.sort_by(|a, b| a.label.cmp(&b.label));
                    outgoing
                })
                .collect(),
        }
    }
}

/// All graphs defined by one tabular source, in first-seen order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSet {
    graphs: Vec<Graph>,
}

impl GraphSet {
    pub(crate) fn from_graphs(graphs: Vec<Graph>) -> Self {
        Self { graphs }
    }

    /// Look up a graph by name.
    #[must_use]
    pub fn graph(&self, name: &str) -> Option<&Graph> {
        self.graphs.iter().find(|g| g.name() == name)
    }

    /// Graphs in first-seen order.
    #[must_use]
    pub fn graphs(&self) -> &[Graph] {
        &self.graphs
    }

    /// Names of all graphs, in first-seen order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.graphs.iter().map(Graph::name).collect()
    }

    /// Number of graphs in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    /// Returns `true` if no graphs were defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }
}

/// One edge in a [`GraphDescription`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeDescription {
    /// Source node name.
    pub from: String,
    /// Encoded outcome label.
    pub label: String,
    /// Target node name.
    pub to: String,
}

/// Read-only structural view of a graph for external tooling.
///
/// Served by the `describe` entry point; contains names only, never agent
/// handles or prompts, so it is safe to hand to debugging/visualization
/// layers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDescription {
    /// Graph name.
    pub name: String,
    /// Entry node name.
    pub entry: String,
    /// Node names in first-seen row order.
    pub nodes: Vec<String>,
    /// Every declared edge, grouped by source node in node order.
    pub edges: Vec<EdgeDescription>,
}
