//! Read-only node metadata registry used for runtime routing decisions.
//!
//! A [`NodeRegistry`] is a lightweight snapshot of a graph's node
//! metadata, built once immediately after the graph builder succeeds and
//! treated as immutable for the lifetime of a run. It deliberately holds
//! [`NodeInfo`] records rather than full nodes so that execution details
//! (prompts, edges, field lists) can never leak into the selection
//! algorithm.
//!
//! Filtering produces a new subset registry and never mutates the source,
//! so one registry can safely serve many concurrent runs.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::graphs::Graph;

/// Metadata describing one selectable node.
///
/// This is everything the selection algorithm may see: the node's name,
/// its agent type tag (treated as a capability tag for filtering), its
/// free-text description, and its declared keywords.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInfo {
    /// Node name, unique within the graph.
    pub name: String,
    /// Agent type tag; doubles as the capability tag for filtering.
    pub agent_type: String,
    /// Free-text description from the tabular definition.
    pub description: String,
    /// Declared selection keywords.
    pub keywords: Vec<String>,
}

/// Immutable, per-graph snapshot of node metadata for selection.
///
/// Entries keep the graph's deterministic node order; the selection
/// algorithm relies on that order for tie-breaking.
///
/// # Examples
///
/// ```rust
/// use rowloom::graphs::GraphBuilder;
/// use rowloom::registry::NodeRegistry;
/// use rowloom::tabular::RowRecord;
///
/// let rows = vec![
///     RowRecord::new("support", "billing", "specialist")
///         .with_description("Refunds, invoices, charges"),
///     RowRecord::new("support", "shipping", "specialist")
///         .with_description("Parcel tracking and delivery"),
/// ];
/// let graphs = GraphBuilder::new().build(&rows).unwrap();
/// let registry = NodeRegistry::from_graph(graphs.graph("support").unwrap());
///
/// assert_eq!(registry.len(), 2);
/// let subset = registry.with_allowed_names(&["billing".to_string()]);
/// assert_eq!(subset.len(), 1);
/// assert_eq!(registry.len(), 2); // source untouched
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeRegistry {
    entries: Arc<Vec<NodeInfo>>,
}

impl NodeRegistry {
    /// Snapshot a graph's node metadata in node order.
    #[must_use]
    pub fn from_graph(graph: &Graph) -> Self {
        let entries = graph
            .nodes()
            .iter()
            .map(|node| NodeInfo {
                name: node.name.clone(),
                agent_type: node.agent_type.clone(),
                description: node.description.clone(),
                keywords: node.keywords(),
            })
            .collect();
        Self {
            entries: Arc::new(entries),
        }
    }

    /// Build a registry directly from entries, preserving their order.
    #[must_use]
    pub fn from_entries(entries: Vec<NodeInfo>) -> Self {
        Self {
            entries: Arc::new(entries),
        }
    }

    /// All entries, in deterministic node order.
    #[must_use]
    pub fn entries(&self) -> &[NodeInfo] {
        &self.entries
    }

    /// Look up a single entry by node name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&NodeInfo> {
        self.entries.iter().find(|info| info.name == name)
    }

    /// Returns `true` if an entry with the given name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the registry holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Subset view keeping only nodes with the given capability tag.
    #[must_use]
    pub fn with_capability(&self, agent_type: &str) -> Self {
        self.filtered(|info| info.agent_type == agent_type)
    }

    /// Subset view keeping only explicitly allowed node names.
    ///
    /// Order follows the registry, not the allow-list, so tie-breaking
    /// stays deterministic regardless of how callers assemble the list.
    #[must_use]
    pub fn with_allowed_names(&self, names: &[String]) -> Self {
        self.filtered(|info| names.contains(&info.name))
    }

    fn filtered(&self, keep: impl Fn(&NodeInfo) -> bool) -> Self {
        Self {
            entries: Arc::new(self.entries.iter().filter(|e| keep(e)).cloned().collect()),
        }
    }
}
