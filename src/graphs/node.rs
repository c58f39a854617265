//! Node definitions inside a workflow graph.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::types::EdgeLabel;

/// A single node of a workflow graph.
///
/// Nodes are plain data, immutable once the graph is built: the executable
/// behavior lives in the agent resolved from `agent_type` at bind time.
/// `description` and `metadata` exist only for node selection and are
/// never consulted during execution.
///
/// Outgoing edges are keyed by [`EdgeLabel`] and reference target nodes by
/// name; targets are resolved by lookup in the owning [`Graph`], never by
/// pointer, so cyclic graphs need no special ownership handling.
///
/// [`Graph`]: crate::graphs::Graph
///
/// # Examples
///
/// ```rust
/// use rowloom::graphs::Node;
/// use rowloom::types::EdgeLabel;
///
/// let node = Node::new("triage", "orchestrator")
///     .with_edge(EdgeLabel::Success, "resolve")
///     .with_input_fields(vec!["ticket_text".into()])
///     .with_output_fields(vec!["routed_to".into()]);
///
/// assert_eq!(node.edge(&EdgeLabel::Success), Some("resolve"));
/// assert!(node.edge(&EdgeLabel::Failure).is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique name within the owning graph.
    pub name: String,
    /// Agent type tag; resolved externally to an executable capability.
    pub agent_type: String,
    /// Prompt template handed to the node's agent.
    pub prompt: String,
    /// Ordered state keys the node's agent may read.
    pub input_fields: Vec<String>,
    /// Ordered state keys the node's agent may write.
    pub output_fields: Vec<String>,
    /// Outgoing edges: outcome label → target node name.
    pub edges: FxHashMap<EdgeLabel, String>,
    /// Free text used only for node selection.
    pub description: String,
    /// Key-value pairs used only for node selection.
    pub metadata: FxHashMap<String, String>,
}

impl Node {
    /// Create a node with the given name and agent type.
    #[must_use]
    pub fn new(name: &str, agent_type: &str) -> Self {
        Self {
            name: name.to_string(),
            agent_type: agent_type.to_string(),
            ..Default::default()
        }
    }

    /// Add an outgoing edge.
    #[must_use]
    pub fn with_edge(mut self, label: EdgeLabel, target: &str) -> Self {
        self.edges.insert(label, target.to_string());
        self
    }

    /// Set the input field list.
    #[must_use]
    pub fn with_input_fields(mut self, fields: Vec<String>) -> Self {
        self.input_fields = fields;
        self
    }

    /// Set the output field list.
    #[must_use]
    pub fn with_output_fields(mut self, fields: Vec<String>) -> Self {
        self.output_fields = fields;
        self
    }

    /// Set the prompt template.
    #[must_use]
    pub fn with_prompt(mut self, prompt: &str) -> Self {
        self.prompt = prompt.to_string();
        self
    }

    /// Set the selection description.
    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Target node name for the given outcome label, if declared.
    ///
    /// A node with no edge for an outcome is terminal for that outcome.
    #[must_use]
    pub fn edge(&self, label: &EdgeLabel) -> Option<&str> {
        self.edges.get(label).map(String::as_str)
    }

    /// Selection keywords declared in the `keywords` metadata entry.
    #[must_use]
    pub fn keywords(&self) -> Vec<String> {
        self.metadata
            .get("keywords")
            .map(|cell| crate::tabular::parse_field_list(cell))
            .unwrap_or_default()
    }
}
