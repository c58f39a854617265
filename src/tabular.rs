//! Row records consumed from tabular workflow definitions.
//!
//! The tabular-file parser lives outside this crate; it hands the builder
//! an ordered list of [`RowRecord`] values, one per row of the source.
//! Field lists (`input_fields`, `output_fields`, metadata `keywords`)
//! arrive in the source's delimited form and are split here so the parser
//! does not need to know graph semantics.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Delimiter used for field lists inside a single tabular cell.
pub const FIELD_LIST_DELIMITER: char = '|';

/// One row of a tabular workflow definition.
///
/// A single tabular source may define several graphs; rows are grouped by
/// `graph_name` during the build. Several rows may share a `node_name`:
/// later rows merge additional edges into the node (last prompt wins).
///
/// # Examples
///
/// ```rust
/// use rowloom::tabular::RowRecord;
///
/// let row = RowRecord::new("support", "triage", "orchestrator")
///     .with_edge("success", "resolve")
///     .with_input_fields("ticket_text")
///     .with_output_fields("routed_to|route_confidence")
///     .with_description("Routes an incoming ticket to a specialist");
/// assert_eq!(row.input_fields(), vec!["ticket_text"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RowRecord {
    /// Graph this row belongs to.
    pub graph_name: String,
    /// Node this row defines or extends.
    pub node_name: String,
    /// Outcome-label to target-node pairs, in row order.
    pub edges: Vec<(String, String)>,
    /// Agent type tag, resolved to an executable agent at bind time.
    pub agent_type: String,
    /// Delimited list of state keys the node reads.
    pub input_fields: String,
    /// Delimited list of state keys the node writes.
    pub output_fields: String,
    /// Prompt template for the node's agent.
    pub prompt: String,
    /// Free-text description, used only for node selection.
    pub description: String,
    /// Key-value metadata, used only for node selection and build hints.
    pub metadata: FxHashMap<String, String>,
}

impl RowRecord {
    /// Create a row with the three mandatory cells filled in.
    #[must_use]
    pub fn new(graph_name: &str, node_name: &str, agent_type: &str) -> Self {
        Self {
            graph_name: graph_name.to_string(),
            node_name: node_name.to_string(),
            agent_type: agent_type.to_string(),
            ..Default::default()
        }
    }

    /// Append an outcome-label → target edge pair.
    #[must_use]
    pub fn with_edge(mut self, label: &str, target: &str) -> Self {
        self.edges.push((label.to_string(), target.to_string()));
        self
    }

    /// Set the delimited input field list.
    #[must_use]
    pub fn with_input_fields(mut self, fields: &str) -> Self {
        self.input_fields = fields.to_string();
        self
    }

    /// Set the delimited output field list.
    #[must_use]
    pub fn with_output_fields(mut self, fields: &str) -> Self {
        self.output_fields = fields.to_string();
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

    /// Insert a metadata key-value pair.
    #[must_use]
    pub fn with_metadata(mut self, key: &str, value: &str) -> Self {
        self.metadata.insert(key.to_string(), value.to_string());
        self
    }

    /// The input field list, split from its delimited cell form.
    #[must_use]
    pub fn input_fields(&self) -> Vec<String> {
        parse_field_list(&self.input_fields)
    }

    /// The output field list, split from its delimited cell form.
    #[must_use]
    pub fn output_fields(&self) -> Vec<String> {
        parse_field_list(&self.output_fields)
    }

    /// Selection keywords from the `keywords` metadata cell, if present.
    #[must_use]
    pub fn keywords(&self) -> Vec<String> {
        self.metadata
            .get("keywords")
            .map(|cell| parse_field_list(cell))
            .unwrap_or_default()
    }
}

/// Split a delimited field-list cell into trimmed entries.
///
/// Empty cells yield an empty list. Entries that trim to nothing are kept
/// as empty strings so the builder can reject them as malformed instead of
/// silently dropping a user's typo.
///
/// # Examples
///
/// ```rust
/// use rowloom::tabular::parse_field_list;
///
/// assert_eq!(parse_field_list("a|b | c"), vec!["a", "b", "c"]);
/// assert!(parse_field_list("").is_empty());
/// assert_eq!(parse_field_list("a||b"), vec!["a", "", "b"]);
/// ```
#[must_use]
pub fn parse_field_list(cell: &str) -> Vec<String> {
    if cell.trim().is_empty() {
        return Vec::new();
    }
    cell.split(FIELD_LIST_DELIMITER)
        .map(|entry| entry.trim().to_string())
        .collect()
}
