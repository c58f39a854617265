//! GraphBuilder implementation for constructing workflow graphs.
//!
//! This module turns parsed tabular rows into validated, immutable
//! [`Graph`] values, enforcing the structural invariants that must hold
//! before execution: resolvable edge targets, a single entry node per
//! graph, well-formed field lists, and syntactically valid agent types.
//!
//! Build-time errors never reach the executor; a [`StructureError`] is
//! surfaced immediately to the caller.

use miette::Diagnostic;
use rustc_hash::FxHashMap;
use thiserror::Error;

use super::graph::{Graph, GraphSet};
use super::node::Node;
use crate::tabular::RowRecord;
use crate::types::EdgeLabel;

/// Metadata key marking a row's node as the graph's explicit entry node.
pub const ENTRY_METADATA_KEY: &str = "entry";

/// Errors raised while building graphs from tabular rows.
///
/// All variants are fatal at build time and never occur at run time.
#[derive(Debug, Error, Diagnostic)]
pub enum StructureError {
    /// A row is missing its graph or node name.
    #[error("row {row} is missing a {what} name")]
    #[diagnostic(
        code(rowloom::graphs::missing_name),
        help("Every row must carry a graph name and a node name.")
    )]
    MissingName { row: usize, what: &'static str },

    /// An agent type contains characters outside `[A-Za-z0-9_.-]` or is empty.
    #[error("node '{node}' in graph '{graph}' has invalid agent type '{agent_type}'")]
    #[diagnostic(
        code(rowloom::graphs::invalid_agent_type),
        help("Agent types are identifiers: letters, digits, '_', '.', '-'.")
    )]
    InvalidAgentType {
        graph: String,
        node: String,
        agent_type: String,
    },

    /// An edge references a node name that does not exist in the graph.
    #[error("edge '{label}' from node '{node}' in graph '{graph}' targets undefined node '{target}'")]
    #[diagnostic(
        code(rowloom::graphs::unknown_edge_target),
        help("Every edge target must name a node defined in the same graph.")
    )]
    UnknownEdgeTarget {
        graph: String,
        node: String,
        label: String,
        target: String,
    },

    /// More than one node claims the explicit entry override.
    #[error("graph '{graph}' declares conflicting entry nodes '{first}' and '{second}'")]
    #[diagnostic(
        code(rowloom::graphs::conflicting_entry),
        help("At most one row per graph may set the 'entry' metadata key.")
    )]
    ConflictingEntry {
        graph: String,
        first: String,
        second: String,
    },

    /// A field list contains a whitespace-only entry.
    #[error("node '{node}' in graph '{graph}' has a malformed {list} field list")]
    #[diagnostic(
        code(rowloom::graphs::malformed_field_list),
        help("Field list entries must be non-empty; check for stray delimiters.")
    )]
    MalformedFieldList {
        graph: String,
        node: String,
        list: &'static str,
    },

    /// The same output field is declared twice on one node.
    #[error("node '{node}' in graph '{graph}' declares output field '{field}' more than once")]
    #[diagnostic(code(rowloom::graphs::duplicate_output_field))]
    DuplicateOutputField {
        graph: String,
        node: String,
        field: String,
    },
}

/// Builds validated [`GraphSet`]s from ordered tabular rows.
///
/// The builder has no side effects and holds no state between calls; it
/// exists as a value so callers can inject it explicitly rather than
/// reaching for a global. It does **not** check that agent types are
/// resolvable: that is deferred to agent binding, which happens when the
/// application is composed.
///
/// # Examples
///
/// ```rust
/// use rowloom::graphs::GraphBuilder;
/// use rowloom::tabular::RowRecord;
///
/// let rows = vec![
///     RowRecord::new("support", "intake", "echo").with_edge("success", "resolve"),
///     RowRecord::new("support", "resolve", "echo"),
/// ];
///
/// let graphs = GraphBuilder::new().build(&rows).unwrap();
/// let graph = graphs.graph("support").unwrap();
/// assert_eq!(graph.entry(), "intake");
/// assert_eq!(graph.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct GraphBuilder;

impl GraphBuilder {
    /// Creates a new graph builder.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Build every graph defined by the given rows.
    ///
    /// Rows are grouped by graph name in first-seen order. Within a group,
    /// the first pass creates one node per unique node name: later rows
    /// for the same node merge additional edges (last prompt wins, edges
    /// accumulate); the second pass resolves the entry node (first node in
    /// row order unless exactly one row sets the `entry` metadata key);
    /// the third pass validates that all edge targets exist.
    #[tracing::instrument(skip(self, rows), err)]
    pub fn build(&self, rows: &[RowRecord]) -> Result<GraphSet, StructureError> {
        let mut order: Vec<String> = Vec::new();
        let mut grouped: FxHashMap<String, Vec<(usize, &RowRecord)>> = FxHashMap::default();

        for (row_index, row) in rows.iter().enumerate() {
            if row.graph_name.trim().is_empty() {
                return Err(StructureError::MissingName {
                    row: row_index,
                    what: "graph",
                });
            }
            if row.node_name.trim().is_empty() {
                return Err(StructureError::MissingName {
                    row: row_index,
                    what: "node",
                });
            }
            if !grouped.contains_key(&row.graph_name) {
                order.push(row.graph_name.clone());
            }
            grouped
                .entry(row.graph_name.clone())
                .or_default()
                .push((row_index, row));
        }

        let mut graphs = Vec::with_capacity(order.len());
        for graph_name in order {
            let rows_for_graph = &grouped[&graph_name];
            graphs.push(Self::build_graph(&graph_name, rows_for_graph)?);
        }

        tracing::debug!(graphs = graphs.len(), "tabular definition built");
        Ok(GraphSet::from_graphs(graphs))
    }

    fn build_graph(
        graph_name: &str,
        rows: &[(usize, &RowRecord)],
    ) -> Result<Graph, StructureError> {
        let mut nodes: Vec<Node> = Vec::new();
        let mut slots: FxHashMap<String, usize> = FxHashMap::default();
        let mut explicit_entry: Option<String> = None;

        // First pass: create nodes, merging repeated rows for a node name.
        for (_, row) in rows {
            let slot = match slots.get(&row.node_name) {
                Some(slot) => *slot,
                None => {
                    validate_agent_type(graph_name, row)?;
                    let node = Node {
                        name: row.node_name.clone(),
                        agent_type: row.agent_type.clone(),
                        prompt: String::new(),
                        input_fields: Vec::new(),
                        output_fields: Vec::new(),
                        edges: FxHashMap::default(),
                        description: String::new(),
                        metadata: FxHashMap::default(),
                    };
                    nodes.push(node);
                    slots.insert(row.node_name.clone(), nodes.len() - 1);
                    nodes.len() - 1
                }
            };
            merge_row(graph_name, &mut nodes[slot], row)?;

            if row.metadata.contains_key(ENTRY_METADATA_KEY) {
                match &explicit_entry {
                    None => explicit_entry = Some(row.node_name.clone()),
                    Some(existing) if existing != &row.node_name => {
                        return Err(StructureError::ConflictingEntry {
                            graph: graph_name.to_string(),
                            first: existing.clone(),
                            second: row.node_name.clone(),
                        });
                    }
                    Some(_) => {}
                }
            }
        }

        // Second pass: resolve the entry node. Groups are never empty by
        // construction, so indexing the first node is safe.
        let entry = explicit_entry.unwrap_or_else(|| nodes[0].name.clone());

        // Third pass: every edge target must reference an existing node.
        for node in &nodes {
            for (label, target) in &node.edges {
                if !slots.contains_key(target) {
                    return Err(StructureError::UnknownEdgeTarget {
                        graph: graph_name.to_string(),
                        node: node.name.clone(),
                        label: label.encode(),
                        target: target.clone(),
                    });
                }
            }
        }

        Ok(Graph::from_parts(
            graph_name.to_string(),
            nodes,
            entry,
        ))
    }
}

fn validate_agent_type(graph_name: &str, row: &RowRecord) -> Result<(), StructureError> {
    let agent_type = row.agent_type.trim();
    let valid = !agent_type.is_empty()
        && agent_type
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'));
    if valid {
        Ok(())
    } else {
        Err(StructureError::InvalidAgentType {
            graph: graph_name.to_string(),
            node: row.node_name.clone(),
            agent_type: row.agent_type.clone(),
        })
    }
}

/// Fold one row into its node: edges accumulate, last prompt wins, field
/// lists and description follow the same last-non-empty-cell rule, and
/// metadata entries merge key by key.
fn merge_row(graph_name: &str, node: &mut Node, row: &RowRecord) -> Result<(), StructureError> {
    for (label, target) in &row.edges {
        node.edges
            .insert(EdgeLabel::decode(label), target.clone());
    }

    if !row.prompt.is_empty() {
        node.prompt = row.prompt.clone();
    }
    if !row.description.is_empty() {
        node.description = row.description.clone();
    }
    for (key, value) in &row.metadata {
        node.metadata.insert(key.clone(), value.clone());
    }

    if !row.input_fields.trim().is_empty() {
        let fields = row.input_fields();
        if fields.iter().any(|f| f.is_empty()) {
            return Err(StructureError::MalformedFieldList {
                graph: graph_name.to_string(),
                node: node.name.clone(),
                list: "input",
            });
        }
        node.input_fields = fields;
    }

    if !row.output_fields.trim().is_empty() {
        let fields = row.output_fields();
        if fields.iter().any(|f| f.is_empty()) {
            return Err(StructureError::MalformedFieldList {
                graph: graph_name.to_string(),
                node: node.name.clone(),
                list: "output",
            });
        }
        for (i, field) in fields.iter().enumerate() {
            if fields[..i].contains(field) {
                return Err(StructureError::DuplicateOutputField {
                    graph: graph_name.to_string(),
                    node: node.name.clone(),
                    field: field.clone(),
                });
            }
        }
        node.output_fields = fields;
    }

    Ok(())
}
