//! Graph definition and validation for workflow execution.
//!
//! This module provides the data model and build pipeline for workflow
//! graphs defined as tabular rows. The main entry point is
//! [`GraphBuilder`], which validates ordered [`RowRecord`] lists into
//! immutable [`Graph`] values collected in a [`GraphSet`].
//!
//! # Core Concepts
//!
//! - **Nodes**: plain-data units carrying an agent type, prompt, declared
//!   input/output fields, and labeled outgoing edges
//! - **Edges**: outcome label → target node name, resolved by lookup
//! - **Entry node**: first node in row order, or the single explicit
//!   `entry` metadata override
//! - **Validation**: dangling edge targets, malformed field lists, and
//!   conflicting entries are rejected at build time, never at run time
//!
//! [`RowRecord`]: crate::tabular::RowRecord
//!
//! # Quick Start
//!
//! ```rust
//! use rowloom::graphs::GraphBuilder;
//! use rowloom::tabular::RowRecord;
//!
//! let rows = vec![
//!     RowRecord::new("pipeline", "fetch", "echo")
//!         .with_edge("success", "transform"),
//!     RowRecord::new("pipeline", "transform", "echo"),
//! ];
//!
//! let graphs = GraphBuilder::new().build(&rows)?;
//! let description = graphs.graph("pipeline").unwrap().describe();
//! assert_eq!(description.entry, "fetch");
//! # Ok::<(), rowloom::graphs::StructureError>(())
//! ```

// Internal module declarations
mod builder;
mod graph;
mod node;

// Public re-exports
pub use builder::{ENTRY_METADATA_KEY, GraphBuilder, StructureError};
pub use graph::{EdgeDescription, Graph, GraphDescription, GraphSet};
pub use node::Node;
