//! # Rowloom: Tabular Agent-Workflow Orchestration
//!
//! Rowloom turns tabular workflow definitions into executable graphs of
//! cooperating agents, deciding at run time which node runs next when the
//! routing depends on unstructured user input rather than a fixed edge.
//!
//! ## Core Concepts
//!
//! - **Rows**: one tabular row per node (or node extension), grouped into
//!   graphs by the builder
//! - **Agents**: async units of work bound to nodes by agent type,
//!   consuming declared input fields and producing declared output fields
//! - **Selection**: free text matched against a read-only node registry,
//!   with a cheap deterministic scorer and optional model escalation
//! - **Execution**: a strictly sequential walk with an evolving
//!   key-value state, always-on tracking, and a configurable success
//!   policy
//!
//! ## Quick Start
//!
//! ```rust
//! use rowloom::app::AppBuilder;
//! use rowloom::state::ExecutionState;
//! use rowloom::tabular::RowRecord;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Rows usually come from a parsed tabular file.
//! let rows = vec![
//!     RowRecord::new("support", "Triage", "orchestrator")
//!         .with_input_fields("ticket_text")
//!         .with_output_fields("routed_to|route_confidence"),
//!     RowRecord::new("support", "Billing", "passthrough")
//!         .with_description("Refunds, invoices, double charges")
//!         .with_metadata("keywords", "charged|refund|card"),
//!     RowRecord::new("support", "Shipping", "passthrough")
//!         .with_description("Parcel tracking and delivery issues"),
//! ];
//!
//! let app = AppBuilder::new().with_rows(rows).build()?;
//!
//! let result = app
//!     .run(
//!         "support",
//!         ExecutionState::with_values([("ticket_text", json!("my card was charged twice"))]),
//!     )
//!     .await?;
//!
//! assert!(result.success);
//! assert_eq!(
//!     result.summary.execution_path,
//!     vec!["Triage".to_string(), "Billing".to_string()]
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom Agents
//!
//! Register your own agent types on the catalog; an agent sees only its
//! node's declared inputs and may write only its declared outputs:
//!
//! ```rust
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use rowloom::agents::{Agent, AgentCatalog, AgentContext, AgentError, AgentOutput};
//! use rowloom::state::StateView;
//! use serde_json::json;
//!
//! struct UppercaseAgent;
//!
//! #[async_trait]
//! impl Agent for UppercaseAgent {
//!     async fn process(
//!         &self,
//!         view: StateView,
//!         ctx: AgentContext,
//!     ) -> Result<AgentOutput, AgentError> {
//!         let text = view.get_str("text").unwrap_or_default().to_uppercase();
//!         Ok(AgentOutput::new().with_value(&ctx.output_fields[0], json!(text)))
//!     }
//! }
//!
//! let catalog = AgentCatalog::with_builtins()
//!     .with_shared("uppercase", Arc::new(UppercaseAgent));
//! ```
//!
//! ## Module Guide
//!
//! - [`tabular`] - Row records consumed from the external parser
//! - [`graphs`] - Graph model, builder, and structural validation
//! - [`registry`] - Read-only node metadata snapshots for selection
//! - [`selector`] - Algorithmic / model-assisted / tiered node selection
//! - [`agents`] - Agent contract, capability hooks, catalog, built-ins
//! - [`llm`] - Completion-client contract for model-backed features
//! - [`state`] - Per-run key-value state and restricted views
//! - [`runtimes`] - Executor, tracking, success policies, configuration
//! - [`app`] - Composition root and the run/describe entry points
//! - [`telemetry`] - Summary rendering and tracing setup

pub mod agents;
pub mod app;
pub mod graphs;
pub mod llm;
pub mod registry;
pub mod runtimes;
pub mod selector;
pub mod state;
pub mod tabular;
pub mod telemetry;
pub mod types;
pub mod utils;
