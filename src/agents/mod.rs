//! Agent execution contracts for the rowloom workflow system.
//!
//! This module provides the core abstractions for executable agents,
//! including the [`Agent`] trait, the invocation context, write deltas,
//! the optional dynamic-routing capability, and error handling.
//!
//! # Design Principles
//!
//! - **Stateless**: agents should be stateless; one instance serves every
//!   node bound to its agent type across concurrent runs
//! - **Declared I/O**: an agent sees only its node's declared input
//!   fields and may write only its declared output fields
//! - **Capabilities are interfaces**: dynamic routing is an optional
//!   trait implementation surfaced through [`Agent::router`], detected
//!   once at bind time: never a string comparison on the agent type
//!
//! # Error Handling
//!
//! Agents can fail in two ways:
//! 1. **Hard failure**: return `Err(AgentError)`: the node is recorded
//!    failed and the executor follows the node's `failure` edge if one is
//!    declared, otherwise the run aborts
//! 2. **Soft failure**: return `Ok(AgentOutput::new().failed())`: same
//!    routing, but the node produced a deliberate business-level outcome
//!    rather than an error

mod catalog;
mod orchestrator;
mod passthrough;
mod prompt;

pub use catalog::{AgentBindError, AgentCatalog, AgentFactory};
pub use orchestrator::OrchestratorAgent;
pub use passthrough::PassthroughAgent;
pub use prompt::LlmAgent;

use std::sync::Arc;

use async_trait::async_trait;
use miette::Diagnostic;
use rustc_hash::FxHashMap;
use serde_json::Value;
use thiserror::Error;

use crate::llm::{CompletionClient, ProviderError};
use crate::registry::NodeRegistry;
use crate::selector::{NodeSelector, SelectError, Selection, SelectionStrategy};
use crate::state::StateView;
use crate::utils::collections::new_state_map;

// ============================================================================
// Core Trait
// ============================================================================

/// Core trait defining an executable agent bound to workflow nodes.
///
/// An agent consumes the restricted input view for its node and returns a
/// write delta. The same agent instance may serve many nodes and many
/// concurrent runs, so implementations must be `Send + Sync` and should
/// avoid interior mutability.
///
/// # Examples
///
/// ```rust
/// use rowloom::agents::{Agent, AgentContext, AgentError, AgentOutput};
/// use rowloom::state::StateView;
/// use async_trait::async_trait;
/// use serde_json::json;
///
/// struct WordCountAgent;
///
/// #[async_trait]
/// impl Agent for WordCountAgent {
///     async fn process(
///         &self,
///         view: StateView,
///         ctx: AgentContext,
///     ) -> Result<AgentOutput, AgentError> {
///         let text = view
///             .get_str("text")
///             .ok_or_else(|| AgentError::MissingInput { what: "text".into() })?;
///         let count = text.split_whitespace().count();
///         Ok(AgentOutput::new().with_value(&ctx.output_fields[0], json!(count)))
///     }
/// }
/// ```
#[async_trait]
pub trait Agent: Send + Sync {
    /// Execute this agent against the node's restricted input view.
    async fn process(&self, view: StateView, ctx: AgentContext)
    -> Result<AgentOutput, AgentError>;

    /// The agent's dynamic-routing capability, if it has one.
    ///
    /// The executor calls this once when binding the graph and caches the
    /// answer on the bound node; it is never re-checked per invocation.
    /// The default is no capability.
    fn router(&self) -> Option<&dyn DynamicRouter> {
        None
    }
}

/// Optional capability: an agent that can pick the next node at run time.
///
/// Only orchestrator-style nodes use this. The executor honors a
/// [`AgentOutput::route_to`] override only when the bound agent exposes
/// this capability.
#[async_trait]
pub trait DynamicRouter: Send + Sync {
    /// Pick the best next node for the given free text.
    ///
    /// The default delegates to the injected [`NodeSelector`]; override to
    /// substitute a bespoke selection procedure.
    async fn select_next(
        &self,
        input_text: &str,
        candidates: &NodeRegistry,
        selector: &NodeSelector,
        strategy: SelectionStrategy,
        confidence_threshold: f64,
    ) -> Result<Selection, SelectError> {
        selector
            .select(input_text, candidates, strategy, confidence_threshold)
            .await
    }
}

// ============================================================================
// Invocation Context
// ============================================================================

/// Context passed to agents during workflow execution.
///
/// Carries the node's declared configuration plus the read-only runtime
/// handles (node registry, selector, completion client) that dynamic
/// routing and model-backed agents need. Everything here is cheap to
/// clone; the handles are shared `Arc`s.
#[derive(Clone)]
pub struct AgentContext {
    /// Name of the node being executed.
    pub node_name: String,
    /// Current step number within the run (1-based).
    pub step: u64,
    /// The node's prompt template.
    pub prompt: String,
    /// The node's declared input fields, in declaration order.
    pub input_fields: Vec<String>,
    /// The node's declared output fields, in declaration order.
    pub output_fields: Vec<String>,
    /// The node's selection metadata.
    pub metadata: FxHashMap<String, String>,
    /// Read-only registry of the whole graph's node metadata.
    pub registry: NodeRegistry,
    /// Shared node selector for dynamic routing.
    pub selector: Arc<NodeSelector>,
    /// Strategy the run is configured with.
    pub strategy: SelectionStrategy,
    /// Tiered-escalation threshold the run is configured with.
    pub confidence_threshold: f64,
    /// Completion client, when the application configured one.
    pub completion: Option<Arc<dyn CompletionClient>>,
}

impl AgentContext {
    /// The first declared input field's text value, the conventional
    /// "input text" for routing-style agents.
    #[must_use]
    pub fn primary_input<'v>(&self, view: &'v StateView) -> Option<&'v str> {
        self.input_fields
            .first()
            .and_then(|field| view.get_str(field))
    }
}

// ============================================================================
// Write Delta
// ============================================================================

/// Partial state update returned by agent execution.
///
/// `values` is restricted by the executor to the node's declared output
/// fields; undeclared or reserved keys are dropped with a warning.
/// `next_node` is honored only when the bound agent exposes the
/// [`DynamicRouter`] capability.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AgentOutput {
    /// Field values to merge into the execution state.
    pub values: FxHashMap<String, Value>,
    /// Soft failure marker; see [`AgentOutput::failed`].
    failed: bool,
    /// Dynamic routing override for the next step.
    pub next_node: Option<String>,
}

impl AgentOutput {
    /// Creates an empty, successful output.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: new_state_map(),
            failed: false,
            next_node: None,
        }
    }

    /// Add one output field value.
    #[must_use]
    pub fn with_value(mut self, field: &str, value: Value) -> Self {
        self.values.insert(field.to_string(), value);
        self
    }

    /// Replace all output field values.
    #[must_use]
    pub fn with_values(mut self, values: FxHashMap<String, Value>) -> Self {
        self.values = values;
        self
    }

    /// Mark this output as a soft failure: the node is recorded failed
    /// and the failure edge is followed, without raising an error.
    #[must_use]
    pub fn failed(mut self) -> Self {
        self.failed = true;
        self
    }

    /// Request dynamic routing to the named node for the next step.
    #[must_use]
    pub fn route_to(mut self, node_name: &str) -> Self {
        self.next_node = Some(node_name.to_string());
        self
    }

    /// Whether the invocation counts as succeeded.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        !self.failed
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur during agent execution.
///
/// `AgentError` marks the node failed; whether the run survives depends
/// on the node's declared `failure` edge.
#[derive(Debug, Error, Diagnostic)]
pub enum AgentError {
    /// Expected input data is missing from the restricted view.
    #[error("missing expected input: {what}")]
    #[diagnostic(
        code(rowloom::agents::missing_input),
        help("Check that an earlier node produced the required field.")
    )]
    MissingInput { what: String },

    /// External provider or service error.
    #[error(transparent)]
    #[diagnostic(code(rowloom::agents::provider))]
    Provider(#[from] ProviderError),

    /// Dynamic selection failed outright (empty candidate set).
    #[error(transparent)]
    #[diagnostic(code(rowloom::agents::selection))]
    Selection(#[from] SelectError),

    /// JSON serialization/deserialization error.
    #[error(transparent)]
    #[diagnostic(code(rowloom::agents::serde_json))]
    Serde(#[from] serde_json::Error),

    /// Any other unrecoverable agent failure.
    #[error("agent failed: {0}")]
    #[diagnostic(code(rowloom::agents::failed))]
    Failed(String),
}
