//! Typed registry mapping agent types to agent constructors.
//!
//! Agent types in tabular rows are plain string tags; the catalog resolves
//! each tag to a constructor exactly once, when the application is
//! composed, so no string dispatch happens inside the execution loop. An
//! unresolvable tag is a bind-time error, deliberately separate from the
//! builder's structural validation.

use std::sync::Arc;

use miette::Diagnostic;
use rustc_hash::FxHashMap;
use thiserror::Error;

use super::Agent;
use crate::graphs::Node;

/// Constructor producing the agent for one node.
///
/// The node is passed so a factory can specialize on per-node
/// configuration (prompt, metadata); stateless agent types usually ignore
/// it and hand back a shared instance.
pub type AgentFactory = Arc<dyn Fn(&Node) -> Result<Arc<dyn Agent>, AgentBindError> + Send + Sync>;

/// Errors raised while binding agent types to nodes.
#[derive(Debug, Error, Diagnostic)]
pub enum AgentBindError {
    /// No factory is registered for the node's agent type.
    #[error("node '{node}' uses unregistered agent type '{agent_type}'")]
    #[diagnostic(
        code(rowloom::agents::unknown_agent_type),
        help("Register a factory for this agent type on the AgentCatalog.")
    )]
    UnknownAgentType { node: String, agent_type: String },

    /// A factory refused to construct an agent for the node.
    #[error("agent construction failed for node '{node}': {message}")]
    #[diagnostic(code(rowloom::agents::construction))]
    Construction { node: String, message: String },
}

/// Registry of agent constructors keyed by agent type.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use rowloom::agents::{AgentCatalog, OrchestratorAgent};
///
/// let catalog = AgentCatalog::new()
///     .with_shared("orchestrator", Arc::new(OrchestratorAgent::default()));
/// assert!(catalog.supports("orchestrator"));
/// ```
#[derive(Clone, Default)]
pub struct AgentCatalog {
    factories: FxHashMap<String, AgentFactory>,
}

impl AgentCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog with the built-in agent types registered:
    /// `orchestrator` (dynamic routing), `llm` (prompt completion), and
    /// `passthrough` (positional field copy).
    #[must_use]
    pub fn with_builtins() -> Self {
        Self::new()
            .with_shared("orchestrator", Arc::new(super::OrchestratorAgent::default()))
            .with_shared("llm", Arc::new(super::LlmAgent::default()))
            .with_shared("passthrough", Arc::new(super::PassthroughAgent::default()))
    }

    /// Register a factory for an agent type.
    #[must_use]
    pub fn with_factory(mut self, agent_type: &str, factory: AgentFactory) -> Self {
        self.factories.insert(agent_type.to_string(), factory);
        self
    }

    /// Register a shared stateless agent for an agent type.
    ///
    /// Every node with this type binds to the same instance.
    #[must_use]
    pub fn with_shared(self, agent_type: &str, agent: Arc<dyn Agent>) -> Self {
        self.with_factory(agent_type, Arc::new(move |_node: &Node| Ok(agent.clone())))
    }

    /// Returns `true` if a factory is registered for the agent type.
    #[must_use]
    pub fn supports(&self, agent_type: &str) -> bool {
        self.factories.contains_key(agent_type)
    }

    /// Resolve the agent for a node.
    pub fn resolve(&self, node: &Node) -> Result<Arc<dyn Agent>, AgentBindError> {
        let factory =
            self.factories
                .get(&node.agent_type)
                .ok_or_else(|| AgentBindError::UnknownAgentType {
                    node: node.name.clone(),
                    agent_type: node.agent_type.clone(),
                })?;
        factory(node)
    }
}
