//! Application composition and the public run/describe entry points.
//!
//! [`AppBuilder`] is the composition root: tabular rows, the agent
//! catalog, the completion client, the scoring policy, and the runtime
//! configuration are wired together exactly once, at process start, into
//! an immutable [`App`]. There is no ambient global state: every
//! dependency is injected here.
//!
//! # Examples
//!
//! ```rust
//! use rowloom::app::AppBuilder;
//! use rowloom::state::ExecutionState;
//! use rowloom::tabular::RowRecord;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let rows = vec![
//!     RowRecord::new("support", "Intake", "orchestrator")
//!         .with_input_fields("ticket_text")
//!         .with_output_fields("routed_to"),
//!     RowRecord::new("support", "Billing", "passthrough")
//!         .with_description("Refunds, invoices, card charges"),
//! ];
//!
//! let app = AppBuilder::new().with_rows(rows).build()?;
//!
//! let result = app
//!     .run(
//!         "support",
//!         ExecutionState::with_values([("ticket_text", json!("charged twice"))]),
//!     )
//!     .await?;
//! println!("success: {}", result.success);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use miette::Diagnostic;
use rustc_hash::FxHashMap;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use crate::agents::{AgentBindError, AgentCatalog};
use crate::graphs::{GraphBuilder, GraphDescription, GraphSet, StructureError};
use crate::llm::CompletionClient;
use crate::runtimes::{BoundGraph, ExecutionResult, GraphExecutor, RuntimeConfig};
use crate::selector::{NodeSelector, Scorer};
use crate::state::ExecutionState;
use crate::tabular::RowRecord;

/// Errors raised while composing an application.
#[derive(Debug, Error, Diagnostic)]
pub enum ComposeError {
    /// The tabular definition is structurally invalid.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Structure(#[from] StructureError),

    /// An agent type could not be resolved to an implementation.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Bind(#[from] AgentBindError),
}

/// Errors raised by the run/describe entry points.
#[derive(Debug, Error, Diagnostic)]
pub enum RunError {
    /// The named graph does not exist in this application.
    #[error("unknown graph '{graph_name}'")]
    #[diagnostic(
        code(rowloom::app::unknown_graph),
        help("Check App::graph_names() for the graphs this application defines.")
    )]
    UnknownGraph { graph_name: String },
}

/// Builder wiring every dependency of an [`App`].
///
/// Defaults: the built-in agent catalog, no completion client (selection
/// stays algorithmic), the default token-overlap scorer, and
/// [`RuntimeConfig::default`].
pub struct AppBuilder {
    rows: Vec<RowRecord>,
    catalog: AgentCatalog,
    completion: Option<Arc<dyn CompletionClient>>,
    scorer: Option<Arc<dyn Scorer>>,
    config: RuntimeConfig,
}

impl AppBuilder {
    /// Creates a builder with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            catalog: AgentCatalog::with_builtins(),
            completion: None,
            scorer: None,
            config: RuntimeConfig::default(),
        }
    }

    /// Provide the parsed tabular rows.
    #[must_use]
    pub fn with_rows(mut self, rows: Vec<RowRecord>) -> Self {
        self.rows = rows;
        self
    }

    /// Replace the agent catalog.
    #[must_use]
    pub fn with_catalog(mut self, catalog: AgentCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Provide the completion client used for model-assisted selection
    /// and model-backed agents.
    #[must_use]
    pub fn with_completion_client(mut self, client: Arc<dyn CompletionClient>) -> Self {
        self.completion = Some(client);
        self
    }

    /// Replace the selection scoring policy.
    #[must_use]
    pub fn with_scorer(mut self, scorer: Arc<dyn Scorer>) -> Self {
        self.scorer = Some(scorer);
        self
    }

    /// Set the runtime configuration.
    #[must_use]
    pub fn with_runtime_config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Compose the application.
    ///
    /// Builds and validates every graph, then resolves every node's agent
    /// through the catalog, caching the routing-capability check on each
    /// bound node. Both failure classes surface here and never reach the
    /// executor.
    pub fn build(self) -> Result<App, ComposeError> {
        let graphs = GraphBuilder::new().build(&self.rows)?;

        let mut selector = match &self.completion {
            Some(client) => NodeSelector::new(client.clone()),
            None => NodeSelector::without_client(),
        };
        if let Some(scorer) = self.scorer {
            selector = selector.with_scorer(scorer);
        }
        selector = selector.with_completion_options(self.config.completion_options);
        let selector = Arc::new(selector);

        let mut bound = FxHashMap::default();
        for graph in graphs.graphs() {
            bound.insert(
                graph.name().to_string(),
                BoundGraph::bind(graph.clone(), &self.catalog)?,
            );
        }

        let executor = GraphExecutor::new(selector, self.completion, self.config);
        Ok(App {
            graphs,
            bound,
            executor,
        })
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A composed application: validated graphs with bound agents, ready to
/// run.
///
/// Immutable after build; safe to share behind an `Arc` and execute many
/// runs concurrently, each with its own [`ExecutionState`].
pub struct App {
    graphs: GraphSet,
    bound: FxHashMap<String, BoundGraph>,
    executor: GraphExecutor,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("graphs", &self.graphs.names())
            .finish_non_exhaustive()
    }
}

impl App {
    /// Names of the graphs this application defines, in definition order.
    #[must_use]
    pub fn graph_names(&self) -> Vec<&str> {
        self.graphs.names()
    }

    /// Execute the named graph to termination.
    ///
    /// Always yields a complete [`ExecutionResult`]: an aborted run is a
    /// result with an `Aborted` summary, not an error. The only `Err`
    /// here is naming a graph that does not exist.
    #[instrument(skip(self, initial_state), err)]
    pub async fn run(
        &self,
        graph_name: &str,
        initial_state: ExecutionState,
    ) -> Result<ExecutionResult, RunError> {
        self.run_with_cancellation(graph_name, initial_state, CancellationToken::new())
            .await
    }

    /// Execute the named graph with a caller-controlled cancellation
    /// token.
    ///
    /// Cancellation is observed between node transitions only: the
    /// in-flight agent call is atomic and runs to completion before the
    /// token is consulted.
    pub async fn run_with_cancellation(
        &self,
        graph_name: &str,
        initial_state: ExecutionState,
        cancel: CancellationToken,
    ) -> Result<ExecutionResult, RunError> {
        let bound = self
            .bound
            .get(graph_name)
            .ok_or_else(|| RunError::UnknownGraph {
                graph_name: graph_name.to_string(),
            })?;
        Ok(self.executor.execute(bound, initial_state, cancel).await)
    }

    /// Read-only structural description of the named graph.
    ///
    /// Idempotent: repeated calls return identical structures, runs or no
    /// runs in between, because graphs are immutable after build.
    pub fn describe(&self, graph_name: &str) -> Result<GraphDescription, RunError> {
        self.graphs
            .graph(graph_name)
            .map(|graph| graph.describe())
            .ok_or_else(|| RunError::UnknownGraph {
                graph_name: graph_name.to_string(),
            })
    }
}
