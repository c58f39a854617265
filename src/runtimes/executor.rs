//! Graph executor: walks a bound graph node by node.
//!
//! One run executes on one logical thread of control: nodes run strictly
//! sequentially because each node's input may depend on the previous
//! node's output through the shared [`ExecutionState`]. Agent invocation
//! is atomic from the executor's perspective; the only suspension points
//! are the agent call itself and the selector's model-assisted branch.
//!
//! Multiple independent runs may proceed concurrently: the bound graph,
//! its registry, and the agent table are immutable after binding, and
//! each run owns its state exclusively. No locks are needed.

use std::sync::Arc;

use miette::Diagnostic;
use serde_json::Value;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use crate::agents::{Agent, AgentBindError, AgentCatalog, AgentContext};
use crate::graphs::{Graph, Node};
use crate::llm::CompletionClient;
use crate::registry::NodeRegistry;
use crate::selector::NodeSelector;
use crate::state::ExecutionState;
use crate::types::EdgeLabel;

use super::runtime_config::RuntimeConfig;
use super::tracker::{ExecutionSummary, ExecutionTracker};
use super::types::RunStatus;

/// Fatal run-limit error: a cycle exceeded the configured step cap.
///
/// Recorded in the summary's abort reason; the run terminates `Aborted`
/// after exactly the configured number of node invocations.
#[derive(Debug, Error, Diagnostic)]
#[error("step limit exceeded after {limit} node invocations")]
#[diagnostic(
    code(rowloom::runtimes::step_limit_exceeded),
    help("The graph contains a cycle that never exits; raise max_steps or fix the routing.")
)]
pub struct StepLimitExceeded {
    /// The configured cap that was hit.
    pub limit: u64,
}

/// Outcome of one run.
#[derive(Clone, Debug)]
pub struct ExecutionResult {
    /// The state as of the last applied node output.
    pub final_state: ExecutionState,
    /// Complete record of the run, available even on abort.
    pub summary: ExecutionSummary,
    /// The configured success policy's verdict.
    pub success: bool,
}

/// One node with its agent resolved and capability check cached.
struct BoundNode {
    node: Node,
    agent: Arc<dyn Agent>,
    /// Whether the agent exposes the dynamic-routing capability.
    /// Resolved once at bind time, never re-checked per invocation.
    routes: bool,
}

/// A graph with every agent resolved, ready to execute.
///
/// Binding happens once when the application is composed; the bound graph
/// is immutable afterwards and safe to share across concurrent runs.
pub struct BoundGraph {
    graph: Graph,
    registry: NodeRegistry,
    bound: Vec<BoundNode>,
}

impl BoundGraph {
    /// Resolve every node's agent through the catalog and cache the
    /// router-capability check.
    pub fn bind(graph: Graph, catalog: &AgentCatalog) -> Result<Self, AgentBindError> {
        let registry = NodeRegistry::from_graph(&graph);
        let bound = graph
            .nodes()
            .iter()
            .map(|node| {
                let agent = catalog.resolve(node)?;
                let routes = agent.router().is_some();
                Ok(BoundNode {
                    node: node.clone(),
                    agent,
                    routes,
                })
            })
            .collect::<Result<Vec<_>, AgentBindError>>()?;
        Ok(Self {
            graph,
            registry,
            bound,
        })
    }

    /// The underlying graph.
    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// The graph's selection registry.
    #[must_use]
    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    /// Bound entries are aligned with the graph's node order, so the
    /// graph's slot index serves both.
    fn bound_node(&self, name: &str) -> Option<&BoundNode> {
        self.graph.slot(name).map(|slot| &self.bound[slot])
    }
}

/// Walks a bound graph from its entry node until a terminal node,
/// failure, cancellation, or the step limit.
pub struct GraphExecutor {
    selector: Arc<NodeSelector>,
    completion: Option<Arc<dyn CompletionClient>>,
    config: RuntimeConfig,
}

impl GraphExecutor {
    /// Create an executor with explicit dependencies.
    #[must_use]
    pub fn new(
        selector: Arc<NodeSelector>,
        completion: Option<Arc<dyn CompletionClient>>,
        config: RuntimeConfig,
    ) -> Self {
        Self {
            selector,
            completion,
            config,
        }
    }

    /// Execute one run to termination.
    ///
    /// Always returns a complete [`ExecutionResult`]; unrecovered agent
    /// failures, cancellation, and the step limit end the run with an
    /// `Aborted` summary rather than an `Err`.
    #[instrument(skip(self, bound, initial_state, cancel), fields(graph = %bound.graph().name()))]
    pub async fn execute(
        &self,
        bound: &BoundGraph,
        initial_state: ExecutionState,
        cancel: CancellationToken,
    ) -> ExecutionResult {
        let mut state = initial_state;
        let mut tracker = ExecutionTracker::new(bound.graph().name());
        let mut current = bound.graph().entry().to_string();
        let mut steps: u64 = 0;

        tracing::info!(run = %tracker.run_id(), entry = %current, "run started");

        let status = loop {
            // Cancellation and the step cap are only checked between node
            // transitions; agent invocation is atomic.
            if cancel.is_cancelled() {
                tracker.mark_aborted(&current, "cancelled by caller");
                break RunStatus::Aborted;
            }
            if let Some(limit) = self.config.max_steps
                && steps >= limit
            {
                let err = StepLimitExceeded { limit };
                tracing::warn!(node = %current, %err, "aborting run");
                tracker.abort(&err.to_string());
                break RunStatus::Aborted;
            }
            steps += 1;

            let bound_node = bound
                .bound_node(&current)
                .expect("routing only targets validated nodes");
            let node = &bound_node.node;

            match self
                .invoke_node(bound, bound_node, &mut state, &mut tracker, steps)
                .await
            {
                NodeOutcome::Advance => {}
                NodeOutcome::Abort => break RunStatus::Aborted,
            }

            match self.next_node(bound, node, &mut state) {
                Some(next) => current = next,
                None => break RunStatus::Completed,
            }
        };

        tracker.finish(status);
        let summary = tracker.summary();
        let success = self.config.policy.evaluate(&summary);
        tracing::info!(
            run = %summary.run_id,
            %status,
            steps,
            success,
            "run finished"
        );

        ExecutionResult {
            final_state: state,
            summary,
            success,
        }
    }

    /// Invoke one node's agent and record the result.
    async fn invoke_node(
        &self,
        bound: &BoundGraph,
        bound_node: &BoundNode,
        state: &mut ExecutionState,
        tracker: &mut ExecutionTracker,
        step: u64,
    ) -> NodeOutcome {
        let node = &bound_node.node;
        tracker.start_node(&node.name);

        let view = state.view(&node.input_fields);
        if self.config.record_io {
            tracker.record_inputs(Value::Object(
                view.values()
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
            ));
        }

        let ctx = AgentContext {
            node_name: node.name.clone(),
            step,
            prompt: node.prompt.clone(),
            input_fields: node.input_fields.clone(),
            output_fields: node.output_fields.clone(),
            metadata: node.metadata.clone(),
            registry: bound.registry().clone(),
            selector: self.selector.clone(),
            strategy: self.config.strategy,
            confidence_threshold: self.config.confidence_threshold,
            completion: self.completion.clone(),
        };

        match bound_node.agent.process(view, ctx).await {
            Ok(output) => {
                let succeeded = output.succeeded();
                let next_node = output.next_node.clone();

                let dropped = state.apply_delta(&node.output_fields, output.values);
                if !dropped.is_empty() {
                    tracing::warn!(
                        node = %node.name,
                        dropped = ?dropped,
                        "agent wrote undeclared or reserved fields; dropped"
                    );
                }
                state.set_last_node_succeeded(succeeded);

                if let Some(target) = next_node {
                    if bound_node.routes {
                        state.set_next_node_override(&target);
                    } else {
                        tracing::warn!(
                            node = %node.name,
                            target = %target,
                            "agent without routing capability requested an override; ignored"
                        );
                    }
                }

                if self.config.record_io {
                    let written: serde_json::Map<String, Value> = node
                        .output_fields
                        .iter()
                        .filter_map(|f| state.get(f).map(|v| (f.clone(), v.clone())))
                        .collect();
                    tracker.record_outputs(Value::Object(written));
                }
                tracker.end_node(&node.name, succeeded, None);
                NodeOutcome::Advance
            }
            Err(err) => {
                tracing::warn!(node = %node.name, error = %err, "agent failed");
                state.set_last_node_succeeded(false);
                tracker.end_node(&node.name, false, Some(err.to_string()));

                // A failed node may still recover through its declared
                // failure edge; routing handles that. With no failure
                // edge, the run aborts here.
                if node.edge(&EdgeLabel::Failure).is_none() {
                    tracker.abort(&format!(
                        "node '{}' failed with no failure edge: {err}",
                        node.name
                    ));
                    NodeOutcome::Abort
                } else {
                    NodeOutcome::Advance
                }
            }
        }
    }

    /// Determine the next node after an invocation, in priority order:
    /// failure edge on a failed outcome, then a dynamic override, then
    /// the success edge; no applicable edge means the run completed.
    fn next_node(
        &self,
        bound: &BoundGraph,
        node: &Node,
        state: &mut ExecutionState,
    ) -> Option<String> {
        let succeeded = state.last_node_succeeded().unwrap_or(true);

        if !succeeded
            && let Some(target) = node.edge(&EdgeLabel::Failure)
        {
            // A failed orchestrator must not leak its override into the
            // recovery path.
            if let Some(stale) = state.take_next_node_override() {
                tracing::warn!(
                    node = %node.name,
                    stale = %stale,
                    "discarding routing override from failed node"
                );
            }
            tracing::debug!(node = %node.name, target, "following failure edge");
            return Some(target.to_string());
        }

        if let Some(target) = state.take_next_node_override() {
            if bound.graph().contains(&target) {
                tracing::debug!(node = %node.name, target = %target, "following dynamic override");
                return Some(target);
            }
            tracing::warn!(
                node = %node.name,
                target = %target,
                "override targets unknown node; falling back to static edges"
            );
        }

        node.edge(&EdgeLabel::Success).map(|target| {
            tracing::debug!(node = %node.name, target, "following success edge");
            target.to_string()
        })
    }
}

enum NodeOutcome {
    Advance,
    Abort,
}
