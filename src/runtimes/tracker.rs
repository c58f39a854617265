//! Execution tracking: per-node results and the frozen run summary.
//!
//! The tracker is purely additive. A node result, once recorded, is never
//! mutated; after [`ExecutionTracker::finish`] the whole summary is
//! frozen and further recording attempts are ignored with a warning.
//! Tracking is always on; the `record_io` verbosity flag only controls
//! whether node inputs and outputs are captured alongside the results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

use super::types::{NodeStatus, RunId, RunStatus};

/// Result of one node invocation (or the aborted mark for a node that
/// never got to run).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeResult {
    /// Node name.
    pub name: String,
    /// Terminal status of this invocation.
    pub status: NodeStatus,
    /// Wall-clock duration of the invocation in milliseconds.
    pub duration_ms: u64,
    /// Error message, when the invocation failed or was aborted.
    pub error: Option<String>,
    /// Restricted input view, captured only under `record_io`.
    pub inputs: Option<Value>,
    /// Applied output delta, captured only under `record_io`.
    pub outputs: Option<Value>,
}

impl NodeResult {
    /// Whether this invocation succeeded.
    #[must_use]
    pub fn success(&self) -> bool {
        self.status.is_success()
    }
}

/// Frozen record of one run, consumed by the success policy.
///
/// `execution_path` lists the nodes actually visited in order: it may
/// differ from what the static edges suggest whenever dynamic routing
/// occurred. A caller always receives a complete summary, even when the
/// run aborted, so they can see exactly which nodes ran and why the run
/// stopped.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExecutionSummary {
    /// Name of the executed graph.
    pub graph_name: String,
    /// Unique identifier of this run.
    pub run_id: RunId,
    /// Per-node results in recording order.
    pub results: Vec<NodeResult>,
    /// Node names actually visited, in order.
    pub execution_path: Vec<String>,
    /// Run start timestamp.
    pub started_at: DateTime<Utc>,
    /// Run end timestamp; `None` while the run is still in progress.
    pub finished_at: Option<DateTime<Utc>>,
    /// Terminal (or current) run status.
    pub status: RunStatus,
    /// Why the run aborted, when it did.
    pub abort_reason: Option<String>,
}

impl ExecutionSummary {
    /// Results recorded for the given node name, in order.
    #[must_use]
    pub fn results_for(&self, name: &str) -> Vec<&NodeResult> {
        self.results.iter().filter(|r| r.name == name).collect()
    }
}

/// Entry for the node currently being invoked.
struct OpenNode {
    name: String,
    started: Instant,
    inputs: Option<Value>,
    outputs: Option<Value>,
}

/// Records per-node start/end, success, duration, and errors during one
/// run, and produces the frozen [`ExecutionSummary`].
pub struct ExecutionTracker {
    graph_name: String,
    run_id: RunId,
    results: Vec<NodeResult>,
    execution_path: Vec<String>,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
    status: RunStatus,
    abort_reason: Option<String>,
    open: Option<OpenNode>,
}

impl ExecutionTracker {
    /// Create a tracker for a fresh run of the named graph.
    #[must_use]
    pub fn new(graph_name: &str) -> Self {
        Self {
            graph_name: graph_name.to_string(),
            run_id: RunId::new(),
            results: Vec::new(),
            execution_path: Vec::new(),
            started_at: Utc::now(),
            finished_at: None,
            status: RunStatus::NotStarted,
            abort_reason: None,
            open: None,
        }
    }

    /// The run's identifier.
    #[must_use]
    pub fn run_id(&self) -> &RunId {
        &self.run_id
    }

    /// Record that a node invocation is starting.
    pub fn start_node(&mut self, name: &str) {
        if self.is_frozen("start_node") {
            return;
        }
        debug_assert!(self.open.is_none(), "previous node was never ended");
        self.status = RunStatus::InProgress;
        self.execution_path.push(name.to_string());
        self.open = Some(OpenNode {
            name: name.to_string(),
            started: Instant::now(),
            inputs: None,
            outputs: None,
        });
    }

    /// Capture the restricted input view for the in-flight node.
    ///
    /// Only called under the `record_io` verbosity flag; a no-op when no
    /// node is in flight.
    pub fn record_inputs(&mut self, inputs: Value) {
        if let Some(open) = &mut self.open {
            open.inputs = Some(inputs);
        }
    }

    /// Capture the applied output delta for the in-flight node.
    pub fn record_outputs(&mut self, outputs: Value) {
        if let Some(open) = &mut self.open {
            open.outputs = Some(outputs);
        }
    }

    /// Record that the in-flight node invocation ended.
    pub fn end_node(&mut self, name: &str, success: bool, error: Option<String>) {
        if self.is_frozen("end_node") {
            return;
        }
        match self.open.take() {
            Some(open) if open.name == name => {
                let duration_ms = open.started.elapsed().as_millis() as u64;
                self.results.push(NodeResult {
                    name: open.name,
                    status: if success {
                        NodeStatus::Succeeded
                    } else {
                        NodeStatus::Failed
                    },
                    duration_ms,
                    error,
                    inputs: open.inputs,
                    outputs: open.outputs,
                });
            }
            other => {
                tracing::warn!(node = name, "end_node without matching start_node; ignored");
                self.open = other;
            }
        }
    }

    /// Record that a node was aborted before it could run, and set the
    /// run's abort reason.
    ///
    /// Used for cancellation between node transitions: the pending node
    /// is marked `Aborted`, not `Failed`, and it does not join the
    /// execution path because it was never visited.
    pub fn mark_aborted(&mut self, name: &str, reason: &str) {
        if self.is_frozen("mark_aborted") {
            return;
        }
        self.results.push(NodeResult {
            name: name.to_string(),
            status: NodeStatus::Aborted,
            duration_ms: 0,
            error: Some(reason.to_string()),
            inputs: None,
            outputs: None,
        });
        self.abort_reason = Some(reason.to_string());
    }

    /// Set the run-level abort reason without marking any node.
    pub fn abort(&mut self, reason: &str) {
        if self.is_frozen("abort") {
            return;
        }
        self.abort_reason = Some(reason.to_string());
    }

    /// Freeze the tracker with the run's terminal status.
    pub fn finish(&mut self, status: RunStatus) {
        if self.finished_at.is_some() {
            tracing::warn!("finish called twice; summary already frozen");
            return;
        }
        self.status = status;
        self.finished_at = Some(Utc::now());
    }

    /// The (frozen, after [`finish`](Self::finish)) summary of this run.
    #[must_use]
    pub fn summary(&self) -> ExecutionSummary {
        ExecutionSummary {
            graph_name: self.graph_name.clone(),
            run_id: self.run_id.clone(),
            results: self.results.clone(),
            execution_path: self.execution_path.clone(),
            started_at: self.started_at,
            finished_at: self.finished_at,
            status: self.status,
            abort_reason: self.abort_reason.clone(),
        }
    }

    fn is_frozen(&self, operation: &str) -> bool {
        if self.finished_at.is_some() {
            tracing::warn!(operation, "tracker is frozen; recording ignored");
            true
        } else {
            false
        }
    }
}
