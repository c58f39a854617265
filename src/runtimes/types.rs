//! Runtime execution types: run identifiers and status enums.
//!
//! These are infrastructure concerns, distinct from the core domain types
//! in [`crate::types`]: a graph is defined in terms of edge labels; a
//! *run* of a graph is identified and described by the types here.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Step counter within one run (1-based; 0 means "not started").
pub type StepNumber = u64;

/// Unique identifier for one graph run.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(String);

impl RunId {
    /// Generate a fresh random run id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap an existing identifier (e.g. supplied by a caller for
    /// correlation with external systems).
    #[must_use]
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-node lifecycle within a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeStatus {
    /// Not yet visited.
    Pending,
    /// Invocation in progress.
    Running,
    /// Invocation completed successfully.
    Succeeded,
    /// Invocation failed (error or soft failure).
    Failed,
    /// The run was cancelled before this node could complete.
    Aborted,
}

impl NodeStatus {
    /// Returns `true` for the successful terminal state.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Running => write!(f, "running"),
            Self::Succeeded => write!(f, "succeeded"),
            Self::Failed => write!(f, "failed"),
            Self::Aborted => write!(f, "aborted"),
        }
    }
}

/// Graph-level lifecycle of a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    /// Created but no node has started.
    #[default]
    NotStarted,
    /// At least one node has started and the run is still advancing.
    InProgress,
    /// Terminated by edge exhaustion; not an error.
    Completed,
    /// Terminated by an unrecovered failure, cancellation, or step limit.
    Aborted,
}

impl RunStatus {
    /// Returns `true` once the run can no longer advance.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Aborted)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted => write!(f, "not_started"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Completed => write!(f, "completed"),
            Self::Aborted => write!(f, "aborted"),
        }
    }
}
