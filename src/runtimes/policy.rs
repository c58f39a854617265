//! Success policies evaluated against a frozen execution summary.
//!
//! Exactly one policy is active per execution. Evaluation never raises:
//! an unevaluable policy (e.g. a critical node that was never visited)
//! counts as failed, not as an error.

use std::fmt;
use std::sync::Arc;

use super::tracker::ExecutionSummary;

/// Caller-supplied predicate over the summary.
pub type PolicyPredicate = Arc<dyn Fn(&ExecutionSummary) -> bool + Send + Sync>;

/// Decides whether a finished run counts as successful.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use rowloom::runtimes::ExecutionPolicy;
///
/// let all = ExecutionPolicy::AllNodesSucceeded;
/// let critical = ExecutionPolicy::CriticalNodesOnly(vec!["Pay".into()]);
/// let custom = ExecutionPolicy::Custom(Arc::new(|summary| {
///     summary.execution_path.len() < 10
/// }));
/// ```
#[derive(Clone)]
pub enum ExecutionPolicy {
    /// True iff every recorded node result succeeded.
    AllNodesSucceeded,
    /// True iff every named node was visited and all of its results
    /// succeeded, regardless of other nodes.
    CriticalNodesOnly(Vec<String>),
    /// Caller-supplied predicate over the summary.
    Custom(PolicyPredicate),
}

impl ExecutionPolicy {
    /// Evaluate the policy. Never raises.
    #[must_use]
    pub fn evaluate(&self, summary: &ExecutionSummary) -> bool {
        match self {
            Self::AllNodesSucceeded => summary.results.iter().all(|r| r.success()),
            Self::CriticalNodesOnly(names) => names.iter().all(|name| {
                let results = summary.results_for(name);
                !results.is_empty() && results.iter().all(|r| r.success())
            }),
            Self::Custom(predicate) => predicate(summary),
        }
    }
}

impl Default for ExecutionPolicy {
    fn default() -> Self {
        Self::AllNodesSucceeded
    }
}

impl fmt::Debug for ExecutionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllNodesSucceeded => write!(f, "AllNodesSucceeded"),
            Self::CriticalNodesOnly(names) => {
                f.debug_tuple("CriticalNodesOnly").field(names).finish()
            }
            Self::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}
