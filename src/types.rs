//! Core types for the rowloom workflow framework.
//!
//! This module defines the fundamental identifiers used throughout the
//! system for labeling edges in workflow graphs. These are the core domain
//! concepts that define what a workflow *is*.
//!
//! For runtime execution types (run ids, step numbers, node/run status),
//! see [`crate::runtimes::types`].
//!
//! # Examples
//!
//! ```rust
//! use rowloom::types::EdgeLabel;
//!
//! let success = EdgeLabel::Success;
//! let branch = EdgeLabel::Custom("escalate".to_string());
//!
//! // Encode for persistence
//! assert_eq!(branch.encode(), "escalate");
//! assert_eq!(EdgeLabel::decode("failure"), EdgeLabel::Failure);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies the outcome label of an edge in a workflow graph.
///
/// Every outgoing edge of a node is keyed by an `EdgeLabel`. The `Success`
/// and `Failure` labels drive the executor's built-in routing rule; any
/// other label is a custom branch name that agents may route to
/// explicitly.
///
/// # Persistence
///
/// `EdgeLabel` round-trips through its lowercase string form via
/// [`encode`](Self::encode)/[`decode`](Self::decode), matching the labels
/// that appear in tabular workflow definitions.
///
/// # Examples
///
/// ```rust
/// use rowloom::types::EdgeLabel;
///
/// let label = EdgeLabel::from("success");
/// assert_eq!(label, EdgeLabel::Success);
///
/// let branch = EdgeLabel::from("billing");
/// assert_eq!(branch.encode(), "billing");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeLabel {
    /// Followed when the node's agent completed successfully.
    Success,

    /// Followed when the node's agent failed (error or soft failure).
    ///
    /// A node with no `Failure` edge is terminal for failed outcomes: an
    /// unrecovered failure aborts the run.
    Failure,

    /// Custom branch label identified by a user-defined string.
    Custom(String),
}

impl EdgeLabel {
    /// Encode an EdgeLabel into its persisted string form.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use rowloom::types::EdgeLabel;
    /// assert_eq!(EdgeLabel::Success.encode(), "success");
    /// assert_eq!(EdgeLabel::Custom("retry".into()).encode(), "retry");
    /// ```
    #[must_use]
    pub fn encode(&self) -> String {
        match self {
            EdgeLabel::Success => "success".to_string(),
            EdgeLabel::Failure => "failure".to_string(),
            EdgeLabel::Custom(s) => s.clone(),
        }
    }

    /// Decode a persisted string form back into an EdgeLabel.
    ///
    /// Matching is case-insensitive for the two built-in labels so tabular
    /// sources may spell them `Success`/`FAILURE`/etc.; anything else is a
    /// custom branch, preserved verbatim.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use rowloom::types::EdgeLabel;
    /// assert_eq!(EdgeLabel::decode("Success"), EdgeLabel::Success);
    /// assert_eq!(EdgeLabel::decode("billing"), EdgeLabel::Custom("billing".to_string()));
    /// ```
    pub fn decode(s: &str) -> Self {
        if s.eq_ignore_ascii_case("success") {
            EdgeLabel::Success
        } else if s.eq_ignore_ascii_case("failure") {
            EdgeLabel::Failure
        } else {
            EdgeLabel::Custom(s.to_string())
        }
    }

    /// Returns `true` if this is the [`Success`](Self::Success) label.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Returns `true` if this is the [`Failure`](Self::Failure) label.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure)
    }
}

impl fmt::Display for EdgeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failure => write!(f, "failure"),
            Self::Custom(name) => write!(f, "{}", name),
        }
    }
}

// Developer Experience: allow using string literals where an EdgeLabel is expected.
impl From<&str> for EdgeLabel {
    fn from(s: &str) -> Self {
        EdgeLabel::decode(s)
    }
}
