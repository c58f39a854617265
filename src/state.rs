//! Execution state for one workflow run.
//!
//! This module provides the evolving key-value store passed between nodes
//! during a run, plus the restricted read view handed to agents.
//!
//! # Ownership
//!
//! The executor exclusively owns state transitions between nodes. Agents
//! never touch [`ExecutionState`] directly: each invocation receives a
//! [`StateView`] restricted to the node's declared input fields and
//! returns a write delta restricted to its declared output fields.
//!
//! # Reserved keys
//!
//! Two keys are owned by the executor and stripped from agent deltas:
//!
//! - [`LAST_NODE_SUCCEEDED`]: boolean outcome flag, "did the last node
//!   succeed"
//! - [`NEXT_NODE_OVERRIDE`]: dynamic routing override set during an
//!   orchestrator node's invocation; cleared by the executor immediately
//!   after being consumed so stale routing cannot leak into a later step
//!
//! # Examples
//!
//! ```rust
//! use rowloom::state::ExecutionState;
//! use serde_json::json;
//!
//! let mut state = ExecutionState::new();
//! state.insert("ticket_text", json!("my card was charged twice"));
//!
//! let view = state.view(&["ticket_text".to_string()]);
//! assert_eq!(view.get("ticket_text"), Some(&json!("my card was charged twice")));
//! ```

use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::utils::collections::new_state_map;

/// Reserved key: boolean outcome flag for the most recent node.
pub const LAST_NODE_SUCCEEDED: &str = "last_node_succeeded";

/// Reserved key: dynamic next-node override set by orchestrator nodes.
pub const NEXT_NODE_OVERRIDE: &str = "next_node_override";

/// All keys owned by the executor.
pub const RESERVED_KEYS: [&str; 2] = [LAST_NODE_SUCCEEDED, NEXT_NODE_OVERRIDE];

/// The evolving key-value store for one run.
///
/// Append/overwrite-only: keys are written or replaced, never removed,
/// with the single exception of the next-node override, which the
/// executor consumes destructively.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExecutionState {
    values: FxHashMap<String, Value>,
}

impl ExecutionState {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: new_state_map(),
        }
    }

    /// Creates a state seeded with the given values.
    ///
    /// This is the usual way to provide a run's initial input:
    ///
    /// ```rust
    /// use rowloom::state::ExecutionState;
    /// use serde_json::json;
    ///
    /// let state = ExecutionState::with_values([
    ///     ("ticket_text", json!("where is my parcel?")),
    /// ]);
    /// assert!(state.contains_key("ticket_text"));
    /// ```
    #[must_use]
    pub fn with_values<'a>(values: impl IntoIterator<Item = (&'a str, Value)>) -> Self {
        let mut state = Self::new();
        for (key, value) in values {
            state.insert(key, value);
        }
        state
    }

    /// Insert or overwrite a value.
    pub fn insert(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }

    /// Read a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Returns `true` if the key is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// All keys and values.
    #[must_use]
    pub fn values(&self) -> &FxHashMap<String, Value> {
        &self.values
    }

    /// Restricted read view over the given input fields.
    ///
    /// Fields absent from the state are simply absent from the view; it
    /// is the agent's job to decide whether a missing input is fatal.
    #[must_use]
    pub fn view(&self, input_fields: &[String]) -> StateView {
        let mut values = new_state_map();
        for field in input_fields {
            if let Some(value) = self.values.get(field) {
                values.insert(field.clone(), value.clone());
            }
        }
        StateView { values }
    }

    /// Apply an agent's write delta, restricted to `allowed` fields.
    ///
    /// Reserved keys and undeclared fields are dropped; the dropped key
    /// names are returned so the executor can log them. Owned by the
    /// executor: agents never call this.
    pub(crate) fn apply_delta(
        &mut self,
        allowed: &[String],
        delta: FxHashMap<String, Value>,
    ) -> Vec<String> {
        let mut dropped = Vec::new();
        for (key, value) in delta {
            if RESERVED_KEYS.contains(&key.as_str()) || !allowed.contains(&key) {
                dropped.push(key);
            } else {
                self.values.insert(key, value);
            }
        }
        dropped.sort();
        dropped
    }

    /// Set the outcome flag for the node that just ran.
    pub(crate) fn set_last_node_succeeded(&mut self, succeeded: bool) {
        self.values
            .insert(LAST_NODE_SUCCEEDED.to_string(), Value::Bool(succeeded));
    }

    /// Outcome flag of the most recent node, if any node ran yet.
    #[must_use]
    pub fn last_node_succeeded(&self) -> Option<bool> {
        self.values.get(LAST_NODE_SUCCEEDED).and_then(Value::as_bool)
    }

    /// Record a dynamic next-node override.
    pub(crate) fn set_next_node_override(&mut self, target: &str) {
        self.values
            .insert(NEXT_NODE_OVERRIDE.to_string(), Value::String(target.to_string()));
    }

    /// Consume the next-node override, clearing it from the state.
    ///
    /// Destructive by design: the override must never survive the routing
    /// step that consumes it.
    pub(crate) fn take_next_node_override(&mut self) -> Option<String> {
        match self.values.remove(NEXT_NODE_OVERRIDE) {
            Some(Value::String(target)) => Some(target),
            Some(_) | None => None,
        }
    }
}

/// Read-only view of the state restricted to a node's input fields.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StateView {
    values: FxHashMap<String, Value>,
}

impl StateView {
    /// Read a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Read a value as a string slice, if it is a JSON string.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    /// All visible keys and values.
    #[must_use]
    pub fn values(&self) -> &FxHashMap<String, Value> {
        &self.values
    }

    /// Number of visible fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no declared input was present in the state.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
