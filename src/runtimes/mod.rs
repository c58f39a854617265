//! Workflow runtime: execution engine, tracking, and success policies.
//!
//! This module provides the components that turn an immutable graph into
//! a finished run:
//!
//! - **[`GraphExecutor`]**: sequential state-machine walk over a
//!   [`BoundGraph`]
//! - **[`ExecutionTracker`]**: always-on per-node result recording
//! - **[`ExecutionPolicy`]**: configurable success verdict over the
//!   frozen [`ExecutionSummary`]
//! - **[`RuntimeConfig`]**: per-application execution settings with
//!   environment overrides
//!
//! Callers normally go through [`App::run`](crate::app::App::run) rather
//! than driving the executor directly.

pub mod executor;
pub mod policy;
pub mod runtime_config;
pub mod tracker;
pub mod types;

pub use executor::{BoundGraph, ExecutionResult, GraphExecutor, StepLimitExceeded};
pub use policy::{ExecutionPolicy, PolicyPredicate};
pub use runtime_config::RuntimeConfig;
pub use tracker::{ExecutionSummary, ExecutionTracker, NodeResult};
pub use types::{NodeStatus, RunId, RunStatus, StepNumber};
