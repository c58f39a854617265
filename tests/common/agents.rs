#![allow(dead_code)]

use async_trait::async_trait;
use rowloom::agents::{Agent, AgentContext, AgentError, AgentOutput, DynamicRouter};
use rowloom::state::StateView;
use serde_json::json;

/// Succeeds and writes a fixed marker to every declared output field.
#[derive(Debug, Clone)]
pub struct MarkerAgent {
    pub marker: &'static str,
}

impl MarkerAgent {
    pub fn new(marker: &'static str) -> Self {
        Self { marker }
    }
}

#[async_trait]
impl Agent for MarkerAgent {
    async fn process(
        &self,
        _view: StateView,
        ctx: AgentContext,
    ) -> Result<AgentOutput, AgentError> {
        let mut output = AgentOutput::new();
        for field in &ctx.output_fields {
            output = output.with_value(field, json!(self.marker));
        }
        Ok(output)
    }
}

/// Succeeds and does nothing.
#[derive(Debug, Clone)]
pub struct NoopAgent;

#[async_trait]
impl Agent for NoopAgent {
    async fn process(
        &self,
        _view: StateView,
        _ctx: AgentContext,
    ) -> Result<AgentOutput, AgentError> {
        Ok(AgentOutput::default())
    }
}

/// Always raises an unrecoverable error.
#[derive(Debug, Clone)]
pub struct FailingAgent {
    pub message: &'static str,
}

impl FailingAgent {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

#[async_trait]
impl Agent for FailingAgent {
    async fn process(
        &self,
        _view: StateView,
        _ctx: AgentContext,
    ) -> Result<AgentOutput, AgentError> {
        Err(AgentError::Failed(self.message.to_string()))
    }
}

/// Succeeds the first `successes` invocations of a run, then soft-fails.
///
/// Stateless across instances but deliberately stateful across calls so
/// retry-loop tests can terminate; guard with a fresh instance per test.
#[derive(Debug)]
pub struct FlakyAgent {
    remaining: std::sync::atomic::AtomicU32,
}

impl FlakyAgent {
    pub fn failing_first(times: u32) -> Self {
        Self {
            remaining: std::sync::atomic::AtomicU32::new(times),
        }
    }
}

#[async_trait]
impl Agent for FlakyAgent {
    async fn process(
        &self,
        _view: StateView,
        _ctx: AgentContext,
    ) -> Result<AgentOutput, AgentError> {
        let left = self
            .remaining
            .fetch_update(
                std::sync::atomic::Ordering::SeqCst,
                std::sync::atomic::Ordering::SeqCst,
                |n| Some(n.saturating_sub(1)),
            )
            .unwrap_or(0);
        if left > 0 {
            Ok(AgentOutput::new().failed())
        } else {
            Ok(AgentOutput::default())
        }
    }
}

/// Writes a declared field, an undeclared field, and a reserved key; the
/// executor must keep only the declared one.
#[derive(Debug, Clone)]
pub struct SprayAgent;

#[async_trait]
impl Agent for SprayAgent {
    async fn process(
        &self,
        _view: StateView,
        _ctx: AgentContext,
    ) -> Result<AgentOutput, AgentError> {
        Ok(AgentOutput::new()
            .with_value("declared", json!("kept"))
            .with_value("undeclared", json!("dropped"))
            .with_value(rowloom::state::NEXT_NODE_OVERRIDE, json!("Nowhere")))
    }
}

/// Routes to a scripted target, bypassing the selector.
#[derive(Debug, Clone)]
pub struct ScriptedRouterAgent {
    pub target: &'static str,
}

impl ScriptedRouterAgent {
    pub fn to(target: &'static str) -> Self {
        Self { target }
    }
}

#[async_trait]
impl Agent for ScriptedRouterAgent {
    async fn process(
        &self,
        _view: StateView,
        _ctx: AgentContext,
    ) -> Result<AgentOutput, AgentError> {
        Ok(AgentOutput::new().route_to(self.target))
    }

    fn router(&self) -> Option<&dyn DynamicRouter> {
        Some(self)
    }
}

#[async_trait]
impl DynamicRouter for ScriptedRouterAgent {}

/// Requests a routing override without exposing the router capability;
/// the executor must ignore the request.
#[derive(Debug, Clone)]
pub struct RogueRouterAgent {
    pub target: &'static str,
}

#[async_trait]
impl Agent for RogueRouterAgent {
    async fn process(
        &self,
        _view: StateView,
        _ctx: AgentContext,
    ) -> Result<AgentOutput, AgentError> {
        Ok(AgentOutput::new().route_to(self.target))
    }
}
