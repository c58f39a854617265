//! Built-in passthrough agent.

use async_trait::async_trait;

use super::{Agent, AgentContext, AgentError, AgentOutput};
use crate::state::StateView;

/// Copies declared inputs to declared outputs by position.
///
/// `input_fields[i]` is copied to `output_fields[i]`; missing inputs and
/// unpaired fields are skipped. Useful for wiring and for terminal nodes
/// that only need to surface upstream values under a new key.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassthroughAgent;

#[async_trait]
impl Agent for PassthroughAgent {
    async fn process(
        &self,
        view: StateView,
        ctx: AgentContext,
    ) -> Result<AgentOutput, AgentError> {
        let mut output = AgentOutput::new();
        for (input, target) in ctx.input_fields.iter().zip(ctx.output_fields.iter()) {
            if let Some(value) = view.get(input) {
                output = output.with_value(target, value.clone());
            }
        }
        Ok(output)
    }
}
