//! Built-in prompt-completion agent.

use async_trait::async_trait;
use serde_json::{Value, json};

use super::{Agent, AgentContext, AgentError, AgentOutput};
use crate::llm::ProviderError;
use crate::state::StateView;

/// The built-in model-backed agent.
///
/// Renders the node's prompt template against the restricted input view
/// (each `{field}` placeholder is replaced by that field's value), sends
/// it to the configured completion client, and writes the reply to the
/// node's first declared output field.
#[derive(Clone, Copy, Debug, Default)]
pub struct LlmAgent;

#[async_trait]
impl Agent for LlmAgent {
    async fn process(
        &self,
        view: StateView,
        ctx: AgentContext,
    ) -> Result<AgentOutput, AgentError> {
        let client = ctx.completion.as_ref().ok_or_else(|| {
            AgentError::Provider(ProviderError::new(
                "unconfigured",
                "no completion client configured for this application",
            ))
        })?;

        let prompt = render_prompt(&ctx.prompt, &ctx.input_fields, &view);
        let reply = client
            .complete(&prompt, Default::default())
            .await
            .map_err(AgentError::Provider)?;

        let mut output = AgentOutput::new();
        if let Some(field) = ctx.output_fields.first() {
            output = output.with_value(field, json!(reply));
        } else {
            tracing::warn!(
                node = %ctx.node_name,
                "llm agent has no declared output field; reply discarded"
            );
        }
        Ok(output)
    }
}

/// Substitute `{field}` placeholders with the view's values.
///
/// Missing fields leave their placeholder untouched so the gap is visible
/// in the rendered prompt rather than silently blank.
fn render_prompt(template: &str, input_fields: &[String], view: &StateView) -> String {
    let mut rendered = template.to_string();
    for field in input_fields {
        if let Some(value) = view.get(field) {
            let text = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            rendered = rendered.replace(&format!("{{{field}}}"), &text);
        }
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ExecutionState;

    #[test]
    fn renders_string_and_non_string_fields() {
        let mut state = ExecutionState::new();
        state.insert("name", json!("Ada"));
        state.insert("count", json!(3));
        let view = state.view(&["name".to_string(), "count".to_string()]);

        let rendered = render_prompt(
            "Hello {name}, you have {count} tickets and {missing}.",
            &["name".to_string(), "count".to_string()],
            &view,
        );
        assert_eq!(rendered, "Hello Ada, you have 3 tickets and {missing}.");
    }
}
