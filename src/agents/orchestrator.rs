//! Built-in orchestrator agent: routes to the next node from free text.

use async_trait::async_trait;
use serde_json::json;

use super::{Agent, AgentContext, AgentError, AgentOutput, DynamicRouter};
use crate::registry::NodeRegistry;
use crate::state::StateView;
use crate::tabular::parse_field_list;

/// Metadata key restricting an orchestrator node's candidates to an
/// explicit allow-list of node names (delimited list).
pub(crate) const CANDIDATES_METADATA_KEY: &str = "candidates";

/// Metadata key restricting an orchestrator node's candidates to nodes
/// with a single agent-type capability tag.
pub(crate) const CAPABILITY_METADATA_KEY: &str = "capability";

/// The built-in dynamic-routing agent.
///
/// Reads the node's first declared input field as the routing text,
/// filters the injected registry per the node's metadata, runs the
/// configured selection strategy, and emits a next-node override.
///
/// Candidate filtering, in precedence order:
/// 1. `candidates` metadata: explicit allow-list of node names
/// 2. `capability` metadata: nodes whose agent type matches the tag
/// 3. neither: every node except the orchestrator itself
///
/// Declared output fields receive the selection for downstream nodes:
/// the first gets the chosen node name, the second (when declared) the
/// confidence.
#[derive(Clone, Copy, Debug, Default)]
pub struct OrchestratorAgent;

impl OrchestratorAgent {
    fn candidates(ctx: &AgentContext) -> NodeRegistry {
        if let Some(cell) = ctx.metadata.get(CANDIDATES_METADATA_KEY) {
            return ctx.registry.with_allowed_names(&parse_field_list(cell));
        }
        if let Some(tag) = ctx.metadata.get(CAPABILITY_METADATA_KEY) {
            return ctx.registry.with_capability(tag);
        }
        let everyone_else: Vec<String> = ctx
            .registry
            .entries()
            .iter()
            .map(|info| info.name.clone())
            .filter(|name| name != &ctx.node_name)
            .collect();
        ctx.registry.with_allowed_names(&everyone_else)
    }
}

#[async_trait]
impl Agent for OrchestratorAgent {
    async fn process(
        &self,
        view: StateView,
        ctx: AgentContext,
    ) -> Result<AgentOutput, AgentError> {
        let input_text = ctx
            .primary_input(&view)
            .ok_or_else(|| AgentError::MissingInput {
                what: ctx
                    .input_fields
                    .first()
                    .cloned()
                    .unwrap_or_else(|| "input text".to_string()),
            })?;

        let candidates = Self::candidates(&ctx);
        let selection = self
            .select_next(
                input_text,
                &candidates,
                &ctx.selector,
                ctx.strategy,
                ctx.confidence_threshold,
            )
            .await?;

        tracing::debug!(
            node = %ctx.node_name,
            target = %selection.node_name,
            confidence = selection.confidence,
            "orchestrator routed"
        );

        let mut output = AgentOutput::new().route_to(&selection.node_name);
        let mut declared = ctx.output_fields.iter();
        if let Some(field) = declared.next() {
            output = output.with_value(field, json!(selection.node_name));
        }
        if let Some(field) = declared.next() {
            output = output.with_value(field, json!(selection.confidence));
        }
        Ok(output)
    }

    fn router(&self) -> Option<&dyn DynamicRouter> {
        Some(self)
    }
}

#[async_trait]
impl DynamicRouter for OrchestratorAgent {}
