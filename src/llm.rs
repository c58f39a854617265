//! Language-model client contract consumed by the selection layer.
//!
//! The concrete client (provider SDK, HTTP stack, retries) lives outside
//! this crate; rowloom only depends on the narrow [`CompletionClient`]
//! trait. The LLM-assisted selection strategy and the built-in
//! [`LlmAgent`](crate::agents::LlmAgent) are its two consumers.

use async_trait::async_trait;
use miette::Diagnostic;
use thiserror::Error;

/// Sampling options passed through to the backing model call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompletionOptions {
    /// Sampling temperature.
    pub temperature: f32,
    /// Hard cap on generated tokens.
    pub max_tokens: u32,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            temperature: 0.0,
            max_tokens: 256,
        }
    }
}

/// Error raised by a completion backend.
///
/// The selection layer never propagates this to callers: the LLM-assisted
/// strategy degrades to the algorithmic strategy instead. Agents that call
/// the client directly surface it as an agent failure.
#[derive(Debug, Error, Diagnostic)]
#[error("provider error ({provider}): {message}")]
#[diagnostic(
    code(rowloom::llm::provider),
    help("Check connectivity and credentials for the completion backend.")
)]
pub struct ProviderError {
    /// Short identifier of the backing provider.
    pub provider: &'static str,
    /// Human-readable failure description.
    pub message: String,
}

impl ProviderError {
    /// Convenience constructor.
    #[must_use]
    pub fn new(provider: &'static str, message: impl Into<String>) -> Self {
        Self {
            provider,
            message: message.into(),
        }
    }
}

/// A text-completion client.
///
/// Implementations are expected to be cheap to share behind an `Arc` and
/// safe for concurrent use; one client instance typically serves every
/// run of an application.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Complete the given prompt, returning the generated text.
    async fn complete(
        &self,
        prompt: &str,
        options: CompletionOptions,
    ) -> Result<String, ProviderError>;
}
