#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use rowloom::llm::{CompletionClient, CompletionOptions, ProviderError};

/// Replies with a fixed string and counts invocations.
pub struct ScriptedClient {
    pub reply: String,
    calls: AtomicUsize,
}

impl ScriptedClient {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(
        &self,
        _prompt: &str,
        _options: CompletionOptions,
    ) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }
}

/// Fails every call with a provider error and counts invocations.
pub struct ErroringClient {
    calls: AtomicUsize,
}

impl ErroringClient {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionClient for ErroringClient {
    async fn complete(
        &self,
        _prompt: &str,
        _options: CompletionOptions,
    ) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ProviderError::new("stub", "backend unavailable"))
    }
}

/// Panics if called at all; used to prove a code path never reaches the
/// model.
pub struct PanickingClient;

#[async_trait]
impl CompletionClient for PanickingClient {
    async fn complete(
        &self,
        _prompt: &str,
        _options: CompletionOptions,
    ) -> Result<String, ProviderError> {
        panic!("completion client must not be called on this path");
    }
}
