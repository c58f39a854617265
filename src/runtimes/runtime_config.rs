//! Runtime configuration for graph execution.

use crate::llm::CompletionOptions;
use crate::selector::SelectionStrategy;

use super::policy::ExecutionPolicy;

/// Configuration applied to every run of an application.
///
/// Construction is fluent; [`RuntimeConfig::from_env`] additionally
/// resolves overrides from the process environment (after loading a
/// `.env` file if one is present).
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    /// Selection strategy used by orchestrator nodes.
    pub strategy: SelectionStrategy,
    /// Tiered-escalation confidence threshold.
    pub confidence_threshold: f64,
    /// Optional cap on node invocations per run; `None` means uncapped.
    ///
    /// Cycles are permitted by design, so callers running untrusted
    /// graph definitions should set this.
    pub max_steps: Option<u64>,
    /// Success policy evaluated against the run summary.
    pub policy: ExecutionPolicy,
    /// Capture node inputs/outputs in the summary (verbosity, not
    /// correctness).
    pub record_io: bool,
    /// Sampling options for model-assisted selection.
    pub completion_options: CompletionOptions,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            strategy: SelectionStrategy::default(),
            confidence_threshold: Self::DEFAULT_CONFIDENCE_THRESHOLD,
            max_steps: None,
            policy: ExecutionPolicy::default(),
            record_io: false,
            completion_options: CompletionOptions::default(),
        }
    }
}

impl RuntimeConfig {
    /// Default tiered-escalation threshold.
    pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.5;

    /// Build a config from the environment.
    ///
    /// Recognized variables: `ROWLOOM_STRATEGY`
    /// (`algorithmic`/`llm`/`tiered`), `ROWLOOM_CONFIDENCE_THRESHOLD`,
    /// `ROWLOOM_MAX_STEPS`, `ROWLOOM_RECORD_IO`. Unparseable values fall
    /// back to the defaults with a warning.
    #[must_use]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let mut config = Self::default();

        if let Ok(value) = std::env::var("ROWLOOM_STRATEGY") {
            config.strategy = match value.to_ascii_lowercase().as_str() {
                "algorithmic" => SelectionStrategy::Algorithmic,
                "llm" => SelectionStrategy::LlmAssisted,
                "tiered" => SelectionStrategy::Tiered,
                other => {
                    tracing::warn!(value = other, "unknown ROWLOOM_STRATEGY; using default");
                    config.strategy
                }
            };
        }
        if let Ok(value) = std::env::var("ROWLOOM_CONFIDENCE_THRESHOLD") {
            match value.parse::<f64>() {
                Ok(threshold) => config.confidence_threshold = threshold,
                Err(_) => {
                    tracing::warn!(value, "unparseable ROWLOOM_CONFIDENCE_THRESHOLD; using default");
                }
            }
        }
        if let Ok(value) = std::env::var("ROWLOOM_MAX_STEPS") {
            match value.parse::<u64>() {
                Ok(limit) => config.max_steps = Some(limit),
                Err(_) => tracing::warn!(value, "unparseable ROWLOOM_MAX_STEPS; leaving uncapped"),
            }
        }
        if let Ok(value) = std::env::var("ROWLOOM_RECORD_IO") {
            config.record_io = matches!(value.as_str(), "1" | "true" | "yes");
        }

        config
    }

    /// Set the selection strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: SelectionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the tiered-escalation threshold.
    #[must_use]
    pub fn with_confidence_threshold(mut self, threshold: f64) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    /// Cap the number of node invocations per run.
    #[must_use]
    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    /// Set the success policy.
    #[must_use]
    pub fn with_policy(mut self, policy: ExecutionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Capture node inputs/outputs in the summary.
    #[must_use]
    pub fn with_record_io(mut self, record_io: bool) -> Self {
        self.record_io = record_io;
        self
    }

    /// Set the sampling options for model-assisted selection.
    #[must_use]
    pub fn with_completion_options(mut self, options: CompletionOptions) -> Self {
        self.completion_options = options;
        self
    }
}
