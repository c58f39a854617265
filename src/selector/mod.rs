//! Dynamic node selection from free text.
//!
//! A [`NodeSelector`] picks the best-matching node from a candidate
//! [`NodeRegistry`] given unstructured input text, returning the chosen
//! node name and a confidence score. Three strategies are available:
//!
//! - [`SelectionStrategy::Algorithmic`]: deterministic token-overlap
//!   scoring, no model call
//! - [`SelectionStrategy::LlmAssisted`]: ask the completion client to
//!   name the best candidate, parsing its reply defensively
//! - [`SelectionStrategy::Tiered`] (default): algorithmic first, with
//!   escalation to the model only when confidence falls below the
//!   configured threshold, bounding expensive calls to ambiguous inputs
//!
//! Candidate filtering (`all`, capability tag, allow-list) happens on the
//! registry before calling [`NodeSelector::select`]; the selector itself
//! is filter-agnostic.
//!
//! # Examples
//!
//! ```rust
//! use rowloom::registry::{NodeInfo, NodeRegistry};
//! use rowloom::selector::{NodeSelector, SelectError, SelectionStrategy};
//!
//! # async fn example() -> Result<(), SelectError> {
//! let registry = NodeRegistry::from_entries(vec![
//!     NodeInfo {
//!         name: "Billing".into(),
//!         agent_type: "specialist".into(),
//!         description: "Refunds, invoices, card charges".into(),
//!         keywords: vec!["charged".into(), "refund".into()],
//!     },
//!     NodeInfo {
//!         name: "Shipping".into(),
//!         agent_type: "specialist".into(),
//!         description: "Parcel tracking and delivery".into(),
//!         keywords: vec![],
//!     },
//! ]);
//!
//! let selector = NodeSelector::without_client();
//! let selection = selector
//!     .select(
//!         "my card was charged twice",
//!         &registry,
//!         SelectionStrategy::Algorithmic,
//!         0.2,
//!     )
//!     .await?;
//! assert_eq!(selection.node_name, "Billing");
//! # Ok(())
//! # }
//! ```

mod llm;
mod scoring;

pub use scoring::{Scorer, TokenOverlapScorer, tokenize};

use std::sync::Arc;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::llm::{CompletionClient, CompletionOptions};
use crate::registry::NodeRegistry;

/// Confidence reported for a defensively parsed model match: the model
/// was asked for the single best candidate and named one, so no score
/// separation applies.
const LLM_MATCH_CONFIDENCE: f64 = 1.0;

/// Which selection algorithm to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionStrategy {
    /// Pure keyword/heuristic matching; deterministic and free.
    Algorithmic,
    /// Model-assisted matching with algorithmic fallback on parse or
    /// provider failure.
    LlmAssisted,
    /// Algorithmic first, escalating to the model only below the
    /// confidence threshold.
    #[default]
    Tiered,
}

/// A selection outcome: the chosen node and how confident the selector is.
///
/// A low-confidence selection is a valid, non-error result: the caller
/// decides whether to apply a configured default instead.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    /// Canonical name of the chosen node.
    pub node_name: String,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
}

/// Errors raised by [`NodeSelector::select`].
///
/// Selection fails only when there is nothing to select from; every other
/// condition degrades to a best-effort answer.
#[derive(Debug, Error, Diagnostic)]
pub enum SelectError {
    /// The candidate set was empty.
    #[error("no candidate nodes to select from")]
    #[diagnostic(
        code(rowloom::selector::no_candidates),
        help("Check the candidate filter; it removed every node.")
    )]
    NoCandidates,
}

/// Selects the best-matching node for a piece of free text.
///
/// The selector is immutable and cheap to share; one instance serves
/// every run of an application. The completion client is optional: without
/// one, the model-assisted paths degrade to the algorithmic strategy with
/// a warning.
pub struct NodeSelector {
    client: Option<Arc<dyn CompletionClient>>,
    scorer: Arc<dyn Scorer>,
    completion_options: CompletionOptions,
}

impl NodeSelector {
    /// Creates a selector backed by the given completion client.
    #[must_use]
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            client: Some(client),
            scorer: Arc::new(TokenOverlapScorer),
            completion_options: CompletionOptions::default(),
        }
    }

    /// Creates a selector with no completion client.
    ///
    /// The algorithmic strategy works as usual; model-assisted strategies
    /// fall back to it.
    #[must_use]
    pub fn without_client() -> Self {
        Self {
            client: None,
            scorer: Arc::new(TokenOverlapScorer),
            completion_options: CompletionOptions::default(),
        }
    }

    /// Replace the scoring policy.
    #[must_use]
    pub fn with_scorer(mut self, scorer: Arc<dyn Scorer>) -> Self {
        self.scorer = scorer;
        self
    }

    /// Replace the sampling options used for model-assisted selection.
    #[must_use]
    pub fn with_completion_options(mut self, options: CompletionOptions) -> Self {
        self.completion_options = options;
        self
    }

    /// Pick the best-matching candidate for the input text.
    ///
    /// Fails with [`SelectError::NoCandidates`] only when `candidates` is
    /// empty; otherwise always returns a best-effort [`Selection`].
    ///
    /// `confidence_threshold` is consulted only by the tiered strategy.
    #[tracing::instrument(skip(self, input_text, candidates), fields(candidates = candidates.len()))]
    pub async fn select(
        &self,
        input_text: &str,
        candidates: &NodeRegistry,
        strategy: SelectionStrategy,
        confidence_threshold: f64,
    ) -> Result<Selection, SelectError> {
        if candidates.is_empty() {
            return Err(SelectError::NoCandidates);
        }

        match strategy {
            SelectionStrategy::Algorithmic => Ok(self.algorithmic(input_text, candidates)),
            SelectionStrategy::LlmAssisted => {
                let fallback = self.algorithmic(input_text, candidates);
                Ok(self.llm_assisted(input_text, candidates, fallback).await)
            }
            SelectionStrategy::Tiered => {
                let heuristic = self.algorithmic(input_text, candidates);
                if heuristic.confidence >= confidence_threshold {
                    tracing::debug!(
                        node = %heuristic.node_name,
                        confidence = heuristic.confidence,
                        "tiered selection satisfied on the cheap path"
                    );
                    return Ok(heuristic);
                }
                tracing::debug!(
                    confidence = heuristic.confidence,
                    confidence_threshold,
                    "tiered selection escalating to model"
                );
                Ok(self.llm_assisted(input_text, candidates, heuristic).await)
            }
        }
    }

    /// Run the deterministic scoring strategy.
    ///
    /// The candidate set is non-empty here, so ranking always yields a
    /// winner.
    fn algorithmic(&self, input_text: &str, candidates: &NodeRegistry) -> Selection {
        let ranked = scoring::rank(self.scorer.as_ref(), input_text, candidates.entries())
            .expect("non-empty candidate set always ranks");
        Selection {
            node_name: candidates.entries()[ranked.best].name.clone(),
            confidence: ranked.confidence,
        }
    }

    /// Ask the model to name the best candidate, falling back to the
    /// precomputed algorithmic selection on any provider or parse failure.
    async fn llm_assisted(
        &self,
        input_text: &str,
        candidates: &NodeRegistry,
        fallback: Selection,
    ) -> Selection {
        let Some(client) = &self.client else {
            tracing::warn!("no completion client configured; using algorithmic selection");
            return fallback;
        };

        let prompt = llm::build_selection_prompt(input_text, candidates.entries());
        let reply = match client.complete(&prompt, self.completion_options).await {
            Ok(reply) => reply,
            Err(err) => {
                tracing::warn!(error = %err, "completion failed; using algorithmic selection");
                return fallback;
            }
        };

        match llm::parse_selection_reply(&reply, candidates.entries()) {
            Some(node_name) => Selection {
                node_name,
                confidence: LLM_MATCH_CONFIDENCE,
            },
            None => {
                tracing::warn!(
                    reply = %reply.trim(),
                    "model reply matched no candidate; using algorithmic selection"
                );
                fallback
            }
        }
    }
}
