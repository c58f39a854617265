mod common;

use std::sync::Arc;

use common::*;
use rowloom::registry::NodeRegistry;
use rowloom::selector::{NodeSelector, SelectError, SelectionStrategy};

const THRESHOLD: f64 = 0.5;

#[tokio::test]
async fn empty_candidate_set_is_the_only_error() {
    let selector = NodeSelector::without_client();
    let err = selector
        .select(
            "anything",
            &NodeRegistry::default(),
            SelectionStrategy::Algorithmic,
            THRESHOLD,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, SelectError::NoCandidates));
}

#[tokio::test]
async fn algorithmic_picks_the_overlapping_candidate() {
    let selector = NodeSelector::without_client();
    let selection = selector
        .select(
            "my card was charged twice",
            &billing_shipping_registry(),
            SelectionStrategy::Algorithmic,
            THRESHOLD,
        )
        .await
        .unwrap();

    assert_eq!(selection.node_name, "Billing");
    assert!(selection.confidence > 0.0);
}

#[tokio::test]
async fn no_overlap_is_a_low_confidence_result_not_an_error() {
    let selector = NodeSelector::without_client();
    let selection = selector
        .select(
            "xylophone zephyr",
            &billing_shipping_registry(),
            SelectionStrategy::Algorithmic,
            THRESHOLD,
        )
        .await
        .unwrap();

    // First candidate in registry order wins the tie deterministically.
    assert_eq!(selection.node_name, "Billing");
    assert_eq!(selection.confidence, 0.0);
}

#[tokio::test]
async fn llm_assisted_returns_the_models_exact_candidate() {
    let client = Arc::new(ScriptedClient::replying("Support"));
    let selector = NodeSelector::new(client.clone());
    let selection = selector
        .select(
            "my card was charged twice",
            &billing_shipping_registry(),
            SelectionStrategy::LlmAssisted,
            THRESHOLD,
        )
        .await
        .unwrap();

    assert_eq!(selection.node_name, "Support");
    assert_eq!(selection.confidence, 1.0);
    assert_eq!(client.calls(), 1);
}

#[tokio::test]
async fn unparseable_reply_falls_back_to_algorithmic() {
    let client = Arc::new(ScriptedClient::replying("I think Billing is best"));
    let selector = NodeSelector::new(client);
    let selection = selector
        .select(
            "my card was charged twice",
            &billing_shipping_registry(),
            SelectionStrategy::LlmAssisted,
            THRESHOLD,
        )
        .await
        .unwrap();

    // Fallback is the algorithmic winner, not an error.
    assert_eq!(selection.node_name, "Billing");
}

#[tokio::test]
async fn provider_error_falls_back_to_algorithmic() {
    let client = Arc::new(ErroringClient::new());
    let selector = NodeSelector::new(client.clone());
    let selection = selector
        .select(
            "my card was charged twice",
            &billing_shipping_registry(),
            SelectionStrategy::LlmAssisted,
            THRESHOLD,
        )
        .await
        .unwrap();

    assert_eq!(selection.node_name, "Billing");
    assert_eq!(client.calls(), 1);
}

#[tokio::test]
async fn tiered_skips_the_model_when_confidence_is_high() {
    // The panicking client proves the expensive path is never taken.
    let selector = NodeSelector::new(Arc::new(PanickingClient));
    let selection = selector
        .select(
            "my card was charged twice",
            &billing_shipping_registry(),
            SelectionStrategy::Tiered,
            0.1,
        )
        .await
        .unwrap();

    assert_eq!(selection.node_name, "Billing");
}

#[tokio::test]
async fn tiered_escalates_below_the_threshold() {
    let client = Arc::new(ScriptedClient::replying("Support"));
    let selector = NodeSelector::new(client.clone());
    let selection = selector
        .select(
            "hello there",
            &billing_shipping_registry(),
            SelectionStrategy::Tiered,
            0.9,
        )
        .await
        .unwrap();

    assert_eq!(client.calls(), 1);
    assert_eq!(selection.node_name, "Support");
}

#[tokio::test]
async fn missing_client_degrades_model_strategies_to_algorithmic() {
    let selector = NodeSelector::without_client();
    let selection = selector
        .select(
            "my card was charged twice",
            &billing_shipping_registry(),
            SelectionStrategy::LlmAssisted,
            THRESHOLD,
        )
        .await
        .unwrap();
    assert_eq!(selection.node_name, "Billing");
}

#[tokio::test]
async fn filtering_is_done_by_the_caller_on_the_registry() {
    let registry = billing_shipping_registry();
    let only_support = registry.with_allowed_names(&["Support".to_string()]);

    let selector = NodeSelector::without_client();
    let selection = selector
        .select(
            "my card was charged twice",
            &only_support,
            SelectionStrategy::Algorithmic,
            THRESHOLD,
        )
        .await
        .unwrap();

    assert_eq!(selection.node_name, "Support");
    // Source registry is untouched.
    assert_eq!(registry.len(), 2);
}
