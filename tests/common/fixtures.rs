#![allow(dead_code)]

use std::sync::Arc;

use rowloom::agents::AgentCatalog;
use rowloom::registry::{NodeInfo, NodeRegistry};
use rowloom::tabular::RowRecord;

use super::agents::{FailingAgent, MarkerAgent, NoopAgent};

/// Built-in catalog extended with the stub agent types tests rely on.
pub fn test_catalog() -> AgentCatalog {
    AgentCatalog::with_builtins()
        .with_shared("noop", Arc::new(NoopAgent))
        .with_shared("marker", Arc::new(MarkerAgent::new("done")))
        .with_shared("failing", Arc::new(FailingAgent::new("payment backend down")))
}

/// Registry with a billing node and a shipping node, descriptions only.
pub fn billing_shipping_registry() -> NodeRegistry {
    NodeRegistry::from_entries(vec![
        NodeInfo {
            name: "Billing".to_string(),
            agent_type: "specialist".to_string(),
            description: "Refunds, invoices, card charges, double charges".to_string(),
            keywords: vec!["charged".to_string(), "refund".to_string()],
        },
        NodeInfo {
            name: "Support".to_string(),
            agent_type: "specialist".to_string(),
            description: "General product questions and troubleshooting".to_string(),
            keywords: Vec::new(),
        },
    ])
}

/// Rows for the triage scenario: Start -> Orchestrator -> {Billing, Support}.
pub fn triage_rows() -> Vec<RowRecord> {
    vec![
        RowRecord::new("support", "Start", "passthrough")
            .with_input_fields("ticket_text")
            .with_output_fields("intake_text")
            .with_edge("success", "Orchestrator"),
        RowRecord::new("support", "Orchestrator", "orchestrator")
            .with_input_fields("ticket_text")
            .with_output_fields("routed_to|route_confidence")
            .with_metadata("candidates", "Billing|Support"),
        RowRecord::new("support", "Billing", "marker")
            .with_output_fields("billing_outcome")
            .with_description("Refunds, invoices, card charges, double charges")
            .with_metadata("keywords", "charged|refund|card"),
        RowRecord::new("support", "Support", "marker")
            .with_output_fields("support_outcome")
            .with_description("General product questions and troubleshooting"),
    ]
}

/// Rows for a two-node cycle: A -(success)-> B -(success)-> A.
pub fn cycle_rows() -> Vec<RowRecord> {
    vec![
        RowRecord::new("loop", "A", "noop").with_edge("success", "B"),
        RowRecord::new("loop", "B", "noop").with_edge("success", "A"),
    ]
}

/// Rows for the payment scenario, with or without a failure edge on Pay.
pub fn payment_rows(with_failure_edge: bool) -> Vec<RowRecord> {
    let mut pay = RowRecord::new("payments", "Pay", "failing");
    if with_failure_edge {
        pay = pay.with_edge("failure", "Retry");
    }
    vec![
        pay,
        RowRecord::new("payments", "Retry", "marker").with_output_fields("retry_outcome"),
    ]
}
