mod common;

use common::*;
use rowloom::graphs::GraphBuilder;
use rowloom::registry::NodeRegistry;
use rowloom::tabular::RowRecord;

#[test]
fn snapshot_carries_metadata_only() {
    let graphs = GraphBuilder::new().build(&triage_rows()).unwrap();
    let registry = NodeRegistry::from_graph(graphs.graph("support").unwrap());

    let billing = registry.get("Billing").unwrap();
    assert_eq!(billing.agent_type, "marker");
    assert!(billing.description.contains("Refunds"));
    assert_eq!(billing.keywords, vec!["charged", "refund", "card"]);
}

#[test]
fn entries_preserve_graph_node_order() {
    let graphs = GraphBuilder::new().build(&triage_rows()).unwrap();
    let registry = NodeRegistry::from_graph(graphs.graph("support").unwrap());

    let names: Vec<&str> = registry.entries().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Start", "Orchestrator", "Billing", "Support"]);
}

#[test]
fn capability_filter_keeps_matching_agent_types_only() {
    let rows = vec![
        RowRecord::new("g", "a", "specialist"),
        RowRecord::new("g", "b", "orchestrator"),
        RowRecord::new("g", "c", "specialist"),
    ];
    let graphs = GraphBuilder::new().build(&rows).unwrap();
    let registry = NodeRegistry::from_graph(graphs.graph("g").unwrap());

    let specialists = registry.with_capability("specialist");
    let names: Vec<&str> = specialists.entries().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["a", "c"]);
}

#[test]
fn allow_list_filter_follows_registry_order_not_list_order() {
    let registry = billing_shipping_registry();
    let subset =
        registry.with_allowed_names(&["Support".to_string(), "Billing".to_string()]);

    let names: Vec<&str> = subset.entries().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Billing", "Support"]);
}

#[test]
fn filtering_never_mutates_the_source() {
    let registry = billing_shipping_registry();
    let _ = registry.with_allowed_names(&[]);
    let _ = registry.with_capability("nonexistent");
    assert_eq!(registry.len(), 2);
}

#[test]
fn unknown_names_filter_to_an_empty_subset() {
    let registry = billing_shipping_registry();
    let subset = registry.with_allowed_names(&["Ghost".to_string()]);
    assert!(subset.is_empty());
}
