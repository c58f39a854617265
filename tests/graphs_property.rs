use proptest::prelude::*;
use rowloom::graphs::GraphBuilder;
use rowloom::registry::NodeRegistry;
use rowloom::selector::{NodeSelector, SelectionStrategy};
use rowloom::tabular::RowRecord;

fn node_name() -> impl Strategy<Value = String> {
    "[a-z]{1,6}"
}

/// Arbitrary row sets whose edges only target nodes that exist: each row
/// may link to any other row's node by index.
fn valid_rows() -> impl Strategy<Value = Vec<RowRecord>> {
    prop::collection::vec((node_name(), prop::option::of(0usize..8)), 1..8).prop_map(|specs| {
        let names: Vec<String> = specs
            .iter()
            .enumerate()
            .map(|(i, (name, _))| format!("{name}{i}"))
            .collect();
        specs
            .iter()
            .enumerate()
            .map(|(i, (_, edge))| {
                let mut row = RowRecord::new("g", &names[i], "noop");
                if let Some(target) = edge {
                    row = row.with_edge("success", &names[*target % names.len()]);
                }
                row
            })
            .collect()
    })
}

proptest! {
    /// For all valid row sets, build followed by describe yields a graph
    /// whose every edge target is a member of its node set.
    #[test]
    fn no_dangling_edges_survive_build(rows in valid_rows()) {
        let graphs = GraphBuilder::new().build(&rows).unwrap();
        for graph in graphs.graphs() {
            let description = graph.describe();
            for edge in &description.edges {
                prop_assert!(
                    description.nodes.contains(&edge.to),
                    "edge {:?} survived build with a dangling target",
                    edge
                );
            }
            prop_assert!(description.nodes.contains(&description.entry));
        }
    }

    /// The algorithmic strategy is deterministic: identical inputs always
    /// return the same selection.
    #[test]
    fn algorithmic_selection_is_deterministic(
        input in "[a-z ]{0,40}",
        descriptions in prop::collection::vec("[a-z ]{0,30}", 1..6),
    ) {
        let rows: Vec<RowRecord> = descriptions
            .iter()
            .enumerate()
            .map(|(i, d)| RowRecord::new("g", &format!("n{i}"), "noop").with_description(d))
            .collect();
        let graphs = GraphBuilder::new().build(&rows).unwrap();
        let registry = NodeRegistry::from_graph(graphs.graph("g").unwrap());

        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let selector = NodeSelector::without_client();
        let first = runtime
            .block_on(selector.select(&input, &registry, SelectionStrategy::Algorithmic, 0.5))
            .unwrap();
        let second = runtime
            .block_on(selector.select(&input, &registry, SelectionStrategy::Algorithmic, 0.5))
            .unwrap();
        prop_assert_eq!(first, second);
    }
}
