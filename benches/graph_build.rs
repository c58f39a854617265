use criterion::{Criterion, criterion_group, criterion_main};
use rowloom::graphs::GraphBuilder;
use rowloom::tabular::RowRecord;

fn rows(nodes: usize) -> Vec<RowRecord> {
    (0..nodes)
        .map(|i| {
            let mut row = RowRecord::new("bench", &format!("node{i}"), "noop")
                .with_input_fields("a|b")
                .with_output_fields("c|d")
                .with_description("benchmark node with a short description");
            if i + 1 < nodes {
                row = row.with_edge("success", &format!("node{}", i + 1));
            }
            row
        })
        .collect()
}

fn bench_graph_build(c: &mut Criterion) {
    let small = rows(10);
    let large = rows(200);

    c.bench_function("build_10_nodes", |b| {
        b.iter(|| GraphBuilder::new().build(std::hint::black_box(&small)).unwrap())
    });
    c.bench_function("build_200_nodes", |b| {
        b.iter(|| GraphBuilder::new().build(std::hint::black_box(&large)).unwrap())
    });
}

criterion_group!(benches, bench_graph_build);
criterion_main!(benches);
