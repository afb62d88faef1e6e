use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use phenograph::io::{Edge, OntologyData};
use phenograph::ontology::DefaultCsrOntology;
use phenograph::predicate::EdgeType;
use phenograph::term::Term;
use phenograph::TermId;

/// A complete binary tree of `n` terms; term `i` is the child of term
/// `(i - 1) / 2`.
fn synthetic_ontology(n: usize) -> DefaultCsrOntology {
    let tid = |i: usize| TermId::from(("HP", format!("{i:07}").as_str()));

    let terms = (0..n).map(|i| Term::new(tid(i), format!("term {i}"))).collect();
    let edges = (1..n)
        .map(|i| Edge::new(tid(i), EdgeType::IsA, tid((i - 1) / 2)))
        .collect();

    DefaultCsrOntology::try_from(OntologyData {
        ontology_id: None,
        terms,
        edges,
        predicate_values: vec![],
        properties: vec![],
        issues: vec![],
    })
    .expect("synthetic ontology should assemble")
}

fn hierarchy_traversals(c: &mut Criterion) {
    let ontology = synthetic_ontology(10_000);
    let tid = |i: usize| TermId::from(("HP", format!("{i:07}").as_str()));

    let payload = vec![
        ("near the root", 1usize),
        ("mid hierarchy", 77),
        ("deep leaf", 9_999),
    ];

    let mut group = c.benchmark_group("CsrOntology::isa_ancestors_of");
    for &(label, i) in &payload {
        let term_id = tid(i);
        group.bench_function(BenchmarkId::from_parameter(label), |b| {
            b.iter(|| {
                black_box(ontology.isa_ancestors_of(&term_id).unwrap());
            })
        });
    }
    group.finish();

    let mut group = c.benchmark_group("CsrOntology::descendants_of");
    for &(label, i) in &payload {
        let term_id = tid(i);
        group.bench_function(BenchmarkId::from_parameter(label), |b| {
            b.iter(|| {
                black_box(ontology.descendants_of(&term_id));
            })
        });
    }
    group.finish();

    let root = tid(0);
    let mut group = c.benchmark_group("CsrOntology::exists_path");
    for &(label, i) in &payload {
        let term_id = tid(i);
        group.bench_function(BenchmarkId::from_parameter(label), |b| {
            b.iter(|| {
                black_box(ontology.exists_path(&term_id, &root));
            })
        });
    }
    group.finish();
}

criterion_group!(benches, hierarchy_traversals);
criterion_main!(benches);
