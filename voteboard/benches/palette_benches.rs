use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use proptest::collection::vec;
use proptest::prelude::*;
use proptest::strategy::{Strategy, ValueTree};
use proptest::test_runner::TestRunner;
use voteboard::api::Candidate;
use voteboard::{color_for, simple_color_for, sort_by_name, sort_by_votes};

fn arb_names(count: usize) -> BoxedStrategy<Vec<String>> {
    vec("[A-Za-z0-9 -]{2,40}", count).boxed()
}

fn arb_candidates(count: usize) -> BoxedStrategy<Vec<Candidate>> {
    vec(
        ("[A-Z][a-z]{2,10}", "[A-Z][a-z]{2,14}", 0u64..100_000),
        count,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(id, (first, last, votes))| Candidate {
                id: id as u32,
                short_code: None,
                first_name: Some(first),
                last_name: Some(last),
                votes: Some(votes),
                party_id: None,
            })
            .collect()
    })
    .boxed()
}

fn color_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("palette_color_for");
    let mut runner = TestRunner::default();

    for count in [10usize, 100, 1_000] {
        let names = arb_names(count)
            .new_tree(&mut runner)
            .expect("generate names")
            .current();

        group.bench_with_input(BenchmarkId::new("accessible", count), &names, |b, names| {
            b.iter(|| names.iter().map(|name| color_for(name)).collect::<Vec<_>>());
        });

        group.bench_with_input(BenchmarkId::new("plain", count), &names, |b, names| {
            b.iter(|| {
                names
                    .iter()
                    .map(|name| simple_color_for(name))
                    .collect::<Vec<_>>()
            });
        });
    }

    group.finish();
}

fn ranking_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("ranking");
    let mut runner = TestRunner::default();

    for count in [100usize, 1_000, 10_000] {
        let candidates = arb_candidates(count)
            .new_tree(&mut runner)
            .expect("generate candidates")
            .current();

        group.bench_with_input(
            BenchmarkId::new("by_name", count),
            &candidates,
            |b, candidates| {
                b.iter(|| sort_by_name(candidates).expect("sort by name"));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("by_votes", count),
            &candidates,
            |b, candidates| {
                b.iter(|| sort_by_votes(candidates).expect("sort by votes"));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, color_benchmark, ranking_benchmark);
criterion_main!(benches);
