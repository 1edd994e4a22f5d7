use criterion::{black_box, criterion_group, criterion_main, Criterion};

use stuteapot_core::model::{Category, CategoryScores, Instrument, RawAnswer, ResponseSet};
use stuteapot_core::scoring::{dominant_category, Scorer};

fn full_response_set(value: i64) -> ResponseSet {
    let instrument = Instrument::ils();
    Category::ALL
        .into_iter()
        .flat_map(|c| instrument.categories.get(c).to_vec())
        .map(|field| (field, RawAnswer::Number(value)))
        .collect()
}

fn string_response_set() -> ResponseSet {
    let pairs: Vec<(String, String)> = full_response_set(3)
        .iter()
        .map(|(field, _)| (field.replace('_', "-"), "4".to_string()))
        .collect();
    ResponseSet::from_form(pairs)
}

fn bench_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("score");
    let scorer = Scorer::ils();

    group.bench_function("numeric", |b| {
        let responses = full_response_set(4);
        b.iter(|| scorer.score(black_box(&responses)))
    });

    group.bench_function("form_strings", |b| {
        let responses = string_response_set();
        b.iter(|| scorer.score(black_box(&responses)))
    });

    group.bench_function("empty", |b| {
        let responses = ResponseSet::new();
        b.iter(|| scorer.score(black_box(&responses)))
    });

    group.finish();
}

fn bench_dominant(c: &mut Criterion) {
    let scores = CategoryScores {
        meaning: 40,
        reproduction: 75,
        application: 75,
        undirected: 10,
    };
    c.bench_function("dominant_category", |b| {
        b.iter(|| dominant_category(black_box(&scores)))
    });
}

criterion_group!(benches, bench_score, bench_dominant);
criterion_main!(benches);
