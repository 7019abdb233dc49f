//! Criterion benchmarks for the federalist pipeline.
//!
//! Covers the stages that dominate a run:
//! - Line normalization
//! - Corpus construction (normalize, tag, lemmatize)
//! - TF-IDF weighting
//! - Similarity rankings and the full similarity matrix

use std::hint::black_box;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use federalist::analysis::analyzer::normalizer::TextNormalizer;
use federalist::corpus::{CorpusBuilder, EssayId, EssaySource};
use federalist::similarity::SimilarityEngine;
use federalist::weighting::TermWeights;

/// Generate synthetic essays for benchmarking.
fn generate_test_essays(count: usize) -> Vec<EssaySource> {
    let words = [
        "union", "powers", "liberty", "factions", "commerce", "treaties", "militia", "senate",
        "judiciary", "taxation", "revenues", "armies", "courts", "laws", "governments",
        "republic", "confederacy", "legislature", "elections", "representatives", "debts",
        "navies", "citizens", "magistrates", "provinces", "declared", "establishing",
        "greater", "wisest", "happily", "necessity", "ambition",
    ];

    (0..count)
        .map(|i| {
            let essay_length = 400 + (i % 200); // Variable length essays
            let lines: Vec<String> = (0..essay_length)
                .collect::<Vec<_>>()
                .chunks(12)
                .map(|chunk| {
                    let line: Vec<&str> = chunk
                        .iter()
                        .map(|j| words[(i * 7 + j * 13) % words.len()]) // Pseudo-random distribution
                        .collect();
                    format!("The {}.", line.join(", "))
                })
                .collect();
            EssaySource::new(format!("essay{:02}.txt", i + 1), lines)
        })
        .collect()
}

fn builder() -> CorpusBuilder {
    CorpusBuilder::new().unwrap().with_expected_essays(None)
}

/// Benchmark line normalization.
fn bench_normalization(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalization");

    let normalizer = TextNormalizer::new().unwrap();
    let essays = generate_test_essays(10);
    let lines = &essays[0].lines;

    group.bench_function("normalize_single_line", |b| {
        b.iter(|| black_box(normalizer.normalize_line(black_box(&lines[0]))))
    });

    group.throughput(Throughput::Elements(lines.len() as u64));
    group.bench_function("normalize_essay", |b| {
        b.iter(|| black_box(normalizer.normalize_lines(black_box(lines))))
    });

    group.finish();
}

/// Benchmark corpus construction, with and without the corpus lexicon.
fn bench_corpus_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("corpus_build");
    group.sample_size(20);

    let essays = generate_test_essays(85);
    group.throughput(Throughput::Elements(essays.len() as u64));

    for corpus_lexicon in [false, true] {
        let builder = builder().with_corpus_lexicon(corpus_lexicon);
        group.bench_with_input(
            BenchmarkId::new("build", if corpus_lexicon { "lexicon" } else { "rules" }),
            &essays,
            |b, essays| {
                b.iter_with_setup(
                    || essays.clone(),
                    |sources| black_box(builder.build(sources).unwrap()),
                )
            },
        );
    }

    group.finish();
}

/// Benchmark TF-IDF weighting.
fn bench_tfidf(c: &mut Criterion) {
    let mut group = c.benchmark_group("tfidf");

    let (corpus, _) = builder().build(generate_test_essays(85)).unwrap();
    group.throughput(Throughput::Elements(corpus.len() as u64));

    group.bench_function("term_weights", |b| {
        b.iter(|| black_box(TermWeights::from_corpus(black_box(&corpus)).unwrap()))
    });

    let weights = TermWeights::from_corpus(&corpus).unwrap();
    let essay = EssayId::new(1).unwrap();
    group.bench_function("top_terms", |b| {
        b.iter(|| black_box(weights.top_terms(black_box(essay), 20).unwrap()))
    });

    group.finish();
}

/// Benchmark similarity rankings and the full matrix.
fn bench_similarity(c: &mut Criterion) {
    let mut group = c.benchmark_group("similarity");

    let (corpus, _) = builder().build(generate_test_essays(85)).unwrap();
    let engine = SimilarityEngine::new(Arc::new(TermWeights::from_corpus(&corpus).unwrap()));
    let query = EssayId::new(10).unwrap();

    group.bench_function("nearest_5", |b| {
        b.iter(|| black_box(engine.nearest(black_box(query), 5).unwrap()))
    });

    group.throughput(Throughput::Elements((corpus.len() * corpus.len()) as u64));
    group.bench_function("similarity_matrix", |b| b.iter(|| black_box(engine.matrix())));

    group.finish();
}

criterion_group!(
    benches,
    bench_normalization,
    bench_corpus_build,
    bench_tfidf,
    bench_similarity
);

criterion_main!(benches);
