//! Benchmarks for inboxpack extraction and projection.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench parsing -- extract`

use std::fs;
use std::path::Path;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use inboxpack::aggregator::CorpusAggregator;
use inboxpack::config::AggregatorConfig;
use inboxpack::core::output::{to_csv, to_json, to_jsonl};
use inboxpack::core::{Corpus, MessageRow, activity, summary, to_table};
use inboxpack::parsing::{DocumentExtractor, MessageAssembler, TextNormalizer, TimestampParser};

use chrono::{Duration, TimeZone, Utc};
use tempfile::TempDir;

// =============================================================================
// Test Data Generators
// =============================================================================

const SENDERS: [&str; 4] = ["Alice", "Bob", "Иван", "José"];

fn generate_document(title: &str, count: usize) -> String {
    let base = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    let mut sections = Vec::with_capacity(count);
    for i in 0..count {
        let sender = SENDERS[i % SENDERS.len()];
        let ts = base + Duration::minutes(i as i64 * 7);
        let reactions = if i % 5 == 0 {
            r#"<div><ul class="_a6-q"><li>❤Bob</li></ul></div>"#
        } else {
            ""
        };
        sections.push(format!(
            r#"<section class="_a6-g"><h2>{sender}</h2><div class="_2ph_ _a6-p"><div><div>Message number {i} &amp; caf&eacute;</div></div>{reactions}</div><footer><div class="_a72d">{}</div></footer></section>"#,
            ts.format("%b %d, %Y %I:%M:%S %p")
        ));
    }
    format!(
        "<html><body><h1>{title}</h1><h2>Participants: {}</h2>{}</body></html>",
        SENDERS.join(", "),
        sections.join("\n")
    )
}

fn generate_export(threads: usize, per_thread: usize) -> TempDir {
    let dir = TempDir::new().unwrap();
    for t in 0..threads {
        let path = dir
            .path()
            .join("your_facebook_activity/messages/inbox")
            .join(format!("thread_{t}"))
            .join("message_1.html");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, generate_document(&format!("Thread {t}"), per_thread)).unwrap();
    }
    dir
}

fn generate_corpus(count: usize) -> Corpus {
    let html = generate_document("Bench", count);
    CorpusAggregator::new()
        .unwrap()
        .parse_document(&html, Path::new("bench.html"))
        .map(|doc| {
            let mut corpus = Corpus::new();
            corpus.add_document(doc);
            corpus
        })
        .unwrap()
}

fn generate_rows(count: usize) -> Vec<MessageRow> {
    to_table(&generate_corpus(count))
}

// =============================================================================
// Field Benchmarks
// =============================================================================

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    let normalizer = TextNormalizer::new();

    let inputs = [
        ("ascii", "Just a plain message with nothing special in it".to_string()),
        ("entities", "Tom &amp; Jerry &lt;3 it&amp;#039;s caf&eacute;".to_string()),
        ("unicode", "Привет мир! café naïve ｆｕｌｌ 你好 🎉".to_string()),
    ];
    for (name, input) in &inputs {
        group.bench_with_input(BenchmarkId::from_parameter(name), input, |b, input| {
            b.iter(|| black_box(normalizer.normalize(black_box(input))));
        });
    }
    group.finish();
}

fn bench_timestamp(c: &mut Criterion) {
    let mut group = c.benchmark_group("timestamp");
    let parser = TimestampParser::new();

    let inputs = [
        ("short_month", "Oct 25, 2022 10:03:52 pm"),
        ("iso", "2022-10-25 22:03:52"),
        ("invalid", "not a date at all"),
    ];
    for (name, input) in inputs {
        group.bench_with_input(BenchmarkId::from_parameter(name), input, |b, input| {
            b.iter(|| black_box(parser.parse(black_box(input))));
        });
    }
    group.finish();
}

// =============================================================================
// Document Benchmarks
// =============================================================================

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");
    let extractor = DocumentExtractor::new().unwrap();

    for size in [100_usize, 1_000, 10_000] {
        let html = generate_document("Bench", size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &html, |b, html| {
            b.iter(|| {
                let doc = extractor.extract(black_box(html)).unwrap();
                black_box(doc)
            });
        });
    }
    group.finish();
}

fn bench_assemble(c: &mut Criterion) {
    let mut group = c.benchmark_group("assemble");
    let extractor = DocumentExtractor::new().unwrap();
    let assembler = MessageAssembler::new();

    for size in [100_usize, 1_000, 10_000] {
        let doc = extractor.extract(&generate_document("Bench", size)).unwrap();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &doc, |b, doc| {
            b.iter(|| {
                let messages: Vec<_> = doc
                    .bundles
                    .iter()
                    .filter_map(|bundle| assembler.assemble(bundle, &doc.thread_title, "bench.html"))
                    .collect();
                black_box(messages)
            });
        });
    }
    group.finish();
}

// =============================================================================
// Directory Benchmarks
// =============================================================================

fn bench_parse_directory(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_directory");
    group.sample_size(10);

    let export = generate_export(32, 500);
    group.throughput(Throughput::Elements(32 * 500));

    for (name, config) in [
        ("sequential", AggregatorConfig::sequential()),
        ("parallel", AggregatorConfig::new()),
    ] {
        let aggregator = CorpusAggregator::with_config(config).unwrap();
        group.bench_function(name, |b| {
            b.iter(|| {
                let corpus = aggregator.parse_directory(black_box(export.path())).unwrap();
                black_box(corpus)
            });
        });
    }
    group.finish();
}

// =============================================================================
// Projection Benchmarks
// =============================================================================

fn bench_projections(c: &mut Criterion) {
    let mut group = c.benchmark_group("projections");

    for size in [1_000_usize, 10_000] {
        let corpus = generate_corpus(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("to_table", size), &corpus, |b, corpus| {
            b.iter(|| black_box(to_table(black_box(corpus))));
        });
        group.bench_with_input(BenchmarkId::new("summary", size), &corpus, |b, corpus| {
            b.iter(|| black_box(summary(black_box(corpus))));
        });
        group.bench_with_input(BenchmarkId::new("activity", size), &corpus, |b, corpus| {
            b.iter(|| black_box(activity(black_box(corpus), 5)));
        });
    }
    group.finish();
}

// =============================================================================
// Output Benchmarks
// =============================================================================

fn bench_output(c: &mut Criterion) {
    let mut group = c.benchmark_group("output");

    for size in [100_usize, 1_000, 10_000] {
        let rows = generate_rows(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("csv", size), &rows, |b, rows| {
            b.iter(|| black_box(to_csv(black_box(rows)).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("json", size), &rows, |b, rows| {
            b.iter(|| black_box(to_json(black_box(rows)).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("jsonl", size), &rows, |b, rows| {
            b.iter(|| black_box(to_jsonl(black_box(rows)).unwrap()));
        });
    }
    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(
    benches,
    bench_normalize,
    bench_timestamp,
    bench_extract,
    bench_assemble,
    bench_parse_directory,
    bench_projections,
    bench_output,
);

criterion_main!(benches);
