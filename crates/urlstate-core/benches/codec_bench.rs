//! Benchmarks for the value codec and query-string parsing.
//!
//! Run with: cargo bench -p urlstate-core --bench codec_bench

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use serde_json::json;
use std::hint::black_box;
use urlstate_core::percent::encode_component;
use urlstate_core::{QueryString, Value, decode, encode};

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec/encode");
    let cases = [
        ("text", Value::text("hello world")),
        ("number", Value::Number(1234.5)),
        (
            "map",
            Value::from(json!({"filters": {"tags": ["a", "b", "c"]}, "page": 4, "sort": "desc"})),
        ),
    ];
    for (name, value) in &cases {
        group.bench_with_input(BenchmarkId::from_parameter(name), value, |b, v| {
            b.iter(|| encode(black_box(v)));
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec/decode");
    let map_hint = Value::from(json!({}));
    let map_raw = encode_component(&encode(&Value::from(
        json!({"filters": {"tags": ["a", "b", "c"]}, "page": 4, "sort": "desc"}),
    )));

    group.bench_function("inferred_text", |b| {
        b.iter(|| decode(black_box(Some("hello%20world")), None));
    });
    group.bench_function("inferred_number", |b| {
        b.iter(|| decode(black_box(Some("123456")), None));
    });
    group.bench_function("hinted_map", |b| {
        b.iter(|| decode(black_box(Some(map_raw.as_str())), Some(&map_hint)));
    });
    group.bench_function("hinted_map_mismatch", |b| {
        b.iter(|| decode(black_box(Some("%5B1%2C2%5D")), Some(&map_hint)));
    });
    group.finish();
}

fn bench_query_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("query/parse");
    for n in [1usize, 8, 32] {
        let search: String = (0..n)
            .map(|i| format!("key{i}=value%20{i}"))
            .collect::<Vec<_>>()
            .join("&");
        group.bench_with_input(BenchmarkId::from_parameter(n), &search, |b, s| {
            b.iter(|| QueryString::parse(black_box(s)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode, bench_query_parse);
criterion_main!(benches);
