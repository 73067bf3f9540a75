//! Benchmarks for casting
//!
//! Run with: cargo bench --package filters
//!
//! Covers free-form vs strict time parsing and a full filter set pass.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use filters::filters::TimeFilter;
use filters::{Filter, FilterSet, GroupedInput, Params, Value};

const DECLARATIONS: &str = r#"[
    {"name": "email", "type": "string"},
    {"name": "age", "type": "integer"},
    {"name": "price", "type": "decimal"},
    {"name": "starts_at", "type": "time"},
    {"name": "tags", "type": "array", "of": {"type": "string"}, "default": []}
]"#;

fn sample_params() -> Params {
    let mut params = Params::new();
    params.insert("email".to_string(), Value::from(" ada@example.com "));
    params.insert("age".to_string(), Value::from("36"));
    params.insert("price".to_string(), Value::from("19.99"));
    params.insert("starts_at".to_string(), Value::from("2011-12-13 14:15:16 +0100"));
    params.insert(
        "tags".to_string(),
        Value::Array(vec![Value::from("a"), Value::from("b")]),
    );
    params
}

fn bench_time_free_form(c: &mut Criterion) {
    let filter = Filter::new("t", TimeFilter::new());
    let naive = Value::from("2011-12-13 14:15:16");

    c.bench_function("time_free_form", |b| {
        b.iter(|| black_box(filter.cast(black_box(&naive))))
    });
}

fn bench_time_with_format(c: &mut Criterion) {
    let filter = Filter::new("t", TimeFilter::new().with_format("%d/%m/%Y %H:%M:%S %z"));
    let input = Value::from("13/12/2011 14:15:16 +0100");

    c.bench_function("time_with_format", |b| {
        b.iter(|| black_box(filter.cast(black_box(&input))))
    });
}

fn bench_time_grouped(c: &mut Criterion) {
    let filter = Filter::new("t", TimeFilter::new());
    let input = Value::Grouped(GroupedInput::from([
        ("1", "2012"),
        ("2", "1"),
        ("3", "2"),
        ("4", "3"),
        ("5", "4"),
        ("6", "5"),
    ]));

    c.bench_function("time_grouped", |b| {
        b.iter(|| black_box(filter.cast(black_box(&input))))
    });
}

fn bench_filter_set(c: &mut Criterion) {
    let set = FilterSet::from_json(DECLARATIONS).expect("Failed to build filter set");
    let params = sample_params();
    let batch: Vec<Params> = (0..1000).map(|_| params.clone()).collect();

    c.bench_function("filter_set_process", |b| {
        b.iter(|| black_box(set.process(black_box(&params))))
    });

    c.bench_function("filter_set_process_batch_1000", |b| {
        b.iter(|| black_box(set.process_batch(black_box(&batch))))
    });
}

criterion_group!(
    benches,
    bench_time_free_form,
    bench_time_with_format,
    bench_time_grouped,
    bench_filter_set
);
criterion_main!(benches);
