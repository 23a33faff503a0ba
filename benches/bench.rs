use criterion::{black_box, criterion_group, criterion_main, Criterion};
use log_json_bridge::{log_to_records, records_to_log, tokenize, LineSplit};
use std::time::Duration;

fn access_log(lines: usize) -> String {
    (0..lines)
        .map(|i| {
            format!(
                "10.0.{}.{} - - GET /static/asset-{}.js HTTP/1.1 {} {}\n",
                i % 255,
                i % 7,
                i,
                if i % 13 == 0 { 404 } else { 200 },
                i * 17
            )
        })
        .collect()
}

pub fn tokenize_benchmark(c: &mut Criterion) {
    let input = access_log(10_000);
    c.bench_function("tokenize 10k lines", |b| {
        b.iter(|| {
            LineSplit::new(black_box(&input))
                .map(|line| tokenize(line).len())
                .sum::<usize>()
        })
    });
}

pub fn convert_benchmark(c: &mut Criterion) {
    let input = access_log(10_000);
    c.bench_function("log to records 10k lines", |b| {
        b.iter(|| log_to_records(black_box(&input)))
    });

    let records = log_to_records(&input).unwrap();
    c.bench_function("records to log 10k lines", |b| {
        b.iter(|| records_to_log(black_box(&records)))
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default().measurement_time(Duration::from_secs(10));
    targets = tokenize_benchmark, convert_benchmark);
criterion_main!(benches);
