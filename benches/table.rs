use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use hashbrown::HashMap;
use pprof::criterion::{Output, PProfProfiler};
use station_stats::table::{hash, Table};
use std::hint::black_box;

fn synthetic_names(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let mut name = String::new();
            let mut n = i;
            loop {
                name.push((b'A' + (n % 26) as u8) as char);
                n /= 26;
                if n == 0 {
                    break;
                }
            }
            name.push_str("ville");
            name
        })
        .collect()
}

#[derive(Default)]
struct BaselineStats {
    min: f64,
    max: f64,
    sum: f64,
    count: u64,
}

fn bench_upsert(c: &mut Criterion) {
    let names = synthetic_names(10_000);

    let mut group = c.benchmark_group("upsert");

    group.bench_function("table", |b| {
        let mut table = Table::new(1 << 16);
        for name in &names {
            table.upsert(name, 0.0);
        }

        let mut i = 0;
        b.iter(|| {
            let name = &names[i % names.len()];
            table.upsert(black_box(name), black_box(42.0));
            i += 1;
        })
    });

    group.bench_function("hashbrown_baseline", |b| {
        let mut map: HashMap<String, BaselineStats> = HashMap::new();
        for name in &names {
            map.entry(name.clone()).or_default();
        }

        let mut i = 0;
        b.iter(|| {
            let name = &names[i % names.len()];
            let stats = map.entry_ref(black_box(name.as_str())).or_default();
            let value = black_box(42.0f64);
            stats.min = stats.min.min(value);
            stats.max = stats.max.max(value);
            stats.sum += value;
            stats.count += 1;
            i += 1;
        })
    });

    group.finish();
}

fn bench_hash(c: &mut Criterion) {
    let lengths: &[usize] = &[2, 4, 8, 9, 12, 16, 24, 32, 49];

    let names: Vec<Vec<u8>> = lengths
        .iter()
        .map(|&len| (0..len).map(|i| b'A' + (i % 26) as u8).collect())
        .collect();

    let mut group = c.benchmark_group("hash");

    for (i, name) in names.iter().enumerate() {
        group.throughput(criterion::Throughput::Bytes(name.len() as u64));
        group.bench_with_input(BenchmarkId::new("polynomial", lengths[i]), name, |b, name| {
            b.iter(|| hash(black_box(name)))
        });
    }

    group.finish();
}

fn bench_finalize(c: &mut Criterion) {
    let names = synthetic_names(10_000);

    c.bench_function("finalize_10k", |b| {
        b.iter_with_setup(
            || {
                let mut table = Table::new(1 << 16);
                for (i, name) in names.iter().enumerate() {
                    table.upsert(name, i as f64);
                }
                table
            },
            |table| black_box(table.into_report()),
        )
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets = bench_upsert, bench_hash, bench_finalize
}

criterion_main!(benches);
