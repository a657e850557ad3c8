//! Aggregation throughput benchmarks.
//!
//! Run with: `cargo bench --package tickbar-bench`

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::thread;
use tickbar_bench::SyntheticFeed;
use tickbar_lib::{BarSeries, ClosePolicy, SharedSeries, TickAggregator, TickRecord, bucket};

const TICKS: u64 = 100_000;

fn apply_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply");
    group.throughput(Throughput::Elements(TICKS));

    for ticks_per_minute in [10, 1_000, 60_000] {
        let ticks = SyntheticFeed {
            ticks_per_minute,
            ..SyntheticFeed::default()
        }
        .ticks(TICKS);

        for policy in [ClosePolicy::Arrival, ClosePolicy::Sequence] {
            let aggregator = TickAggregator::new(policy);
            group.bench_with_input(
                BenchmarkId::new(policy.as_str(), ticks_per_minute),
                &ticks,
                |b, ticks| {
                    b.iter_batched(
                        BarSeries::new,
                        |mut series| {
                            for tick in ticks {
                                aggregator.apply(&mut series, tick);
                            }
                            series
                        },
                        BatchSize::SmallInput,
                    );
                },
            );
        }
    }

    group.finish();
}

fn shared_benchmark(c: &mut Criterion) {
    let ticks = SyntheticFeed::default().ticks(TICKS);
    let mut group = c.benchmark_group("shared_apply");
    group.throughput(Throughput::Elements(TICKS));

    for producers in [1, 4] {
        let chunk = ticks.len().div_ceil(producers);
        group.bench_with_input(
            BenchmarkId::from_parameter(producers),
            &ticks,
            |b, ticks| {
                b.iter(|| {
                    let shared = SharedSeries::default();
                    thread::scope(|scope| {
                        for part in ticks.chunks(chunk) {
                            let shared = shared.clone();
                            scope.spawn(move || {
                                for tick in part {
                                    shared.apply(tick);
                                }
                            });
                        }
                        // One reader polling snapshots like a renderer.
                        let reader = shared.clone();
                        scope.spawn(move || reader.window(60).len());
                    });
                    shared.len()
                });
            },
        );
    }

    group.finish();
}

fn parse_benchmark(c: &mut Criterion) {
    let events = SyntheticFeed::default().events(10_000);
    let mut group = c.benchmark_group("parse");
    group.throughput(Throughput::Elements(events.len() as u64));

    group.bench_function("from_raw", |b| {
        b.iter(|| {
            events
                .iter()
                .filter_map(|event| TickRecord::from_raw(event).ok())
                .count()
        });
    });

    let ticks = SyntheticFeed::default().ticks(10_000);
    group.bench_function("bucket", |b| {
        b.iter(|| {
            ticks
                .iter()
                .map(|tick| bucket(&tick.trade_time).timestamp())
                .sum::<i64>()
        });
    });

    group.finish();
}

criterion_group!(benches, apply_benchmark, shared_benchmark, parse_benchmark);
criterion_main!(benches);
