// Benchmark for countdown maintenance
// Measures timer map initialisation, one tick pass and label formatting

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use offerboard::models::offer::Offer;
use offerboard::services::countdown::{format_remaining, TimerMap};

fn offers(count: usize) -> Vec<Offer> {
    let now = Utc.with_ymd_and_hms(2025, 5, 1, 9, 0, 0).unwrap();
    (0..count)
        .map(|index| {
            let end = now + Duration::seconds((index as i64 * 37) % 200_000 - 1000);
            Offer::new(index as i64, Some(&end.to_rfc3339()))
        })
        .collect()
}

fn bench_initialise(c: &mut Criterion) {
    let mut group = c.benchmark_group("timer_map_initialise");
    let now = Utc.with_ymd_and_hms(2025, 5, 1, 9, 0, 0).unwrap();

    for count in [10, 100, 1000].iter() {
        let offers = offers(*count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &offers, |b, offers| {
            b.iter(|| TimerMap::from_offers(black_box(offers), black_box(now)));
        });
    }

    group.finish();
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("timer_map_tick");
    let now = Utc.with_ymd_and_hms(2025, 5, 1, 9, 0, 0).unwrap();

    for count in [10, 100, 1000].iter() {
        let map = TimerMap::from_offers(&offers(*count), now);
        group.bench_with_input(BenchmarkId::from_parameter(count), &map, |b, map| {
            b.iter_batched(
                || map.clone(),
                |mut map| map.tick(),
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_format(c: &mut Criterion) {
    let mut group = c.benchmark_group("format_remaining");

    group.bench_function("days", |b| b.iter(|| format_remaining(black_box(90_000))));
    group.bench_function("minutes", |b| b.iter(|| format_remaining(black_box(125))));
    group.bench_function("expired", |b| b.iter(|| format_remaining(black_box(0))));

    group.finish();
}

criterion_group!(benches, bench_initialise, bench_tick, bench_format);
criterion_main!(benches);
