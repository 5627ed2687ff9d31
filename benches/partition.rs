use cab_etl::TripRecord;
use cab_etl::app::services::deduplicator::partition_records;
use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

/// Trips where roughly one in `duplicate_every` rows repeats an earlier key
fn generate_trips(n: usize, duplicate_every: usize) -> Vec<TripRecord> {
    let base = NaiveDate::from_ymd_opt(2023, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    (0..n)
        .map(|i| {
            let key = if i % duplicate_every == 0 { i / 2 } else { i };
            TripRecord {
                pickup_time: base + chrono::Duration::seconds(key as i64),
                dropoff_time: base + chrono::Duration::seconds(key as i64 + 600),
                passenger_count: (key % 4) as i32 + 1,
                pickup_location_id: i as i32,
                ..Default::default()
            }
        })
        .collect()
}

fn bench_partition(c: &mut Criterion) {
    let mut group = c.benchmark_group("partition_records");

    for size in [1_000usize, 10_000, 100_000] {
        let trips = generate_trips(size, 10);
        group.bench_with_input(BenchmarkId::from_parameter(size), &trips, |b, trips| {
            b.iter(|| partition_records(black_box(trips.clone()), None))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_partition);
criterion_main!(benches);
