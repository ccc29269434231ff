use chrono::{TimeZone, Utc};
use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use harmony_core::{
    CsvLayout, SeededRandom, average_confidence, generate_history, group_by_category,
    group_by_date, mock_measurements, sorted_dates, to_csv, trend_series,
};

fn bench_formatter(c: &mut Criterion) {
    let today = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).single().unwrap();
    let base = mock_measurements(today);
    // a year of daily snapshots
    let history = generate_history(&base, 365, today, &mut SeededRandom::seeded(1));

    c.bench_function("group_by_category/live", |b| {
        b.iter(|| group_by_category(black_box(&base)))
    });

    c.bench_function("group_by_category/history_365d", |b| {
        b.iter(|| group_by_category(black_box(&history)))
    });

    c.bench_function("average_confidence/history_365d", |b| {
        b.iter(|| average_confidence(black_box(&history)))
    });

    c.bench_function("to_csv/historical_365d", |b| {
        b.iter(|| to_csv(black_box(&history), CsvLayout::Historical))
    });

    c.bench_function("trend_series/history_365d", |b| {
        b.iter_batched(
            || group_by_date(&history),
            |grouped| {
                let dates = sorted_dates(&grouped);
                let series = trend_series(&grouped, "Shoulder Width");
                black_box((dates, series))
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_formatter);
criterion_main!(benches);
