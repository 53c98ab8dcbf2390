use btc_eur_rolling::data::{generate_dataframe, RateSeries};
use btc_eur_rolling::output::csv_writer::write_table;
use btc_eur_rolling::schema::Schema;
use btc_eur_rolling::types::PriceSeries;
use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn year_of_data() -> (PriceSeries, RateSeries) {
    let start = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
    let prices: PriceSeries = (0..365)
        .map(|i| (start + Duration::days(i), 20_000.0 + i as f64 * 13.7))
        .collect();
    // Rates only on weekdays-ish, like the real feed
    let rates: RateSeries = (0..365)
        .filter(|i| i % 7 < 5)
        .map(|i| (start + Duration::days(i), 0.9 + (i % 11) as f64 * 0.01))
        .collect();
    (prices, rates)
}

fn benchmark_generate_dataframe(c: &mut Criterion) {
    let schema = Schema::default();
    let (prices, rates) = year_of_data();

    c.bench_function("generate_dataframe_365_days", |b| {
        b.iter(|| {
            generate_dataframe(
                black_box(&schema),
                black_box(&prices),
                black_box(&rates),
                7,
            )
            .unwrap()
        });
    });
}

fn benchmark_csv_output(c: &mut Criterion) {
    let schema = Schema::default();
    let (prices, rates) = year_of_data();
    let table = generate_dataframe(&schema, &prices, &rates, 7).unwrap();

    c.bench_function("write_table_365_days", |b| {
        b.iter(|| {
            let mut buf = Vec::with_capacity(32 * 1024);
            write_table(black_box(&table), &mut buf).unwrap();
            buf
        });
    });
}

criterion_group!(benches, benchmark_generate_dataframe, benchmark_csv_output);
criterion_main!(benches);
