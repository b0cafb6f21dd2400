use criterion::{black_box, criterion_group, criterion_main, Criterion};
use load_charts::{
    chart::{throughput_table, ChartGenerator, ThroughputChart},
    stats::{ChartRow, Distribution, Percentiles},
    ChartConfig, ScriptOnly,
};

fn rows(count: u32, with_errors: bool) -> Vec<ChartRow> {
    (1..=count)
        .map(|i| ChartRow {
            cvus: i * 10,
            metric: format!("{}", i as f64 * 3.5),
            error_percent: if with_errors && i % 4 == 0 { 1.5 } else { 0.0 },
            distribution: Some(Distribution {
                min: 0.05,
                avg: 0.2 + i as f64 * 0.01,
                max: 1.0 + i as f64 * 0.1,
                percentiles: Percentiles {
                    perc10: 0.08,
                    perc50: 0.18,
                    perc90: 0.6,
                    perc95: 0.8,
                },
            }),
        })
        .collect()
}

fn bench_script_generation(c: &mut Criterion) {
    let dir = tempfile::tempdir().expect("tempdir");
    let cycles: Vec<u32> = (1..=50).map(|i| i * 10).collect();
    let generator = ChartGenerator::new(
        ChartConfig::default(),
        dir.path(),
        &cycles,
        Box::new(ScriptOnly),
    )
    .expect("generator");
    let chart = ThroughputChart::pages();
    let clean = rows(50, false);
    let failing = rows(50, true);

    c.bench_function("page_table_50_cycles", |b| {
        b.iter(|| throughput_table("SPPS", true, black_box(&clean)))
    });
    c.bench_function("page_script_single_panel", |b| {
        b.iter(|| generator.throughput_script(&chart, black_box(&clean), "pages.data"))
    });
    c.bench_function("page_script_error_panel", |b| {
        b.iter(|| generator.throughput_script(&chart, black_box(&failing), "pages.data"))
    });
}

criterion_group!(benches, bench_script_generation);
criterion_main!(benches);
