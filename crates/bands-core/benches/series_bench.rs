use bands_core::{build_series, BandDescriptor, LabelMap, NoColors, Row, SeriesInputs, SeriesStyle};
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, black_box};

fn gen_rows(n: usize) -> Vec<Row> {
    let mut v = Vec::with_capacity(n);
    for i in 0..n {
        // forecast wave crossing zero, widening bands
        let y = (i as f64 * 0.01).sin() * 10.0;
        let w = 1.0 + (i as f64) * 0.0001;
        let mut row = Row::new().with("ds", i as f64).with("yhat", y);
        for (k, scale) in [1.0, 2.0, 3.0, 4.0].iter().enumerate() {
            row.insert(format!("lo{k}"), y - w * scale);
            row.insert(format!("hi{k}"), y + w * scale);
        }
        v.push(row);
    }
    v
}

fn bench_build_series(c: &mut Criterion) {
    let bands = (0..4)
        .map(|k| BandDescriptor::for_level(k, vec![format!("hi{k}"), format!("lo{k}")]))
        .collect::<Vec<_>>();
    let labels = LabelMap::new();
    let style = SeriesStyle::default();
    let mut group = c.benchmark_group("build_series");
    for &n in &[10_000usize, 100_000usize] {
        let rows = gen_rows(n);
        group.bench_with_input(BenchmarkId::from_parameter(format!("rows{n}")), &n, |b, _| {
            b.iter_batched(
                || rows.clone(),
                |rows| {
                    let inputs = SeriesInputs {
                        rows: &rows,
                        x_axis: "ds",
                        bands: &bands,
                        prediction: Some("yhat"),
                        metrics: &[],
                        label_map: &labels,
                    };
                    let _ = black_box(build_series(&inputs, &NoColors, &style));
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build_series);
criterion_main!(benches);
