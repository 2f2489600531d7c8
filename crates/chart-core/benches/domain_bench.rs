use chart_core::{min_max_with_padding, y_grid_values, LinearScale, Record};
use criterion::{criterion_group, criterion_main, black_box, BenchmarkId, Criterion};

fn gen_records(n: usize, series: usize) -> Vec<Record> {
    (0..n)
        .map(|i| {
            let mut r = Record::new();
            for s in 0..series {
                // waveform with drift, one phase per series
                let v = ((i + s * 17) as f64 * 0.01).sin() * 10.0 + i as f64 * 0.0001;
                r.insert(format!("s{s}"), v);
            }
            r
        })
        .collect()
}

fn bench_min_max(c: &mut Criterion) {
    let mut group = c.benchmark_group("min_max_with_padding");
    for &n in &[1_000usize, 10_000usize, 100_000usize] {
        let data = gen_records(n, 4);
        let keys = ["s0", "s1", "s2", "s3"];
        group.bench_with_input(BenchmarkId::from_parameter(format!("n{n}")), &data, |b, d| {
            b.iter(|| black_box(min_max_with_padding(d, &keys)));
        });
    }
    group.finish();
}

fn bench_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("y_grid_values");
    for &h in &[100.0f64, 1_000.0f64] {
        let scale = LinearScale::new((0.0, 1_000.0), (h, 0.0));
        let ticks = scale.ticks(10);
        group.bench_with_input(BenchmarkId::from_parameter(format!("h{h}")), &ticks, |b, t| {
            b.iter(|| black_box(y_grid_values(true, t, |v| scale.map(*v), h)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_min_max, bench_grid);
criterion_main!(benches);
