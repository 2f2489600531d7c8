use chart_core::{
    bisect_center, record, BandScale, CursorResolver, HorizontalScale, LinearScale, Position, Record, SeriesTrack, Value,
};
use criterion::{criterion_group, criterion_main, black_box, BenchmarkId, Criterion};

const WIDTH: f64 = 800.0;

fn gen_records(n: usize) -> Vec<Record> {
    (0..n).map(|i| record! { "x" => i as f64, "y" => (i as f64 * 0.05).cos() }).collect()
}

fn track(records: Vec<Record>, x: LinearScale) -> SeriesTrack {
    SeriesTrack {
        key: "s".into(),
        records,
        x_accessor: "x".into(),
        y_accessor: "y".into(),
        x: Position::mapped(move |r, _, _| r.number("x").map(|v| x.map(v))),
        y: Position::Fixed(0.0),
        color: "#000".into(),
        label: "s".into(),
        inactive: false,
    }
}

fn bench_bisect(c: &mut Criterion) {
    let mut group = c.benchmark_group("bisect_center");
    for &n in &[1_000usize, 100_000usize] {
        let data = gen_records(n);
        group.bench_with_input(BenchmarkId::from_parameter(format!("n{n}")), &data, |b, d| {
            b.iter(|| black_box(bisect_center(d, "x", black_box(n as f64 * 0.37))));
        });
    }
    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    for &series in &[1usize, 8usize] {
        let n = 10_000;
        let x = LinearScale::new((0.0, (n - 1) as f64), (0.0, WIDTH));
        let tracks: Vec<SeriesTrack> = (0..series).map(|_| track(gen_records(n), x)).collect();
        let scale = HorizontalScale::Linear(x);
        let resolver = CursorResolver { scale: &scale, tracks: &tracks, offset_left: 45.0, inner_width: WIDTH, translate: (0.0, 0.0) };
        group.bench_with_input(BenchmarkId::new("linear", format!("s{series}")), &resolver, |b, r| {
            b.iter(|| black_box(r.resolve(black_box(45.0 + 333.3))));
        });
    }

    let categories: Vec<Value> = (0..50).map(|i| Value::from(format!("c{i}"))).collect();
    let band = HorizontalScale::Band(BandScale::new(categories.clone(), (0.0, WIDTH), 0.4));
    let records: Vec<Record> = categories.iter().map(|c| record! { "time" => c.clone(), "value" => 1 }).collect();
    let tracks = vec![SeriesTrack {
        x_accessor: "time".into(),
        y_accessor: "value".into(),
        ..track(records, LinearScale::new((0.0, 1.0), (0.0, 1.0)))
    }];
    let resolver = CursorResolver { scale: &band, tracks: &tracks, offset_left: 45.0, inner_width: WIDTH, translate: (0.0, 0.0) };
    group.bench_function("band", |b| b.iter(|| black_box(resolver.resolve(black_box(45.0 + 517.0)))));
    group.finish();
}

criterion_group!(benches, bench_bisect, bench_resolve);
criterion_main!(benches);
