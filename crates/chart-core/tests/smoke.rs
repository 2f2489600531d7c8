// File: crates/chart-core/tests/smoke.rs
// Purpose: End-to-end render of every chart kind through the wrapper, writing SVG files.

use chart_core::{
    loading_chart, record, BarChart, Chart, ChartWrapper, LineChart, LoadingKind, Record, ScatterChart, ScatterPoint,
    SeriesMeta, StackedBarChart,
};
use chrono::NaiveDate;

fn sample() -> Vec<Record> {
    (0..6u32)
        .filter_map(|i| {
            let day = NaiveDate::from_ymd_opt(2024, 1, 1 + i)?;
            Some(record! {
                "date" => day,
                "valueX" => day.format("%d-%m").to_string(),
                "a" => (i * 3 % 7) as f64,
                "b" => (i * 5 % 4) as f64,
            })
        })
        .collect()
}

fn series() -> Vec<SeriesMeta> {
    vec![SeriesMeta::new("a", "A", "#1F77B4"), SeriesMeta::new("b", "B", "#2CA02C")]
}

fn write<C: Chart>(name: &str, chart: C) -> String {
    let mut wrapper = ChartWrapper::new(chart);
    wrapper.resize(640.0, 240.0);
    let frame = wrapper.render().expect("render should succeed");
    let out = std::path::PathBuf::from("target/test_out").join(format!("{name}.svg"));
    std::fs::create_dir_all(out.parent().expect("parent")).expect("create out dir");
    std::fs::write(&out, &frame.svg).expect("write svg");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "svg should be non-empty");
    frame.svg
}

#[test]
fn render_every_chart_kind() {
    for svg in [
        write("bar", BarChart::new(sample(), series())),
        write("stacked_bar", StackedBarChart::new(sample(), series())),
        write("line", LineChart::new(sample(), series())),
        write(
            "scatter",
            ScatterChart::new(
                vec![ScatterPoint::new(2.0, 3.0).with_content("A"), ScatterPoint::new(7.0, 8.0).with_content("B")],
                (0.0, 10.0),
                (0.0, 10.0),
            ),
        ),
    ] {
        assert!(svg.starts_with("<svg"), "should be an svg root");
        assert!(svg.trim_end().ends_with("</svg>"));
    }
}

#[test]
fn render_loading_placeholders() {
    let today = NaiveDate::from_ymd_opt(2024, 5, 20).expect("date");
    for (name, kind) in [("loading_line", LoadingKind::Line), ("loading_bar", LoadingKind::Bar), ("loading_stacked", LoadingKind::StackedBar)] {
        let svg = write(name, loading_chart(kind, today, true));
        assert!(svg.contains("#414952"));
    }
}
