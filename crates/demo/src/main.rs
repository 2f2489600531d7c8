// File: crates/demo/src/main.rs
// Summary: Demo loads CSV records and renders bar, stacked-bar, line and scatter charts to SVG files,
//          then sweeps a simulated pointer across the line chart and logs the tooltip it resolves.

use anyhow::{Context, Result};
use chart_core::{
    read_csv, BarChart, Chart, ChartConfig, ChartOptions, ChartWrapper, LineChart, Record, ScatterChart,
    ScatterPoint, SeriesMeta, StackedBarChart, Value,
};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

const WIDTH: f64 = 720.0;
const HEIGHT: f64 = 280.0;
const SWEEP_STEPS: usize = 12;

/// Used when no CSV path is given.
const SAMPLE_CSV: &str = "\
date,visits,signups,refunds
2024-03-01,120,14,2
2024-03-02,135,18,1
2024-03-03,98,9,
2024-03-04,160,21,3
2024-03-05,172,25,2
2024-03-06,150,17,4
2024-03-07,188,30,1
";

struct Args {
    input: Option<PathBuf>,
    config: Option<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut args = std::env::args().skip(1);
    let mut out = Args { input: None, config: None };
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().context("--config expects a file path")?;
                out.config = Some(PathBuf::from(path));
            }
            _ => out.input = Some(PathBuf::from(arg)),
        }
    }
    Ok(out)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = parse_args()?;
    let config = match &args.config {
        Some(path) => ChartConfig::load(path).with_context(|| format!("failed to load config '{}'", path.display()))?,
        None => ChartConfig::default(),
    };

    let mut records = match &args.input {
        Some(path) => load_records(path).with_context(|| format!("failed to load CSV '{}'", path.display()))?,
        None => read_csv(SAMPLE_CSV.as_bytes()).context("built-in sample")?,
    };
    if records.is_empty() {
        anyhow::bail!("no records loaded; check headers/delimiter.");
    }
    add_category_column(&mut records);
    tracing::info!(rows = records.len(), "loaded records");

    let series = series_for(&records);
    if series.is_empty() {
        anyhow::bail!("no numeric columns besides `date`");
    }
    let options = || ChartOptions::from_config(&config);

    let out_dir = PathBuf::from("target/out");
    std::fs::create_dir_all(&out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    write_chart(&out_dir, "bar", BarChart::new(records.clone(), series.clone()).with_options(options()))?;
    write_chart(
        &out_dir,
        "stacked_bar",
        StackedBarChart::new(records.clone(), series.clone()).with_options(options()),
    )?;
    let line = LineChart::new(records.clone(), series.clone()).with_options(options());
    write_chart(&out_dir, "line", line.clone())?;
    write_chart(&out_dir, "scatter", scatter_of(&records, &series).with_options(options()))?;

    sweep(line);
    Ok(())
}

fn load_records(path: &Path) -> Result<Vec<Record>> {
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    Ok(read_csv(file)?)
}

/// Band charts group by `valueX`; derive it from the date when the CSV lacks it.
fn add_category_column(records: &mut [Record]) {
    for r in records.iter_mut() {
        if r.contains("valueX") {
            continue;
        }
        if let Some(d) = r.get("date").and_then(Value::as_date) {
            r.insert("valueX", d.format("%d-%m").to_string());
        }
    }
}

const PALETTE: [&str; 6] = ["#1F77B4", "#FF7F0E", "#2CA02C", "#D62728", "#9467BD", "#8C564B"];

/// One series per numeric column, ordered by column name.
fn series_for(records: &[Record]) -> Vec<SeriesMeta> {
    let Some(first) = records.first() else { return Vec::new() };
    first
        .keys()
        .filter(|k| *k != "date" && *k != "valueX")
        .filter(|k| records.iter().any(|r| matches!(r.get(k), Some(Value::Number(_)))))
        .zip(PALETTE.iter().cycle())
        .map(|(k, color)| SeriesMeta::new(k, k, *color))
        .collect()
}

/// First two series plotted against each other.
fn scatter_of(records: &[Record], series: &[SeriesMeta]) -> ScatterChart {
    let (xs, ys) = match series {
        [a, b, ..] => (a.accessor.as_str(), b.accessor.as_str()),
        [a] => (a.accessor.as_str(), a.accessor.as_str()),
        [] => ("", ""),
    };
    let points: Vec<ScatterPoint> = records
        .iter()
        .filter_map(|r| {
            let (x, y) = (r.number(xs)?, r.number(ys)?);
            let label = r.get("valueX").map(ToString::to_string).unwrap_or_default();
            Some(ScatterPoint::new(x, y).with_content(label.clone()).with_tooltip(format!("{label}: {x} / {y}")))
        })
        .collect();
    let bounds = |f: fn(&ScatterPoint) -> f64| {
        let lo = points.iter().map(f).fold(f64::INFINITY, f64::min);
        let hi = points.iter().map(f).fold(f64::NEG_INFINITY, f64::max);
        if lo.is_finite() { (lo.min(0.0), hi * 1.1) } else { (0.0, 1.0) }
    };
    let (x_domain, y_domain) = (bounds(|p| p.x), bounds(|p| p.y));
    ScatterChart::new(points, x_domain, y_domain).with_center_lines(true, true)
}

fn write_chart<C: Chart>(dir: &Path, name: &str, chart: C) -> Result<()> {
    let mut wrapper = ChartWrapper::new(chart);
    wrapper.resize(WIDTH, HEIGHT);
    let frame = wrapper.render().context("chart has no size")?;
    let out = dir.join(format!("chart_{name}.svg"));
    std::fs::write(&out, &frame.svg).with_context(|| format!("writing {}", out.display()))?;
    if let Some(legend) = frame.legend {
        let html = dir.join(format!("chart_{name}_legend.html"));
        std::fs::write(&html, legend.to_html()).with_context(|| format!("writing {}", html.display()))?;
    }
    println!("Wrote {}", out.display());
    Ok(())
}

/// Moves a pointer left to right over the plot, one event past each throttle window.
fn sweep(chart: LineChart) {
    let mut wrapper = ChartWrapper::new(chart);
    wrapper.resize(WIDTH, HEIGHT);
    let Some(dims) = wrapper.dimensions() else { return };
    let start = Instant::now();
    let y = dims.offset.top + dims.inner_height / 2.0;
    for step in 0..=SWEEP_STEPS {
        let x = dims.offset.left + dims.inner_width * step as f64 / SWEEP_STEPS as f64;
        let now = start + Duration::from_millis(150 * step as u64);
        if !wrapper.pointer_move(x, y, now) {
            tracing::debug!(x, "pointer move left the tooltip unchanged");
            continue;
        }
        let tip = wrapper.tooltip();
        let values: Vec<String> = tip
            .entries
            .iter()
            .map(|e| format!("{}={}", e.label, e.value_y.as_ref().map(ToString::to_string).unwrap_or_default()))
            .collect();
        tracing::info!(x, left = tip.left, values = %values.join(", "), "tooltip");
    }
    wrapper.pointer_leave();
}
