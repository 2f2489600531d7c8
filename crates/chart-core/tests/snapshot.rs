// File: crates/chart-core/tests/snapshot.rs
// Purpose: Golden snapshot harness with bless flow.
// Behavior:
// - Renders a deterministic small line chart to SVG text.
// - If env UPDATE_SNAPSHOTS=1, (re)writes the snapshot file.
// - Else, if snapshot exists, compares the markup for an exact match.
// - Else, logs a note and returns (skips) without failing to ease first run.

use chart_core::{record, ChartWrapper, LineChart, Record, SeriesMeta};
use chrono::NaiveDate;

fn render_svg() -> String {
    let data: Vec<Record> = [3.0, 5.0, 4.0, 6.5, 6.0]
        .iter()
        .enumerate()
        .filter_map(|(i, v)| {
            let day = NaiveDate::from_ymd_opt(2024, 3, 1 + i as u32)?;
            Some(record! { "date" => day, "visits" => *v, "goal" => 5 })
        })
        .collect();
    let lines = vec![
        SeriesMeta::new("visits", "Visits", "#1F77B4").with_area("url(#gradient-visits-snap)"),
        SeriesMeta::new("goal", "Goal", "#FF7F0E").dotted(),
    ];
    let mut wrapper = ChartWrapper::new(LineChart::new(data, lines).with_id("snap"));
    wrapper.resize(320.0, 160.0);
    wrapper.render().expect("measured chart renders").svg
}

#[test]
fn golden_line_chart() {
    let svg = render_svg();
    let snap_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__");
    let snap_path = snap_dir.join("line_chart.svg");

    let update = std::env::var("UPDATE_SNAPSHOTS").ok().map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    if update {
        std::fs::create_dir_all(&snap_dir).expect("create snapshots dir");
        std::fs::write(&snap_path, &svg).expect("write snapshot");
        eprintln!("[snapshot] Updated {} ({} bytes)", snap_path.display(), svg.len());
        return;
    }

    if snap_path.exists() {
        let want = std::fs::read_to_string(&snap_path).expect("read snapshot");
        assert_eq!(svg, want, "rendered markup differs from golden snapshot: {}", snap_path.display());
    } else {
        eprintln!("[snapshot] Missing snapshot {}; set UPDATE_SNAPSHOTS=1 to bless.", snap_path.display());
    }
}

#[test]
fn rendering_is_deterministic() {
    assert_eq!(render_svg(), render_svg());
}
