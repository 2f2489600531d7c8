// File: crates/chart-core/tests/charts.rs
// Purpose: Layout of each chart kind: marks, domains, axes and interaction wiring.

use chart_core::charts::scatter::group_points;
use chart_core::loading::{loading_options, loading_records};
use chart_core::scene::{Def, Shape};
use chart_core::{
    loading_chart, record, BarChart, Chart, ChartDimensions, ChartOptions, LineChart, LoadingKind, Offset, Record,
    Scene, ScatterChart, ScatterPoint, SeriesMeta, StackedBarChart,
};
use chrono::NaiveDate;

fn dims(inner_w: f64, inner_h: f64) -> ChartDimensions {
    let o = Offset::default();
    ChartDimensions::measure(inner_w + o.hsum(), inner_h + o.vsum(), o).expect("dims")
}

fn texts(scene: &Scene) -> Vec<String> {
    scene
        .leaves()
        .into_iter()
        .filter_map(|m| match &m.shape {
            Shape::Text { content, .. } => Some(content.clone()),
            _ => None,
        })
        .collect()
}

fn rects(scene: &Scene) -> Vec<(f64, f64, f64, f64)> {
    scene
        .leaves()
        .into_iter()
        .filter(|m| m.style.class.as_deref() == Some("meridian__bar") || m.style.pointer_events_none)
        .filter_map(|m| match m.shape {
            Shape::Rect { x, y, width, height } => Some((x, y, width, height)),
            _ => None,
        })
        .collect()
}

fn grouped() -> Vec<Record> {
    ["a", "b", "c", "d"]
        .iter()
        .enumerate()
        .map(|(i, c)| record! { "valueX" => *c, "x" => (i + 1) as f64, "y" => 2.0 })
        .collect()
}

#[test]
fn bar_chart_draws_one_rect_per_series_and_group() {
    let chart = BarChart::new(grouped(), vec![SeriesMeta::new("x", "X", "#f00"), SeriesMeta::new("y", "Y", "#0f0")]);
    let view = chart.layout(&dims(440.0, 100.0));
    let bars = rects(&view.scene);
    assert_eq!(bars.len(), 8);
    // tallest bar reaches the top of the plot
    assert!(bars.iter().any(|&(_, y, _, h)| y.abs() < 1e-9 && (h - 100.0).abs() < 1e-9));
    // sub-bands split the 60px group evenly
    assert!(bars.iter().all(|&(_, _, w, _)| (w - 30.0).abs() < 1e-9));
    let interaction = view.interaction.expect("cursor");
    assert!((interaction.translate.0 - 30.0).abs() < 1e-9);
    assert!(interaction.style.invisible);
    assert_eq!(interaction.tracks.len(), 2);
    assert_eq!(view.legend.map(|l| l.items.len()), Some(2));
}

#[test]
fn bar_text_and_legend_can_be_hidden() {
    let bars = vec![SeriesMeta::new("x", "X", "#f00")];
    let shown = BarChart::new(grouped(), bars.clone()).layout(&dims(440.0, 100.0));
    let options = ChartOptions { hide_bar_text: true, hide_legend: true, ..ChartOptions::default() };
    let hidden = BarChart::new(grouped(), bars).with_options(options).layout(&dims(440.0, 100.0));
    // one label per group
    assert_eq!(texts(&shown.scene).len(), texts(&hidden.scene).len() + 4);
    assert!(hidden.legend.is_none());
}

#[test]
fn stacked_bars_sit_on_each_other() {
    let data = vec![
        record! { "valueX" => "a", "x" => 2, "y" => 3 },
        record! { "valueX" => "b", "x" => 1, "y" => 1 },
    ];
    let options = ChartOptions { hide_bar_text: true, show_y_grid_lines: true, ..ChartOptions::default() };
    let chart = StackedBarChart::new(data, vec![SeriesMeta::new("x", "X", "#f00"), SeriesMeta::new("y", "Y", "#0f0")])
        .with_options(options);
    let view = chart.layout(&dims(400.0, 100.0));
    let bars = rects(&view.scene);
    assert_eq!(bars.len(), 4);
    // category "a": total 5 is the domain max
    let (_, y0, _, h0) = bars[0];
    let (_, y1, _, h1) = bars[1];
    assert!((y0 - 60.0).abs() < 1e-9 && (h0 - 40.0).abs() < 1e-9);
    assert!(y1.abs() < 1e-9 && (h1 - 60.0).abs() < 1e-9);

    let interaction = view.interaction.expect("cursor");
    assert_eq!(interaction.translate.1, -100.0);

    // grid rows come first and span margin to outer edge
    let Shape::Line { from, to } = &view.scene.marks[0].shape else { panic!("grid line first") };
    assert_eq!(from.0, 45.0);
    assert_eq!(to.0, 445.0);
}

#[test]
fn stacked_padding_widens_the_domain() {
    let data = vec![record! { "valueX" => "a", "v" => 10 }, record! { "valueX" => "b", "v" => 20 }];
    let options = ChartOptions { chart_y_domain_padding: Some(0.5), hide_bar_text: true, ..ChartOptions::default() };
    let chart = StackedBarChart::new(data, vec![SeriesMeta::new("v", "V", "#f00")]).with_options(options);
    let view = chart.layout(&dims(400.0, 100.0));
    // max = 20 + 0.5 * 10 = 25, so the 20 bar stops at 20px from the top
    let bars = rects(&view.scene);
    assert!((bars[1].1 - 20.0).abs() < 1e-9);
}

fn daily() -> Vec<Record> {
    (1..=3)
        .map(|d| {
            let day = NaiveDate::from_ymd_opt(2024, 3, d).expect("date");
            record! { "date" => day, "visits" => d as f64 * 10.0 }
        })
        .collect()
}

#[test]
fn line_chart_clips_and_labels_edges() {
    let options = ChartOptions { simplified: true, ..ChartOptions::default() };
    let chart = LineChart::new(daily(), vec![SeriesMeta::new("visits", "Visits", "#36c").dotted()])
        .with_options(options)
        .with_id("t");
    let view = chart.layout(&dims(200.0, 100.0));

    assert!(view.scene.defs.iter().any(|d| matches!(d, Def::ClipRect { id, .. } if id == "clippath-t-visits")));
    assert!(view.scene.defs.iter().any(|d| matches!(d, Def::LinearGradient { id, .. } if id == "gradient-visits-t")));

    let labels = texts(&view.scene);
    // padded max is 32; simplified left axis shows 0 and floor(max)
    assert!(labels.contains(&"0".to_string()));
    assert!(labels.contains(&"32".to_string()));
    assert!(labels.contains(&"01 Mar".to_string()));
    assert!(labels.contains(&"03 Mar".to_string()));

    let dashed = view.scene.leaves().into_iter().any(|m| matches!(m.shape, Shape::Path { .. }) && m.style.dash == Some(5.0));
    assert!(dashed);
    assert!(!view.interaction.expect("cursor").style.invisible);
}

#[test]
fn line_tooltip_values_are_rounded() {
    let data = vec![record! { "date" => NaiveDate::from_ymd_opt(2024, 1, 1).expect("date"), "v" => 2.5 }];
    let chart = LineChart::new(data, vec![SeriesMeta::new("v", "V", "#000")]);
    let view = chart.layout(&dims(100.0, 100.0));
    let track = &view.interaction.expect("cursor").tracks[0];
    assert_eq!(track.records[0].number("value"), Some(3.0));
}

#[test]
fn scatter_groups_duplicates_and_offsets_them() {
    let points = vec![
        ScatterPoint::new(5.0, 5.0).with_content("A").with_tooltip("first"),
        ScatterPoint::new(5.0, 5.0).with_content("B").with_tooltip("second"),
        ScatterPoint::new(1.0, 1.0).with_content("C"),
    ];
    assert_eq!(group_points(&points).len(), 2);

    let chart = ScatterChart::new(points, (0.0, 10.0), (0.0, 10.0)).with_center_lines(true, true);
    let view = chart.layout(&dims(400.0, 100.0));
    let centers: Vec<(f64, f64)> = view
        .scene
        .leaves()
        .into_iter()
        .filter_map(|m| match m.shape {
            Shape::Circle { center, .. } => Some(center),
            _ => None,
        })
        .collect();
    assert_eq!(centers, vec![(200.0, 50.0), (205.0, 50.0), (40.0, 90.0)]);
    // only points with a payload are hoverable
    assert_eq!(view.hover_targets.len(), 2);
    assert!(view.interaction.is_none());
    assert_eq!(view.hover_targets[0].update.top, 26.0);
}

#[test]
fn loading_placeholder_is_quiet() {
    let today = NaiveDate::from_ymd_opt(2024, 3, 10).expect("date");
    let rows = loading_records(today);
    assert_eq!(rows.len(), 9);
    assert_eq!(rows[0].get("valueX").map(|v| v.to_string()), Some("02-03".to_string()));
    assert_eq!(rows[8].get("date").and_then(|v| v.as_date()).map(|d| d.date()), Some(today));

    let opts = loading_options(false);
    assert!(opts.hide_tooltip && opts.hide_bar_text);
    assert_eq!(opts.axis_color(), "#414952");

    for kind in [LoadingKind::Line, LoadingKind::Bar, LoadingKind::StackedBar] {
        let view = loading_chart(kind, today, true).layout(&dims(300.0, 100.0));
        assert!(view.interaction.is_none());
        assert!(view.legend.is_none());
        assert!(texts(&view.scene).is_empty());
    }
}
