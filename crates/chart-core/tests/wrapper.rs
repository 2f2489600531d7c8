// File: crates/chart-core/tests/wrapper.rs
// Purpose: Measurement gating, margins and pointer routing through the chart wrapper.

use std::time::{Duration, Instant};

use chart_core::tooltip::TooltipBody;
use chart_core::{
    record, BarChart, ChartWrapper, Offset, OffsetPatch, Record, ScatterChart, ScatterPoint, SeriesMeta, Value,
};

fn bar_wrapper() -> ChartWrapper<BarChart> {
    let data: Vec<Record> = ["a", "b", "c", "d"]
        .iter()
        .map(|c| record! { "valueX" => *c, "x" => 3, "y" => 1 })
        .collect();
    ChartWrapper::new(BarChart::new(data, vec![SeriesMeta::new("x", "X", "#f00"), SeriesMeta::new("y", "Y", "#0f0")]))
}

#[test]
fn nothing_renders_until_measured() {
    let mut w = bar_wrapper();
    assert!(w.render().is_none());
    assert!(!w.pointer_move(100.0, 10.0, Instant::now()));
    w.resize(485.0, 0.0);
    assert!(w.render().is_none());
    w.resize(485.0, 130.0);
    let frame = w.render().expect("frame");
    assert!(frame.svg.starts_with("<svg"));
    assert_eq!(frame.dimensions.inner_width, 440.0);
    assert_eq!(frame.dimensions.inner_height, 100.0);
    assert!(frame.tooltip.is_none());
    assert_eq!(frame.legend.map(|l| l.items.len()), Some(2));
}

#[test]
fn offsets_merge_partially() {
    let mut w = bar_wrapper().with_offset(OffsetPatch::default().top(5.0));
    assert_eq!(w.offset(), Offset::new(5.0, 45.0, 30.0, 0.0));
    w.set_offset(OffsetPatch::default().left(60.0));
    assert_eq!(w.offset(), Offset::new(5.0, 60.0, 30.0, 0.0));
    w.resize(485.0, 135.0);
    let dims = w.dimensions().expect("dims");
    assert_eq!(dims.inner_width, 425.0);
    assert_eq!(dims.inner_height, 100.0);
}

#[test]
fn explicit_size_wins_over_measurement() {
    let mut w = bar_wrapper().with_size(Some(300.0), None);
    w.resize(999.0, 130.0);
    let dims = w.dimensions().expect("dims");
    assert_eq!(dims.outer_width, 300.0);
    assert_eq!(dims.outer_height, 130.0);
}

#[test]
fn hovering_a_bar_group_opens_the_tooltip() {
    let mut w = bar_wrapper();
    w.resize(485.0, 130.0);
    let t0 = Instant::now();

    // slot "b" spans 140..200 inside the plot
    assert!(w.pointer_move(45.0 + 170.0, 50.0, t0));
    let state = w.tooltip().clone();
    assert!(state.open);
    assert_eq!(state.entries.len(), 2);
    assert_eq!(state.entries[0].value_x, Some(Value::from("b")));
    // group start plus half the group width
    assert!((state.left - 170.0).abs() < 1e-9);

    let frame = w.render().expect("frame");
    let panel = frame.tooltip.expect("panel");
    assert!((panel.anchor.left - 215.0).abs() < 1e-9);
    assert_eq!(panel.anchor.top, -10.0);
    let TooltipBody::Table { rows, .. } = panel.body else { panic!("table") };
    assert_eq!(rows.len(), 2);

    // leaving the plot area clears it
    assert!(w.pointer_move(10.0, 50.0, t0 + Duration::from_millis(200)));
    assert!(!w.tooltip().open);
    assert!(!w.pointer_leave());
}

#[test]
fn resize_relayouts() {
    let mut w = bar_wrapper();
    w.resize(485.0, 130.0);
    let small = w.render().expect("frame").svg;
    w.resize(885.0, 130.0);
    let wide = w.render().expect("frame").svg;
    assert_ne!(small, wide);
}

#[test]
fn scatter_points_open_their_own_tooltip() {
    let points = vec![
        ScatterPoint::new(5.0, 5.0).with_content("A").with_tooltip("first"),
        ScatterPoint::new(5.0, 5.0).with_content("B").with_tooltip("second"),
    ];
    let mut w = ChartWrapper::new(ScatterChart::new(points, (0.0, 10.0), (0.0, 10.0)));
    w.resize(445.0, 130.0);
    let now = Instant::now();

    // both circles overlap here; the one drawn last wins
    assert!(w.pointer_move(45.0 + 205.0, 50.0, now));
    let frame = w.render().expect("frame");
    let panel = frame.tooltip.expect("panel");
    assert_eq!(panel.anchor.left, 250.0);
    assert_eq!(panel.anchor.top, 16.0);
    let TooltipBody::Table { details, rows, .. } = panel.body else { panic!("table") };
    assert_eq!(details, vec!["second".to_string()]);
    assert!(rows.is_empty());

    // same point again: nothing changes
    assert!(!w.pointer_move(45.0 + 205.0, 51.0, now));
    // off every circle
    assert!(w.pointer_move(45.0 + 380.0, 5.0, now));
    assert!(!w.tooltip().open);
}

#[test]
fn changing_the_explicit_size_relayouts() {
    let mut w = bar_wrapper().with_size(Some(300.0), None);
    w.resize(999.0, 130.0);
    let before = w.render().expect("frame");
    w.set_size(Some(485.0), Some(230.0));
    let after = w.render().expect("frame");
    assert_eq!(after.dimensions.inner_width, 440.0);
    assert_eq!(after.dimensions.inner_height, 200.0);
    assert_ne!(before.svg, after.svg);
    w.set_size(None, None);
    assert_eq!(w.dimensions().map(|d| d.outer_width), Some(999.0));
}
