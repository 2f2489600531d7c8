// File: crates/chart-core/tests/cursor.rs
// Purpose: Nearest-point resolution, edge suppression, throttling and pointer plumbing.

use std::time::{Duration, Instant};

use chart_core::cursor::{cursor_marks, CursorStyle};
use chart_core::{
    bisect_center, record, BandScale, CursorResolver, HorizontalScale, LinearScale, Position, Record, SeriesTrack,
    Throttle, TooltipCursor, TooltipState, Value,
};

const LEFT: f64 = 45.0;
const WIDTH: f64 = 200.0;

fn linear_track(key: &str, ys: &[f64]) -> SeriesTrack {
    let x = LinearScale::new((0.0, 10.0), (0.0, WIDTH));
    let y = LinearScale::new((0.0, 100.0), (100.0, 0.0));
    SeriesTrack {
        key: key.into(),
        records: ys.iter().enumerate().map(|(i, v)| record! { "x" => i as f64, "y" => *v }).collect(),
        x_accessor: "x".into(),
        y_accessor: "y".into(),
        x: Position::mapped(move |r, _, _| r.number("x").map(|v| x.map(v))),
        y: Position::mapped(move |r, _, _| r.number("y").map(|v| y.map(v))),
        color: "#f00".into(),
        label: key.into(),
        inactive: false,
    }
}

fn linear_scale() -> HorizontalScale {
    HorizontalScale::Linear(LinearScale::new((0.0, 10.0), (0.0, WIDTH)))
}

fn resolver<'a>(scale: &'a HorizontalScale, tracks: &'a [SeriesTrack]) -> CursorResolver<'a> {
    CursorResolver { scale, tracks, offset_left: LEFT, inner_width: WIDTH, translate: (0.0, 0.0) }
}

#[test]
fn pointer_on_a_point_resolves_that_index() {
    let scale = linear_scale();
    let tracks = vec![linear_track("a", &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0])];
    let update = resolver(&scale, &tracks).resolve(LEFT + 60.0).expect("update");
    assert_eq!(update.entries.len(), 1);
    assert_eq!(update.entries[0].index, 3);
    assert_eq!(update.entries[0].value_y, Some(Value::Number(4.0)));
    assert!((update.left - 60.0).abs() < 1e-9);
    assert_eq!(update.top, 0.0);
}

#[test]
fn inactive_and_empty_series_are_left_out() {
    let scale = linear_scale();
    let mut off = linear_track("off", &[1.0, 2.0]);
    off.inactive = true;
    let empty = linear_track("empty", &[]);
    let tracks = vec![off, empty, linear_track("on", &[5.0, 6.0])];
    let update = resolver(&scale, &tracks).resolve(LEFT + 20.0).expect("update");
    let keys: Vec<_> = update.entries.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(keys, vec!["on"]);
}

#[test]
fn no_active_series_means_no_update() {
    let scale = linear_scale();
    let mut off = linear_track("off", &[1.0]);
    off.inactive = true;
    assert!(resolver(&scale, &[off]).resolve(LEFT).is_none());
}

#[test]
fn updates_outside_the_plot_are_suppressed() {
    let scale = linear_scale();
    let tracks = vec![linear_track("a", &[1.0, 2.0, 3.0])];
    let mut r = resolver(&scale, &tracks);
    r.translate = (WIDTH + 1.0, 0.0);
    assert!(r.resolve(LEFT).is_none());
    r.translate = (-1.0, 0.0);
    assert!(r.resolve(LEFT).is_none());
}

fn band_track(categories: &[&str]) -> SeriesTrack {
    SeriesTrack {
        key: "bars".into(),
        records: categories.iter().enumerate().map(|(i, c)| record! { "time" => *c, "value" => i as f64 + 1.0 }).collect(),
        x_accessor: "time".into(),
        y_accessor: "value".into(),
        x: Position::Fixed(10.0),
        y: Position::Fixed(0.0),
        color: "#00f".into(),
        label: "bars".into(),
        inactive: false,
    }
}

#[test]
fn band_resolution_matches_category_exactly() {
    // step 100, bandwidth 60, slots start at 40
    let scale = HorizontalScale::Band(BandScale::new(
        vec!["a".into(), "b".into(), "c".into(), "d".into()],
        (0.0, 440.0),
        0.4,
    ));
    let tracks = vec![band_track(&["a", "b", "c", "d"])];
    let mut r = resolver(&scale, &tracks);
    r.inner_width = 440.0;
    let update = r.resolve(LEFT + 170.0).expect("update");
    assert_eq!(update.entries[0].value_x, Some(Value::from("b")));
    assert_eq!(update.entries[0].index, 1);
}

#[test]
fn band_miss_falls_back_to_last_record() {
    let scale = HorizontalScale::Band(BandScale::new(
        vec!["a".into(), "b".into(), "c".into(), "d".into()],
        (0.0, 440.0),
        0.4,
    ));
    let tracks = vec![band_track(&["a", "b", "c"])];
    let mut r = resolver(&scale, &tracks);
    r.inner_width = 440.0;
    // over "d", which this series lacks
    let update = r.resolve(LEFT + 360.0).expect("update");
    assert_eq!(update.entries[0].index, 2);
    // past the last slot
    let update = r.resolve(LEFT + 430.0).expect("update");
    assert_eq!(update.entries[0].index, 2);
}

#[test]
fn bisect_center_picks_the_nearest_and_breaks_ties_late() {
    let records: Vec<Record> = [0.0, 2.0, 10.0].iter().map(|v| record! { "x" => *v }).collect();
    assert_eq!(bisect_center(&records, "x", -5.0), 0);
    assert_eq!(bisect_center(&records, "x", 0.9), 0);
    assert_eq!(bisect_center(&records, "x", 1.0), 1);
    assert_eq!(bisect_center(&records, "x", 5.9), 1);
    assert_eq!(bisect_center(&records, "x", 7.0), 2);
    assert_eq!(bisect_center(&records, "x", 99.0), 2);
    assert_eq!(bisect_center(&[], "x", 1.0), 0);
}

#[test]
fn throttle_drops_calls_inside_the_window() {
    let t0 = Instant::now();
    let mut t = Throttle::default();
    assert!(t.ready(t0));
    assert!(!t.ready(t0 + Duration::from_millis(40)));
    assert!(!t.ready(t0 + Duration::from_millis(99)));
    assert!(t.ready(t0 + Duration::from_millis(100)));
    t.reset();
    assert!(t.ready(t0 + Duration::from_millis(101)));
}

#[test]
fn cursor_enter_move_leave() {
    let scale = linear_scale();
    let tracks = vec![linear_track("a", &[1.0, 2.0, 3.0, 4.0])];
    let r = resolver(&scale, &tracks);
    let mut state = TooltipState::default();
    let mut cursor = TooltipCursor::new();
    let t0 = Instant::now();

    // moves before entering are ignored
    assert!(!cursor.pointer_move(&mut state, &r, LEFT, t0));
    assert!(cursor.pointer_enter(&mut state, &r, LEFT, t0));
    assert!(state.open);
    assert_eq!(state.entries[0].index, 0);

    // throttled: state keeps the first resolution
    assert!(!cursor.pointer_move(&mut state, &r, LEFT + 60.0, t0 + Duration::from_millis(30)));
    assert_eq!(state.entries[0].index, 0);
    assert!(cursor.pointer_move(&mut state, &r, LEFT + 60.0, t0 + Duration::from_millis(120)));
    assert_eq!(state.entries[0].index, 3);

    cursor.pointer_leave(&mut state);
    assert!(!state.open);
    assert!(state.entries.is_empty());

    // leaving clears the throttle window
    assert!(cursor.pointer_enter(&mut state, &r, LEFT + 20.0, t0 + Duration::from_millis(130)));
    assert_eq!(state.entries[0].index, 1);
}

#[test]
fn cursor_marks_skip_falsy_values_and_respect_invisible() {
    let scale = linear_scale();
    let tracks = vec![linear_track("zero", &[0.0, 0.0]), linear_track("one", &[1.0, 1.0])];
    let mut state = TooltipState::default();
    let update = resolver(&scale, &tracks).resolve(LEFT).expect("update");
    state.show(update);

    let marks = cursor_marks(&state, 100.0, &CursorStyle::default());
    // line + one dot
    assert_eq!(marks.len(), 2);

    let invisible = CursorStyle { invisible: true, ..CursorStyle::default() };
    assert_eq!(cursor_marks(&state, 100.0, &invisible).len(), 1);

    state.hide();
    assert!(cursor_marks(&state, 100.0, &CursorStyle::default()).is_empty());
}
