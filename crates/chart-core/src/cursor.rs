// File: crates/chart-core/src/cursor.rs
// Summary: Tooltip cursor: pointer pixel -> nearest record per series, throttled state updates.

use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::record::{Record, Value};
use crate::scale::{millis, HorizontalScale};
use crate::scene::Mark;
use crate::tooltip::{TooltipEntry, TooltipState, TooltipUpdate};

/// Minimum spacing between two resolutions during pointer movement.
pub const THROTTLE_WINDOW: Duration = Duration::from_millis(100);

/// Pixel position of a series point: a constant, or computed from the record.
#[derive(Clone)]
pub enum Position {
    Fixed(f64),
    Mapped(Rc<dyn Fn(&Record, usize, &[Record]) -> Option<f64>>),
}

impl Position {
    pub fn mapped(f: impl Fn(&Record, usize, &[Record]) -> Option<f64> + 'static) -> Self {
        Position::Mapped(Rc::new(f))
    }

    /// Evaluated position; missing, NaN and zero all read as 0.
    fn eval(&self, record: &Record, index: usize, records: &[Record]) -> f64 {
        let v = match self {
            Position::Fixed(v) => Some(*v),
            Position::Mapped(f) => f(record, index, records),
        };
        v.filter(|v| !v.is_nan()).unwrap_or(0.0)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Fixed(v) => f.debug_tuple("Fixed").field(v).finish(),
            Position::Mapped(_) => f.write_str("Mapped(..)"),
        }
    }
}

/// Everything the cursor needs to know about one drawn series.
#[derive(Clone, Debug)]
pub struct SeriesTrack {
    pub key: String,
    pub records: Vec<Record>,
    pub x_accessor: String,
    pub y_accessor: String,
    pub x: Position,
    pub y: Position,
    pub color: String,
    pub label: String,
    pub inactive: bool,
}

/// Index of the record whose `accessor` value is closest to `target`.
///
/// Records must be ordered by that field. Ties go to the later record; records without a
/// numeric value never compare as smaller than the target. Empty input yields 0.
pub fn bisect_center(records: &[Record], accessor: &str, target: f64) -> usize {
    let key = |i: usize| records[i].get(accessor).and_then(Value::to_number);
    // left bisect over [0, len - 1)
    let (mut lo, mut hi) = (0usize, records.len().saturating_sub(1));
    while lo < hi {
        let mid = (lo + hi) / 2;
        if key(mid).is_some_and(|k| k < target) {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    let i = lo;
    if i > 0 {
        let prev = key(i - 1).map_or(f64::NAN, |k| k - target);
        let cur = key(i).map_or(f64::NAN, |k| k - target);
        if prev > -cur {
            return i - 1;
        }
    }
    i
}

/// What the pointer points at along the x-axis.
#[derive(Clone, Debug, PartialEq)]
enum Target {
    /// Continuous domain position, as a number (epoch millis for time).
    Nearest(f64),
    /// Band category; `None` past the last slot.
    Category(Option<Value>),
}

fn pointer_target(scale: &HorizontalScale, px: f64) -> Option<Target> {
    match scale {
        HorizontalScale::Linear(s) => Some(s.invert(px)).filter(|v| v.is_finite()).map(Target::Nearest),
        HorizontalScale::Time(s) => s.invert(px).map(|d| Target::Nearest(millis(&d))),
        HorizontalScale::Band(s) => {
            if !(s.step() > 0.0) || !px.is_finite() {
                return None;
            }
            Some(Target::Category(s.value_at(px).cloned()))
        }
    }
}

/// Resolves a pointer position into one tooltip entry per active series.
#[derive(Clone, Debug)]
pub struct CursorResolver<'a> {
    pub scale: &'a HorizontalScale,
    pub tracks: &'a [SeriesTrack],
    /// Left margin subtracted from container-relative pointer x.
    pub offset_left: f64,
    pub inner_width: f64,
    /// Uniform shift applied to every resolved pixel position.
    pub translate: (f64, f64),
}

impl<'a> CursorResolver<'a> {
    /// Resolve the container-relative pointer x.
    ///
    /// Returns `None` when nothing should change: no scale reading, no active series, or the
    /// leading entry landing outside `[0, inner_width]`.
    pub fn resolve(&self, pointer_x: f64) -> Option<TooltipUpdate> {
        let px = pointer_x - self.offset_left;
        let Some(target) = pointer_target(self.scale, px) else {
            #[cfg(debug_assertions)]
            tracing::error!(
                pointer_x,
                scale = ?self.scale,
                "tooltip could not be resolved: the x scale yields no domain value at this pixel"
            );
            return None;
        };

        let entries: Vec<TooltipEntry> = self
            .tracks
            .iter()
            .filter_map(|track| self.entry_for(track, &target))
            .filter(|e| !e.inactive)
            .collect();

        let left = entries.first()?.x;
        if left < 0.0 || left > self.inner_width {
            tracing::trace!(left, inner_width = self.inner_width, "tooltip outside plot; update skipped");
            return None;
        }
        Some(TooltipUpdate { entries, left, top: 0.0 })
    }

    fn entry_for(&self, track: &SeriesTrack, target: &Target) -> Option<TooltipEntry> {
        if track.records.is_empty() {
            return None;
        }
        let index = match target {
            Target::Nearest(v) => bisect_center(&track.records, &track.x_accessor, *v),
            Target::Category(cat) => cat
                .as_ref()
                .and_then(|c| track.records.iter().position(|r| r.get(&track.x_accessor) == Some(c)))
                .unwrap_or(track.records.len() - 1),
        };
        let record = &track.records[index];
        Some(TooltipEntry {
            x: track.x.eval(record, index, &track.records) + self.translate.0,
            y: track.y.eval(record, index, &track.records) + self.translate.1,
            value_x: record.get(&track.x_accessor).cloned(),
            value_y: record.get(&track.y_accessor).cloned(),
            color: track.color.clone(),
            label: track.label.clone(),
            index,
            inactive: track.inactive,
            detail: None,
        })
    }
}

/// Leading-edge rate limiter; calls inside the window are dropped, not queued.
#[derive(Clone, Copy, Debug)]
pub struct Throttle {
    window: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    /// True when a call at `now` may run; records it as the last run.
    pub fn ready(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.saturating_duration_since(last) < self.window => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(THROTTLE_WINDOW)
    }
}

/// Pointer plumbing for the cursor: enter / move / leave over the plot hit area.
#[derive(Clone, Debug, Default)]
pub struct TooltipCursor {
    throttle: Throttle,
    over_chart: bool,
}

impl TooltipCursor {
    pub fn new() -> Self { Self::default() }

    pub fn is_over_chart(&self) -> bool { self.over_chart }

    pub fn pointer_enter(&mut self, state: &mut TooltipState, resolver: &CursorResolver<'_>, pointer_x: f64, now: Instant) -> bool {
        self.over_chart = true;
        self.pointer_move(state, resolver, pointer_x, now)
    }

    /// Resolve and publish; returns whether the state changed.
    pub fn pointer_move(&mut self, state: &mut TooltipState, resolver: &CursorResolver<'_>, pointer_x: f64, now: Instant) -> bool {
        if !self.over_chart {
            return false;
        }
        if !self.throttle.ready(now) {
            tracing::trace!("pointer move throttled");
            return false;
        }
        match resolver.resolve(pointer_x) {
            Some(update) => {
                state.show(update);
                true
            }
            None => false,
        }
    }

    pub fn pointer_leave(&mut self, state: &mut TooltipState) {
        self.over_chart = false;
        self.throttle.reset();
        state.hide();
    }
}

/// Cursor appearance options.
#[derive(Clone, Debug, PartialEq)]
pub struct CursorStyle {
    pub x_offset: f64,
    pub line_width: f64,
    pub line_color: String,
    pub dot_stroke: String,
    /// Draw only the line, no dots.
    pub invisible: bool,
}

impl Default for CursorStyle {
    fn default() -> Self {
        Self {
            x_offset: 0.0,
            line_width: 1.0,
            line_color: "gray".into(),
            dot_stroke: "white".into(),
            invisible: false,
        }
    }
}

/// Marks for the open cursor: a vertical line and one dot per visible entry.
pub fn cursor_marks(state: &TooltipState, inner_height: f64, style: &CursorStyle) -> Vec<Mark> {
    if !state.open {
        return Vec::new();
    }
    let x = state.left + style.x_offset;
    let mut marks = vec![Mark::line((x, 0.0), (x, inner_height), &style.line_color, style.line_width)];
    if !style.invisible {
        marks.extend(
            state
                .entries
                .iter()
                .filter(|e| e.has_visible_value())
                .map(|e| Mark::circle((e.x, e.y), 4.0, &e.color).with_stroke(&style.dot_stroke, 1.0)),
        );
    }
    marks
}
