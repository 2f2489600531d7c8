// File: crates/chart-core/src/charts/line.rs
// Summary: Time-series line chart with optional dashed lines and gradient areas.

use chrono::NaiveDateTime;

use crate::axis::{axes_marks, Axis};
use crate::charts::{next_id, polyline, series_legend, Chart, ChartView, CursorSlot, Interaction, SeriesMeta};
use crate::cursor::{CursorStyle, Position, SeriesTrack};
use crate::domain::min_max_with_padding;
use crate::format::round_half_up;
use crate::options::{ChartOptions, XDomain};
use crate::record::{Record, Value};
use crate::scale::{HorizontalScale, LinearScale, TimeScale};
use crate::scene::{Def, GradientStop, Mark, Scene};
use crate::svg::num;
use crate::types::ChartDimensions;

pub const DATE_ACCESSOR: &str = "date";

#[derive(Clone, Debug)]
pub struct LineChart {
    pub data: Vec<Record>,
    pub lines: Vec<SeriesMeta>,
    pub options: ChartOptions,
    id: String,
}

impl LineChart {
    pub fn new(data: Vec<Record>, lines: Vec<SeriesMeta>) -> Self {
        Self { data, lines, options: ChartOptions::default(), id: next_id() }
    }

    pub fn with_options(mut self, options: ChartOptions) -> Self {
        self.options = options;
        self
    }

    /// Fixed id for clip paths and gradients (stable output across runs).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Id of the gradient defined for `accessor`, usable as an area fill via `url(#…)`.
    pub fn gradient_id(&self, accessor: &str) -> String {
        format!("gradient-{accessor}-{}", self.id)
    }

    fn date_of(record: &Record) -> Option<NaiveDateTime> {
        record.get(DATE_ACCESSOR).and_then(Value::as_date)
    }

    fn time_domain(&self) -> (NaiveDateTime, NaiveDateTime) {
        if let Some(XDomain::Dates(a, b)) = self.options.x_scale_domain {
            return (a, b);
        }
        let first = self.data.first().and_then(Self::date_of).unwrap_or_default();
        let last = self.data.last().and_then(Self::date_of).unwrap_or_default();
        (first, last)
    }

    fn tracks(&self, x: &TimeScale, y: LinearScale) -> Vec<SeriesTrack> {
        self.lines
            .iter()
            .map(|line| {
                let records = self
                    .data
                    .iter()
                    .map(|d| {
                        let mut r = Record::new();
                        match d.get(&line.accessor) {
                            Some(Value::Number(n)) => r.insert("value", round_half_up(*n)),
                            Some(other) => r.insert("value", other.clone()),
                            None => {}
                        }
                        if let Some(t) = d.get(DATE_ACCESSOR) {
                            r.insert("time", t.clone());
                        }
                        r
                    })
                    .collect();
                let time = *x;
                SeriesTrack {
                    key: line.accessor.clone(),
                    records,
                    x_accessor: "time".into(),
                    y_accessor: "value".into(),
                    x: Position::mapped(move |r, _, _| r.get("time").and_then(Value::as_date).map(|d| time.map(&d))),
                    y: Position::mapped(move |r, _, _| Some(y.map(r.number("value").unwrap_or(0.0)))),
                    color: line.color.clone(),
                    label: line.label.clone(),
                    inactive: false,
                }
            })
            .collect()
    }

    /// Pixel span `[min, max]` between the first and last records defining `accessor`.
    fn defined_span(&self, x: &TimeScale, accessor: &str) -> (f64, f64) {
        let px = |r: Option<&Record>| x.map(&r.and_then(Self::date_of).unwrap_or_default());
        let min = px(self.data.iter().find(|r| r.contains(accessor))).max(0.0);
        let max = px(self.data.iter().rev().find(|r| r.contains(accessor)));
        (min, max)
    }
}

impl Chart for LineChart {
    fn options(&self) -> &ChartOptions {
        &self.options
    }

    fn layout(&self, dims: &ChartDimensions) -> ChartView {
        let opts = &self.options;
        let offset = dims.offset;
        let accessors: Vec<&str> = self.lines.iter().map(|l| l.accessor.as_str()).collect();
        let padded = min_max_with_padding(&self.data, &accessors);

        let y = LinearScale::new(opts.y_scale_domain.unwrap_or((padded.min, padded.max)), (dims.inner_height, 0.0));
        let x = TimeScale::new(self.time_domain(), (0.0, dims.inner_width));
        tracing::trace!(min = padded.min, max = padded.max, points = self.data.len(), "line chart layout");

        let mut scene = Scene::new(dims.outer_width, dims.outer_height);
        for line in &self.lines {
            scene.defs.push(Def::LinearGradient {
                id: self.gradient_id(&line.accessor),
                from: (0.0, 0.0),
                to: (0.0, 1.0),
                user_space: false,
                stops: vec![
                    GradientStop { offset: 0.0, color: line.color.clone(), opacity: 1.0 },
                    GradientStop { offset: 100.0, color: line.color.clone(), opacity: 0.0 },
                ],
            });
        }

        let mut plot = Vec::new();
        for line in &self.lines {
            let (min_x, max_x) = self.defined_span(&x, &line.accessor);
            let clip_id = format!("clippath-{}-{}", self.id, line.accessor);
            scene.defs.push(Def::ClipRect {
                id: clip_id.clone(),
                x: if min_x > 0.0 { min_x + 2.0 } else { 0.0 },
                y: 0.0,
                width: max_x - min_x - 2.0,
                height: dims.inner_height,
            });

            let points: Vec<(f64, f64)> = self
                .data
                .iter()
                .map(|d| {
                    let px = Self::date_of(d).map(|t| x.map(&t)).unwrap_or(0.0);
                    (px, y.map(d.number(&line.accessor).unwrap_or(0.0)))
                })
                .collect();
            let mut stroke = Mark::path(polyline(&points))
                .with_stroke(&line.color, if line.area.is_some() { 3.0 } else { 2.0 })
                .with_clip(&clip_id);
            if line.dotted {
                stroke = stroke.with_dash(5.0);
            }
            plot.push(stroke);

            if let (Some(fill), Some(first), Some(last)) = (&line.area, points.first(), points.last()) {
                let mut d = polyline(&points);
                let floor = num(dims.inner_height);
                d.push_str(&format!("L{},{floor}L{},{floor}Z", num(last.0), num(first.0)));
                plot.push(Mark::path(d).with_fill(fill).with_opacity(1.0).with_clip(&clip_id));
            }
        }

        let interaction = (!opts.hide_tooltip).then(|| Interaction {
            scale: HorizontalScale::Time(x),
            tracks: self.tracks(&x, y),
            translate: (0.0, 0.0),
            style: CursorStyle {
                line_color: opts.theme.cursor_line.to_string(),
                dot_stroke: opts.theme.cursor_dot_stroke.to_string(),
                ..CursorStyle::default()
            },
        });
        let cursor_at = plot.len();
        scene.push(Mark::group((offset.left, offset.top), plot));

        let edge_dates = match (
            self.data.first().and_then(|r| r.get(DATE_ACCESSOR)),
            self.data.last().and_then(|r| r.get(DATE_ACCESSOR)),
        ) {
            (Some(a), Some(b)) => vec![a.clone(), b.clone()],
            _ => Vec::new(),
        };
        let h_scale = HorizontalScale::Time(x);
        scene.extend(axes_marks(
            Axis::left(&y, offset.left, opts, Some(vec![0.0, padded.max.floor()])),
            Axis::bottom(&h_scale, offset.left, dims.inner_height, opts, Some(edge_dates)),
        ));

        ChartView {
            scene,
            cursor_slot: interaction.as_ref().map(|_| CursorSlot { group: 0, at: cursor_at }),
            interaction,
            hover_targets: Vec::new(),
            legend: series_legend(&self.lines, opts, offset.left),
        }
    }
}
