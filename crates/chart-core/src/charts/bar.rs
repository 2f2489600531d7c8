// File: crates/chart-core/src/charts/bar.rs
// Summary: Grouped bar chart over a `valueX` band axis.

use crate::axis::{axes_marks, Axis};
use crate::charts::{series_legend, text_with_background, Chart, ChartView, CursorSlot, Interaction, SeriesMeta};
use crate::cursor::{CursorStyle, Position, SeriesTrack};
use crate::domain::highest_value;
use crate::options::ChartOptions;
use crate::record::{Record, Value};
use crate::scale::{BandScale, HorizontalScale, LinearScale, OrdinalScale};
use crate::scene::{Mark, Scene};
use crate::types::ChartDimensions;

pub const BAR_PADDING: f64 = 0.4;
pub const X_ACCESSOR: &str = "valueX";
/// Bar labels sit half a rem below the bar centre.
const LABEL_SHIFT: f64 = 8.0;

#[derive(Clone, Debug)]
pub struct BarChart {
    pub data: Vec<Record>,
    pub bars: Vec<SeriesMeta>,
    pub options: ChartOptions,
}

impl BarChart {
    pub fn new(data: Vec<Record>, bars: Vec<SeriesMeta>) -> Self {
        Self { data, bars, options: ChartOptions::default() }
    }

    pub fn with_options(mut self, options: ChartOptions) -> Self {
        self.options = options;
        self
    }

    fn accessors(&self) -> Vec<&str> {
        self.bars.iter().map(|b| b.accessor.as_str()).collect()
    }

    fn tracks(&self, x: &BandScale, y: LinearScale) -> Vec<SeriesTrack> {
        self.bars
            .iter()
            .map(|bar| {
                let records = self
                    .data
                    .iter()
                    .map(|d| {
                        let mut r = Record::new();
                        if let Some(v) = d.get(&bar.accessor) {
                            r.insert("value", v.clone());
                        }
                        if let Some(t) = d.get(X_ACCESSOR) {
                            r.insert("time", t.clone());
                        }
                        r
                    })
                    .collect();
                let band = x.clone();
                SeriesTrack {
                    key: bar.accessor.clone(),
                    records,
                    x_accessor: "time".into(),
                    y_accessor: "value".into(),
                    x: Position::mapped(move |r, _, _| r.get("time").and_then(|t| band.map(t))),
                    y: Position::mapped(move |r, _, _| Some(y.map(r.number("value").unwrap_or(0.0)))),
                    color: bar.color.clone(),
                    label: bar.label.clone(),
                    inactive: false,
                }
            })
            .collect()
    }
}

impl Chart for BarChart {
    fn options(&self) -> &ChartOptions {
        &self.options
    }

    fn layout(&self, dims: &ChartDimensions) -> ChartView {
        let opts = &self.options;
        let offset = dims.offset;
        let y_max = highest_value(&self.data, &self.accessors());

        let x = BandScale::new(
            self.data.iter().map(|d| d.get(X_ACCESSOR).cloned().unwrap_or(Value::Null)).collect(),
            (0.0, dims.inner_width),
            BAR_PADDING,
        );
        let keys: Vec<Value> = self.bars.iter().map(|b| Value::from(b.accessor.as_str())).collect();
        let sub = BandScale::new(keys, (0.0, x.bandwidth()), 0.0);
        let colors = OrdinalScale::new(
            self.bars.iter().map(|b| b.accessor.clone()).collect(),
            self.bars.iter().map(|b| b.color.clone()).collect(),
        );
        let y = LinearScale::new((0.0, y_max), (dims.inner_height, 0.0));
        tracing::trace!(y_max, groups = self.data.len(), series = self.bars.len(), "bar chart layout");

        let mut plot = Vec::with_capacity(self.data.len() + 1);
        for record in &self.data {
            let Some(x0) = record.get(X_ACCESSOR).and_then(|v| x.map(v)) else { continue };
            let mut group = Vec::with_capacity(self.bars.len() * 2);
            for bar in &self.bars {
                let raw = record.get(&bar.accessor).cloned().unwrap_or(Value::Null);
                let top = y.map(raw.to_number().unwrap_or(0.0));
                let bx = sub.map(&Value::from(bar.accessor.as_str())).unwrap_or(0.0);
                let width = sub.bandwidth();
                let height = dims.inner_height - top;
                let color = colors.map(&bar.accessor).unwrap_or(&bar.color);
                group.push(Mark::rect(bx, top, width, height, color).with_class("meridian__bar"));
                if !opts.hide_bar_text {
                    group.push(text_with_background(
                        bx + width / 2.0,
                        top + height / 2.0,
                        opts.format_value(&raw),
                        color,
                        &opts.bar_text_color(),
                        LABEL_SHIFT,
                    ));
                }
            }
            plot.push(Mark::group((x0, 0.0), group));
        }

        let interaction = (!opts.hide_tooltip).then(|| Interaction {
            scale: HorizontalScale::Band(x.clone()),
            tracks: self.tracks(&x, y),
            translate: (sub.bandwidth() * self.bars.len() as f64 / 2.0, 0.0),
            style: CursorStyle {
                line_color: opts.theme.cursor_line.to_string(),
                dot_stroke: opts.theme.cursor_dot_stroke.to_string(),
                invisible: true,
                ..CursorStyle::default()
            },
        });
        let cursor_at = plot.len();

        let mut scene = Scene::new(dims.outer_width, dims.outer_height);
        scene.push(Mark::group((offset.left, offset.top), plot));
        let h_scale = HorizontalScale::Band(x);
        scene.extend(axes_marks(
            Axis::left(&y, offset.left, opts, None),
            Axis::bottom(&h_scale, offset.left, dims.inner_height, opts, None),
        ));

        ChartView {
            scene,
            cursor_slot: interaction.as_ref().map(|_| CursorSlot { group: 0, at: cursor_at }),
            interaction,
            hover_targets: Vec::new(),
            legend: series_legend(&self.bars, opts, offset.left),
        }
    }
}
