// File: crates/chart-core/src/charts/stacked_bar.rs
// Summary: Stacked bar chart: one bar per category, series stacked bottom-up.

use crate::axis::{axes_marks, Axis};
use crate::charts::{
    series_legend, text_with_background, y_grid_marks, Chart, ChartView, CursorSlot, Interaction, SeriesMeta,
};
use crate::cursor::{CursorStyle, Position, SeriesTrack};
use crate::domain::min_max;
use crate::grid::y_grid_values;
use crate::options::{ChartOptions, XDomain};
use crate::record::{Record, Value};
use crate::scale::{BandScale, HorizontalScale, LinearScale, OrdinalScale};
use crate::scene::{Mark, Scene};
use crate::types::ChartDimensions;

const LABEL_SHIFT: f64 = 5.0;
/// The cursor rides above the stacks.
const CURSOR_LIFT: f64 = -100.0;
/// `LinearScale::ticks` count used for grid rows when no tick values are given.
const GRID_TICKS: usize = 10;

#[derive(Clone, Debug)]
pub struct StackedBarChart {
    pub data: Vec<Record>,
    pub bars: Vec<SeriesMeta>,
    pub x_accessor: String,
    pub bar_padding: f64,
    pub options: ChartOptions,
}

impl StackedBarChart {
    pub fn new(data: Vec<Record>, bars: Vec<SeriesMeta>) -> Self {
        Self {
            data,
            bars,
            x_accessor: super::bar::X_ACCESSOR.to_string(),
            bar_padding: super::bar::BAR_PADDING,
            options: ChartOptions::default(),
        }
    }

    pub fn with_x_accessor(mut self, accessor: impl Into<String>) -> Self {
        self.x_accessor = accessor.into();
        self
    }

    pub fn with_bar_padding(mut self, padding: f64) -> Self {
        self.bar_padding = padding;
        self
    }

    pub fn with_options(mut self, options: ChartOptions) -> Self {
        self.options = options;
        self
    }

    /// Per-category sum over every series; a category missing any value gets no total.
    fn totals(&self) -> Vec<Record> {
        self.data
            .iter()
            .map(|entry| {
                let total: Option<f64> = self.bars.iter().map(|b| entry.number(&b.accessor)).sum();
                let mut r = Record::new();
                if let Some(t) = total {
                    r.insert("total", t);
                }
                r
            })
            .collect()
    }

    fn x_domain(&self) -> Vec<Value> {
        match &self.options.x_scale_domain {
            Some(XDomain::Categories(c)) => c.clone(),
            Some(XDomain::Numbers(a, b)) => vec![Value::Number(*a), Value::Number(*b)],
            Some(XDomain::Dates(a, b)) => vec![Value::Date(*a), Value::Date(*b)],
            None => self
                .data
                .iter()
                .map(|d| d.get(&self.x_accessor).cloned().unwrap_or(Value::Null))
                .collect(),
        }
    }

    fn tracks(&self, x: &BandScale, y: LinearScale) -> Vec<SeriesTrack> {
        self.bars
            .iter()
            .map(|bar| {
                let records = self
                    .data
                    .iter()
                    .map(|d| {
                        let mut r = Record::new().with("value", d.get(&bar.accessor).cloned().unwrap_or(Value::Number(0.0)));
                        if let Some(t) = d.get(&self.x_accessor) {
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

impl Chart for StackedBarChart {
    fn options(&self) -> &ChartOptions {
        &self.options
    }

    fn layout(&self, dims: &ChartDimensions) -> ChartView {
        let opts = &self.options;
        let offset = dims.offset;
        let padding = opts.chart_y_domain_padding.unwrap_or(0.0);
        let y_max = min_max(&self.totals(), padding, &["total"]).max;

        let x = BandScale::new(self.x_domain(), (0.0, dims.inner_width), self.bar_padding);
        let y = LinearScale::new(opts.y_scale_domain.unwrap_or((0.0, y_max)), (dims.inner_height, 0.0));
        let colors = OrdinalScale::new(
            self.bars.iter().map(|b| b.accessor.clone()).collect(),
            self.bars.iter().map(|b| b.color.clone()).collect(),
        );
        let bar_width = x.bandwidth();
        tracing::trace!(y_max, padding, categories = x.domain().len(), "stacked bar layout");

        let grid_ticks: Vec<f64> = match &opts.y_axis.tick_values {
            Some(v) => v.iter().filter_map(Value::to_number).collect(),
            None => y.ticks(GRID_TICKS),
        };
        let rows = y_grid_values(opts.show_y_grid_lines, &grid_ticks, |t| y.map(*t), dims.inner_height);

        let interaction = (!opts.hide_tooltip).then(|| Interaction {
            scale: HorizontalScale::Band(x.clone()),
            tracks: self.tracks(&x, y),
            translate: (bar_width / 2.0, CURSOR_LIFT),
            style: CursorStyle {
                line_color: opts.theme.cursor_line.to_string(),
                dot_stroke: opts.theme.cursor_dot_stroke.to_string(),
                invisible: true,
                ..CursorStyle::default()
            },
        });

        let mut plot = Vec::new();
        for record in &self.data {
            let Some(bx) = record.get(&self.x_accessor).and_then(|v| x.map(v)) else { continue };
            let mut base = 0.0;
            for bar in &self.bars {
                let raw = record.get(&bar.accessor).cloned().unwrap_or(Value::Null);
                let value = raw.to_number().unwrap_or(0.0);
                let (y0, y1) = (y.map(base), y.map(base + value));
                base += value;
                let top = y0.min(y1);
                let height = (y0 - y1).abs();
                let color = colors.map(&bar.accessor).unwrap_or(&bar.color);
                plot.push(Mark::rect(bx, top, bar_width, height, color).without_pointer_events());
                if !opts.hide_bar_text {
                    plot.push(text_with_background(
                        bx + bar_width / 2.0,
                        top + height / 2.0,
                        opts.format_value(&raw),
                        color,
                        &opts.bar_text_color(),
                        LABEL_SHIFT,
                    ));
                }
            }
        }

        let mut scene = Scene::new(dims.outer_width, dims.outer_height);
        let grid = y_grid_marks(rows, offset.left, dims.outer_width, &opts.grid_color());
        let plot_group = grid.len();
        scene.extend(grid);
        scene.push(Mark::group((offset.left, offset.top), plot));
        let h_scale = HorizontalScale::Band(x);
        scene.extend(axes_marks(
            Axis::left(&y, offset.left, opts, None),
            Axis::bottom(&h_scale, offset.left, dims.inner_height, opts, None),
        ));

        ChartView {
            scene,
            // under the bars
            cursor_slot: interaction.as_ref().map(|_| CursorSlot { group: plot_group, at: 0 }),
            interaction,
            hover_targets: Vec::new(),
            legend: series_legend(&self.bars, opts, offset.left),
        }
    }
}
