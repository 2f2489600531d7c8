// File: crates/chart-core/src/charts/scatter.rs
// Summary: Scatter chart of labelled circles with hover tooltips and optional centre lines.

use crate::axis::{axes_marks, Axis};
use crate::charts::{next_id, y_grid_marks, Chart, ChartView, HoverTarget};
use crate::grid::{x_grid_values, y_grid_values};
use crate::options::ChartOptions;
use crate::record::Value;
use crate::scale::{HorizontalScale, LinearScale};
use crate::scene::{Def, GradientStop, Mark, Scene, TextAnchor};
use crate::tooltip::{TooltipEntry, TooltipUpdate};
use crate::types::ChartDimensions;

pub const POINT_RADIUS: f64 = 20.0;
/// Horizontal shift between points sharing the same coordinates.
pub const STACK_OFFSET: f64 = 5.0;
/// Hover tooltips open this far above the point centre.
pub const HOVER_LIFT: f64 = 24.0;
const GRID_TICKS: usize = 10;
const POINT_FONT_SIZE: f64 = 12.0;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub content: Option<String>,
    /// Tooltip payload; points without one have no hover tooltip.
    pub tooltip: Option<String>,
}

impl ScatterPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, ..Self::default() }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }
}

/// Points sharing one coordinate, in input order.
#[derive(Clone, Debug, PartialEq)]
pub struct PointGroup {
    pub x: f64,
    pub y: f64,
    pub contents: Vec<String>,
    pub tooltips: Vec<Option<String>>,
}

/// Collapse points with identical coordinates, keeping first-seen group order.
pub fn group_points(points: &[ScatterPoint]) -> Vec<PointGroup> {
    let mut groups: Vec<PointGroup> = Vec::new();
    for p in points {
        let content = p.content.clone().unwrap_or_default();
        match groups.iter_mut().find(|g| g.x == p.x && g.y == p.y) {
            Some(g) => {
                g.contents.push(content);
                g.tooltips.push(p.tooltip.clone());
            }
            None => groups.push(PointGroup {
                x: p.x,
                y: p.y,
                contents: vec![content],
                tooltips: vec![p.tooltip.clone()],
            }),
        }
    }
    groups
}

#[derive(Clone, Debug)]
pub struct ScatterChart {
    pub points: Vec<ScatterPoint>,
    pub x_domain: (f64, f64),
    pub y_domain: (f64, f64),
    pub show_x_center_grid_line: bool,
    pub show_y_center_grid_line: bool,
    pub options: ChartOptions,
    id: String,
}

impl ScatterChart {
    pub fn new(points: Vec<ScatterPoint>, x_domain: (f64, f64), y_domain: (f64, f64)) -> Self {
        Self {
            points,
            x_domain,
            y_domain,
            show_x_center_grid_line: false,
            show_y_center_grid_line: false,
            options: ChartOptions::default(),
            id: next_id(),
        }
    }

    pub fn with_options(mut self, options: ChartOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_center_lines(mut self, x: bool, y: bool) -> Self {
        self.show_x_center_grid_line = x;
        self.show_y_center_grid_line = y;
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    fn hover_update(cx: f64, cy: f64, detail: String) -> TooltipUpdate {
        TooltipUpdate {
            entries: vec![TooltipEntry {
                x: 0.0,
                y: 0.0,
                value_x: Some(Value::Number(0.0)),
                value_y: Some(Value::Number(0.0)),
                color: "yellow".into(),
                label: "label".into(),
                index: 0,
                inactive: false,
                detail: Some(detail),
            }],
            left: cx,
            top: cy - HOVER_LIFT,
        }
    }
}

fn tick_numbers(values: &Option<Vec<Value>>, fallback: impl FnOnce() -> Vec<f64>) -> Vec<f64> {
    match values {
        Some(v) => v.iter().filter_map(Value::to_number).collect(),
        None => fallback(),
    }
}

impl Chart for ScatterChart {
    fn options(&self) -> &ChartOptions {
        &self.options
    }

    fn layout(&self, dims: &ChartDimensions) -> ChartView {
        let opts = &self.options;
        let offset = dims.offset;
        let (w, h) = (dims.inner_width, dims.inner_height);
        let y = LinearScale::new(self.y_domain, (h, 0.0));
        let x = LinearScale::new(self.x_domain, (0.0, w));
        let grid = opts.grid_color();

        let mut scene = Scene::new(dims.outer_width, dims.outer_height);
        let gradient = format!("grad-{}", self.id);
        scene.defs.push(Def::LinearGradient {
            id: gradient.clone(),
            from: (0.0, h),
            to: (w, 0.0),
            user_space: true,
            stops: [(0.0, "#0BCB74"), (20.0, "#0BCB74"), (40.0, "#F8B633"), (60.0, "#F8B633"), (80.0, "#FF5556"), (100.0, "#FF5556")]
                .into_iter()
                .map(|(offset, color)| GradientStop { offset, color: color.into(), opacity: 1.0 })
                .collect(),
        });

        let x_ticks = tick_numbers(&opts.x_axis.tick_values, || x.ticks(GRID_TICKS));
        let columns = x_grid_values(opts.show_x_grid_lines, &x_ticks, |t| x.map(*t), offset.left, dims.outer_width);
        scene.extend(columns.unwrap_or_default().into_iter().map(|cx| Mark::line((cx, 0.0), (cx, h), &grid, 1.0)));
        if self.show_x_center_grid_line {
            let cx = w / 2.0 + offset.left;
            scene.push(Mark::line((cx, 0.0), (cx, h), &grid, 1.0));
        }
        if self.show_y_center_grid_line {
            scene.push(Mark::line((offset.left, h / 2.0), (w + offset.left, h / 2.0), &grid, 1.0));
        }
        let y_ticks = tick_numbers(&opts.y_axis.tick_values, || y.ticks(GRID_TICKS));
        let rows = y_grid_values(opts.show_y_grid_lines, &y_ticks, |t| y.map(*t), h);
        scene.extend(y_grid_marks(rows, offset.left, dims.outer_width, &grid));

        let fill = format!("url(#{gradient})");
        let mut plot = Vec::new();
        let mut hover_targets = Vec::new();
        for group in group_points(&self.points) {
            for (i, (content, tooltip)) in group.contents.iter().zip(&group.tooltips).enumerate() {
                let center = (x.map(group.x) + i as f64 * STACK_OFFSET, y.map(group.y));
                plot.push(
                    Mark::circle(center, POINT_RADIUS, &fill)
                        .with_stroke("white", 1.0)
                        .with_class("meridian__scatter-circle"),
                );
                plot.push(
                    Mark::text(center, content.as_str(), POINT_FONT_SIZE)
                        .aligned(TextAnchor::Middle, 1.0, -1.0)
                        .centered_baseline()
                        .without_pointer_events(),
                );
                if let (false, Some(detail)) = (opts.hide_tooltip, tooltip) {
                    hover_targets.push(HoverTarget {
                        center,
                        radius: POINT_RADIUS,
                        update: Self::hover_update(center.0, center.1, detail.clone()),
                    });
                }
            }
        }
        scene.push(Mark::group((offset.left, offset.top), plot));

        let h_scale = HorizontalScale::Linear(x);
        scene.extend(axes_marks(
            Axis::left(&y, offset.left, opts, None),
            Axis::bottom(&h_scale, offset.left, h, opts, None),
        ));

        // later targets are drawn on top, so they win the hit test
        hover_targets.reverse();
        ChartView { hover_targets, ..ChartView::new(scene) }
    }
}
