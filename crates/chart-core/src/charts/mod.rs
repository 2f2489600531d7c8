// File: crates/chart-core/src/charts/mod.rs
// Summary: Chart trait, laid-out chart view and helpers shared by the chart kinds.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::cursor::{cursor_marks, CursorResolver, CursorStyle, SeriesTrack};
use crate::format::estimate_text_width;
use crate::legend::Legend;
use crate::options::ChartOptions;
use crate::scale::HorizontalScale;
use crate::scene::{Mark, Scene, Shape, TextAnchor};
use crate::tooltip::{TooltipState, TooltipUpdate};
use crate::types::{ChartDimensions, Offset};

pub mod bar;
pub mod line;
pub mod scatter;
pub mod stacked_bar;

pub use bar::BarChart;
pub use line::LineChart;
pub use scatter::{ScatterChart, ScatterPoint};
pub use stacked_bar::StackedBarChart;

const TEXT_BG_HEIGHT: f64 = 20.0;
const BAR_TEXT_FONT_SIZE: f64 = 12.0;

/// One drawn series: which field it reads and how it is painted.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesMeta {
    pub accessor: String,
    pub label: String,
    pub color: String,
    /// Fill under a line (a color or `url(#…)` paint).
    pub area: Option<String>,
    pub dotted: bool,
}

impl SeriesMeta {
    pub fn new(accessor: impl Into<String>, label: impl Into<String>, color: impl Into<String>) -> Self {
        Self { accessor: accessor.into(), label: label.into(), color: color.into(), area: None, dotted: false }
    }

    pub fn with_area(mut self, fill: impl Into<String>) -> Self {
        self.area = Some(fill.into());
        self
    }

    pub fn dotted(mut self) -> Self {
        self.dotted = true;
        self
    }
}

/// Cursor wiring of a chart: the x scale, series tracks and cursor look.
#[derive(Clone, Debug)]
pub struct Interaction {
    pub scale: HorizontalScale,
    pub tracks: Vec<SeriesTrack>,
    pub translate: (f64, f64),
    pub style: CursorStyle,
}

impl Interaction {
    pub fn resolver(&self, offset_left: f64, inner_width: f64) -> CursorResolver<'_> {
        CursorResolver {
            scale: &self.scale,
            tracks: &self.tracks,
            offset_left,
            inner_width,
            translate: self.translate,
        }
    }
}

/// Circular hover area (plot coordinates) that opens a fixed tooltip.
#[derive(Clone, Debug, PartialEq)]
pub struct HoverTarget {
    pub center: (f64, f64),
    pub radius: f64,
    pub update: TooltipUpdate,
}

impl HoverTarget {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let (dx, dy) = (x - self.center.0, y - self.center.1);
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

/// Where cursor marks are spliced in: child `at` of top-level group `group`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CursorSlot {
    pub group: usize,
    pub at: usize,
}

/// A chart laid out for one set of dimensions.
#[derive(Clone, Debug)]
pub struct ChartView {
    pub scene: Scene,
    pub interaction: Option<Interaction>,
    pub cursor_slot: Option<CursorSlot>,
    pub hover_targets: Vec<HoverTarget>,
    pub legend: Option<Legend>,
}

impl ChartView {
    pub fn new(scene: Scene) -> Self {
        Self { scene, interaction: None, cursor_slot: None, hover_targets: Vec::new(), legend: None }
    }

    /// The scene with the cursor for `state` drawn into the plot group.
    pub fn scene_with_cursor(&self, state: &TooltipState, inner_height: f64) -> Scene {
        let mut scene = self.scene.clone();
        let (Some(interaction), Some(slot)) = (&self.interaction, self.cursor_slot) else {
            return scene;
        };
        let marks = cursor_marks(state, inner_height, &interaction.style);
        if marks.is_empty() {
            return scene;
        }
        if let Some(Shape::Group { children, .. }) = scene.marks.get_mut(slot.group).map(|m| &mut m.shape) {
            let at = slot.at.min(children.len());
            children.splice(at..at, marks);
        }
        scene
    }
}

/// A chart kind that can be laid out inside a [`crate::ChartWrapper`].
pub trait Chart {
    fn options(&self) -> &ChartOptions;

    /// Margins the wrapper starts with.
    fn default_offset(&self) -> Offset {
        Offset::default()
    }

    fn layout(&self, dims: &ChartDimensions) -> ChartView;
}

impl<C: Chart + ?Sized> Chart for Box<C> {
    fn options(&self) -> &ChartOptions { (**self).options() }
    fn default_offset(&self) -> Offset { (**self).default_offset() }
    fn layout(&self, dims: &ChartDimensions) -> ChartView { (**self).layout(dims) }
}

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

/// Document-unique id prefix for clip paths and gradients.
pub(crate) fn next_id() -> String {
    format!("m{}", NEXT_ID.fetch_add(1, Ordering::Relaxed))
}

/// Centred label over a translucent rectangle of the bar color, shifted down by `shift`.
pub(crate) fn text_with_background(x: f64, y: f64, label: String, background: &str, fill: &str, shift: f64) -> Mark {
    let width = estimate_text_width(&label, BAR_TEXT_FONT_SIZE);
    Mark::group(
        (0.0, shift),
        vec![
            Mark::rect(x - width / 2.0, y - TEXT_BG_HEIGHT + 5.0, width, TEXT_BG_HEIGHT, background).with_opacity(0.8),
            Mark::text((x, y), label, BAR_TEXT_FONT_SIZE).aligned(TextAnchor::Middle, 0.0, 0.0).with_fill(fill),
        ],
    )
}

/// Horizontal grid lines across the plot, from the left margin to the outer edge.
pub(crate) fn y_grid_marks(rows: Option<Vec<f64>>, offset_left: f64, outer_width: f64, color: &str) -> Vec<Mark> {
    rows.unwrap_or_default()
        .into_iter()
        .map(|y| Mark::line((offset_left, y), (outer_width, y), color, 1.0))
        .collect()
}

/// Legend for the series unless hidden.
pub(crate) fn series_legend(series: &[SeriesMeta], options: &ChartOptions, offset_left: f64) -> Option<Legend> {
    (!options.hide_legend).then(|| Legend::new(series.iter().map(|s| (s.color.as_str(), s.label.as_str())), offset_left))
}

/// `M x,y L x,y …` through the points.
pub(crate) fn polyline(points: &[(f64, f64)]) -> String {
    use crate::svg::num;
    let mut d = String::new();
    for (i, (x, y)) in points.iter().enumerate() {
        d.push(if i == 0 { 'M' } else { 'L' });
        d.push_str(&num(*x));
        d.push(',');
        d.push_str(&num(*y));
    }
    d
}
