// File: crates/chart-core/src/wrapper.rs
// Summary: Chart wrapper: measured size, margins, tooltip state and pointer routing.

use std::time::Instant;

use crate::charts::{Chart, ChartView};
use crate::cursor::TooltipCursor;
use crate::legend::Legend;
use crate::tooltip::{anchor, TooltipAnchor, TooltipBody, TooltipState};
use crate::types::{ChartDimensions, Offset, OffsetPatch};

/// Tooltip overlay for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipPanel {
    pub anchor: TooltipAnchor,
    pub body: TooltipBody,
}

/// Everything needed to paint the chart once.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub dimensions: ChartDimensions,
    pub svg: String,
    pub tooltip: Option<TooltipPanel>,
    pub legend: Option<Legend>,
    pub class_name: Option<String>,
}

/// Owns a chart plus the state the chart needs to be drawn and hovered.
///
/// Nothing is laid out until both outer dimensions are known and positive.
pub struct ChartWrapper<C: Chart> {
    chart: C,
    offset: Offset,
    measured: (f64, f64),
    fixed_width: Option<f64>,
    fixed_height: Option<f64>,
    tooltip: TooltipState,
    cursor: TooltipCursor,
    view: Option<ChartView>,
}

impl<C: Chart> ChartWrapper<C> {
    pub fn new(chart: C) -> Self {
        let offset = chart.default_offset();
        Self {
            chart,
            offset,
            measured: (0.0, 0.0),
            fixed_width: None,
            fixed_height: None,
            tooltip: TooltipState::default(),
            cursor: TooltipCursor::new(),
            view: None,
        }
    }

    /// Initial margin override, merged over the chart's defaults.
    pub fn with_offset(mut self, patch: OffsetPatch) -> Self {
        self.offset = self.offset.merge(patch);
        self
    }

    /// Explicit pixel size; a `None` side follows the measured box.
    pub fn with_size(mut self, width: Option<f64>, height: Option<f64>) -> Self {
        self.set_size(width, height);
        self
    }

    pub fn chart(&self) -> &C { &self.chart }

    pub fn offset(&self) -> Offset { self.offset }

    pub fn tooltip(&self) -> &TooltipState { &self.tooltip }

    pub fn set_offset(&mut self, patch: OffsetPatch) {
        let next = self.offset.merge(patch);
        if next != self.offset {
            self.offset = next;
            self.view = None;
        }
    }

    /// Replace the explicit size; relayouts only when it changed.
    pub fn set_size(&mut self, width: Option<f64>, height: Option<f64>) {
        if (self.fixed_width, self.fixed_height) != (width, height) {
            self.fixed_width = width;
            self.fixed_height = height;
            self.view = None;
        }
    }

    /// New measured container box.
    pub fn resize(&mut self, width: f64, height: f64) {
        if self.measured != (width, height) {
            tracing::debug!(width, height, "chart container resized");
            self.measured = (width, height);
            self.view = None;
        }
    }

    pub fn dimensions(&self) -> Option<ChartDimensions> {
        ChartDimensions::measure(
            self.fixed_width.unwrap_or(self.measured.0),
            self.fixed_height.unwrap_or(self.measured.1),
            self.offset,
        )
    }

    /// Lay the chart out if needed; `None` while unmeasured.
    fn ensure_view(&mut self) -> Option<ChartDimensions> {
        let dims = self.dimensions()?;
        if self.view.is_none() {
            self.view = Some(self.chart.layout(&dims));
        }
        Some(dims)
    }

    fn inside_plot(dims: &ChartDimensions, x: f64, y: f64) -> bool {
        let o = dims.offset;
        x >= o.left && x <= o.left + dims.inner_width && y >= o.top && y <= o.top + dims.inner_height
    }

    /// Pointer at container-relative (`x`, `y`); returns whether the tooltip changed.
    pub fn pointer_move(&mut self, x: f64, y: f64, now: Instant) -> bool {
        let Some(dims) = self.ensure_view() else { return false };
        let Some(view) = self.view.as_ref() else { return false };

        if !view.hover_targets.is_empty() {
            let (px, py) = (x - dims.offset.left, y - dims.offset.top);
            let hit = view.hover_targets.iter().find(|t| t.contains(px, py)).map(|t| t.update.clone());
            return match hit {
                Some(update) => {
                    let changed = !self.tooltip.open || self.tooltip.entries != update.entries || self.tooltip.left != update.left;
                    self.tooltip.show(update);
                    changed
                }
                None if self.tooltip.open => {
                    self.tooltip.hide();
                    true
                }
                None => false,
            };
        }

        let Some(interaction) = &view.interaction else { return false };
        let resolver = interaction.resolver(dims.offset.left, dims.inner_width);
        match (Self::inside_plot(&dims, x, y), self.cursor.is_over_chart()) {
            (true, false) => self.cursor.pointer_enter(&mut self.tooltip, &resolver, x, now),
            (true, true) => self.cursor.pointer_move(&mut self.tooltip, &resolver, x, now),
            (false, true) => {
                self.cursor.pointer_leave(&mut self.tooltip);
                true
            }
            (false, false) => false,
        }
    }

    /// Pointer left the chart container.
    pub fn pointer_leave(&mut self) -> bool {
        let was_open = self.tooltip.open;
        self.cursor.pointer_leave(&mut self.tooltip);
        was_open
    }

    pub fn render(&mut self) -> Option<Frame> {
        let dims = self.ensure_view()?;
        let view = self.view.as_ref()?;
        let tooltip = &self.tooltip;
        let svg = view.scene_with_cursor(tooltip, dims.inner_height).to_svg();
        let legend = view.legend.clone();
        let opts = self.chart.options();
        let panel = anchor(tooltip, &dims.offset, opts.tooltip_x_offset).map(|anchor| TooltipPanel {
            anchor,
            body: opts.tooltip.body(&tooltip.entries),
        });
        Some(Frame { dimensions: dims, svg, tooltip: panel, legend, class_name: opts.class_name.clone() })
    }
}
