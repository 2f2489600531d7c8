// File: crates/chart-core/src/tooltip.rs
// Summary: Shared tooltip state plus the floating panel's placement, overflow and content.

use std::rc::Rc;

use crate::format::{format_day_month_year, NumberFormatter};
use crate::record::Value;
use crate::svg::escape;
use crate::types::Offset;

/// Vertical lift applied to the panel above its anchor.
pub const TOOLTIP_LIFT: f64 = 10.0;

/// One resolved series point shown by the tooltip.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipEntry {
    /// Pixel x inside the plot area.
    pub x: f64,
    /// Pixel y inside the plot area.
    pub y: f64,
    pub value_x: Option<Value>,
    pub value_y: Option<Value>,
    pub color: String,
    pub label: String,
    /// Index into the series' records.
    pub index: usize,
    pub inactive: bool,
    /// Free-form payload (scatter points carry their own tooltip text).
    pub detail: Option<String>,
}

impl TooltipEntry {
    /// Whether a cursor dot / table row should be drawn for this entry.
    pub fn has_visible_value(&self) -> bool {
        !self.inactive && self.value_y.as_ref().is_some_and(Value::is_truthy)
    }
}

/// A replacement for the tooltip contents, produced by a resolution or a hover.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipUpdate {
    pub entries: Vec<TooltipEntry>,
    pub left: f64,
    pub top: f64,
}

/// Tooltip context shared by the cursor (writer) and the panel (reader).
///
/// Every change replaces the whole state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TooltipState {
    pub open: bool,
    pub entries: Vec<TooltipEntry>,
    pub left: f64,
    pub top: f64,
}

impl TooltipState {
    pub fn show(&mut self, update: TooltipUpdate) {
        *self = Self { open: true, entries: update.entries, left: update.left, top: update.top };
    }

    pub fn hide(&mut self) {
        *self = Self::default();
    }
}

/// Panel position relative to the chart container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TooltipAnchor {
    pub left: f64,
    pub top: f64,
}

/// Where the panel goes for the current state; `None` while the tooltip is closed.
pub fn anchor(state: &TooltipState, offset: &Offset, x_offset: f64) -> Option<TooltipAnchor> {
    state.open.then(|| TooltipAnchor {
        left: state.left + offset.left + x_offset,
        top: state.top - TOOLTIP_LIFT,
    })
}

/// Rendered panel box, as reported by the layout engine after a paint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelRect {
    pub left: f64,
    pub right: f64,
    pub width: f64,
}

/// Horizontal viewport overflow of the (centred) panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Overflow {
    pub left: bool,
    pub right: bool,
}

impl Overflow {
    /// Re-evaluated on every paint; the result depends on the panel's actual size.
    pub fn detect(rect: Option<PanelRect>, viewport_width: f64) -> Self {
        match rect {
            Some(r) => Self { right: r.right >= viewport_width, left: r.left - r.width / 2.0 < 0.0 },
            None => Self::default(),
        }
    }

    pub fn class_names(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.right { out.push("out-of-bounds--right"); }
        if self.left { out.push("out-of-bounds--left"); }
        out
    }

    /// Horizontal CSS transform keeping the anchor meaningful in each state.
    pub fn transform(&self) -> &'static str {
        match (self.left, self.right) {
            (true, false) => "translateX(0)",
            (false, true) => "translateX(calc(-100% - 1px))",
            _ => "translateX(calc(-50% - 1px))",
        }
    }
}

pub type ContentRenderer = Rc<dyn Fn(&[TooltipEntry]) -> String>;
pub type TitleRenderer = Rc<dyn Fn(&[TooltipEntry]) -> String>;

/// One row of the default tooltip table.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipRow {
    pub color: String,
    pub label: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TooltipBody {
    /// Output of a caller-supplied renderer, inserted verbatim.
    Custom(String),
    /// `details` are the free-form payloads of entries that carry one.
    Table { title: Option<String>, rows: Vec<TooltipRow>, details: Vec<String> },
}

/// Tooltip panel content configuration.
#[derive(Clone, Default)]
pub struct TooltipContent {
    pub content: Option<ContentRenderer>,
    pub title: Option<TitleRenderer>,
    pub formatter: Option<NumberFormatter>,
}

impl std::fmt::Debug for TooltipContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TooltipContent")
            .field("content", &self.content.is_some())
            .field("title", &self.title.is_some())
            .field("formatter", &self.formatter.is_some())
            .finish()
    }
}

impl TooltipContent {
    pub fn body(&self, entries: &[TooltipEntry]) -> TooltipBody {
        if let Some(render) = &self.content {
            return TooltipBody::Custom(render(entries));
        }
        let title = match &self.title {
            Some(render) => Some(render(entries)),
            None => entries
                .first()
                .and_then(|e| e.value_x.as_ref())
                .and_then(Value::as_date)
                .map(|d| format_day_month_year(&d)),
        };
        let rows = entries
            .iter()
            .filter_map(|e| {
                let v = e.value_y.as_ref().filter(|v| v.is_truthy())?;
                let value = match (v.to_number(), &self.formatter) {
                    (Some(n), Some(fmt)) if matches!(v, Value::Number(_)) => fmt(n),
                    _ => v.to_string(),
                };
                (!value.is_empty()).then(|| TooltipRow { color: e.color.clone(), label: e.label.clone(), value })
            })
            .collect();
        let details = entries.iter().filter_map(|e| e.detail.clone()).collect();
        TooltipBody::Table { title, rows, details }
    }
}

impl TooltipBody {
    pub fn to_html(&self) -> String {
        let mut out = String::from(r#"<div class="meridian__tooltip-content">"#);
        match self {
            TooltipBody::Custom(html) => out.push_str(html),
            TooltipBody::Table { title, rows, details } => {
                if let Some(t) = title {
                    out.push_str(&format!(r#"<span class="meridian__tooltip-title">{}</span>"#, escape(t)));
                }
                out.push_str(r#"<table class="meridian__tooltip__table"><tbody>"#);
                for row in rows {
                    out.push_str(&format!(
                        concat!(
                            r#"<tr><td aria-hidden="true"><svg width="16" height="16" class="meridian__tooltip__table__element-color">"#,
                            r#"<rect fill="{}" width="16" height="16"></rect></svg></td><td>{}</td><td>{}</td></tr>"#
                        ),
                        escape(&row.color),
                        escape(&row.label),
                        escape(&row.value),
                    ));
                }
                out.push_str("</tbody></table>");
                for d in details {
                    out.push_str(&format!(r#"<p class="meridian__tooltip-detail">{}</p>"#, escape(d)));
                }
            }
        }
        out.push_str("</div>");
        out
    }
}
