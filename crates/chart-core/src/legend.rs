// File: crates/chart-core/src/legend.rs
// Summary: Row legend of color swatches and labels.

use crate::format::format_number;
use crate::svg::escape;

const SWATCH: f64 = 15.0;

#[derive(Clone, Debug, PartialEq)]
pub struct LegendItem {
    pub color: String,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Legend {
    pub items: Vec<LegendItem>,
    /// Left padding, matching the plot's left margin.
    pub offset_left: f64,
}

impl Legend {
    pub fn new<'a>(items: impl IntoIterator<Item = (&'a str, &'a str)>, offset_left: f64) -> Self {
        let items = items
            .into_iter()
            .map(|(color, label)| LegendItem { color: color.to_string(), label: label.to_string() })
            .collect();
        Self { items, offset_left }
    }

    pub fn to_html(&self) -> String {
        let mut out = format!(
            r#"<div style="padding-left: {}px"><div class="meridian__legend" style="display: flex; flex-direction: row">"#,
            format_number(self.offset_left)
        );
        for item in &self.items {
            out.push_str(&format!(
                concat!(
                    r#"<div class="meridian__legend-item" style="display: flex; align-items: center">"#,
                    r#"<svg width="{s}" height="{s}"><rect fill="{c}" width="{s}" height="{s}"></rect></svg>"#,
                    r#"<span class="meridian__legend-label" style="margin: 0 20px 0 0">{l}</span></div>"#
                ),
                s = SWATCH,
                c = escape(&item.color),
                l = escape(&item.label),
            ));
        }
        out.push_str("</div></div>");
        out
    }
}
