// File: crates/chart-core/src/format.rs
// Summary: Number/date text helpers shared by axes, bar labels and tooltips.

use std::rc::Rc;

use chrono::NaiveDateTime;

/// Caller-supplied value-to-text function (`numberFormatter`).
pub type NumberFormatter = Rc<dyn Fn(f64) -> String>;

/// Shortest round-trip text for a number; integers print without a fraction.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity".into() } else { "-Infinity".into() }
    } else if n == 0.0 {
        "0".to_string()
    } else {
        format!("{n}")
    }
}

/// Round half toward positive infinity (`Math.round`), unlike `f64::round`.
#[inline]
pub fn round_half_up(v: f64) -> f64 {
    // adding 0.5 first would carry 0.49999999999999994 up to 1
    let r = v.floor();
    if v - r >= 0.5 { r + 1.0 } else { r }
}

/// Tooltip title form, e.g. `05 March 2024`.
pub fn format_day_month_year(d: &NaiveDateTime) -> String {
    d.format("%d %B %Y").to_string()
}

/// Short axis tick form, e.g. `05 Mar`.
pub fn format_day_month(d: &NaiveDateTime) -> String {
    d.format("%d %b").to_string()
}

/// Estimated rendered width of a label in pixels.
///
/// Without a text shaper we approximate glyph advance from the font size.
pub fn estimate_text_width(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * font_size * 0.6
}
