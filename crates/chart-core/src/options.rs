// File: crates/chart-core/src/options.rs
// Summary: Presentation options shared by every chart kind.

use std::fmt;
use std::rc::Rc;

use chrono::NaiveDateTime;

use crate::axis::AxisProps;
use crate::config::ChartConfig;
use crate::format::{format_number, NumberFormatter};
use crate::record::Value;
use crate::theme::Theme;
use crate::tooltip::TooltipContent;

/// Explicit horizontal domain.
#[derive(Clone, Debug, PartialEq)]
pub enum XDomain {
    Numbers(f64, f64),
    Dates(NaiveDateTime, NaiveDateTime),
    /// Full category list for band axes.
    Categories(Vec<Value>),
}

#[derive(Clone, Default)]
pub struct ChartOptions {
    pub axis_color: Option<String>,
    pub text_color: Option<String>,
    pub bar_text_color: Option<String>,
    pub hide_tooltip: bool,
    pub hide_legend: bool,
    pub hide_bar_text: bool,
    pub show_x_grid_lines: bool,
    pub show_y_grid_lines: bool,
    /// Reduced tick display: domain endpoints only, no tick strokes.
    pub simplified: bool,
    pub number_formatter: Option<NumberFormatter>,
    pub x_axis: AxisProps,
    pub y_axis: AxisProps,
    pub x_scale_domain: Option<XDomain>,
    pub y_scale_domain: Option<(f64, f64)>,
    pub chart_y_domain_padding: Option<f64>,
    pub tooltip: TooltipContent,
    /// Extra horizontal shift of the tooltip panel.
    pub tooltip_x_offset: f64,
    /// Extra class on the chart root (e.g. loading state).
    pub class_name: Option<String>,
    pub theme: Theme,
}

impl ChartOptions {
    pub fn from_config(cfg: &ChartConfig) -> Self {
        cfg.options()
    }

    pub fn with_number_formatter(mut self, f: impl Fn(f64) -> String + 'static) -> Self {
        self.number_formatter = Some(Rc::new(f));
        self
    }

    pub fn axis_color(&self) -> String {
        self.axis_color.clone().unwrap_or_else(|| self.theme.axis.to_string())
    }

    pub fn text_color(&self) -> String {
        self.text_color.clone().unwrap_or_else(|| self.theme.text.to_string())
    }

    pub fn bar_text_color(&self) -> String {
        self.bar_text_color.clone().unwrap_or_else(|| self.theme.bar_text.to_string())
    }

    pub fn grid_color(&self) -> String {
        self.theme.grid_color(&self.axis_color())
    }

    /// Display string for a raw value: numbers go through the number formatter.
    pub fn format_value(&self, v: &Value) -> String {
        match (v, &self.number_formatter) {
            (Value::Number(n), Some(f)) => f(*n),
            (Value::Number(n), None) => format_number(*n),
            (other, _) => other.to_string(),
        }
    }
}

impl fmt::Debug for ChartOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartOptions")
            .field("axis_color", &self.axis_color)
            .field("text_color", &self.text_color)
            .field("hide_tooltip", &self.hide_tooltip)
            .field("hide_legend", &self.hide_legend)
            .field("hide_bar_text", &self.hide_bar_text)
            .field("show_x_grid_lines", &self.show_x_grid_lines)
            .field("show_y_grid_lines", &self.show_y_grid_lines)
            .field("simplified", &self.simplified)
            .field("x_scale_domain", &self.x_scale_domain)
            .field("y_scale_domain", &self.y_scale_domain)
            .field("chart_y_domain_padding", &self.chart_y_domain_padding)
            .field("theme", &self.theme.name)
            .finish_non_exhaustive()
    }
}
