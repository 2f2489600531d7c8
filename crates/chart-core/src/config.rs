// File: crates/chart-core/src/config.rs
// Summary: Global chart defaults loaded from TOML; per-chart options override them.

use std::path::Path;

use serde::Deserialize;

use crate::error::ChartError;
use crate::options::ChartOptions;
use crate::theme;

/// Defaults shared by every chart in an application.
///
/// Domain overrides are deliberately absent; they only make sense per chart.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    pub hide_tooltip: bool,
    pub hide_legend: bool,
    pub show_x_grid_lines: bool,
    pub show_y_grid_lines: bool,
    pub chart_y_domain_padding: Option<f64>,
    pub simplified: bool,
    pub axis_color: Option<String>,
    pub text_color: Option<String>,
    pub theme: Option<String>,
}

impl ChartConfig {
    pub fn from_toml_str(src: &str) -> Result<Self, ChartError> {
        Ok(toml::from_str(src)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ChartError> {
        let src = std::fs::read_to_string(path.as_ref())?;
        let cfg = Self::from_toml_str(&src)?;
        tracing::debug!(path = %path.as_ref().display(), "loaded chart config");
        Ok(cfg)
    }

    /// Options seeded from these defaults.
    pub fn options(&self) -> ChartOptions {
        ChartOptions {
            hide_tooltip: self.hide_tooltip,
            hide_legend: self.hide_legend,
            show_x_grid_lines: self.show_x_grid_lines,
            show_y_grid_lines: self.show_y_grid_lines,
            chart_y_domain_padding: self.chart_y_domain_padding,
            simplified: self.simplified,
            axis_color: self.axis_color.clone(),
            text_color: self.text_color.clone(),
            theme: self.theme.as_deref().map(theme::find).unwrap_or_default(),
            ..ChartOptions::default()
        }
    }
}
