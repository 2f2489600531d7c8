// File: crates/chart-core/tests/config.rs
// Purpose: TOML defaults, theme lookup and error reporting for bad input.

use chart_core::theme::{self, Theme};
use chart_core::{ChartConfig, ChartError, ChartOptions};

#[test]
fn parses_defaults_into_options() {
    let cfg = ChartConfig::from_toml_str(
        r##"
        hide_legend = true
        show_y_grid_lines = true
        chart_y_domain_padding = 0.2
        axis_color = "#123456"
        theme = "dark"
        "##,
    )
    .expect("config");
    let opts = ChartOptions::from_config(&cfg);
    assert!(opts.hide_legend);
    assert!(opts.show_y_grid_lines);
    assert!(!opts.hide_tooltip);
    assert_eq!(opts.chart_y_domain_padding, Some(0.2));
    assert_eq!(opts.axis_color(), "#123456");
    assert_eq!(opts.text_color(), Theme::dark().text);
    assert_eq!(opts.grid_color(), "#12345633");
}

#[test]
fn empty_config_is_default() {
    assert_eq!(ChartConfig::from_toml_str("").expect("config"), ChartConfig::default());
    let opts = ChartOptions::from_config(&ChartConfig::default());
    assert_eq!(opts.axis_color(), "#07080A");
}

#[test]
fn unknown_keys_are_rejected() {
    let err = ChartConfig::from_toml_str("colour = 'red'").expect_err("unknown key");
    assert!(matches!(err, ChartError::Config(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = ChartConfig::load("definitely/not/here.toml").expect_err("missing");
    assert!(matches!(err, ChartError::Io(_)));
}

#[test]
fn unknown_theme_falls_back_to_light() {
    assert_eq!(theme::find("solarized"), Theme::light());
    assert_eq!(theme::find("High-Contrast-Dark"), Theme::high_contrast_dark());
    assert_eq!(theme::presets().len(), 3);
}
