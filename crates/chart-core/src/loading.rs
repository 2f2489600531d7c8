// File: crates/chart-core/src/loading.rs
// Summary: Placeholder data and options for a chart shown while real data loads.

use chrono::{Days, NaiveDate};

use crate::axis::AxisProps;
use crate::charts::{BarChart, Chart, LineChart, SeriesMeta, StackedBarChart};
use crate::options::ChartOptions;
use crate::record::{Record, Value};

pub const LOADING_AXIS_COLOR: &str = "#414952";
pub const LOADING_SERIES_COLOR: &str = "#6E7884";
pub const LOADING_CLASS: &str = "meridian__loading-chart";
const VALUES: [i32; 9] = [9, 4, 3, 6, 4, 4, 3, 5, 1];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadingKind {
    Line,
    Bar,
    StackedBar,
}

/// Nine daily records ending on `today`, each with `value`, `date` and a `DD-MM` `valueX`.
pub fn loading_records(today: NaiveDate) -> Vec<Record> {
    VALUES
        .iter()
        .enumerate()
        .filter_map(|(i, v)| {
            let day = today.checked_sub_days(Days::new((VALUES.len() - 1 - i) as u64))?;
            Some(
                Record::new()
                    .with("value", *v)
                    .with("date", day)
                    .with("valueX", day.format("%d-%m").to_string()),
            )
        })
        .collect()
}

pub fn loading_series() -> Vec<SeriesMeta> {
    vec![SeriesMeta::new("value", "...", LOADING_SERIES_COLOR)]
}

/// No ticks, no tooltip, no bar labels.
pub fn loading_options(hide_legend: bool) -> ChartOptions {
    ChartOptions {
        hide_tooltip: true,
        hide_bar_text: true,
        hide_legend,
        axis_color: Some(LOADING_AXIS_COLOR.to_string()),
        x_axis: AxisProps::default().with_tick_values(Vec::<Value>::new()),
        y_axis: AxisProps::default().with_tick_values(Vec::<Value>::new()),
        class_name: Some(LOADING_CLASS.to_string()),
        ..ChartOptions::default()
    }
}

/// A placeholder chart of the given kind.
pub fn loading_chart(kind: LoadingKind, today: NaiveDate, hide_legend: bool) -> Box<dyn Chart> {
    let data = loading_records(today);
    let options = loading_options(hide_legend);
    match kind {
        LoadingKind::Line => Box::new(LineChart::new(data, loading_series()).with_options(options)),
        LoadingKind::Bar => Box::new(BarChart::new(data, loading_series()).with_options(options)),
        LoadingKind::StackedBar => Box::new(StackedBarChart::new(data, loading_series()).with_options(options)),
    }
}
