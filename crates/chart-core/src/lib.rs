// File: crates/chart-core/src/lib.rs
// Summary: Core library entry point; exports the chart kinds, wrapper and the math they share.

pub mod record;
pub mod format;
pub mod error;
pub mod domain;
pub mod scale;
pub mod types;
pub mod grid;
pub mod tooltip;
pub mod cursor;
pub mod scene;
pub mod svg;
pub mod axis;
pub mod theme;
pub mod legend;
pub mod config;
pub mod options;
pub mod charts;
pub mod wrapper;
pub mod loading;

pub use record::{read_csv, Record, Value};
pub use error::ChartError;
pub use domain::{highest_value, lowest_value, min_max, min_max_with_padding, MinMax};
pub use scale::{BandScale, HorizontalScale, LinearScale, OrdinalScale, TimeScale};
pub use types::{ChartDimensions, Offset, OffsetPatch};
pub use grid::{x_grid_values, y_grid_values};
pub use tooltip::{Overflow, TooltipContent, TooltipEntry, TooltipState};
pub use cursor::{bisect_center, CursorResolver, Position, SeriesTrack, Throttle, TooltipCursor};
pub use scene::{Mark, Scene};
pub use axis::{Axis, AxisProps};
pub use theme::Theme;
pub use legend::Legend;
pub use config::ChartConfig;
pub use options::{ChartOptions, XDomain};
pub use charts::{BarChart, Chart, ChartView, LineChart, ScatterChart, ScatterPoint, SeriesMeta, StackedBarChart};
pub use wrapper::{ChartWrapper, Frame, TooltipPanel};
pub use loading::{loading_chart, LoadingKind};
