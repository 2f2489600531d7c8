// File: crates/chart-core/src/axis.rs
// Summary: Left/bottom axis layout: tick selection, label formatting and marks.

use std::fmt;
use std::rc::Rc;

use crate::format::{format_day_month, format_number};
use crate::options::ChartOptions;
use crate::record::Value;
use crate::scale::{HorizontalScale, LinearScale};
use crate::scene::{Mark, TextAnchor};

pub const TICK_LENGTH: f64 = 3.0;
pub const TICK_FONT_SIZE: f64 = 12.0;
const LEFT_TICK_COUNT: usize = 4;
const BOTTOM_TICK_COUNT: usize = 10;

pub type TickFormatter = Rc<dyn Fn(&Value) -> String>;

/// Caller overrides for one axis. Anything set here wins over chart defaults.
#[derive(Clone, Default)]
pub struct AxisProps {
    pub tick_values: Option<Vec<Value>>,
    pub num_ticks: Option<usize>,
    pub tick_length: Option<f64>,
    pub stroke: Option<String>,
    pub tick_stroke: Option<String>,
    pub tick_format: Option<TickFormatter>,
    pub hide: bool,
}

impl AxisProps {
    pub fn with_tick_values(mut self, values: impl IntoIterator<Item = impl Into<Value>>) -> Self {
        self.tick_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_num_ticks(mut self, n: usize) -> Self {
        self.num_ticks = Some(n);
        self
    }

    pub fn with_tick_format(mut self, f: impl Fn(&Value) -> String + 'static) -> Self {
        self.tick_format = Some(Rc::new(f));
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hide = true;
        self
    }
}

impl fmt::Debug for AxisProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxisProps")
            .field("tick_values", &self.tick_values)
            .field("num_ticks", &self.num_ticks)
            .field("tick_length", &self.tick_length)
            .field("stroke", &self.stroke)
            .field("tick_stroke", &self.tick_stroke)
            .field("tick_format", &self.tick_format.is_some())
            .field("hide", &self.hide)
            .finish()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Left,
    Bottom,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    /// Pixel along the axis, before the axis translation.
    pub position: f64,
    pub label: String,
}

/// A laid-out axis ready to be turned into marks.
#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub orientation: Orientation,
    pub translate: (f64, f64),
    pub range: (f64, f64),
    pub ticks: Vec<Tick>,
    pub stroke: String,
    pub tick_stroke: String,
    pub text_color: String,
    pub tick_length: f64,
}

impl Axis {
    /// Vertical value axis at `left`.
    ///
    /// `simplified_ticks` replaces the domain endpoints in simplified mode.
    pub fn left(scale: &LinearScale, left: f64, options: &ChartOptions, simplified_ticks: Option<Vec<f64>>) -> Option<Self> {
        let props = &options.y_axis;
        if props.hide {
            return None;
        }
        let values: Vec<f64> = match &props.tick_values {
            Some(v) => v.iter().filter_map(Value::to_number).collect(),
            None if options.simplified => simplified_ticks.unwrap_or_else(|| vec![scale.domain.0, scale.domain.1]),
            None => scale.ticks(props.num_ticks.unwrap_or(LEFT_TICK_COUNT)),
        };
        let ticks = values
            .into_iter()
            .map(|v| Tick {
                position: scale.map(v),
                label: match (&props.tick_format, &options.number_formatter) {
                    (Some(f), _) => f(&Value::Number(v)),
                    (None, Some(f)) => f(v),
                    (None, None) => format_number(v),
                },
            })
            .collect();
        Some(Self::styled(Orientation::Left, (left, 0.0), scale.range, ticks, props, options))
    }

    /// Horizontal axis at (`left`, `top`).
    ///
    /// `chart_ticks` are tick values the chart always uses unless the caller overrides them.
    pub fn bottom(
        scale: &HorizontalScale,
        left: f64,
        top: f64,
        options: &ChartOptions,
        chart_ticks: Option<Vec<Value>>,
    ) -> Option<Self> {
        let props = &options.x_axis;
        if props.hide {
            return None;
        }
        let values = match (&props.tick_values, chart_ticks) {
            (Some(v), _) => v.clone(),
            (None, Some(t)) => t,
            (None, None) if options.simplified => scale.domain_values(),
            (None, None) => scale.ticks(props.num_ticks.unwrap_or(BOTTOM_TICK_COUNT)),
        };
        let ticks = values
            .iter()
            .filter_map(|v| {
                let position = scale.tick_position(v)?;
                let label = match &props.tick_format {
                    Some(f) => f(v),
                    None => match v {
                        Value::Date(d) => format_day_month(d),
                        other => other.to_string(),
                    },
                };
                Some(Tick { position, label })
            })
            .collect();
        Some(Self::styled(Orientation::Bottom, (left, top), scale.range(), ticks, props, options))
    }

    fn styled(
        orientation: Orientation,
        translate: (f64, f64),
        range: (f64, f64),
        ticks: Vec<Tick>,
        props: &AxisProps,
        options: &ChartOptions,
    ) -> Self {
        let axis_color = options.axis_color();
        let tick_stroke = match &props.tick_stroke {
            Some(s) => s.clone(),
            None if options.simplified => "transparent".to_string(),
            None => axis_color.clone(),
        };
        Self {
            orientation,
            translate,
            range,
            ticks,
            stroke: props.stroke.clone().unwrap_or(axis_color),
            tick_stroke,
            text_color: options.text_color(),
            tick_length: props.tick_length.unwrap_or(TICK_LENGTH),
        }
    }

    pub fn marks(&self) -> Mark {
        let len = self.tick_length;
        let mut children = Vec::with_capacity(1 + self.ticks.len() * 2);
        match self.orientation {
            Orientation::Left => {
                children.push(Mark::line((0.0, self.range.0), (0.0, self.range.1), &self.stroke, 1.0));
                for t in &self.ticks {
                    children.push(Mark::line((0.0, t.position), (-len, t.position), &self.tick_stroke, 1.0));
                    children.push(
                        Mark::text((-len, t.position), t.label.as_str(), TICK_FONT_SIZE)
                            .aligned(TextAnchor::End, -3.0, 4.0)
                            .with_fill(&self.text_color),
                    );
                }
            }
            Orientation::Bottom => {
                children.push(Mark::line((self.range.0, 0.0), (self.range.1, 0.0), &self.stroke, 1.0));
                for t in &self.ticks {
                    children.push(Mark::line((t.position, 0.0), (t.position, len), &self.tick_stroke, 1.0));
                    // labels sit 5px left of the tick
                    children.push(
                        Mark::text((t.position, len + TICK_FONT_SIZE), t.label.as_str(), TICK_FONT_SIZE)
                            .aligned(TextAnchor::Middle, -5.0, 0.0)
                            .with_fill(&self.text_color),
                    );
                }
            }
        }
        let class = match self.orientation {
            Orientation::Left => "meridian__axis meridian__axis--left",
            Orientation::Bottom => "meridian__axis meridian__axis--bottom",
        };
        Mark::group(self.translate, children).with_class(class)
    }
}

/// Both axes of a chart, skipping hidden ones.
pub fn axes_marks(left: Option<Axis>, bottom: Option<Axis>) -> Vec<Mark> {
    left.into_iter().chain(bottom).map(|a| a.marks()).collect()
}
