// File: crates/chart-core/src/scale.rs
// Summary: Linear, time, band and ordinal scales plus the tagged horizontal-scale variant.

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime, Weekday};

use crate::format::round_half_up;
use crate::record::Value;

/// Continuous mapping operations shared by numeric and temporal scales.
pub trait ContinuousScale {
    /// Map a domain number (epoch millis for time) to a pixel.
    fn to_px(&self, v: f64) -> f64;
    /// Map a pixel back to a domain number.
    fn from_px(&self, px: f64) -> f64;
    fn range(&self) -> (f64, f64);
}

// ---- linear ------------------------------------------------------------------

/// Numeric scale mapping `[d0, d1]` linearly onto `[r0, r1]`; not clamped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    #[inline]
    pub fn map(&self, v: f64) -> f64 {
        let t = normalize(self.domain.0, self.domain.1, v);
        self.range.0 + t * (self.range.1 - self.range.0)
    }

    #[inline]
    pub fn invert(&self, px: f64) -> f64 {
        let t = normalize(self.range.0, self.range.1, px);
        self.domain.0 + t * (self.domain.1 - self.domain.0)
    }

    /// Round-number ticks, approximately `count` of them, inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count as f64)
    }
}

impl ContinuousScale for LinearScale {
    fn to_px(&self, v: f64) -> f64 { self.map(v) }
    fn from_px(&self, px: f64) -> f64 { self.invert(px) }
    fn range(&self) -> (f64, f64) { self.range }
}

/// Position of `x` within `[a, b]`; a collapsed interval maps to its middle.
fn normalize(a: f64, b: f64, x: f64) -> f64 {
    let span = b - a;
    if span != 0.0 && !span.is_nan() {
        (x - a) / span
    } else if span.is_nan() {
        f64::NAN
    } else {
        0.5
    }
}

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = 1.4142135623730951; // sqrt(2)

fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 { 10.0 } else if error >= E5 { 5.0 } else if error >= E2 { 2.0 } else { 1.0 };
    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let inv = 10f64.powf(-power) / factor;
        i1 = round_half_up(start * inv);
        i2 = round_half_up(stop * inv);
        if i1 / inv < start { i1 += 1.0; }
        if i2 / inv > stop { i2 -= 1.0; }
        inc = -inv;
    } else {
        inc = 10f64.powf(power) * factor;
        i1 = round_half_up(start / inc);
        i2 = round_half_up(stop / inc);
        if i1 * inc < start { i1 += 1.0; }
        if i2 * inc > stop { i2 -= 1.0; }
    }
    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

/// Evenly spaced 1/2/5 × 10^k ticks between `start` and `stop`.
pub fn ticks(start: f64, stop: f64, count: f64) -> Vec<f64> {
    if !(count > 0.0) || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let reverse = stop < start;
    let (i1, i2, inc) = if reverse { tick_spec(stop, start, count) } else { tick_spec(start, stop, count) };
    if !(i2 >= i1) {
        return Vec::new();
    }
    let n = (i2 - i1 + 1.0) as usize;
    let at = |k: f64| if inc < 0.0 { k / -inc } else { k * inc };
    (0..n)
        .map(|i| if reverse { at(i2 - i as f64) } else { at(i1 + i as f64) })
        .collect()
}

// ---- time --------------------------------------------------------------------

/// Temporal scale; dates map through their epoch milliseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeScale {
    pub domain: (NaiveDateTime, NaiveDateTime),
    linear: LinearScale,
}

const SECOND: f64 = 1_000.0;
const MINUTE: f64 = SECOND * 60.0;
const HOUR: f64 = MINUTE * 60.0;
const DAY: f64 = HOUR * 24.0;
const WEEK: f64 = DAY * 7.0;
const MONTH: f64 = DAY * 30.0;
const YEAR: f64 = DAY * 365.0;

#[derive(Clone, Copy, Debug)]
enum TimeInterval {
    Fixed(f64),
    /// Midnights whose day of month is 1, 1 + n, 1 + 2n, ...
    Days(u32),
    /// Sunday midnights.
    Weeks,
    Months(u32),
}

const TIME_INTERVALS: &[(TimeInterval, f64)] = &[
    (TimeInterval::Fixed(SECOND), SECOND),
    (TimeInterval::Fixed(5.0 * SECOND), 5.0 * SECOND),
    (TimeInterval::Fixed(15.0 * SECOND), 15.0 * SECOND),
    (TimeInterval::Fixed(30.0 * SECOND), 30.0 * SECOND),
    (TimeInterval::Fixed(MINUTE), MINUTE),
    (TimeInterval::Fixed(5.0 * MINUTE), 5.0 * MINUTE),
    (TimeInterval::Fixed(15.0 * MINUTE), 15.0 * MINUTE),
    (TimeInterval::Fixed(30.0 * MINUTE), 30.0 * MINUTE),
    (TimeInterval::Fixed(HOUR), HOUR),
    (TimeInterval::Fixed(3.0 * HOUR), 3.0 * HOUR),
    (TimeInterval::Fixed(6.0 * HOUR), 6.0 * HOUR),
    (TimeInterval::Fixed(12.0 * HOUR), 12.0 * HOUR),
    (TimeInterval::Days(1), DAY),
    (TimeInterval::Days(2), 2.0 * DAY),
    (TimeInterval::Weeks, WEEK),
    (TimeInterval::Months(1), MONTH),
    (TimeInterval::Months(3), 3.0 * MONTH),
    (TimeInterval::Months(12), YEAR),
];

pub fn millis(d: &NaiveDateTime) -> f64 {
    d.and_utc().timestamp_millis() as f64
}

pub fn from_millis(ms: f64) -> Option<NaiveDateTime> {
    if !ms.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(ms.round() as i64).map(|d| d.naive_utc())
}

impl TimeScale {
    pub fn new(domain: (NaiveDateTime, NaiveDateTime), range: (f64, f64)) -> Self {
        let linear = LinearScale::new((millis(&domain.0), millis(&domain.1)), range);
        Self { domain, linear }
    }

    #[inline]
    pub fn map(&self, d: &NaiveDateTime) -> f64 { self.linear.map(millis(d)) }

    pub fn invert(&self, px: f64) -> Option<NaiveDateTime> { from_millis(self.linear.invert(px)) }

    /// Calendar-aligned ticks with roughly `count` entries.
    pub fn ticks(&self, count: usize) -> Vec<NaiveDateTime> {
        let (mut a, mut b) = (self.linear.domain.0, self.linear.domain.1);
        if b < a { std::mem::swap(&mut a, &mut b); }
        if count == 0 || !(b > a) {
            return from_millis(a).into_iter().collect();
        }
        let target = (b - a) / count as f64;
        let i = TIME_INTERVALS.partition_point(|(_, d)| *d <= target);
        if i == TIME_INTERVALS.len() {
            return year_ticks(a, b, count);
        }
        if i == 0 {
            return ticks(a, b, count as f64).into_iter().filter_map(from_millis).collect();
        }
        let (prev, prev_d) = TIME_INTERVALS[i - 1];
        let (next, next_d) = TIME_INTERVALS[i];
        let pick = if target / prev_d < next_d / target { prev } else { next };
        match pick {
            TimeInterval::Fixed(step) => {
                let first = (a / step).ceil() * step;
                let mut out = Vec::new();
                let mut t = first;
                while t <= b {
                    if let Some(d) = from_millis(t) { out.push(d); }
                    t += step;
                }
                out
            }
            TimeInterval::Days(n) => day_ticks(a, b, |d| (d.day0() % n) == 0),
            TimeInterval::Weeks => day_ticks(a, b, |d| d.weekday() == Weekday::Sun),
            TimeInterval::Months(n) => month_ticks(a, b, n),
        }
    }
}

impl ContinuousScale for TimeScale {
    fn to_px(&self, v: f64) -> f64 { self.linear.map(v) }
    fn from_px(&self, px: f64) -> f64 { self.linear.invert(px) }
    fn range(&self) -> (f64, f64) { self.linear.range }
}

fn day_ticks(a: f64, b: f64, keep: impl Fn(&NaiveDate) -> bool) -> Vec<NaiveDateTime> {
    let (Some(start), Some(end)) = (from_millis(a), from_millis(b)) else { return Vec::new() };
    start
        .date()
        .iter_days()
        .filter_map(|d| d.and_hms_opt(0, 0, 0))
        .skip_while(|dt| *dt < start)
        .take_while(|dt| *dt <= end)
        .filter(|dt| keep(&dt.date()))
        .collect()
}

fn month_ticks(a: f64, b: f64, every: u32) -> Vec<NaiveDateTime> {
    let (Some(start), Some(end)) = (from_millis(a), from_millis(b)) else { return Vec::new() };
    let month0 = start.month0() - start.month0() % every;
    let Some(mut cur) = NaiveDate::from_ymd_opt(start.year(), month0 + 1, 1) else { return Vec::new() };
    let mut out = Vec::new();
    while let Some(dt) = cur.and_hms_opt(0, 0, 0) {
        if dt > end { break; }
        if dt >= start { out.push(dt); }
        match cur.checked_add_months(Months::new(every)) {
            Some(n) => cur = n,
            None => break,
        }
    }
    out
}

fn year_ticks(a: f64, b: f64, count: usize) -> Vec<NaiveDateTime> {
    let (Some(start), Some(end)) = (from_millis(a), from_millis(b)) else { return Vec::new() };
    let years = ticks(start.year() as f64, end.year() as f64 + 1.0, count as f64);
    years
        .into_iter()
        .filter(|y| y.fract() == 0.0)
        .filter_map(|y| NaiveDate::from_ymd_opt(y as i32, 1, 1))
        .filter_map(|d| d.and_hms_opt(0, 0, 0))
        .filter(|d| *d >= start && *d <= end)
        .collect()
}

// ---- band --------------------------------------------------------------------

/// Categorical scale splitting the range into equal padded slots.
#[derive(Clone, Debug, PartialEq)]
pub struct BandScale {
    domain: Vec<Value>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
    align: f64,
    step: f64,
    bandwidth: f64,
    starts: Vec<f64>,
}

impl BandScale {
    /// Band scale with the same inner and outer `padding` fraction.
    pub fn new(domain: Vec<Value>, range: (f64, f64), padding: f64) -> Self {
        Self::with_paddings(domain, range, padding, padding)
    }

    /// Repeated categories keep only their first slot.
    pub fn with_paddings(domain: Vec<Value>, range: (f64, f64), padding_inner: f64, padding_outer: f64) -> Self {
        let mut unique: Vec<Value> = Vec::with_capacity(domain.len());
        for v in domain {
            if !unique.contains(&v) {
                unique.push(v);
            }
        }
        let mut s = Self {
            domain: unique,
            range,
            padding_inner: padding_inner.clamp(0.0, 1.0),
            padding_outer: padding_outer.max(0.0),
            align: 0.5,
            step: 0.0,
            bandwidth: 0.0,
            starts: Vec::new(),
        };
        s.rescale();
        s
    }

    fn rescale(&mut self) {
        let n = self.domain.len() as f64;
        let (r0, r1) = self.range;
        let reverse = r1 < r0;
        let (mut start, stop) = if reverse { (r1, r0) } else { (r0, r1) };
        self.step = (stop - start) / (n - self.padding_inner + self.padding_outer * 2.0).max(1.0);
        start += (stop - start - self.step * (n - self.padding_inner)) * self.align;
        self.bandwidth = self.step * (1.0 - self.padding_inner);
        self.starts = (0..self.domain.len()).map(|i| start + self.step * i as f64).collect();
        if reverse {
            self.starts.reverse();
        }
    }

    /// Slot start for a category, `None` for values outside the domain.
    pub fn map(&self, v: &Value) -> Option<f64> {
        self.domain.iter().position(|d| d == v).map(|i| self.starts[i])
    }

    pub fn step(&self) -> f64 { self.step }
    pub fn bandwidth(&self) -> f64 { self.bandwidth }
    /// Inner padding fraction.
    pub fn padding(&self) -> f64 { self.padding_inner }
    pub fn domain(&self) -> &[Value] { &self.domain }
    pub fn range(&self) -> (f64, f64) { self.range }

    /// Category index under a pixel offset measured from the plot's left edge.
    ///
    /// The offset is shifted by one inner padding and rounded to a whole step. A result of
    /// 0 is bumped to 1 to absorb the margin before the first slot, then converted to a
    /// zero-based index.
    pub fn index_at(&self, px: f64) -> Option<usize> {
        if !(self.step > 0.0) || !self.step.is_finite() || !px.is_finite() {
            return None;
        }
        let mut bar = round_half_up((px + self.padding_inner * self.step) / self.step);
        if bar == 0.0 {
            bar = 1.0;
        }
        if bar < 1.0 {
            return None;
        }
        let idx = bar as usize - 1;
        (idx < self.domain.len()).then_some(idx)
    }

    pub fn value_at(&self, px: f64) -> Option<&Value> {
        self.index_at(px).map(|i| &self.domain[i])
    }
}

// ---- ordinal -----------------------------------------------------------------

/// Key → color lookup; keys past the end of `range` wrap around.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrdinalScale {
    domain: Vec<String>,
    range: Vec<String>,
}

impl OrdinalScale {
    pub fn new(domain: Vec<String>, range: Vec<String>) -> Self {
        Self { domain, range }
    }

    pub fn map(&self, key: &str) -> Option<&str> {
        if self.range.is_empty() {
            return None;
        }
        let i = self.domain.iter().position(|d| d == key)?;
        Some(self.range[i % self.range.len()].as_str())
    }
}

// ---- horizontal --------------------------------------------------------------

/// Horizontal (x) scale of a chart; the variant decides how a pointer is resolved.
#[derive(Clone, Debug, PartialEq)]
pub enum HorizontalScale {
    Linear(LinearScale),
    Time(TimeScale),
    Band(BandScale),
}

impl HorizontalScale {
    /// Pixel of a domain value; slot start for band scales.
    pub fn map(&self, v: &Value) -> Option<f64> {
        match self {
            HorizontalScale::Linear(s) => v.to_number().map(|n| s.map(n)),
            HorizontalScale::Time(s) => match v {
                Value::Date(d) => Some(s.map(d)),
                other => other.to_number().map(|n| s.to_px(n)),
            },
            HorizontalScale::Band(s) => s.map(v),
        }
    }

    /// Pixel where a tick for `v` is drawn (slot centre for band scales).
    pub fn tick_position(&self, v: &Value) -> Option<f64> {
        match self {
            HorizontalScale::Band(s) => s.map(v).map(|x| x + s.bandwidth() / 2.0),
            _ => self.map(v),
        }
    }

    pub fn ticks(&self, count: usize) -> Vec<Value> {
        match self {
            HorizontalScale::Linear(s) => s.ticks(count).into_iter().map(Value::Number).collect(),
            HorizontalScale::Time(s) => s.ticks(count).into_iter().map(Value::Date).collect(),
            HorizontalScale::Band(s) => s.domain().to_vec(),
        }
    }

    /// Domain endpoints (continuous) or the full category list (band).
    pub fn domain_values(&self) -> Vec<Value> {
        match self {
            HorizontalScale::Linear(s) => vec![Value::Number(s.domain.0), Value::Number(s.domain.1)],
            HorizontalScale::Time(s) => vec![Value::Date(s.domain.0), Value::Date(s.domain.1)],
            HorizontalScale::Band(s) => s.domain().to_vec(),
        }
    }

    pub fn range(&self) -> (f64, f64) {
        match self {
            HorizontalScale::Linear(s) => s.range,
            HorizontalScale::Time(s) => s.range(),
            HorizontalScale::Band(s) => s.range(),
        }
    }

    pub fn step(&self) -> Option<f64> {
        match self {
            HorizontalScale::Band(s) => Some(s.step()),
            _ => None,
        }
    }

    pub fn bandwidth(&self) -> Option<f64> {
        match self {
            HorizontalScale::Band(s) => Some(s.bandwidth()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_ticks_follow_round_steps() {
        assert_eq!(ticks(0.0, 10.0, 10.0), (0..=10).map(f64::from).collect::<Vec<_>>());
        assert_eq!(ticks(0.0, 1.0, 4.0), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
        assert_eq!(ticks(0.0, 95.0, 4.0), vec![0.0, 20.0, 40.0, 60.0, 80.0]);
        assert_eq!(ticks(3.0, 3.0, 4.0), vec![3.0]);
    }

    #[test]
    fn descending_range_inverts() {
        let s = LinearScale::new((0.0, 100.0), (200.0, 0.0));
        assert_eq!(s.map(25.0), 150.0);
        assert!((s.invert(150.0) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn collapsed_domain_maps_to_middle() {
        let s = LinearScale::new((0.0, 0.0), (100.0, 0.0));
        assert_eq!(s.map(0.0), 50.0);
    }
}
