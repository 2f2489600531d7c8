// File: crates/chart-core/src/domain.rs
// Summary: Domain bounds over records (highest/lowest per accessor, padded min/max).
// Notes:
// - Values that fail numeric coercion are dropped, never reported.
// - An empty pool yields 0 so scales can always be built.

use crate::record::Record;

/// Default padding fraction used by [`min_max_with_padding`].
pub const DEFAULT_PADDING: f64 = 0.1;

/// Padded domain bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinMax {
    pub min: f64,
    pub max: f64,
}

/// Record input for domain computation: one series, or several sharing a domain.
#[derive(Clone, Copy, Debug)]
pub enum Records<'a> {
    Flat(&'a [Record]),
    Nested(&'a [Vec<Record>]),
}

impl<'a> Records<'a> {
    fn iter(self) -> Box<dyn Iterator<Item = &'a Record> + 'a> {
        match self {
            Records::Flat(rows) => Box::new(rows.iter()),
            Records::Nested(groups) => Box::new(groups.iter().flatten()),
        }
    }
}

impl<'a> From<&'a [Record]> for Records<'a> {
    fn from(rows: &'a [Record]) -> Self { Records::Flat(rows) }
}
impl<'a> From<&'a Vec<Record>> for Records<'a> {
    fn from(rows: &'a Vec<Record>) -> Self { Records::Flat(rows) }
}
impl<'a> From<&'a [Vec<Record>]> for Records<'a> {
    fn from(groups: &'a [Vec<Record>]) -> Self { Records::Nested(groups) }
}
impl<'a> From<&'a Vec<Vec<Record>>> for Records<'a> {
    fn from(groups: &'a Vec<Vec<Record>>) -> Self { Records::Nested(groups) }
}

/// All coercible values for every accessor, concatenated accessor by accessor.
fn value_pool<'a>(records: Records<'a>, accessors: &[&str]) -> Vec<f64> {
    let mut pool = Vec::new();
    for key in accessors {
        pool.extend(records.iter().filter_map(|r| r.number(key)));
    }
    pool
}

/// Largest numeric value across `accessors`, or 0 when none exist.
pub fn highest_value<'a>(records: impl Into<Records<'a>>, accessors: &[&str]) -> f64 {
    value_pool(records.into(), accessors)
        .into_iter()
        .reduce(f64::max)
        .unwrap_or(0.0)
}

/// Smallest numeric value across `accessors`, or 0 when none exist.
pub fn lowest_value<'a>(records: impl Into<Records<'a>>, accessors: &[&str]) -> f64 {
    value_pool(records.into(), accessors)
        .into_iter()
        .reduce(f64::min)
        .unwrap_or(0.0)
}

/// Bounds padded outward by 10% of the span on each side.
pub fn min_max_with_padding<'a>(records: impl Into<Records<'a>>, accessors: &[&str]) -> MinMax {
    min_max(records, DEFAULT_PADDING, accessors)
}

/// Bounds padded outward by `padding` × span on each side.
///
/// A non-negative lower bound is never padded below zero.
pub fn min_max<'a>(records: impl Into<Records<'a>>, padding: f64, accessors: &[&str]) -> MinMax {
    let records = records.into();
    let highest = highest_value(records, accessors);
    let lowest = lowest_value(records, accessors);
    let span = highest - lowest;
    let mut min = lowest - span * padding;
    if lowest >= 0.0 && min < 0.0 {
        min = 0.0;
    }
    MinMax { min, max: highest + span * padding }
}
