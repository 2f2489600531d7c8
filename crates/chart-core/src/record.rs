// File: crates/chart-core/src/record.rs
// Summary: Schemaless data records and the numeric coercion used by every accessor lookup.

use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::ChartError;

/// A single field value inside a [`Record`].
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Date(NaiveDateTime),
}

impl Value {
    /// Coerce to a finite-or-infinite number, `None` when the value has no numeric reading.
    ///
    /// Null counts as 0 and blank text counts as 0; dates become epoch milliseconds.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Value::Null => Some(0.0),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Number(n) => (!n.is_nan()).then_some(*n),
            Value::Text(s) => parse_numeric_text(s),
            Value::Date(d) => Some(d.and_utc().timestamp_millis() as f64),
        }
    }

    /// Truthiness used by the "hide zero or missing value" rules.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Text(s) => !s.is_empty(),
            Value::Date(_) => true,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

fn parse_numeric_text(s: &str) -> Option<f64> {
    let t = s.trim();
    if t.is_empty() {
        return Some(0.0);
    }
    match t {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }
    if let Some(n) = parse_radix_literal(t) {
        return Some(n);
    }
    // Rust accepts "inf"/"nan" spellings that are not numbers for chart input.
    if t.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return None;
    }
    t.parse::<f64>().ok().filter(|n| !n.is_nan())
}

/// Unsigned `0x`/`0o`/`0b` integer literals.
fn parse_radix_literal(t: &str) -> Option<f64> {
    let (radix, digits) = match t.get(..2)? {
        "0x" | "0X" => (16, &t[2..]),
        "0o" | "0O" => (8, &t[2..]),
        "0b" | "0B" => (2, &t[2..]),
        _ => return None,
    };
    if digits.is_empty() {
        return None;
    }
    digits
        .chars()
        .try_fold(0.0f64, |acc, c| c.to_digit(radix).map(|d| acc * radix as f64 + d as f64))
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => f.write_str(&crate::format::format_number(*n)),
            Value::Text(s) => f.write_str(s),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self { Value::Number(v) }
}
impl From<i32> for Value {
    fn from(v: i32) -> Self { Value::Number(v as f64) }
}
impl From<i64> for Value {
    fn from(v: i64) -> Self { Value::Number(v as f64) }
}
impl From<u32> for Value {
    fn from(v: u32) -> Self { Value::Number(v as f64) }
}
impl From<bool> for Value {
    fn from(v: bool) -> Self { Value::Bool(v) }
}
impl From<&str> for Value {
    fn from(v: &str) -> Self { Value::Text(v.to_string()) }
}
impl From<String> for Value {
    fn from(v: String) -> Self { Value::Text(v) }
}
impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self { Value::Date(v) }
}
impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self { Value::Date(v.and_time(chrono::NaiveTime::MIN)) }
}

/// One row of chart input. Fields are looked up by accessor name at the point of use.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn new() -> Self { Self::default() }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> { self.fields.get(key) }

    /// Numeric reading of a field; missing fields and non-numeric text yield `None`.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::to_number)
    }

    pub fn contains(&self, key: &str) -> bool { self.fields.contains_key(key) }

    pub fn keys(&self) -> impl Iterator<Item = &str> { self.fields.keys().map(String::as_str) }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut r = Record::new();
        for (k, v) in iter { r.insert(k, v); }
        r
    }
}

/// Build a [`Record`] from `key => value` pairs.
#[macro_export]
macro_rules! record {
    () => { $crate::record::Record::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::record::Record::new()$(.with($key, $value))+
    };
}

/// Load records from CSV with a header row.
///
/// Cells are typed as number, then date, then text. Empty cells are left out so the
/// field reads as missing.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<Record>, ChartError> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).trim(csv::Trim::All).from_reader(reader);
    let headers = rdr.headers()?.clone();
    let mut out = Vec::new();
    for row in rdr.records() {
        let row = row?;
        let mut rec = Record::new();
        for (name, cell) in headers.iter().zip(row.iter()) {
            if cell.is_empty() { continue; }
            rec.insert(name, parse_cell(cell));
        }
        out.push(rec);
    }
    tracing::debug!(rows = out.len(), "loaded csv records");
    Ok(out)
}

fn parse_cell(cell: &str) -> Value {
    if let Ok(n) = cell.parse::<f64>() {
        if n.is_finite() { return Value::Number(n); }
    }
    if let Ok(d) = NaiveDate::parse_from_str(cell, "%Y-%m-%d") {
        return Value::from(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(cell) {
        return Value::Date(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(cell, "%Y-%m-%dT%H:%M:%S") {
        return Value::Date(dt);
    }
    match cell {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::Text(cell.to_string()),
    }
}
