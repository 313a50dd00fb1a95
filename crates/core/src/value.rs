//! Raw cell values and the shared parse predicates.
//!
//! Every "does this look like a number / a date" decision in the workspace goes
//! through [`parse_number`] and [`parse_date`]. The profiler and the chart
//! transforms must agree on what counts as numeric, so nothing else should call
//! `str::parse::<f64>` on cell text directly.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};

/// A single cell as decoded by ingestion.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RawValue {
    /// Native number (JSON numbers only; CSV cells are always text)
    Number(f64),
    /// Non-empty text
    Text(String),
    /// Empty cell, JSON null, or a key missing from the row
    #[default]
    Empty,
}

impl RawValue {
    /// Build from cell text. The empty string becomes `Empty`.
    pub fn from_text(s: impl Into<String>) -> Self {
        let s = s.into();
        if s.is_empty() {
            RawValue::Empty
        } else {
            RawValue::Text(s)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RawValue::Empty)
    }

    /// Numeric view of the value. `None` means "not numeric evidence".
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawValue::Number(n) if n.is_finite() => Some(*n),
            RawValue::Number(_) => None,
            RawValue::Text(s) => parse_number(s),
            RawValue::Empty => None,
        }
    }

    /// Numeric view with a zero fallback. Only the aggregation paths use this.
    pub fn as_number_or_zero(&self) -> f64 {
        self.as_number().unwrap_or(0.0)
    }

    /// Date view of the value, using the permissive date parser on its display form.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            RawValue::Empty => None,
            RawValue::Text(s) => parse_date(s),
            RawValue::Number(_) => parse_date(&self.display_string()),
        }
    }

    /// Truthiness: `Empty`, a native zero and NaN are false. Any text is true,
    /// including `"0"`.
    pub fn is_truthy(&self) -> bool {
        match self {
            RawValue::Empty => false,
            RawValue::Number(n) => *n != 0.0 && !n.is_nan(),
            RawValue::Text(_) => true,
        }
    }

    /// Text shown to users and used for grouping, searching and string sorting.
    pub fn display_string(&self) -> String {
        match self {
            RawValue::Empty => String::new(),
            RawValue::Text(s) => s.clone(),
            RawValue::Number(n) => format_number(*n),
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Text(s) => f.write_str(s),
            other => f.write_str(&other.display_string()),
        }
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Number(n)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::from_text(s)
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::from_text(s)
    }
}

impl Serialize for RawValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RawValue::Number(n) if n.is_finite() => serializer.serialize_f64(*n),
            RawValue::Number(_) => serializer.serialize_none(),
            RawValue::Text(s) => serializer.serialize_str(s),
            RawValue::Empty => serializer.serialize_str(""),
        }
    }
}

/// Integral values print without a fractional part (`100`, not `100.0`).
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Parse cell text as a finite number.
///
/// Surrounding whitespace is ignored. Empty text, `inf` and `NaN` are rejected.
pub fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%d %b %Y",
    "%d %B %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Permissive, locale-independent date parse.
///
/// Accepts ISO-like dates and datetimes (with or without offset), RFC 2822,
/// US-style `MM/DD/YYYY`, month-name forms, `YYYY-MM` and a bare 4-digit year.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.date_naive());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    // YYYY-MM
    if s.len() == 7 && s.as_bytes()[4] == b'-' {
        if let Ok(d) = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d") {
            return Some(d);
        }
    }

    // YYYY
    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        let year: i32 = s.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }

    None
}
