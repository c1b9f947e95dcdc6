//! Grade and credit statistics
//!
//! Every function here is pure. Series are pulled out of a snapshot with the
//! extraction helpers, which coerce loosely typed document fields to numbers
//! and drop any record whose fields do not coerce. Dropped records are
//! returned by name so a caller running with [`CoercionPolicy::Strict`] can
//! report them.

use crate::core::models::{CourseField, Document, FieldValue};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Per-year aggregate keyed by academic year, iterated in ascending order.
pub type PerYear = BTreeMap<i64, f64>;

/// What to do with records whose numeric fields cannot be coerced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CoercionPolicy {
    /// Drop the record from aggregates without telling anyone
    #[default]
    Lenient,
    /// Drop the record and name it in the affected artifact
    Strict,
}

impl FromStr for CoercionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            _ => Err(format!(
                "Unknown coercion policy: '{s}' (expected lenient or strict)"
            )),
        }
    }
}

impl fmt::Display for CoercionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lenient => f.write_str("lenient"),
            Self::Strict => f.write_str("strict"),
        }
    }
}

/// Arithmetic mean; `0.0` for an empty input.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Σ(value·weight) / Σ(weight).
///
/// Returns `0.0` when the inputs differ in length, either is empty, or the
/// weights sum to exactly zero.
#[must_use]
pub fn weighted_average(values: &[f64], weights: &[f64]) -> f64 {
    if values.is_empty() || weights.is_empty() || values.len() != weights.len() {
        return 0.0;
    }
    let weight_sum: f64 = weights.iter().sum();
    if weight_sum == 0.0 {
        return 0.0;
    }
    let weighted_sum: f64 = values.iter().zip(weights).map(|(v, w)| v * w).sum();
    weighted_sum / weight_sum
}

/// Sum of all values; an empty slice sums to positive zero.
#[must_use]
pub fn total(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc, value| acc + value)
}

fn group_by_year(values: &[f64], years: &[i64]) -> BTreeMap<i64, Vec<f64>> {
    let mut groups: BTreeMap<i64, Vec<f64>> = BTreeMap::new();
    for (value, year) in values.iter().zip(years) {
        groups.entry(*year).or_default().push(*value);
    }
    groups
}

/// Mean of the values recorded for each year.
///
/// Years without entries are absent from the result.
#[must_use]
pub fn group_average_by_year(values: &[f64], years: &[i64]) -> PerYear {
    group_by_year(values, years)
        .into_iter()
        .map(|(year, group)| (year, average(&group)))
        .collect()
}

/// Sum of the values recorded for each year.
///
/// Years without entries are absent from the result.
#[must_use]
pub fn group_total_by_year(values: &[f64], years: &[i64]) -> PerYear {
    group_by_year(values, years)
        .into_iter()
        .map(|(year, group)| (year, total(&group)))
        .collect()
}

/// Coerce a document field to a float.
///
/// Integers and floats convert directly, text is parsed as is. Booleans,
/// missing fields, unparsable text and non-finite numbers yield `None`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn parse_numeric_field(doc: &Document, field: &str) -> Option<f64> {
    let value = match doc.get(field)? {
        FieldValue::Int(value) => *value as f64,
        FieldValue::Float(value) => *value,
        FieldValue::Text(text) => text.parse::<f64>().ok()?,
        FieldValue::Bool(_) => return None,
    };
    value.is_finite().then_some(value)
}

/// Coerce a document field to an integer.
///
/// Floats are accepted only when they carry no fractional part; text must
/// parse as an integer without surrounding whitespace.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn parse_integer_field(doc: &Document, field: &str) -> Option<i64> {
    match doc.get(field)? {
        FieldValue::Int(value) => Some(*value),
        FieldValue::Float(value)
            if value.is_finite()
                && value.fract() == 0.0
                && value.abs() < 9_007_199_254_740_992.0 =>
        {
            Some(*value as i64)
        }
        FieldValue::Text(text) => text.parse::<i64>().ok(),
        FieldValue::Float(_) | FieldValue::Bool(_) => None,
    }
}

fn display_name(doc: &Document) -> String {
    doc.name().unwrap_or_else(|| "<unnamed>".to_string())
}

/// One numeric field across a snapshot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    /// Coerced values in snapshot order
    pub values: Vec<f64>,
    /// Names of records that were dropped
    pub skipped: Vec<String>,
}

/// One numeric field paired with the year of each record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct YearSeries {
    /// Coerced values in snapshot order
    pub values: Vec<f64>,
    /// Year of each value
    pub years: Vec<i64>,
    /// Names of records that were dropped
    pub skipped: Vec<String>,
}

/// Values with a weight per record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightedSeries {
    /// Coerced values in snapshot order
    pub values: Vec<f64>,
    /// Weight of each value
    pub weights: Vec<f64>,
    /// Names of records that were dropped
    pub skipped: Vec<String>,
}

/// Extract one numeric field from every record.
#[must_use]
pub fn series(snapshot: &[Document], field: CourseField) -> Series {
    let mut out = Series::default();
    for doc in snapshot {
        match parse_numeric_field(doc, field.as_str()) {
            Some(value) => out.values.push(value),
            None => out.skipped.push(display_name(doc)),
        }
    }
    out
}

/// Extract a numeric field together with each record's year.
///
/// A record is dropped when either field fails to coerce.
#[must_use]
pub fn series_by_year(snapshot: &[Document], field: CourseField) -> YearSeries {
    let mut out = YearSeries::default();
    for doc in snapshot {
        let value = parse_numeric_field(doc, field.as_str());
        let year = parse_integer_field(doc, CourseField::Year.as_str());
        match (value, year) {
            (Some(value), Some(year)) => {
                out.values.push(value);
                out.years.push(year);
            }
            _ => out.skipped.push(display_name(doc)),
        }
    }
    out
}

/// Extract a numeric field weighted by another numeric field.
///
/// A record is dropped when either field fails to coerce.
#[must_use]
pub fn weighted_series(
    snapshot: &[Document],
    field: CourseField,
    weight_field: CourseField,
) -> WeightedSeries {
    let mut out = WeightedSeries::default();
    for doc in snapshot {
        let value = parse_numeric_field(doc, field.as_str());
        let weight = parse_numeric_field(doc, weight_field.as_str());
        match (value, weight) {
            (Some(value), Some(weight)) => {
                out.values.push(value);
                out.weights.push(weight);
            }
            _ => out.skipped.push(display_name(doc)),
        }
    }
    out
}
