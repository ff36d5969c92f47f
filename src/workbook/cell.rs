//! Cell values as the audit sees them.

use std::fmt;

use calamine::Data;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// The logical content of one spreadsheet cell.
///
/// Spreadsheets store dates as numbers with a date style; `calamine` resolves
/// the style, so a [`Cell::Date`] is only produced for cells that are
/// formatted as dates in the source file.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// No value.
    Empty,
    /// Free text, stored verbatim.
    Text(String),
    /// A numeric value.
    Number(f64),
    /// A boolean value.
    Bool(bool),
    /// A date or date-time value.
    Date(NaiveDateTime),
}

impl Cell {
    /// Creates a text cell.
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// Creates a date cell at midnight of the given day.
    pub fn date(date: NaiveDate) -> Self {
        Cell::Date(date.and_time(NaiveTime::MIN))
    }

    /// Returns true for absent values and whitespace-only text.
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(value) => value.trim().is_empty(),
            _ => false,
        }
    }

    /// Returns the text content if this is a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(value) => write!(f, "{}", value),
            Cell::Number(value) => write!(f, "{}", value),
            Cell::Bool(value) => write!(f, "{}", value),
            Cell::Date(value) if value.time() == NaiveTime::MIN => {
                write!(f, "{}", value.format("%Y-%m-%d"))
            }
            Cell::Date(value) => write!(f, "{}", value.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => Cell::Empty,
            Data::String(value) => Cell::Text(value.clone()),
            Data::Int(value) => Cell::Number(*value as f64),
            Data::Float(value) => Cell::Number(*value),
            Data::Bool(value) => Cell::Bool(*value),
            Data::DateTime(value) => value
                .as_datetime()
                .map(Cell::Date)
                .unwrap_or(Cell::Number(value.as_f64())),
            Data::DateTimeIso(value) => parse_iso_datetime(value)
                .map(Cell::Date)
                .unwrap_or_else(|| Cell::Text(value.clone())),
            Data::DurationIso(value) => Cell::Text(value.clone()),
            Data::Error(err) => Cell::Text(err.to_string()),
        }
    }
}

/// Parses the ISO forms used by ODS files and by hand-typed date text.
pub(crate) fn parse_iso_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}
