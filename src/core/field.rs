//! Field value types and their natural ordering

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;

/// The semantic type of a field, as declared by an entity schema.
///
/// The kind decides how values are compared when sorting and when a
/// comparison filter (`>`, `<=`, ...) is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Free text, compared lexicographically on the raw value
    Text,
    /// Integer or decimal amount
    Number,
    /// Calendar date or ISO-8601 timestamp
    Date,
    /// True/false flag
    Boolean,
    /// Ordered sequence of strings (e.g. `targetProperties`)
    List,
}

/// A polymorphic field value that can hold different types
///
/// Decoded strings stay `String`, timestamps included: their text is what
/// search and text filters see. Date semantics come from `FieldKind::Date`
/// through [`FieldValue::as_datetime`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    DateTime(DateTime<Utc>),
    List(Vec<String>),
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the value as a number, parsing numeric strings
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Float(f) => Some(*f),
            FieldValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Get the value as a boolean if possible
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the value as a timestamp, parsing RFC 3339 and `YYYY-MM-DD` strings
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::DateTime(dt) => Some(*dt),
            FieldValue::String(s) => parse_timestamp(s),
            FieldValue::Integer(millis) => Utc.timestamp_millis_opt(*millis).single(),
            _ => None,
        }
    }

    /// Get the list if this is a List
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(v) => Some(v),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// The scope entries carried by this value.
    ///
    /// Lists yield their elements, a non-empty string is a single entry and
    /// anything else (null, empty string) carries no scope at all.
    pub fn scope_entries(&self) -> Vec<&str> {
        match self {
            FieldValue::List(v) => v.iter().map(String::as_str).collect(),
            FieldValue::String(s) if !s.is_empty() => vec![s.as_str()],
            _ => Vec::new(),
        }
    }

    /// Text used by the search matcher. Null renders as the empty string.
    pub fn display_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Null => Cow::Borrowed(""),
            FieldValue::String(s) => Cow::Borrowed(s),
            FieldValue::Boolean(b) => Cow::Owned(b.to_string()),
            FieldValue::Integer(i) => Cow::Owned(i.to_string()),
            FieldValue::Float(f) => Cow::Owned(f.to_string()),
            FieldValue::DateTime(dt) => Cow::Owned(dt.to_rfc3339()),
            FieldValue::List(v) => Cow::Owned(v.join(" ")),
        }
    }

    /// Compare two values under the natural ordering of `kind`.
    ///
    /// Missing or unconvertible values order as the kind's zero value:
    /// `""`, `0`, the Unix epoch, `false`, or the empty list.
    pub fn cmp_as(&self, other: &FieldValue, kind: FieldKind) -> Ordering {
        match kind {
            FieldKind::Text => self.display_text().cmp(&other.display_text()),
            FieldKind::Number => {
                let a = self.as_number().unwrap_or(0.0);
                let b = other.as_number().unwrap_or(0.0);
                a.total_cmp(&b)
            }
            FieldKind::Date => {
                let a = self.as_datetime().map_or(0, |dt| dt.timestamp_millis());
                let b = other.as_datetime().map_or(0, |dt| dt.timestamp_millis());
                a.cmp(&b)
            }
            FieldKind::Boolean => self
                .as_bool()
                .unwrap_or(false)
                .cmp(&other.as_bool().unwrap_or(false)),
            FieldKind::List => self.list_items().cmp(&other.list_items()),
        }
    }

    /// Equality under the semantics of `kind`, used by `Eq`/`Ne` filters.
    pub fn eq_as(&self, other: &FieldValue, kind: FieldKind) -> bool {
        match kind {
            // Text equality is exact; numbers and dates compare by value
            FieldKind::Text => self.display_text() == other.display_text(),
            _ => self.cmp_as(other, kind) == Ordering::Equal,
        }
    }

    fn list_items(&self) -> Vec<&str> {
        match self {
            FieldValue::List(v) => v.iter().map(String::as_str).collect(),
            FieldValue::Null => Vec::new(),
            FieldValue::String(s) => vec![s.as_str()],
            _ => Vec::new(),
        }
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::DateTime(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(value: Vec<&str>) -> Self {
        FieldValue::List(value.into_iter().map(String::from).collect())
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}
