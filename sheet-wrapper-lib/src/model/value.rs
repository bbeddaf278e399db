//! Value enum for cell values

use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// A single spreadsheet cell value.
///
/// Hosts hand back cells as strings, numbers, booleans, dates or blanks.
/// Blank cells are represented as [`Value::Null`]; a host that reports blanks
/// as empty strings is still treated as blank by [`Value::is_empty`].
///
/// The serde form is untagged. Dates serialize as RFC 3339 strings and
/// deserialize as [`Value::String`]; text is never reinterpreted as a date.
/// [`RowRecord::get_date`](super::RowRecord::get_date) reads either form.
///
/// # Example
///
/// ```
/// use sheet_wrapper_lib::model::Value;
///
/// let name = Value::from("Widget");
/// let qty = Value::from(12);
/// let done = Value::from(true);
/// let blank = Value::Null;
/// assert!(blank.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Blank cell.
    #[default]
    Null,
    /// Boolean (checkbox) cell.
    Bool(bool),
    /// Numeric cell. Hosts do not distinguish integers from floats.
    Number(f64),
    /// Text cell.
    String(String),
    /// Date/time cell.
    Date(DateTime<Utc>),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` for null and for the empty string.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Date(_) => "date",
            Value::String(_) => "string",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::Date(d) => write!(f, "{}", d.to_rfc3339()),
            Value::String(s) => f.write_str(s),
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Number(f64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Number(v as f64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Date(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_empty_string_counts_as_blank() {
        assert!(Value::from("").is_empty());
        assert!(!Value::from("").is_null());
        assert!(!Value::from(0).is_empty());
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::String("x".to_string()));
    }

    #[test]
    fn test_deserialize_untagged() {
        let row: Vec<Value> = serde_json::from_str(r#"["a", 1.5, true, null]"#).unwrap();
        assert_eq!(
            row,
            vec![
                Value::from("a"),
                Value::Number(1.5),
                Value::Bool(true),
                Value::Null,
            ]
        );
    }

    #[test]
    fn test_timestamp_text_stays_text() {
        let value = Value::from("2024-01-01T00:00:00Z");
        let json = serde_json::to_string(&value).unwrap();
        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_date_serializes_as_rfc3339_text() {
        let date = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let json = serde_json::to_string(&Value::from(date)).unwrap();
        assert_eq!(json, r#""2024-03-01T09:30:00Z""#);

        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Value::from("2024-03-01T09:30:00Z"));
        assert_eq!(Value::from(date).type_name(), "date");
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::from(3).to_string(), "3");
        assert_eq!(Value::from("abc").to_string(), "abc");
        let date = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(Value::from(date).to_string(), "2024-03-01T00:00:00+00:00");
    }
}
