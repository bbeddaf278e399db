//! Field-keyed row record

use std::collections::HashMap;

use chrono::DateTime;
use chrono::Utc;

use super::Schema;
use super::Value;
use crate::error::FieldError;

/// Field values of a row, keyed by field name.
pub type FieldMap = HashMap<String, Value>;

/// One data row of a sheet, keyed by field name.
///
/// Besides its values a record knows where it came from:
/// - `index` is the 0-based position among data rows (headers excluded)
/// - `row_id` is the 1-based absolute row in the sheet, `index + num_headers + 1`
///
/// Records are snapshots. Changing a value yields a new record via
/// [`RowRecord::set`]; writing it back goes through the wrapper.
///
/// # Example
///
/// ```
/// use sheet_wrapper_lib::mapper::to_row_records;
/// use sheet_wrapper_lib::model::{Schema, Value};
///
/// let schema = Schema::parse("name, qty", 1).unwrap();
/// let table = vec![
///     vec![Value::from("name"), Value::from("qty")],
///     vec![Value::from("bolt"), Value::from(40)],
/// ];
/// let records = to_row_records(&table, &schema);
///
/// assert_eq!(records[0].row_id(), 2);
/// assert_eq!(records[0].get_string("name").unwrap(), Some("bolt"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RowRecord {
    pub(crate) fields: FieldMap,
    pub(crate) index: usize,
    pub(crate) row_id: usize,
}

impl RowRecord {
    /// Creates a record for the data row at 0-based `index`.
    pub fn new(fields: FieldMap, index: usize, num_headers: usize) -> Self {
        Self {
            fields,
            index,
            row_id: index + num_headers + 1,
        }
    }

    // =========================================================================
    // Position accessors
    // =========================================================================

    /// Returns the 0-based position among data rows.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the 1-based absolute row id.
    pub fn row_id(&self) -> usize {
        self.row_id
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// Consumes the record, returning its field values.
    pub fn into_fields(self) -> FieldMap {
        self.fields
    }

    /// Returns the values in schema order.
    pub fn to_values(&self, schema: &Schema) -> Vec<Value> {
        crate::mapper::to_row_values(&self.fields, schema)
    }

    /// Returns a copy of this record with one field replaced.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    // =========================================================================
    // Typed getters
    //
    // Return Err if field is missing or wrong type.
    // Return Ok(None) only if the field exists and is Value::Null.
    // =========================================================================

    /// Gets a string field value.
    pub fn get_string(&self, field: &str) -> Result<Option<&str>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(FieldError::type_mismatch(
                field,
                "string",
                other.type_name(),
            )),
        }
    }

    /// Gets a numeric field value.
    pub fn get_number(&self, field: &str) -> Result<Option<f64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => Ok(Some(*n)),
            Some(other) => Err(FieldError::type_mismatch(
                field,
                "number",
                other.type_name(),
            )),
        }
    }

    /// Gets a boolean field value.
    pub fn get_bool(&self, field: &str) -> Result<Option<bool>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(FieldError::type_mismatch(field, "bool", other.type_name())),
        }
    }

    /// Gets a date field value.
    ///
    /// Text cells holding an RFC 3339 timestamp are accepted as dates.
    pub fn get_date(&self, field: &str) -> Result<Option<DateTime<Utc>>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Date(d)) => Ok(Some(*d)),
            Some(Value::String(s)) => DateTime::parse_from_rfc3339(s)
                .map(|d| Some(d.with_timezone(&Utc)))
                .map_err(|_| FieldError::type_mismatch(field, "date", "string")),
            Some(other) => Err(FieldError::type_mismatch(field, "date", other.type_name())),
        }
    }
}

impl AsRef<FieldMap> for RowRecord {
    fn as_ref(&self) -> &FieldMap {
        &self.fields
    }
}
