//! Row input variants for write operations

use super::FieldMap;
use super::RowRecord;
use super::Schema;
use super::Value;

/// Data for a row write, given either positionally or by field name.
///
/// `Values` is written cell by cell from column 1. `Fields` is mapped
/// through the schema; on partial updates only the named fields are touched.
#[derive(Debug, Clone, PartialEq)]
pub enum RowInput {
    /// Positional cell values, column 1 first.
    Values(Vec<Value>),
    /// Field-keyed values.
    Fields(FieldMap),
}

impl RowInput {
    /// Creates positional input from anything convertible to values.
    pub fn values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::Values(values.into_iter().map(Into::into).collect())
    }

    /// Creates field-keyed input from `(field, value)` pairs.
    pub fn fields<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self::Fields(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Converts to positional values.
    ///
    /// Field input is laid out in schema order with blanks for missing
    /// fields; positional input is returned as is.
    pub fn into_row_values(self, schema: &Schema) -> Vec<Value> {
        match self {
            Self::Values(values) => values,
            Self::Fields(fields) => crate::mapper::to_row_values(&fields, schema),
        }
    }
}

impl From<Vec<Value>> for RowInput {
    fn from(values: Vec<Value>) -> Self {
        Self::Values(values)
    }
}

impl From<FieldMap> for RowInput {
    fn from(fields: FieldMap) -> Self {
        Self::Fields(fields)
    }
}

impl From<RowRecord> for RowInput {
    fn from(record: RowRecord) -> Self {
        Self::Fields(record.into_fields())
    }
}
