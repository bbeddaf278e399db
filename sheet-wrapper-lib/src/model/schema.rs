//! Ordered field list plus header-row count

use std::collections::HashSet;

use crate::error::SchemaError;

/// Column layout of a sheet.
///
/// Field order is column order: the first field is column 1. The first
/// `num_headers` rows of the sheet are headers and never become records.
///
/// A `Schema` can only be built with unique, non-empty field names.
///
/// # Example
///
/// ```
/// use sheet_wrapper_lib::model::Schema;
///
/// let schema = Schema::parse("name, qty, done", 1).unwrap();
/// assert_eq!(schema.len(), 3);
/// assert_eq!(schema.first_row(), 2);
/// assert!(Schema::new(["a", "a"], 0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<String>,
    num_headers: usize,
}

impl Schema {
    /// Creates a schema from an ordered list of field names.
    pub fn new<I, S>(fields: I, num_headers: usize) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();

        let mut seen = HashSet::with_capacity(fields.len());
        for (i, field) in fields.iter().enumerate() {
            if field.is_empty() {
                return Err(SchemaError::EmptyField { position: i + 1 });
            }
            if !seen.insert(field.as_str()) {
                return Err(SchemaError::duplicate(field.as_str()));
            }
        }

        Ok(Self {
            fields,
            num_headers,
        })
    }

    /// Creates a schema from a comma-separated field list (`"a, b, c"`).
    ///
    /// Whitespace around each name is trimmed.
    pub fn parse(fields: &str, num_headers: usize) -> Result<Self, SchemaError> {
        if fields.trim().is_empty() {
            return Self::new(Vec::<String>::new(), num_headers);
        }
        Self::new(fields.split(',').map(str::trim), num_headers)
    }

    /// Returns the field names in column order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Returns the number of fields (columns).
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the number of header rows.
    pub fn num_headers(&self) -> usize {
        self.num_headers
    }

    /// Returns the 1-based id of the first data row.
    pub fn first_row(&self) -> usize {
        self.num_headers + 1
    }

    /// Returns the 0-based position of `field`, if present.
    pub fn position(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_names() {
        let schema = Schema::parse("A, B ,C", 1).unwrap();
        assert_eq!(schema.fields(), ["A", "B", "C"]);
        assert_eq!(schema.num_headers(), 1);
    }

    #[test]
    fn test_duplicate_field_rejected() {
        assert_eq!(
            Schema::new(["id", "name", "id"], 0),
            Err(SchemaError::duplicate("id"))
        );
    }

    #[test]
    fn test_empty_field_rejected() {
        assert_eq!(
            Schema::parse("a,,b", 0),
            Err(SchemaError::EmptyField { position: 2 })
        );
    }

    #[test]
    fn test_empty_list_is_valid() {
        let schema = Schema::parse("  ", 2).unwrap();
        assert!(schema.is_empty());
        assert_eq!(schema.first_row(), 3);
    }
}
