//! Sheet configuration

use serde::Deserialize;

use crate::error::ConfigError;
use crate::error::SchemaError;
use crate::model::Schema;

/// Which sheet to wrap and how its columns are laid out.
///
/// Without a sheet name the wrapper uses the spreadsheet's active sheet.
///
/// Configs can be loaded from JSON. `fields` is either an array of names or a
/// single comma-separated string:
///
/// ```
/// use sheet_wrapper_lib::SheetConfig;
///
/// let config = SheetConfig::from_json(
///     r#"{ "sheetName": "Orders", "numHeaders": 1, "fields": "id, customer, total" }"#,
/// )
/// .unwrap();
/// assert_eq!(config.sheet_name(), Some("Orders"));
/// assert_eq!(config.schema().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawSheetConfig")]
pub struct SheetConfig {
    sheet_name: Option<String>,
    schema: Schema,
}

impl SheetConfig {
    /// Creates a config for the active sheet.
    pub fn new(schema: Schema) -> Self {
        Self {
            sheet_name: None,
            schema,
        }
    }

    /// Loads a config from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawSheetConfig = serde_json::from_str(json)?;
        Ok(Self::try_from(raw)?)
    }

    /// Sets the sheet name.
    pub fn with_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = Some(name.into());
        self
    }

    /// Returns the configured sheet name, if any.
    pub fn sheet_name(&self) -> Option<&str> {
        self.sheet_name.as_deref()
    }

    /// Returns the schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub(crate) fn into_parts(self) -> (Option<String>, Schema) {
        (self.sheet_name, self.schema)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSheetConfig {
    #[serde(default)]
    sheet_name: Option<String>,
    #[serde(default)]
    num_headers: usize,
    fields: FieldList,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FieldList {
    List(Vec<String>),
    Joined(String),
}

impl TryFrom<RawSheetConfig> for SheetConfig {
    type Error = SchemaError;

    fn try_from(raw: RawSheetConfig) -> Result<Self, Self::Error> {
        let schema = match raw.fields {
            FieldList::List(fields) => Schema::new(fields, raw.num_headers)?,
            FieldList::Joined(fields) => Schema::parse(&fields, raw.num_headers)?,
        };
        Ok(Self {
            sheet_name: raw.sheet_name.filter(|name| !name.is_empty()),
            schema,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_as_array() {
        let config = SheetConfig::from_json(r#"{ "fields": ["a", "b"] }"#).unwrap();
        assert_eq!(config.sheet_name(), None);
        assert_eq!(config.schema().fields(), ["a", "b"]);
        assert_eq!(config.schema().num_headers(), 0);
    }

    #[test]
    fn test_fields_as_string() {
        let config =
            SheetConfig::from_json(r#"{ "sheetName": "T", "numHeaders": 2, "fields": "A, B, C" }"#)
                .unwrap();
        assert_eq!(config.schema().fields(), ["A", "B", "C"]);
        assert_eq!(config.schema().first_row(), 3);
    }

    #[test]
    fn test_empty_sheet_name_means_active_sheet() {
        let config = SheetConfig::from_json(r#"{ "sheetName": "", "fields": "a" }"#).unwrap();
        assert_eq!(config.sheet_name(), None);
    }

    #[test]
    fn test_duplicate_fields_rejected() {
        let err = SheetConfig::from_json(r#"{ "fields": "a, b, a" }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Schema(SchemaError::DuplicateField { ref field }) if field == "a"
        ));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = SheetConfig::from_json(r#"{ "fields": 3 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_deserialize_embedded() {
        let configs: Vec<SheetConfig> =
            serde_json::from_str(r#"[{ "fields": "a" }, { "fields": ["b"] }]"#).unwrap();
        assert_eq!(configs.len(), 2);
    }
}
