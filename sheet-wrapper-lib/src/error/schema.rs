//! Schema validation errors

/// Error raised when a field list cannot be used as a schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// The same field name appears more than once.
    #[error("Duplicate field '{field}' in schema")]
    DuplicateField { field: String },

    /// A field name is empty (after trimming).
    #[error("Empty field name at column {position}")]
    EmptyField { position: usize },
}

impl SchemaError {
    /// Creates a new duplicate field error.
    pub fn duplicate(field: impl Into<String>) -> Self {
        Self::DuplicateField {
            field: field.into(),
        }
    }
}
