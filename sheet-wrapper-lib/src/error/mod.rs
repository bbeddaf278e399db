//! Error types

mod config;
mod field;
mod host;
mod schema;

pub use config::*;
pub use field::*;
pub use host::*;
pub use schema::*;

/// Top-level error for sheet wrapper operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The configured field list is not a valid schema.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The sheet configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The spreadsheet host rejected or failed a call.
    #[error(transparent)]
    Host(#[from] HostError),

    /// A typed field accessor failed.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// No sheet with the configured name exists in the spreadsheet.
    #[error("Sheet '{0}' not found")]
    SheetNotFound(String),

    /// A data-row operation addressed one of the header rows.
    #[error("Row {row_id} is a header row (sheet has {num_headers} header rows)")]
    HeaderRow { row_id: usize, num_headers: usize },
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
