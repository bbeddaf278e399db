//! Configuration loading errors

use super::SchemaError;

/// Errors that can occur while loading a sheet configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration document is not valid JSON for a sheet config.
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configured fields do not form a valid schema.
    #[error("Invalid schema in config: {0}")]
    Schema(#[from] SchemaError),
}
