//! Spreadsheet host error types

use crate::host::RangeRef;

/// Errors reported by a spreadsheet host implementation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HostError {
    /// A host call failed.
    #[error("{operation} failed: {message}")]
    Call {
        /// Name of the host operation (e.g. `hide_rows`).
        operation: &'static str,
        /// Host-provided failure message.
        message: String,
    },

    /// The requested range lies outside what the host accepts.
    #[error("Invalid range {0}")]
    InvalidRange(RangeRef),
}

impl HostError {
    /// Creates a new call failure.
    pub fn call(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Call {
            operation,
            message: message.into(),
        }
    }

    /// Returns the failed operation name, if this is a call failure.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Self::Call { operation, .. } => Some(operation),
            Self::InvalidRange(_) => None,
        }
    }
}
