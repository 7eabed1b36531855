//! Error type shared by every table engine.

use thiserror::Error;

/// Errors raised at the mutation and construction boundaries.
///
/// Lookups and removals are total and never produce one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// `put` was handed an absent (empty) key or value. The table is left untouched.
    #[error("invalid argument: {field} cannot be absent")]
    InvalidArgument {
        /// Which field was missing: `"key"` or `"value"`.
        field: &'static str,
    },

    /// A `TableConfig` failed validation.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Human-readable description of the rejected setting.
        message: String,
    },
}

impl TableError {
    pub(crate) fn absent(field: &'static str) -> Self {
        TableError::InvalidArgument { field }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        TableError::InvalidConfig {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TableError>;
