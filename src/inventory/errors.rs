//! Inventory error types.
//!
//! The store distinguishes load/save failures (propagated) from
//! malformed rows during lenient loads (skipped, never surfaced here)
//! and from not-found on update/delete (a boolean, not an error).

use thiserror::Error;

/// Result type for inventory operations
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Errors produced by the inventory store and its format codecs
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Disk I/O failure during load or save
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write failure (whole-file, not a skipped row)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed JSON document (fails the whole load)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A numeric field received a non-coercible value.
    ///
    /// Produced by the console and web surfaces before input reaches
    /// the store; the store itself never sees the bad value.
    #[error("invalid value for '{field}': {value:?}")]
    InvalidField {
        field: &'static str,
        value: String,
    },
}

impl InventoryError {
    /// Build the canonical coercion failure for a named field.
    pub fn invalid_field(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            value: value.into(),
        }
    }
}
