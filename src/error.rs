//! Error types for history-state operations.
//!
//! This module defines [`HistoryStateError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `HistoryStateError` for domain-specific errors that need distinct
//!   handling
//! - Use `anyhow::Error` (via `HistoryStateError::Other`) for unexpected
//!   errors from host integrations
//! - Binding and writing either fully succeed or fail with no partial state

use thiserror::Error;

/// Core error type for history-state operations.
#[derive(Debug, Error)]
pub enum HistoryStateError {
    /// A state cell was bound with an empty slot key.
    #[error("History state key must be a non-empty string")]
    EmptyKey,

    /// A value could not be encoded for storage in the state bag.
    #[error("Failed to encode value for key '{key}': {source}")]
    Encode {
        key: String,
        source: serde_json::Error,
    },

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for history-state operations.
pub type Result<T> = std::result::Result<T, HistoryStateError>;
