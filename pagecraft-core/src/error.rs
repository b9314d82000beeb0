//! Error types for editor operations.

use thiserror::Error;

use crate::store::StoreError;

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// Errors that can occur in editor operations.
///
/// None of these are fatal: every failing operation leaves the editor state
/// as it was before the call.
#[derive(Debug, Error)]
pub enum EditorError {
    /// Element not found in the active page.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Page not found in the project.
    #[error("Page not found: {0}")]
    PageNotFound(String),

    /// The last remaining page cannot be deleted.
    #[error("Cannot delete the only page")]
    LastPage,

    /// Invalid operation or argument.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// A loaded document violates a tree or identity invariant.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Project serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Persistence failure reported by the project store.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
