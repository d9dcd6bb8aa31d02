//! Error types for collection operations
//!
//! Provides unified error handling for all mutation and import operations.

use thiserror::Error;

use crate::types::{EntryId, GroupId};

/// Errors that can occur while mutating or importing the collection.
///
/// None of these are fatal: a failed operation leaves the collection
/// untouched and the caller decides whether to log or surface it.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Index out of range (or the degenerate from == to reorder)
    #[error("invalid index: {index} (collection length {len})")]
    InvalidIndex { index: usize, len: usize },

    /// Semantically forbidden transition, e.g. merging a folder into a folder
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// Referenced entry id absent from the collection
    #[error("entry not found: {0}")]
    NotFound(EntryId),

    /// Referenced group id has no folder marker
    #[error("folder not found: {0}")]
    FolderNotFound(GroupId),

    /// Import payload failed to parse or validate
    #[error("malformed import: {0}")]
    MalformedImport(String),
}

/// Result type alias for collection operations
pub type StoreResult<T> = Result<T, StoreError>;
