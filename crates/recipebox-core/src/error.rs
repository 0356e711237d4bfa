// ABOUTME: Error type returned by recipe store operations.
// ABOUTME: Separates user-facing validation and parse failures from storage failures.

use thiserror::Error;
use ulid::Ulid;

use crate::storage::StorageError;

/// Errors that can occur when reading or mutating the recipe collection.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("recipe not found: {0}")]
    NotFound(Ulid),

    #[error("position {position} is out of range (collection has {len} recipes)")]
    PositionOutOfRange { position: usize, len: usize },

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    /// True for errors caused by the caller's input rather than the backend.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            StoreError::Validation(_)
                | StoreError::Parse(_)
                | StoreError::NotFound(_)
                | StoreError::PositionOutOfRange { .. }
        )
    }
}
