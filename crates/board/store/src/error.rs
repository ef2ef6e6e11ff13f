use board_types::WorkItemId;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-layer errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("item not found: {0}")]
    NotFound(WorkItemId),

    #[error("version conflict on item {0}")]
    Conflict(WorkItemId),

    #[error("backend error: {0}")]
    Backend(String),
}
