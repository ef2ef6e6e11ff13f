//! Engine error taxonomy
//!
//! Validation failures are detected before any write, so they never need
//! compensation. Storage failures after validation are surfaced as-is and
//! are safe to retry verbatim since nothing was written. Notification
//! failures never appear here at all: the primary operation has already
//! durably succeeded by the time fan-out runs, so those are logged only.

use crate::entity::WorkItemId;
use crate::state::WorkState;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Why the guard denied one transition request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    /// The actor is neither the item's client nor its contractor
    AccessDenied,
    /// The requested (from, to) pair is not legal for this actor's role
    InvalidTransition,
    /// The source state is absorbing; nothing leaves it
    TerminalState,
}

impl std::fmt::Display for DenialReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AccessDenied => write!(f, "access_denied"),
            Self::InvalidTransition => write!(f, "invalid_transition"),
            Self::TerminalState => write!(f, "terminal_state"),
        }
    }
}

/// One denied item within a rejected batch.
///
/// The batch fails as a whole, but the response carries every denial so a
/// UI can explain exactly which cards were refused and why.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Denial {
    pub id: WorkItemId,
    pub from: WorkState,
    pub to: WorkState,
    pub reason: DenialReason,
}

/// Errors returned by the reorder coordinator
#[derive(Debug, Error)]
pub enum EngineError {
    /// No resolvable caller identity; retrying without re-authenticating
    /// cannot succeed
    #[error("no resolvable caller identity")]
    Unauthenticated,

    /// The batch was empty
    #[error("reorder batch is empty")]
    EmptyBatch,

    /// The same item appeared more than once in one batch
    #[error("duplicate item in batch: {0}")]
    DuplicateItem(WorkItemId),

    /// One or more referenced ids do not exist; the caller's view is stale
    #[error("{} item(s) not found", .ids.len())]
    NotFound { ids: Vec<WorkItemId> },

    /// At least one requested transition failed the guard. Nothing was
    /// applied, including the otherwise-valid items in the same batch.
    #[error("{} transition(s) denied", .denials.len())]
    Forbidden { denials: Vec<Denial> },

    /// Another writer mutated an item between the snapshot read and the
    /// commit; the caller should refresh and retry
    #[error("item {0} was modified concurrently")]
    Conflict(WorkItemId),

    /// The atomic commit failed at the storage layer; nothing was written
    /// and the batch is safe to retry verbatim
    #[error("storage failure: {0}")]
    Storage(String),
}
