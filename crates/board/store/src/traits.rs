use crate::StoreResult;
use async_trait::async_trait;
use board_types::{EntityKind, PartyId, WorkItem, WorkItemId, WorkState};
use chrono::{DateTime, Utc};

/// One pending (state, position) update plus the audit fields the engine
/// stamps on every accepted transition.
///
/// The engine never invents a position: `position` is exactly what the
/// caller supplied, accepted only after the transition passed the guard.
#[derive(Debug, Clone)]
pub struct EntityPatch {
    pub id: WorkItemId,
    /// The version the snapshot was read at; the commit is conditional on
    /// the stored row still carrying it
    pub expected_version: u64,
    pub state: WorkState,
    pub position: u32,
    pub modified_by: PartyId,
    pub transition_at: DateTime<Utc>,
}

/// Storage interface for board work items.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Read current snapshots for a set of ids in one call.
    ///
    /// Missing ids are simply absent from the result; the caller is
    /// responsible for noticing the gap.
    async fn find_many(&self, ids: &[WorkItemId]) -> StoreResult<Vec<WorkItem>>;

    /// Apply one patch to one item.
    async fn update(&self, id: &WorkItemId, patch: EntityPatch) -> StoreResult<()>;

    /// Commit a batch of patches as one atomic unit, or none of them.
    ///
    /// Every patch is checked (existence and `expected_version`) before
    /// any is applied. A version mismatch fails the whole batch with
    /// [`crate::StoreError::Conflict`].
    async fn run_atomically(&self, patches: Vec<EntityPatch>) -> StoreResult<()>;

    /// Read every item of a kind, for the board projection.
    async fn list_by_kind(&self, kind: EntityKind) -> StoreResult<Vec<WorkItem>>;
}
