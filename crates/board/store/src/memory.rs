//! In-memory reference implementation of the entity store.
//!
//! This adapter is deterministic and test-friendly. Production deployments
//! should use a transactional backend for source-of-truth data.

use crate::traits::{EntityPatch, EntityStore};
use crate::{StoreError, StoreResult};
use async_trait::async_trait;
use board_types::{EntityKind, WorkItem, WorkItemId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

/// In-memory entity store adapter.
#[derive(Default)]
pub struct MemoryEntityStore {
    items: RwLock<HashMap<WorkItemId, WorkItem>>,
    fail_next_commit: AtomicBool,
}

impl MemoryEntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with an item, as the out-of-scope CRUD flows would.
    pub fn insert(&self, item: WorkItem) -> StoreResult<()> {
        let mut guard = self
            .items
            .write()
            .map_err(|_| StoreError::Backend("items lock poisoned".to_string()))?;
        guard.insert(item.id.clone(), item);
        Ok(())
    }

    /// Read one item back, for test assertions.
    pub fn get(&self, id: &WorkItemId) -> StoreResult<Option<WorkItem>> {
        let guard = self
            .items
            .read()
            .map_err(|_| StoreError::Backend("items lock poisoned".to_string()))?;
        Ok(guard.get(id).cloned())
    }

    /// Make the next `run_atomically` fail before writing anything.
    ///
    /// Fault-injection knob for exercising the storage-failure path.
    pub fn fail_next_commit(&self) {
        self.fail_next_commit.store(true, Ordering::SeqCst);
    }

    fn apply_patch(item: &mut WorkItem, patch: &EntityPatch) {
        item.state = patch.state;
        item.position = patch.position;
        item.version += 1;
        item.last_modified_by = Some(patch.modified_by.clone());
        item.last_transition_at = Some(patch.transition_at);
    }
}

#[async_trait]
impl EntityStore for MemoryEntityStore {
    async fn find_many(&self, ids: &[WorkItemId]) -> StoreResult<Vec<WorkItem>> {
        let guard = self
            .items
            .read()
            .map_err(|_| StoreError::Backend("items lock poisoned".to_string()))?;
        Ok(ids.iter().filter_map(|id| guard.get(id).cloned()).collect())
    }

    async fn update(&self, id: &WorkItemId, patch: EntityPatch) -> StoreResult<()> {
        let mut guard = self
            .items
            .write()
            .map_err(|_| StoreError::Backend("items lock poisoned".to_string()))?;
        let item = guard
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        if item.version != patch.expected_version {
            return Err(StoreError::Conflict(id.clone()));
        }
        Self::apply_patch(item, &patch);
        Ok(())
    }

    async fn run_atomically(&self, patches: Vec<EntityPatch>) -> StoreResult<()> {
        if self.fail_next_commit.swap(false, Ordering::SeqCst) {
            return Err(StoreError::Backend("injected commit failure".to_string()));
        }

        let mut guard = self
            .items
            .write()
            .map_err(|_| StoreError::Backend("items lock poisoned".to_string()))?;

        // Check every patch before applying any, so the batch lands whole
        // or not at all.
        for patch in &patches {
            let item = guard
                .get(&patch.id)
                .ok_or_else(|| StoreError::NotFound(patch.id.clone()))?;
            if item.version != patch.expected_version {
                return Err(StoreError::Conflict(patch.id.clone()));
            }
        }

        for patch in &patches {
            if let Some(item) = guard.get_mut(&patch.id) {
                Self::apply_patch(item, patch);
            }
        }
        Ok(())
    }

    async fn list_by_kind(&self, kind: EntityKind) -> StoreResult<Vec<WorkItem>> {
        let guard = self
            .items
            .read()
            .map_err(|_| StoreError::Backend("items lock poisoned".to_string()))?;
        Ok(guard
            .values()
            .filter(|item| item.kind() == kind)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_types::{PartyId, ProjectState, ProposalState};
    use chrono::Utc;

    fn make_patch(id: &str, expected_version: u64, state: ProjectState, pos: u32) -> EntityPatch {
        EntityPatch {
            id: WorkItemId::new(id),
            expected_version,
            state: state.into(),
            position: pos,
            modified_by: PartyId::new("contractor-1"),
            transition_at: Utc::now(),
        }
    }

    fn seeded_store() -> MemoryEntityStore {
        let store = MemoryEntityStore::new();
        store
            .insert(WorkItem::new(ProjectState::Draft).with_id("p1"))
            .unwrap();
        store
            .insert(WorkItem::new(ProjectState::ClientPending).with_id("p2"))
            .unwrap();
        store
            .insert(WorkItem::new(ProposalState::Sent).with_id("q1"))
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_find_many_skips_missing() {
        let store = seeded_store();
        let found = store
            .find_many(&[WorkItemId::new("p1"), WorkItemId::new("ghost")])
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, WorkItemId::new("p1"));
    }

    #[tokio::test]
    async fn test_update_bumps_version_and_audit_fields() {
        let store = seeded_store();
        store
            .update(
                &WorkItemId::new("p1"),
                make_patch("p1", 0, ProjectState::ClientPending, 3),
            )
            .await
            .unwrap();

        let item = store.get(&WorkItemId::new("p1")).unwrap().unwrap();
        assert_eq!(item.state, ProjectState::ClientPending.into());
        assert_eq!(item.position, 3);
        assert_eq!(item.version, 1);
        assert!(item.last_transition_at.is_some());
        assert_eq!(item.last_modified_by, Some(PartyId::new("contractor-1")));
    }

    #[tokio::test]
    async fn test_update_stale_version_conflicts() {
        let store = seeded_store();
        let result = store
            .update(
                &WorkItemId::new("p1"),
                make_patch("p1", 7, ProjectState::ClientPending, 0),
            )
            .await;
        assert!(matches!(result, Err(StoreError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_atomic_batch_applies_all() {
        let store = seeded_store();
        store
            .run_atomically(vec![
                make_patch("p1", 0, ProjectState::ClientPending, 0),
                make_patch("p2", 0, ProjectState::ContractorReviewing, 1),
            ])
            .await
            .unwrap();

        assert_eq!(
            store.get(&WorkItemId::new("p1")).unwrap().unwrap().state,
            ProjectState::ClientPending.into()
        );
        assert_eq!(
            store.get(&WorkItemId::new("p2")).unwrap().unwrap().state,
            ProjectState::ContractorReviewing.into()
        );
    }

    #[tokio::test]
    async fn test_atomic_batch_rejects_whole_on_stale_version() {
        let store = seeded_store();
        let result = store
            .run_atomically(vec![
                make_patch("p1", 0, ProjectState::ClientPending, 0),
                make_patch("p2", 99, ProjectState::ContractorReviewing, 1),
            ])
            .await;
        assert!(matches!(result, Err(StoreError::Conflict(_))));

        // Nothing from the batch landed, including the valid patch
        let p1 = store.get(&WorkItemId::new("p1")).unwrap().unwrap();
        assert_eq!(p1.state, ProjectState::Draft.into());
        assert_eq!(p1.version, 0);
    }

    #[tokio::test]
    async fn test_atomic_batch_rejects_whole_on_missing_id() {
        let store = seeded_store();
        let result = store
            .run_atomically(vec![
                make_patch("p1", 0, ProjectState::ClientPending, 0),
                make_patch("ghost", 0, ProjectState::ClientPending, 1),
            ])
            .await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));

        let p1 = store.get(&WorkItemId::new("p1")).unwrap().unwrap();
        assert_eq!(p1.version, 0);
    }

    #[tokio::test]
    async fn test_injected_commit_failure() {
        let store = seeded_store();
        store.fail_next_commit();
        let result = store
            .run_atomically(vec![make_patch("p1", 0, ProjectState::ClientPending, 0)])
            .await;
        assert!(matches!(result, Err(StoreError::Backend(_))));

        // Next commit succeeds again
        store
            .run_atomically(vec![make_patch("p1", 0, ProjectState::ClientPending, 0)])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_list_by_kind() {
        let store = seeded_store();
        let projects = store.list_by_kind(EntityKind::Project).await.unwrap();
        assert_eq!(projects.len(), 2);
        let proposals = store.list_by_kind(EntityKind::Proposal).await.unwrap();
        assert_eq!(proposals.len(), 1);
    }
}
