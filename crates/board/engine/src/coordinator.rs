//! Batch reorder coordinator: validate everything, then commit everything
//!
//! A drag-and-drop surface routinely submits several items at once (an
//! entire column's worth). If validation were interleaved with writes, a
//! failure partway through would leave some items transitioned and others
//! not, silently corrupting the board. So the coordinator validates the
//! whole batch against current snapshots first, then commits atomically
//! via the store, making the operation transactional at the semantic
//! level even though the guard itself knows nothing about transactions.
//!
//! Notification fan-out runs only after the commit succeeded, is awaited
//! internally so no work is orphaned at shutdown, and can never turn a
//! successful reorder into a failure.

use crate::guard::{TransitionGuard, Verdict};
use crate::notify::{ChangeNotice, NotificationSink, Notifier};
use board_store::{EntityPatch, EntityStore, StoreError};
use board_types::{
    Actor, Denial, EngineError, EngineResult, WorkItem, WorkItemId, WorkState,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

// ── Request / Receipt ────────────────────────────────────────────────

/// One item's requested (state, position) within a batch
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderRequest {
    pub id: WorkItemId,
    pub target_state: WorkState,
    pub position: u32,
}

/// One genuine transition from a committed batch
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateChange {
    pub id: WorkItemId,
    pub from: WorkState,
    pub to: WorkState,
}

/// Acknowledgement of a committed batch.
///
/// `changed` lists only genuine transitions (pure reorders are omitted),
/// giving a UI layer enough to refresh without a full re-query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderReceipt {
    pub changed: Vec<StateChange>,
}

// ── Coordinator ──────────────────────────────────────────────────────

/// The engine's single write path
#[derive(Clone)]
pub struct ReorderCoordinator {
    guard: TransitionGuard,
    store: Arc<dyn EntityStore>,
    notifier: Notifier,
}

impl ReorderCoordinator {
    pub fn new(store: Arc<dyn EntityStore>, sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            guard: TransitionGuard::new(),
            store,
            notifier: Notifier::new(sink),
        }
    }

    /// Apply a batch of (state, position) changes, all or nothing.
    ///
    /// The batch either commits in full or returns one of the structured
    /// failures in [`EngineError`] with nothing written. Partial-success
    /// lists are deliberately never returned: the caller either keeps its
    /// optimistic view or fully reverts.
    pub async fn reorder(
        &self,
        identity: Option<&Actor>,
        requests: Vec<ReorderRequest>,
    ) -> EngineResult<ReorderReceipt> {
        let actor = identity.ok_or(EngineError::Unauthenticated)?;

        if requests.is_empty() {
            return Err(EngineError::EmptyBatch);
        }
        // Two patches for one row cannot be both atomic and ordered.
        let mut seen = HashSet::new();
        for request in &requests {
            if !seen.insert(request.id.clone()) {
                return Err(EngineError::DuplicateItem(request.id.clone()));
            }
        }

        // One snapshot read for the whole batch. A missing id means the
        // caller's view is stale and must surface as an error, not a
        // partial success.
        let ids: Vec<WorkItemId> = requests.iter().map(|r| r.id.clone()).collect();
        let snapshots = self
            .store
            .find_many(&ids)
            .await
            .map_err(|e| EngineError::Storage(e.to_string()))?;
        let by_id: HashMap<WorkItemId, WorkItem> = snapshots
            .into_iter()
            .map(|item| (item.id.clone(), item))
            .collect();

        let missing: Vec<WorkItemId> = ids
            .iter()
            .filter(|id| !by_id.contains_key(*id))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(EngineError::NotFound { ids: missing });
        }

        // Guard every request before touching storage. All denials are
        // collected so the response can explain each refused card.
        let mut denials = Vec::new();
        for request in &requests {
            let item = &by_id[&request.id];
            if let Verdict::Denied(reason) =
                self.guard.evaluate(actor, item, request.target_state)
            {
                denials.push(Denial {
                    id: request.id.clone(),
                    from: item.state,
                    to: request.target_state,
                    reason,
                });
            }
        }
        if !denials.is_empty() {
            return Err(EngineError::Forbidden { denials });
        }

        // Commit, conditional on the versions the snapshots were read at.
        let now = Utc::now();
        let patches: Vec<EntityPatch> = requests
            .iter()
            .map(|request| {
                let item = &by_id[&request.id];
                EntityPatch {
                    id: request.id.clone(),
                    expected_version: item.version,
                    state: request.target_state,
                    position: request.position,
                    modified_by: actor.id.clone(),
                    transition_at: now,
                }
            })
            .collect();

        self.store
            .run_atomically(patches)
            .await
            .map_err(|e| match e {
                StoreError::Conflict(id) => EngineError::Conflict(id),
                StoreError::NotFound(id) => EngineError::NotFound { ids: vec![id] },
                StoreError::Backend(msg) => EngineError::Storage(msg),
            })?;

        // Genuine transitions only; pure reorders notify nobody.
        let changes: Vec<ChangeNotice> = requests
            .iter()
            .filter_map(|request| {
                let item = &by_id[&request.id];
                (item.state != request.target_state).then(|| ChangeNotice {
                    item: item.clone(),
                    from: item.state,
                    to: request.target_state,
                })
            })
            .collect();

        tracing::info!(
            actor = %actor.id,
            batch = requests.len(),
            transitions = changes.len(),
            "Reorder batch committed"
        );

        let receipt = ReorderReceipt {
            changed: changes
                .iter()
                .map(|c| StateChange {
                    id: c.item.id.clone(),
                    from: c.from,
                    to: c.to,
                })
                .collect(),
        };

        // Fire-and-forget from the caller's perspective, but drained here
        // so a mid-shutdown process never orphans dispatches. Outcomes are
        // logged inside the notifier and do not affect the result.
        self.notifier.notify_all(actor, &changes).await;

        Ok(receipt)
    }
}
