//! Work items: the records the board reorders
//!
//! A `WorkItem` is a snapshot of one project or proposal: its state, its
//! position within the column sharing that state, the two owning parties,
//! and the audit fields the engine stamps on every accepted transition.
//!
//! Items are created by out-of-scope CRUD flows in an initial state and
//! mutated exclusively through the reorder coordinator after that. The
//! `version` counter backs the store's optimistic concurrency check.

use crate::state::{EntityKind, WorkState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Identifiers ──────────────────────────────────────────────────────

/// Unique identifier for a work item
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WorkItemId(pub String);

impl WorkItemId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn short(&self) -> &str {
        &self.0[..8.min(self.0.len())]
    }
}

impl std::fmt::Display for WorkItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a party (a client or contractor account)
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartyId(pub String);

impl PartyId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for PartyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Work Item ────────────────────────────────────────────────────────

/// A project or proposal as the board sees it
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkItem {
    /// Unique identifier, immutable
    pub id: WorkItemId,
    /// Current lifecycle state; the variant's kind is the item's kind
    pub state: WorkState,
    /// Order within the column of items sharing `state`. Caller-supplied
    /// on reorder, not required to be contiguous.
    pub position: u32,
    /// The client party, if one is attached
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_client_id: Option<PartyId>,
    /// The contractor party; unset until the project is assigned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_contractor_id: Option<PartyId>,
    /// Optimistic concurrency counter, incremented on every accepted patch
    pub version: u64,
    /// Who last moved this item, set only by the engine
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_by: Option<PartyId>,
    /// When the last accepted transition landed, set only by the engine
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_transition_at: Option<DateTime<Utc>>,
    /// When the item was created
    pub created_at: DateTime<Utc>,
}

impl WorkItem {
    /// Create a new work item in the given initial state
    pub fn new(state: impl Into<WorkState>) -> Self {
        Self {
            id: WorkItemId::generate(),
            state: state.into(),
            position: 0,
            owner_client_id: None,
            owner_contractor_id: None,
            version: 0,
            last_modified_by: None,
            last_transition_at: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = WorkItemId::new(id);
        self
    }

    pub fn with_position(mut self, position: u32) -> Self {
        self.position = position;
        self
    }

    pub fn with_client(mut self, client: PartyId) -> Self {
        self.owner_client_id = Some(client);
        self
    }

    pub fn with_contractor(mut self, contractor: PartyId) -> Self {
        self.owner_contractor_id = Some(contractor);
        self
    }

    /// The entity kind, derived from the state variant
    pub fn kind(&self) -> EntityKind {
        self.state.kind()
    }

    /// Check if a party is one of this item's two owners
    pub fn is_owner(&self, party: &PartyId) -> bool {
        self.owner_client_id.as_ref() == Some(party)
            || self.owner_contractor_id.as_ref() == Some(party)
    }

    /// The other principal relative to a party, if both slots resolve.
    ///
    /// Used by notification fan-out: the actor's counter-party is the one
    /// who gets told about the state change.
    pub fn counter_party(&self, party: &PartyId) -> Option<&PartyId> {
        if self.owner_client_id.as_ref() == Some(party) {
            self.owner_contractor_id.as_ref()
        } else if self.owner_contractor_id.as_ref() == Some(party) {
            self.owner_client_id.as_ref()
        } else {
            None
        }
    }
}
