//! State vocabularies for the two entity kinds
//!
//! Each kind has a closed enumeration. Terminal (absorbing) states have no
//! outbound transitions; the transition table maps them to the empty set
//! and the guard rejects any attempt to leave them.

use serde::{Deserialize, Serialize};

// ── Entity Kind ──────────────────────────────────────────────────────

/// The two kinds of board entity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityKind {
    Project,
    Proposal,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Project => write!(f, "project"),
            Self::Proposal => write!(f, "proposal"),
        }
    }
}

// ── Project States ───────────────────────────────────────────────────

/// Lifecycle states for a project
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectState {
    /// Created, not yet submitted to the board
    Draft,
    /// Waiting for the client to provide details
    ClientPending,
    /// Contractor is scoping the work
    ContractorReviewing,
    /// A proposal has been sent; waiting for the client's response
    ProposalSent,
    /// Client accepted the proposal
    Accepted,
    /// Work underway
    InProgress,
    /// Work finished — absorbing
    Completed,
    /// Client rejected — absorbing
    Rejected,
    /// Removed from the active board — absorbing
    Archived,
}

// ── Proposal States ──────────────────────────────────────────────────

/// Lifecycle states for a proposal
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProposalState {
    /// Being drafted by the contractor
    Draft,
    /// Delivered to the client; waiting for a response
    Sent,
    /// Client asked for changes; contractor is revising
    Revised,
    /// Client accepted — absorbing except for archival
    Accepted,
    /// Client rejected — absorbing
    Rejected,
    /// Removed from the active board — absorbing
    Archived,
}

// ── Work State ───────────────────────────────────────────────────────

/// A state tagged with its entity kind.
///
/// A `WorkItem` of kind Project can only ever hold a `Project` variant,
/// so a request to move a proposal into a project-only state fails the
/// type-level kind check before any rule lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WorkState {
    Project(ProjectState),
    Proposal(ProposalState),
}

impl WorkState {
    /// The entity kind this state belongs to
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Project(_) => EntityKind::Project,
            Self::Proposal(_) => EntityKind::Proposal,
        }
    }

    /// Check if this is an absorbing state (no outbound transitions)
    pub fn is_terminal(&self) -> bool {
        match self {
            Self::Project(s) => matches!(
                s,
                ProjectState::Completed | ProjectState::Rejected | ProjectState::Archived
            ),
            Self::Proposal(s) => {
                matches!(s, ProposalState::Rejected | ProposalState::Archived)
            }
        }
    }

    /// Check if this state is waiting on the client's accept/reject response
    pub fn is_awaiting_client(&self) -> bool {
        matches!(
            self,
            Self::Project(ProjectState::ProposalSent) | Self::Proposal(ProposalState::Sent)
        )
    }

    /// Check if this state is a client accept/reject response for its kind
    pub fn is_client_response(&self) -> bool {
        matches!(
            self,
            Self::Project(ProjectState::Accepted)
                | Self::Project(ProjectState::Rejected)
                | Self::Proposal(ProposalState::Accepted)
                | Self::Proposal(ProposalState::Rejected)
        )
    }

    /// The declared column order for a kind's board view
    pub fn columns(kind: EntityKind) -> &'static [WorkState] {
        match kind {
            EntityKind::Project => &[
                WorkState::Project(ProjectState::Draft),
                WorkState::Project(ProjectState::ClientPending),
                WorkState::Project(ProjectState::ContractorReviewing),
                WorkState::Project(ProjectState::ProposalSent),
                WorkState::Project(ProjectState::Accepted),
                WorkState::Project(ProjectState::InProgress),
                WorkState::Project(ProjectState::Completed),
                WorkState::Project(ProjectState::Rejected),
                WorkState::Project(ProjectState::Archived),
            ],
            EntityKind::Proposal => &[
                WorkState::Proposal(ProposalState::Draft),
                WorkState::Proposal(ProposalState::Sent),
                WorkState::Proposal(ProposalState::Revised),
                WorkState::Proposal(ProposalState::Accepted),
                WorkState::Proposal(ProposalState::Rejected),
                WorkState::Proposal(ProposalState::Archived),
            ],
        }
    }
}

impl std::fmt::Display for WorkState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Project(s) => write!(f, "project:{:?}", s),
            Self::Proposal(s) => write!(f, "proposal:{:?}", s),
        }
    }
}

impl From<ProjectState> for WorkState {
    fn from(s: ProjectState) -> Self {
        Self::Project(s)
    }
}

impl From<ProposalState> for WorkState {
    fn from(s: ProposalState) -> Self {
        Self::Proposal(s)
    }
}
