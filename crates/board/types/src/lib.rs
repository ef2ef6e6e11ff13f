//! Domain types for the project/proposal workflow engine
//!
//! Two entity kinds (Project, Proposal) move through closed state
//! vocabularies under role-gated transition rules. This crate holds the
//! vocabulary: the state enums, the work-item record the board reorders,
//! the actor/role pair that gates every transition, and the engine's
//! error taxonomy.
//!
//! The vocabularies are related but not identical (Proposal has `Revised`,
//! Project does not), so each kind gets its own enum and [`WorkState`]
//! makes cross-kind confusion unrepresentable at the type level.

#![deny(unsafe_code)]

pub mod actor;
pub mod entity;
pub mod error;
pub mod state;

pub use actor::{Actor, ActorRole};
pub use entity::{PartyId, WorkItem, WorkItemId};
pub use error::{Denial, DenialReason, EngineError, EngineResult};
pub use state::{EntityKind, ProjectState, ProposalState, WorkState};
