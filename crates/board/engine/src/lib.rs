//! Workflow engine for the project/proposal board
//!
//! Every project and proposal moves through a finite-state lifecycle with
//! role-dependent transition rules, manipulated in bulk from a
//! drag-and-drop board. This crate enforces those rules on the
//! authoritative side:
//!
//! - [`TransitionTable`] — static reachable-state map per entity kind
//! - [`TransitionGuard`] — pure verdict on one (actor, item, target) triple
//! - [`ReorderCoordinator`] — validate the whole batch, then commit it
//!   atomically, or commit nothing
//! - [`Notifier`] — settle-all fan-out to counter-parties, isolated from
//!   the commit's success
//! - [`BoardProjection`] — ordered-columns read model with deterministic
//!   tie-breaking
//!
//! The defining design choice: strict about state correctness, lenient
//! about notification delivery. A denied transition fails the entire
//! batch before anything is written; a dead notification recipient costs
//! nothing but a warning in the logs.
//!
//! # Example
//!
//! ```rust
//! use board_engine::{TransitionGuard, Verdict};
//! use board_types::{Actor, PartyId, ProjectState, WorkItem};
//!
//! let guard = TransitionGuard::new();
//! let item = WorkItem::new(ProjectState::ProposalSent)
//!     .with_client(PartyId::new("client-1"))
//!     .with_contractor(PartyId::new("contractor-1"));
//!
//! // The client answers the proposal
//! let verdict = guard.evaluate(
//!     &Actor::client("client-1"),
//!     &item,
//!     ProjectState::Accepted.into(),
//! );
//! assert_eq!(verdict, Verdict::Allowed);
//!
//! // But cannot start the work themselves
//! let verdict = guard.evaluate(
//!     &Actor::client("client-1"),
//!     &item,
//!     ProjectState::InProgress.into(),
//! );
//! assert!(!verdict.is_allowed());
//! ```

#![deny(unsafe_code)]

pub mod cache;
pub mod coordinator;
pub mod guard;
pub mod notify;
pub mod projection;
pub mod transitions;

// Re-export main types
pub use cache::BoardCache;
pub use coordinator::{ReorderCoordinator, ReorderReceipt, ReorderRequest, StateChange};
pub use guard::{TransitionGuard, Verdict};
pub use notify::{
    ChangeNotice, FlakySink, MemorySink, Notification, NotificationOutcome, NotificationSink,
    Notifier, NotifyError,
};
pub use projection::{BoardColumn, BoardProjection, BoardView};
pub use transitions::TransitionTable;
