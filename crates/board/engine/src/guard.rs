//! Transition guard: the single source of truth consulted before any
//! mutation
//!
//! `evaluate` is pure and deterministic: same inputs, same verdict, no
//! I/O, regardless of how many other items are being processed in the
//! same batch. The coordinator runs every request in a batch through it
//! against current snapshots before touching storage.

use crate::transitions::TransitionTable;
use board_types::{Actor, ActorRole, DenialReason, WorkItem, WorkState};

/// The guard's verdict on one requested transition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Allowed,
    Denied(DenialReason),
}

impl Verdict {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Role- and ownership-aware transition rules
#[derive(Clone, Copy, Debug, Default)]
pub struct TransitionGuard {
    table: TransitionTable,
}

impl TransitionGuard {
    pub fn new() -> Self {
        Self {
            table: TransitionTable::new(),
        }
    }

    /// Evaluate one requested transition against a current snapshot.
    ///
    /// `from` is always the snapshot's state, never the caller's claim.
    pub fn evaluate(&self, actor: &Actor, item: &WorkItem, to: WorkState) -> Verdict {
        let from = item.state;

        // 1. Identity: the actor must be one of the item's two parties.
        if !item.is_owner(&actor.id) {
            return Verdict::Denied(DenialReason::AccessDenied);
        }

        // 2. Same state is a pure in-column reorder, always allowed once
        //    identity passed. Terminal columns stay reorderable too: a
        //    finished card can still be dragged around for display.
        if from == to {
            return Verdict::Allowed;
        }

        // 3. A target from the other kind's vocabulary can never be legal.
        if from.kind() != to.kind() {
            return Verdict::Denied(DenialReason::InvalidTransition);
        }

        // 4. Nothing leaves an absorbing state, for any role.
        if from.is_terminal() {
            return Verdict::Denied(DenialReason::TerminalState);
        }

        match actor.role {
            // A client may only answer an item awaiting their response,
            // and only with accept or reject.
            ActorRole::Client => {
                if from.is_awaiting_client()
                    && to.is_client_response()
                    && self.table.is_reachable(from, to)
                {
                    Verdict::Allowed
                } else {
                    Verdict::Denied(DenialReason::InvalidTransition)
                }
            }

            // A contractor must own the item and stay inside the table.
            // Accept/reject on an item awaiting the client's answer is
            // reserved for the client, table edge or not.
            ActorRole::Contractor => {
                if item.owner_contractor_id.as_ref() != Some(&actor.id) {
                    return Verdict::Denied(DenialReason::AccessDenied);
                }
                if from.is_awaiting_client() && to.is_client_response() {
                    return Verdict::Denied(DenialReason::InvalidTransition);
                }
                if self.table.is_reachable(from, to) {
                    Verdict::Allowed
                } else {
                    Verdict::Denied(DenialReason::InvalidTransition)
                }
            }
        }
    }
}
