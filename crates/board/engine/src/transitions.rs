//! Transition tables: the reachable-state map for each entity kind
//!
//! Pure data, built into the binary, immutable. Both the authoritative
//! server guard and any client-side optimistic mirror consult this one
//! artifact, so the rules cannot drift between the two.
//!
//! A transition to the same state is implicitly legal everywhere (that is
//! an in-column reorder) and is never looked up here. Absorbing states map
//! to the empty slice.

use board_types::{ProjectState, ProposalState, WorkState};

/// The static transition tables for both entity kinds
#[derive(Clone, Copy, Debug, Default)]
pub struct TransitionTable;

impl TransitionTable {
    pub fn new() -> Self {
        Self
    }

    /// The set of states reachable from `from` by a forward transition
    pub fn allowed_targets(&self, from: WorkState) -> &'static [WorkState] {
        match from {
            WorkState::Project(s) => Self::project_targets(s),
            WorkState::Proposal(s) => Self::proposal_targets(s),
        }
    }

    /// Check whether `to` is reachable from `from`
    pub fn is_reachable(&self, from: WorkState, to: WorkState) -> bool {
        self.allowed_targets(from).contains(&to)
    }

    fn project_targets(from: ProjectState) -> &'static [WorkState] {
        use ProjectState::*;
        match from {
            Draft => &[
                WorkState::Project(ClientPending),
                WorkState::Project(Archived),
            ],
            ClientPending => &[WorkState::Project(ContractorReviewing)],
            ContractorReviewing => &[WorkState::Project(ProposalSent)],
            ProposalSent => &[WorkState::Project(Accepted), WorkState::Project(Rejected)],
            Accepted => &[WorkState::Project(InProgress)],
            InProgress => &[WorkState::Project(Completed)],
            Completed | Rejected | Archived => &[],
        }
    }

    fn proposal_targets(from: ProposalState) -> &'static [WorkState] {
        use ProposalState::*;
        match from {
            Draft => &[WorkState::Proposal(Sent), WorkState::Proposal(Archived)],
            Sent => &[
                WorkState::Proposal(Revised),
                WorkState::Proposal(Accepted),
                WorkState::Proposal(Rejected),
            ],
            Revised => &[WorkState::Proposal(Sent)],
            Accepted => &[WorkState::Proposal(Archived)],
            Rejected | Archived => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_types::EntityKind;

    #[test]
    fn test_forward_edges() {
        let table = TransitionTable::new();
        assert!(table.is_reachable(
            ProjectState::ClientPending.into(),
            ProjectState::ContractorReviewing.into()
        ));
        assert!(table.is_reachable(
            ProjectState::Accepted.into(),
            ProjectState::InProgress.into()
        ));
        assert!(table.is_reachable(
            ProposalState::Sent.into(),
            ProposalState::Accepted.into()
        ));
        assert!(table.is_reachable(ProposalState::Revised.into(), ProposalState::Sent.into()));
    }

    #[test]
    fn test_illegal_jumps() {
        let table = TransitionTable::new();
        assert!(!table.is_reachable(
            ProjectState::ClientPending.into(),
            ProjectState::InProgress.into()
        ));
        assert!(!table.is_reachable(
            ProjectState::Draft.into(),
            ProjectState::Completed.into()
        ));
        assert!(!table.is_reachable(
            ProposalState::Draft.into(),
            ProposalState::Accepted.into()
        ));
    }

    #[test]
    fn test_absorbing_states_map_to_empty_set() {
        let table = TransitionTable::new();
        for kind in [EntityKind::Project, EntityKind::Proposal] {
            for state in WorkState::columns(kind) {
                if state.is_terminal() {
                    assert!(
                        table.allowed_targets(*state).is_empty(),
                        "terminal state {} has outbound edges",
                        state
                    );
                }
            }
        }
    }

    #[test]
    fn test_targets_never_cross_kinds() {
        let table = TransitionTable::new();
        for kind in [EntityKind::Project, EntityKind::Proposal] {
            for state in WorkState::columns(kind) {
                for target in table.allowed_targets(*state) {
                    assert_eq!(target.kind(), state.kind());
                }
            }
        }
    }

    #[test]
    fn test_no_self_loops_in_table() {
        // Same-state moves are implicit; the table must not also list them
        let table = TransitionTable::new();
        for kind in [EntityKind::Project, EntityKind::Proposal] {
            for state in WorkState::columns(kind) {
                assert!(!table.allowed_targets(*state).contains(state));
            }
        }
    }
}
