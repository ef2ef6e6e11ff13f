//! Board projection: the ordered-columns read model
//!
//! Read-only consumer of the engine's data. Groups items by state into
//! the kind's declared column order; within a column, items sort by
//! `(position, last_transition_at, id)` so two projections of the same
//! underlying data are byte-identical, even when two items share a
//! position after racing reorders.

use board_store::EntityStore;
use board_types::{EngineError, EngineResult, EntityKind, WorkItem, WorkState};
use serde::{Deserialize, Serialize};

/// One state's ordered column
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BoardColumn {
    pub state: WorkState,
    pub items: Vec<WorkItem>,
}

/// A full board for one entity kind, columns in declared order
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BoardView {
    pub kind: EntityKind,
    pub columns: Vec<BoardColumn>,
}

impl BoardView {
    /// The ordered items in one state's column
    pub fn column(&self, state: WorkState) -> &[WorkItem] {
        self.columns
            .iter()
            .find(|c| c.state == state)
            .map(|c| c.items.as_slice())
            .unwrap_or(&[])
    }

    /// Total items across all columns
    pub fn item_count(&self) -> usize {
        self.columns.iter().map(|c| c.items.len()).sum()
    }
}

/// Builds [`BoardView`]s; holds no state of its own
#[derive(Clone, Copy, Debug, Default)]
pub struct BoardProjection;

impl BoardProjection {
    /// Group a set of items into ordered columns.
    ///
    /// Items whose kind does not match are ignored; with `WorkState`
    /// tagging that can only happen if the caller mixes kinds in one call.
    pub fn columns(kind: EntityKind, mut items: Vec<WorkItem>) -> BoardView {
        items.retain(|item| item.kind() == kind);
        items.sort_by(|a, b| {
            a.position
                .cmp(&b.position)
                .then_with(|| a.last_transition_at.cmp(&b.last_transition_at))
                .then_with(|| a.id.cmp(&b.id))
        });

        let columns = WorkState::columns(kind)
            .iter()
            .map(|&state| BoardColumn {
                state,
                items: items
                    .iter()
                    .filter(|item| item.state == state)
                    .cloned()
                    .collect(),
            })
            .collect();

        BoardView { kind, columns }
    }

    /// Load the board for a kind straight from the store.
    pub async fn load(store: &dyn EntityStore, kind: EntityKind) -> EngineResult<BoardView> {
        let items = store
            .list_by_kind(kind)
            .await
            .map_err(|e| EngineError::Storage(e.to_string()))?;
        Ok(Self::columns(kind, items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_store::MemoryEntityStore;
    use board_types::{ProjectState, ProposalState, WorkItemId};

    fn make_item(id: &str, state: ProjectState, position: u32) -> WorkItem {
        WorkItem::new(state).with_id(id).with_position(position)
    }

    #[test]
    fn test_columns_follow_declared_order() {
        let view = BoardProjection::columns(
            EntityKind::Project,
            vec![
                make_item("a", ProjectState::InProgress, 0),
                make_item("b", ProjectState::Draft, 0),
            ],
        );
        assert_eq!(view.columns.len(), 9);
        assert_eq!(
            view.columns[0].state,
            WorkState::Project(ProjectState::Draft)
        );
        assert_eq!(view.column(ProjectState::Draft.into()).len(), 1);
        assert_eq!(view.column(ProjectState::InProgress.into()).len(), 1);
        assert_eq!(view.item_count(), 2);
    }

    #[test]
    fn test_within_column_sorted_by_position() {
        let view = BoardProjection::columns(
            EntityKind::Project,
            vec![
                make_item("a", ProjectState::Draft, 2),
                make_item("b", ProjectState::Draft, 0),
                make_item("c", ProjectState::Draft, 1),
            ],
        );
        let ids: Vec<&str> = view
            .column(ProjectState::Draft.into())
            .iter()
            .map(|i| i.id.0.as_str())
            .collect();
        assert_eq!(ids, ["b", "c", "a"]);
    }

    #[test]
    fn test_position_ties_break_deterministically() {
        // Same position, no transition timestamps: id is the tiebreak
        let items = vec![
            make_item("z", ProjectState::Draft, 1),
            make_item("a", ProjectState::Draft, 1),
        ];
        let first = BoardProjection::columns(EntityKind::Project, items.clone());
        let second = BoardProjection::columns(EntityKind::Project, items);

        let ids = |v: &BoardView| {
            v.column(ProjectState::Draft.into())
                .iter()
                .map(|i| i.id.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(&first), ids(&second));
        assert_eq!(ids(&first), vec![WorkItemId::new("a"), WorkItemId::new("z")]);
    }

    #[test]
    fn test_foreign_kind_items_are_dropped() {
        let view = BoardProjection::columns(
            EntityKind::Project,
            vec![
                make_item("a", ProjectState::Draft, 0),
                WorkItem::new(ProposalState::Sent).with_id("q"),
            ],
        );
        assert_eq!(view.item_count(), 1);
    }

    #[tokio::test]
    async fn test_load_from_store() {
        let store = MemoryEntityStore::new();
        store
            .insert(make_item("a", ProjectState::Draft, 0))
            .unwrap();
        store
            .insert(WorkItem::new(ProposalState::Sent).with_id("q"))
            .unwrap();

        let view = BoardProjection::load(&store, EntityKind::Project)
            .await
            .unwrap();
        assert_eq!(view.item_count(), 1);

        let view = BoardProjection::load(&store, EntityKind::Proposal)
            .await
            .unwrap();
        assert_eq!(view.item_count(), 1);
    }
}
