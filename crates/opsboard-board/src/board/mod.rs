/*
[INPUT]:  Host task collection and drag coordinator
[OUTPUT]: Board view model (columns, cards, overlay) and board core exports
[POS]:    Board core - module root
[UPDATE]: When board core modules or view model change
*/

pub mod card;
pub mod column;
pub mod columns;
pub mod drag;

pub use card::{CardTreatment, DraggableCard};
pub use column::{DROP_PLACEHOLDER, DroppableColumn, EMPTY_PLACEHOLDER};
pub use columns::{
    Accent, BOARD_COLUMNS, Column, column_for_drop_target, column_for_status, column_index,
    tasks_for_status,
};
pub use drag::{BoardHost, DragCoordinator, DragState};

use opsboard_adapter::{Task, TaskStatus};

/// Everything needed to draw the board for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardView<'a> {
    pub columns: Vec<DroppableColumn<'a>>,
    pub overlay: Option<DraggableCard<'a>>,
}

impl<'a> BoardView<'a> {
    pub fn build(tasks: &'a [Task], coordinator: &DragCoordinator) -> Self {
        let columns = coordinator.columns();
        let drag = coordinator.state();
        Self {
            columns: columns
                .iter()
                .map(|column| DroppableColumn::new(column, columns, tasks, drag))
                .collect(),
            overlay: coordinator.active_task(tasks).map(DraggableCard::overlay),
        }
    }

    pub fn column(&self, status: TaskStatus) -> Option<&DroppableColumn<'a>> {
        self.columns
            .iter()
            .find(|column| column.column.status == status)
    }

    /// Task ids shown in the column for `status`, top to bottom.
    pub fn task_ids(&self, status: TaskStatus) -> Vec<&'a str> {
        self.column(status)
            .map(|column| column.cards.iter().map(|card| card.drag_id()).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_view_has_one_column_per_entry_and_overlay_while_dragging() {
        let tasks = vec![
            Task::new("a", "A", TaskStatus::Todo),
            Task::new("b", "B", TaskStatus::Done),
        ];
        let host_tasks = tasks.clone();
        let mut coordinator = DragCoordinator::new();

        let view = BoardView::build(&tasks, &coordinator);
        assert_eq!(view.columns.len(), BOARD_COLUMNS.len());
        assert!(view.overlay.is_none());
        assert_eq!(view.task_ids(TaskStatus::Todo), vec!["a"]);

        struct Static(Vec<Task>);
        impl BoardHost for Static {
            fn tasks(&self) -> &[Task] {
                &self.0
            }
            fn on_status_change(&mut self, _: &str, _: TaskStatus) {}
        }
        coordinator.start(&Static(host_tasks), "b");

        let view = BoardView::build(&tasks, &coordinator);
        let overlay = view.overlay.expect("overlay while dragging");
        assert_eq!(overlay.drag_id(), "b");
        assert!(overlay.is_overlay());
        assert!(view.column(TaskStatus::Done).expect("done").cards[0].is_ghost());
    }
}
