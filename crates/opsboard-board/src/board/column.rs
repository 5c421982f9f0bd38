/*
[INPUT]:  Column descriptor, task collection and drag session
[OUTPUT]: Droppable column view with hover flag, ordered cards and placeholder
[POS]:    Board core - droppable column
[UPDATE]: When column rendering rules change
*/

use opsboard_adapter::Task;

use super::card::DraggableCard;
use super::columns::{Column, column_for_drop_target, tasks_for_status};
use super::drag::DragState;

pub const EMPTY_PLACEHOLDER: &str = "No tasks";
pub const DROP_PLACEHOLDER: &str = "Drop here";

#[derive(Debug, Clone, PartialEq)]
pub struct DroppableColumn<'a> {
    pub column: &'a Column,
    pub cards: Vec<DraggableCard<'a>>,
    /// True while an active drag hovers this column or one of its cards.
    pub is_over: bool,
}

impl<'a> DroppableColumn<'a> {
    pub fn new(
        column: &'a Column,
        columns: &'a [Column],
        tasks: &'a [Task],
        drag: &DragState,
    ) -> Self {
        let cards = tasks_for_status(tasks, column.status)
            .into_iter()
            .map(|task| DraggableCard::new(task, drag))
            .collect();

        let is_over = drag
            .hover_target()
            .and_then(|target| column_for_drop_target(target, columns, tasks))
            .is_some_and(|hovered| hovered.status == column.status);

        Self {
            column,
            cards,
            is_over,
        }
    }

    pub fn drop_id(&self) -> &'static str {
        self.column.drop_id()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn header(&self) -> String {
        format!("{} ({})", self.column.title, self.cards.len())
    }

    /// Text shown in place of cards, only when the column is empty.
    pub fn placeholder(&self) -> Option<&'static str> {
        if !self.cards.is_empty() {
            return None;
        }
        Some(if self.is_over {
            DROP_PLACEHOLDER
        } else {
            EMPTY_PLACEHOLDER
        })
    }
}
