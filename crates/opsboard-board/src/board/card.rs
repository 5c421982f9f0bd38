/*
[INPUT]:  A task and the current drag session
[OUTPUT]: Draggable card view with its drag id and visual treatment
[POS]:    Board core - draggable task card
[UPDATE]: When card content or drag treatments change
*/

use chrono::NaiveDate;
use opsboard_adapter::{Task, TaskPriority};
use rust_decimal::Decimal;

use super::drag::DragState;

/// How a card is drawn relative to the drag session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardTreatment {
    Resting,
    /// In-column copy of the card being dragged; drawn dimmed.
    Ghost,
    /// The single floating copy that follows the pointer.
    Overlay,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DraggableCard<'a> {
    pub task: &'a Task,
    pub treatment: CardTreatment,
}

impl<'a> DraggableCard<'a> {
    pub fn new(task: &'a Task, drag: &DragState) -> Self {
        let treatment = if drag.active_task_id() == Some(task.id.as_str()) {
            CardTreatment::Ghost
        } else {
            CardTreatment::Resting
        };
        Self { task, treatment }
    }

    pub fn overlay(task: &'a Task) -> Self {
        Self {
            task,
            treatment: CardTreatment::Overlay,
        }
    }

    /// Identity reported to the coordinator on every lifecycle event.
    pub fn drag_id(&self) -> &'a str {
        &self.task.id
    }

    pub fn is_ghost(&self) -> bool {
        self.treatment == CardTreatment::Ghost
    }

    pub fn is_overlay(&self) -> bool {
        self.treatment == CardTreatment::Overlay
    }

    pub fn priority_badge(&self) -> &'static str {
        match self.task.priority {
            TaskPriority::Low => "LOW",
            TaskPriority::Medium => "MED",
            TaskPriority::High => "HIGH",
            TaskPriority::Critical => "CRIT",
        }
    }

    pub fn hours_label(&self) -> Option<String> {
        let estimated = self.task.estimated_hours?;
        Some(match self.task.actual_hours {
            Some(actual) => format!("{}/{}h", format_hours(actual), format_hours(estimated)),
            None => format!("{}h", format_hours(estimated)),
        })
    }

    pub fn due_label(&self, today: NaiveDate) -> Option<(String, bool)> {
        let due = self.task.due_date?;
        Some((due.format("%b %d").to_string(), self.task.is_overdue(today)))
    }
}

fn format_hours(value: Decimal) -> String {
    value.round_dp(1).normalize().to_string()
}
