/*
[INPUT]:  Task collection, task statuses and drop-target ids
[OUTPUT]: Fixed column table and pure column classification helpers
[POS]:    Board core - column classifier
[UPDATE]: When the board gains or reorders a column
*/

use opsboard_adapter::{Task, TaskStatus};

/// Colour family used for a column's header and border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    Slate,
    Blue,
    Violet,
    Green,
    Red,
}

/// One board column: the status it holds, its title and accent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub status: TaskStatus,
    pub title: &'static str,
    pub accent: Accent,
}

impl Column {
    /// Drop-target id of the column; the status wire name.
    pub fn drop_id(&self) -> &'static str {
        self.status.as_str()
    }
}

/// Board columns, left to right. CANCELLED has no column.
pub const BOARD_COLUMNS: [Column; 5] = [
    Column {
        status: TaskStatus::Todo,
        title: "To Do",
        accent: Accent::Slate,
    },
    Column {
        status: TaskStatus::InProgress,
        title: "In Progress",
        accent: Accent::Blue,
    },
    Column {
        status: TaskStatus::InReview,
        title: "In Review",
        accent: Accent::Violet,
    },
    Column {
        status: TaskStatus::Done,
        title: "Done",
        accent: Accent::Green,
    },
    Column {
        status: TaskStatus::Blocked,
        title: "Blocked",
        accent: Accent::Red,
    },
];

/// Tasks whose status equals `status`, in input order.
pub fn tasks_for_status(tasks: &[Task], status: TaskStatus) -> Vec<&Task> {
    tasks.iter().filter(|task| task.status == status).collect()
}

pub fn column_for_status(status: TaskStatus, columns: &[Column]) -> Option<&Column> {
    columns.iter().find(|column| column.status == status)
}

pub fn column_index(status: TaskStatus, columns: &[Column]) -> Option<usize> {
    columns.iter().position(|column| column.status == status)
}

/// Resolve a drop-target id to a column.
///
/// A column id wins. Any other id is looked up as a task id and resolves to
/// the column currently holding that task, so dropping onto a card means
/// dropping into the card's column. Returns `None` when neither matches.
pub fn column_for_drop_target<'c>(
    drop_id: &str,
    columns: &'c [Column],
    tasks: &[Task],
) -> Option<&'c Column> {
    if let Some(column) = columns.iter().find(|column| column.drop_id() == drop_id) {
        return Some(column);
    }

    let task = tasks.iter().find(|task| task.id == drop_id)?;
    column_for_status(task.status, columns)
}
