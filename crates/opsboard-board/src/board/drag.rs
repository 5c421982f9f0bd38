/*
[INPUT]:  Drag lifecycle events (start/over/end/cancel) and the host task collection
[OUTPUT]: Drag session state and optimistic status commits through the host
[POS]:    Board core - drag coordinator state machine
[UPDATE]: When drag lifecycle semantics change
*/

use opsboard_adapter::{Task, TaskStatus};
use tracing::{debug, info};

use super::columns::{BOARD_COLUMNS, Column, column_for_drop_target};

/// The page that owns the task collection.
///
/// The coordinator reads tasks through `tasks` and mutates them only via
/// `on_status_change`. It never keeps its own copy.
pub trait BoardHost {
    fn tasks(&self) -> &[Task];

    /// Called synchronously whenever a drag decides a task changes column.
    fn on_status_change(&mut self, task_id: &str, new_status: TaskStatus);
}

/// Drag session state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    /// No active gesture.
    #[default]
    Idle,
    /// A card is picked up but not over any target.
    Dragging { task_id: String },
    /// A card is over a column or another card.
    Hovering { task_id: String, target_id: String },
}

impl DragState {
    /// Task being dragged, which is also the overlay task.
    pub fn active_task_id(&self) -> Option<&str> {
        match self {
            DragState::Idle => None,
            DragState::Dragging { task_id } | DragState::Hovering { task_id, .. } => {
                Some(task_id.as_str())
            }
        }
    }

    pub fn hover_target(&self) -> Option<&str> {
        match self {
            DragState::Hovering { target_id, .. } => Some(target_id.as_str()),
            _ => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        !matches!(self, DragState::Idle)
    }
}

/// Drives one drag gesture at a time.
///
/// Crossing into a column whose status differs from the dragged task's is
/// the commit point: the host is told immediately, on hover, not on drop.
/// Every distinct crossing produces one `on_status_change` call.
#[derive(Debug, Clone)]
pub struct DragCoordinator {
    state: DragState,
    columns: &'static [Column],
}

impl Default for DragCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl DragCoordinator {
    pub fn new() -> Self {
        Self::with_columns(&BOARD_COLUMNS)
    }

    pub fn with_columns(columns: &'static [Column]) -> Self {
        Self {
            state: DragState::Idle,
            columns,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn columns(&self) -> &'static [Column] {
        self.columns
    }

    pub fn active_task_id(&self) -> Option<&str> {
        self.state.active_task_id()
    }

    /// Task rendered in the floating overlay, looked up in `tasks`.
    pub fn active_task<'t>(&self, tasks: &'t [Task]) -> Option<&'t Task> {
        let task_id = self.active_task_id()?;
        tasks.iter().find(|task| task.id == task_id)
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    /// Begin a gesture on `task_id`. Returns false, staying idle, when the
    /// host does not know the task.
    pub fn start<H: BoardHost + ?Sized>(&mut self, host: &H, task_id: &str) -> bool {
        if !host.tasks().iter().any(|task| task.id == task_id) {
            debug!(task_id = %task_id, "drag start ignored; task not found");
            self.state = DragState::Idle;
            return false;
        }

        if let Some(previous) = self.state.active_task_id() {
            debug!(previous = %previous, "replacing unfinished drag session");
        }
        debug!(task_id = %task_id, "drag started");
        self.state = DragState::Dragging {
            task_id: task_id.to_string(),
        };
        true
    }

    /// Hover target changed. `None` means the pointer left every target.
    ///
    /// Returns the status committed to the host, if any.
    pub fn over<H: BoardHost + ?Sized>(
        &mut self,
        host: &mut H,
        target_id: Option<&str>,
    ) -> Option<TaskStatus> {
        let task_id = match self.state.active_task_id() {
            Some(task_id) => task_id.to_string(),
            None => {
                debug!("drag over ignored; no active drag");
                return None;
            }
        };

        let Some(target_id) = target_id else {
            self.state = DragState::Dragging { task_id };
            return None;
        };

        self.state = DragState::Hovering {
            task_id: task_id.clone(),
            target_id: target_id.to_string(),
        };
        self.commit_if_changed(host, &task_id, target_id)
    }

    /// Gesture released. Applies a last commit if the final target's column
    /// differs from the task's status, then always returns to idle.
    pub fn end<H: BoardHost + ?Sized>(
        &mut self,
        host: &mut H,
        target_id: Option<&str>,
    ) -> Option<TaskStatus> {
        let state = std::mem::take(&mut self.state);
        let task_id = state.active_task_id()?;

        let committed = match target_id {
            Some(target_id) => self.commit_if_changed(host, task_id, target_id),
            None => None,
        };
        debug!(task_id = %task_id, committed = ?committed, "drag ended");
        committed
    }

    /// Abandon the gesture. Commits made by earlier hovers stay in effect.
    pub fn cancel(&mut self) {
        if let Some(task_id) = self.state.active_task_id() {
            debug!(task_id = %task_id, "drag cancelled");
        }
        self.state = DragState::Idle;
    }

    fn commit_if_changed<H: BoardHost + ?Sized>(
        &self,
        host: &mut H,
        task_id: &str,
        target_id: &str,
    ) -> Option<TaskStatus> {
        let (current, resolved) = {
            let tasks = host.tasks();
            let current = tasks.iter().find(|task| task.id == task_id)?.status;
            let Some(column) = column_for_drop_target(target_id, self.columns, tasks) else {
                debug!(target_id = %target_id, "drop target did not resolve to a column");
                return None;
            };
            (current, column.status)
        };

        if current == resolved {
            return None;
        }

        info!(
            task_id = %task_id,
            from = %current,
            to = %resolved,
            "task moved across columns"
        );
        host.on_status_change(task_id, resolved);
        Some(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Host that applies changes locally and records every callback.
    #[derive(Default)]
    struct RecordingHost {
        tasks: Vec<Task>,
        calls: Vec<(String, TaskStatus)>,
    }

    impl RecordingHost {
        fn new(tasks: Vec<Task>) -> Self {
            Self {
                tasks,
                calls: Vec::new(),
            }
        }

        fn status_of(&self, task_id: &str) -> TaskStatus {
            self.tasks
                .iter()
                .find(|task| task.id == task_id)
                .map(|task| task.status)
                .expect("task present")
        }
    }

    impl BoardHost for RecordingHost {
        fn tasks(&self) -> &[Task] {
            &self.tasks
        }

        fn on_status_change(&mut self, task_id: &str, new_status: TaskStatus) {
            self.calls.push((task_id.to_string(), new_status));
            if let Some(task) = self.tasks.iter_mut().find(|task| task.id == task_id) {
                task.status = new_status;
            }
        }
    }

    fn one_per_column() -> RecordingHost {
        RecordingHost::new(vec![
            Task::new("todo", "Todo task", TaskStatus::Todo),
            Task::new("doing", "Doing task", TaskStatus::InProgress),
            Task::new("review", "Review task", TaskStatus::InReview),
            Task::new("done", "Done task", TaskStatus::Done),
            Task::new("blocked", "Blocked task", TaskStatus::Blocked),
        ])
    }

    #[test]
    fn start_on_unknown_task_stays_idle() {
        let host = one_per_column();
        let mut coordinator = DragCoordinator::new();

        assert!(!coordinator.start(&host, "ghost"));
        assert_eq!(coordinator.state(), &DragState::Idle);
        assert!(coordinator.active_task(&host.tasks).is_none());
    }

    #[test]
    fn start_records_overlay_task() {
        let host = one_per_column();
        let mut coordinator = DragCoordinator::new();

        assert!(coordinator.start(&host, "todo"));
        assert_eq!(
            coordinator.state(),
            &DragState::Dragging {
                task_id: "todo".to_string()
            }
        );
        assert_eq!(
            coordinator.active_task(&host.tasks).map(|t| t.id.as_str()),
            Some("todo")
        );
    }

    #[test]
    fn hover_crossing_commits_once_per_distinct_crossing() {
        let mut host = one_per_column();
        let mut coordinator = DragCoordinator::new();
        coordinator.start(&host, "todo");

        let committed = coordinator.over(&mut host, Some("IN_PROGRESS"));
        assert_eq!(committed, Some(TaskStatus::InProgress));
        assert_eq!(
            host.calls,
            vec![("todo".to_string(), TaskStatus::InProgress)]
        );

        let committed = coordinator.over(&mut host, Some("IN_PROGRESS"));
        assert_eq!(committed, None);
        assert_eq!(host.calls.len(), 1);

        // Hovering a card already in the column is the same column.
        assert_eq!(coordinator.over(&mut host, Some("doing")), None);
        assert_eq!(host.calls.len(), 1);
        assert_eq!(coordinator.state().hover_target(), Some("doing"));
    }

    #[test]
    fn every_column_crossed_triggers_its_own_commit() {
        let mut host = one_per_column();
        let mut coordinator = DragCoordinator::new();
        coordinator.start(&host, "todo");

        coordinator.over(&mut host, Some("IN_PROGRESS"));
        coordinator.over(&mut host, Some("IN_REVIEW"));
        coordinator.over(&mut host, Some("DONE"));

        let statuses: Vec<TaskStatus> = host.calls.iter().map(|(_, s)| *s).collect();
        assert_eq!(
            statuses,
            vec![TaskStatus::InProgress, TaskStatus::InReview, TaskStatus::Done]
        );
    }

    #[test]
    fn hover_then_release_elsewhere_commits_twice() {
        let mut host = one_per_column();
        let mut coordinator = DragCoordinator::new();
        coordinator.start(&host, "todo");

        assert_eq!(
            coordinator.over(&mut host, Some("DONE")),
            Some(TaskStatus::Done)
        );
        assert_eq!(
            coordinator.end(&mut host, Some("BLOCKED")),
            Some(TaskStatus::Blocked)
        );

        assert_eq!(
            host.calls,
            vec![
                ("todo".to_string(), TaskStatus::Done),
                ("todo".to_string(), TaskStatus::Blocked),
            ]
        );
        assert_eq!(host.status_of("todo"), TaskStatus::Blocked);
        assert_eq!(coordinator.state(), &DragState::Idle);
    }

    #[test]
    fn end_on_last_hover_target_does_not_recommit() {
        let mut host = one_per_column();
        let mut coordinator = DragCoordinator::new();
        coordinator.start(&host, "todo");
        coordinator.over(&mut host, Some("DONE"));

        assert_eq!(coordinator.end(&mut host, Some("DONE")), None);
        assert_eq!(host.calls.len(), 1);
    }

    #[test]
    fn drop_onto_card_uses_card_column() {
        let mut host = one_per_column();
        let mut coordinator = DragCoordinator::new();
        coordinator.start(&host, "todo");

        assert_eq!(
            coordinator.end(&mut host, Some("review")),
            Some(TaskStatus::InReview)
        );
        assert_eq!(host.status_of("todo"), TaskStatus::InReview);
    }

    #[test]
    fn unresolvable_targets_are_silent_noops() {
        let mut host = one_per_column();
        let mut coordinator = DragCoordinator::new();
        coordinator.start(&host, "todo");

        assert_eq!(coordinator.over(&mut host, Some("nowhere")), None);
        assert_eq!(coordinator.end(&mut host, Some("nowhere")), None);
        assert!(host.calls.is_empty());
        assert_eq!(coordinator.state(), &DragState::Idle);
    }

    #[test]
    fn cancel_without_crossing_changes_nothing() {
        let mut host = one_per_column();
        let mut coordinator = DragCoordinator::new();
        coordinator.start(&host, "todo");
        coordinator.over(&mut host, Some("TODO"));
        coordinator.over(&mut host, None);
        coordinator.cancel();

        assert!(host.calls.is_empty());
        assert_eq!(host.status_of("todo"), TaskStatus::Todo);
        assert!(coordinator.active_task_id().is_none());
    }

    #[test]
    fn release_outside_targets_keeps_earlier_commits() {
        let mut host = one_per_column();
        let mut coordinator = DragCoordinator::new();
        coordinator.start(&host, "todo");
        coordinator.over(&mut host, Some("IN_REVIEW"));
        coordinator.over(&mut host, None);

        assert_eq!(coordinator.end(&mut host, None), None);
        assert_eq!(host.status_of("todo"), TaskStatus::InReview);
        assert_eq!(coordinator.state(), &DragState::Idle);
    }

    #[test]
    fn events_without_a_session_are_ignored() {
        let mut host = one_per_column();
        let mut coordinator = DragCoordinator::new();

        assert_eq!(coordinator.over(&mut host, Some("DONE")), None);
        assert_eq!(coordinator.end(&mut host, Some("DONE")), None);
        coordinator.cancel();
        assert!(host.calls.is_empty());
        assert_eq!(coordinator.state(), &DragState::Idle);
    }

    #[test]
    fn overlay_is_cleared_after_every_gesture_end() {
        let targets = [None, Some("TODO"), Some("DONE"), Some("blocked"), Some("bogus")];
        for target in targets {
            let mut host = one_per_column();
            let mut coordinator = DragCoordinator::new();
            coordinator.start(&host, "doing");
            coordinator.over(&mut host, target);
            coordinator.end(&mut host, target);
            assert!(coordinator.active_task_id().is_none(), "target {target:?}");

            coordinator.start(&host, "doing");
            coordinator.over(&mut host, target);
            coordinator.cancel();
            assert!(coordinator.active_task_id().is_none(), "target {target:?}");
        }
    }

    #[test]
    fn task_removed_mid_drag_is_a_noop() {
        let mut host = one_per_column();
        let mut coordinator = DragCoordinator::new();
        coordinator.start(&host, "todo");
        host.tasks.retain(|task| task.id != "todo");

        assert_eq!(coordinator.over(&mut host, Some("DONE")), None);
        assert_eq!(coordinator.end(&mut host, Some("DONE")), None);
        assert!(host.calls.is_empty());
    }
}
