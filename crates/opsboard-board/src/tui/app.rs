/*
[INPUT]:  Task store, drag coordinator, gateway events, keyboard intents
[OUTPUT]: AppState driving selection, keyboard drag pointer and gateway dispatch
[POS]:    TUI app state
[UPDATE]: When board interactions or tab layout change
*/

use std::time::{Duration, Instant};

use opsboard_adapter::{Task, TaskStatus};
use tracing::{debug, info};

use crate::board::{BoardHost, BoardView, DragCoordinator, tasks_for_status};
use crate::logging::LogBufferHandle;
use crate::notify::Notifications;
use crate::persistence::{GatewayEvent, StatusDispatcher};
use crate::store::TaskStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tab {
    Board,
    Logs,
}

/// Task waiting for delete confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PendingDelete {
    pub(crate) task_id: String,
    pub(crate) title: String,
}

/// Keyboard stand-in for the mouse while dragging.
///
/// `row == None` points at the column itself; `Some(i)` at the i-th card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct DragPointer {
    pub(crate) column: usize,
    pub(crate) row: Option<usize>,
}

pub(crate) struct AppState {
    pub(crate) store: TaskStore,
    pub(crate) coordinator: DragCoordinator,
    pub(crate) log_buffer: LogBufferHandle,
    pub(crate) current_tab: Tab,
    pub(crate) selected_column: usize,
    pub(crate) selected_row: usize,
    pub(crate) pointer: DragPointer,
    pub(crate) pending_delete: Option<PendingDelete>,
    pub(crate) status_message: String,
    pub(crate) last_refresh: Instant,
    dispatcher: StatusDispatcher,
    project_id: Option<String>,
    refresh_interval: Duration,
    refresh_in_flight: bool,
    deferred_load: Option<(u64, Vec<Task>)>,
}

impl AppState {
    pub(crate) fn new(
        dispatcher: StatusDispatcher,
        log_buffer: LogBufferHandle,
        project_id: Option<String>,
        refresh_interval: Duration,
        toast_ticks: u32,
    ) -> Self {
        Self {
            store: TaskStore::new(Notifications::new(toast_ticks)),
            coordinator: DragCoordinator::new(),
            log_buffer,
            current_tab: Tab::Board,
            selected_column: 0,
            selected_row: 0,
            pointer: DragPointer::default(),
            pending_delete: None,
            status_message: "Loading tasks...".to_string(),
            last_refresh: Instant::now(),
            dispatcher,
            project_id,
            refresh_interval,
            refresh_in_flight: false,
            deferred_load: None,
        }
    }

    pub(crate) fn view(&self) -> BoardView<'_> {
        BoardView::build(self.store.tasks(), &self.coordinator)
    }

    pub(crate) fn column_count(&self) -> usize {
        self.coordinator.columns().len()
    }

    fn column_status(&self, index: usize) -> Option<TaskStatus> {
        self.coordinator.columns().get(index).map(|column| column.status)
    }

    fn column_task_ids(&self, index: usize) -> Vec<String> {
        match self.column_status(index) {
            Some(status) => tasks_for_status(self.store.tasks(), status)
                .into_iter()
                .map(|task| task.id.clone())
                .collect(),
            None => Vec::new(),
        }
    }

    pub(crate) fn selected_task_id(&self) -> Option<String> {
        self.column_task_ids(self.selected_column)
            .into_iter()
            .nth(self.selected_row)
    }

    pub(crate) fn selected_task(&self) -> Option<&Task> {
        let task_id = self.selected_task_id()?;
        self.store.task(&task_id)
    }

    pub(crate) fn next_tab(&mut self) {
        self.current_tab = match self.current_tab {
            Tab::Board => Tab::Logs,
            Tab::Logs => Tab::Board,
        };
    }

    pub(crate) fn set_tab(&mut self, tab: Tab) {
        self.current_tab = tab;
    }

    pub(crate) fn move_column(&mut self, delta: isize) {
        self.selected_column = step(self.selected_column, delta, self.column_count());
        self.clamp_selection();
    }

    pub(crate) fn move_row(&mut self, delta: isize) {
        let len = self.column_task_ids(self.selected_column).len();
        self.selected_row = step(self.selected_row, delta, len);
    }

    fn clamp_selection(&mut self) {
        let columns = self.column_count();
        if columns == 0 {
            self.selected_column = 0;
        } else if self.selected_column >= columns {
            self.selected_column = columns - 1;
        }
        let len = self.column_task_ids(self.selected_column).len();
        self.selected_row = self.selected_row.min(len.saturating_sub(1));
    }

    /// Keep the selection on `task_id` after it changed column.
    fn follow_task(&mut self, task_id: &str) {
        let Some(task) = self.store.task(task_id) else {
            self.clamp_selection();
            return;
        };
        let status = task.status;
        let columns = self.coordinator.columns();
        if let Some(column) = columns.iter().position(|column| column.status == status) {
            self.selected_column = column;
            self.selected_row = self
                .column_task_ids(column)
                .iter()
                .position(|id| id == task_id)
                .unwrap_or(0);
        } else {
            self.clamp_selection();
        }
    }

    // --- drag -------------------------------------------------------------

    pub(crate) fn start_drag(&mut self) {
        let Some(task_id) = self.selected_task_id() else {
            self.status_message = "No task selected".to_string();
            return;
        };
        if self.coordinator.start(&self.store, &task_id) {
            self.pointer = DragPointer {
                column: self.selected_column,
                row: None,
            };
            self.status_message = format!("Dragging {task_id}");
        }
    }

    /// Drop id under the pointer: a card id when on a card, else the column id.
    pub(crate) fn pointer_target(&self) -> Option<String> {
        let columns = self.coordinator.columns();
        let column = columns.get(self.pointer.column)?;
        let card = self
            .pointer
            .row
            .and_then(|row| self.column_task_ids(self.pointer.column).into_iter().nth(row));
        Some(card.unwrap_or_else(|| column.drop_id().to_string()))
    }

    pub(crate) fn move_pointer_column(&mut self, delta: isize) {
        self.pointer.column = step(self.pointer.column, delta, self.column_count());
        self.pointer.row = None;
        self.pointer_moved();
    }

    /// Walk the pointer through the column header and its cards.
    pub(crate) fn move_pointer_row(&mut self, delta: isize) {
        let len = self.column_task_ids(self.pointer.column).len();
        let slots = len + 1;
        let current = self.pointer.row.map_or(0, |row| row.min(len.saturating_sub(1)) + 1);
        let next = step(current, delta, slots);
        self.pointer.row = next.checked_sub(1);
        self.pointer_moved();
    }

    fn pointer_moved(&mut self) {
        let target = self.pointer_target();
        self.coordinator.over(&mut self.store, target.as_deref());
        if let Some(target) = target {
            self.status_message = match self.coordinator.active_task_id() {
                Some(task_id) => format!("Dragging {task_id} over {target}"),
                None => String::new(),
            };
        }
        self.flush_commits();
    }

    pub(crate) fn drop_drag(&mut self) {
        let target = self
            .coordinator
            .state()
            .hover_target()
            .map(str::to_string);
        let task_id = self.coordinator.active_task_id().map(str::to_string);
        self.coordinator.end(&mut self.store, target.as_deref());
        self.finish_drag(task_id, "Dropped");
    }

    pub(crate) fn cancel_drag(&mut self) {
        let task_id = self.coordinator.active_task_id().map(str::to_string);
        self.coordinator.cancel();
        self.finish_drag(task_id, "Drag cancelled");
    }

    fn finish_drag(&mut self, task_id: Option<String>, message: &str) {
        self.flush_commits();
        if let Some((mark, tasks)) = self.deferred_load.take() {
            debug!(count = tasks.len(), mark, "applying reload deferred during drag");
            self.store.replace_loaded(tasks, mark);
        }
        match task_id {
            Some(task_id) => {
                self.follow_task(&task_id);
                self.status_message = format!("{message}: {task_id}");
            }
            None => self.clamp_selection(),
        }
    }

    // --- non-drag actions -------------------------------------------------

    pub(crate) fn advance_selected(&mut self) {
        let Some(task_id) = self.selected_task_id() else {
            return;
        };
        if self.store.advance_status(&task_id).is_some() {
            self.flush_commits();
            self.follow_task(&task_id);
            if let Some(task) = self.store.task(&task_id) {
                self.status_message = format!("{} -> {}", task.title, task.status.label());
            }
        }
    }

    pub(crate) fn cancel_selected(&mut self) {
        let Some(task_id) = self.selected_task_id() else {
            return;
        };
        if self.store.cancel_task(&task_id).is_some() {
            self.flush_commits();
            self.clamp_selection();
            self.status_message = format!("Cancelled {task_id}");
        }
    }

    pub(crate) fn request_delete(&mut self) {
        if let Some(task) = self.selected_task() {
            self.pending_delete = Some(PendingDelete {
                task_id: task.id.clone(),
                title: task.title.clone(),
            });
        }
    }

    pub(crate) fn confirm_delete(&mut self) {
        if let Some(pending) = self.pending_delete.take() {
            info!(task_id = %pending.task_id, "deleting task");
            self.status_message = format!("Deleting {}...", pending.title);
            self.dispatcher.dispatch_delete(pending.task_id);
        }
    }

    pub(crate) fn dismiss_delete(&mut self) {
        self.pending_delete = None;
    }

    pub(crate) fn request_refresh(&mut self) {
        if self.refresh_in_flight {
            return;
        }
        self.refresh_in_flight = true;
        self.last_refresh = Instant::now();
        self.dispatcher
            .dispatch_refresh(self.project_id.clone(), self.store.reload_mark());
    }

    /// Periodic work on every UI tick.
    pub(crate) fn on_tick(&mut self) {
        self.store.notifications_mut().tick();
        if !self.coordinator.is_dragging() && self.last_refresh.elapsed() >= self.refresh_interval {
            self.request_refresh();
        }
    }

    fn flush_commits(&mut self) {
        let commits = self.store.take_pending();
        if !commits.is_empty() {
            self.dispatcher.dispatch_all(commits);
        }
    }

    pub(crate) fn handle_gateway_event(&mut self, event: GatewayEvent) {
        match event {
            GatewayEvent::Status(ack) => {
                let outcome = self.store.apply_ack(ack);
                debug!(outcome = ?outcome, "status ack reconciled");
            }
            GatewayEvent::Deleted { task_id, result } => match result {
                Ok(()) => {
                    let title = self
                        .store
                        .remove_task(&task_id)
                        .map(|task| task.title)
                        .unwrap_or(task_id);
                    self.store
                        .notifications_mut()
                        .success(format!("Deleted {title}"));
                    self.status_message = format!("Deleted {title}");
                    self.clamp_selection();
                }
                Err(err) => {
                    let title = self
                        .store
                        .task(&task_id)
                        .map(|task| task.title.clone())
                        .unwrap_or(task_id);
                    self.store
                        .notifications_mut()
                        .error(format!("Failed to delete {title}: {err}"));
                }
            },
            GatewayEvent::Loaded { mark, result } => {
                self.refresh_in_flight = false;
                match result {
                    Ok(tasks) if self.coordinator.is_dragging() => {
                        self.deferred_load = Some((mark, tasks));
                    }
                    Ok(tasks) => {
                        let count = tasks.len();
                        self.store.replace_loaded(tasks, mark);
                        self.clamp_selection();
                        self.status_message = format!("Loaded {count} tasks");
                    }
                    Err(err) => {
                        self.status_message = format!("refresh tasks failed: {err}");
                        self.store
                            .notifications_mut()
                            .error(format!("Refresh failed: {err}"));
                    }
                }
            }
        }
    }
}

fn step(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (current as isize + delta).rem_euclid(len as isize) as usize
}
