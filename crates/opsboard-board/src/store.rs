/*
[INPUT]:  Loaded tasks, optimistic status changes and gateway acknowledgements
[OUTPUT]: Authoritative local task collection, queued status commits, toasts
[POS]:    State layer - board host and sequence reconciliation
[UPDATE]: When status persistence or reconciliation rules change
*/

use std::collections::HashMap;

use opsboard_adapter::{Task, TaskStatus};
use tracing::{debug, info, warn};

use crate::board::{BOARD_COLUMNS, BoardHost, Column, column_for_status, column_index};
use crate::notify::Notifications;

/// A locally applied status change waiting to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCommit {
    pub task_id: String,
    pub status: TaskStatus,
    pub seq: u64,
}

/// Gateway answer for one `StatusCommit`.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusAck {
    pub task_id: String,
    pub seq: u64,
    pub result: Result<Task, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AckOutcome {
    /// Latest change confirmed; the backend copy replaced the local one.
    Applied,
    /// A newer change was made after this one; ignored.
    Stale,
    /// Latest change failed; optimistic status kept and a toast raised.
    Rejected,
    /// The task is no longer in the store.
    Unknown,
}

#[derive(Debug, Clone, Copy)]
struct LatestChange {
    seq: u64,
    status: TaskStatus,
    settled: bool,
}

/// Owns the task collection the board renders.
#[derive(Debug)]
pub struct TaskStore {
    tasks: Vec<Task>,
    latest: HashMap<String, LatestChange>,
    next_seq: u64,
    pending: Vec<StatusCommit>,
    notifications: Notifications,
    columns: &'static [Column],
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new(Notifications::default())
    }
}

impl TaskStore {
    pub fn new(notifications: Notifications) -> Self {
        Self {
            tasks: Vec::new(),
            latest: HashMap::new(),
            next_seq: 1,
            pending: Vec::new(),
            notifications,
            columns: &BOARD_COLUMNS,
        }
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let mut store = Self::default();
        store.replace_all(tasks);
        store
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == task_id)
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    /// Whether a status change for `task_id` is still awaiting its acknowledgement.
    pub fn is_in_flight(&self, task_id: &str) -> bool {
        self.latest
            .get(task_id)
            .is_some_and(|change| !change.settled)
    }

    /// Sequence number the next status change will get.
    ///
    /// Taken when a reload is requested; every change at or above it was made
    /// after the reload left and is newer than what the reload returns.
    pub fn reload_mark(&self) -> u64 {
        self.next_seq
    }

    /// Replace the collection with a fresh load.
    ///
    /// Tasks with an unacknowledged change keep their optimistic status so a
    /// reload racing a write does not snap cards back.
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.replace_loaded(tasks, self.next_seq);
    }

    /// Replace the collection with a load requested at `mark`.
    ///
    /// Besides unacknowledged changes, any change made at or after `mark`
    /// keeps its local status even when already acknowledged.
    pub fn replace_loaded(&mut self, mut tasks: Vec<Task>, mark: u64) {
        for task in tasks.iter_mut() {
            let Some(change) = self
                .latest
                .get(&task.id)
                .filter(|change| !change.settled || change.seq >= mark)
            else {
                continue;
            };
            task.status = self
                .tasks
                .iter()
                .find(|local| local.id == task.id)
                .map_or(change.status, |local| local.status);
        }
        self.latest
            .retain(|task_id, change| !change.settled || tasks.iter().any(|t| &t.id == task_id));
        debug!(count = tasks.len(), mark, "task collection replaced");
        self.tasks = tasks;
    }

    /// Apply a status change locally and queue it for persistence.
    ///
    /// Returns the sequence number assigned, or `None` when the task is
    /// unknown or already has `status`.
    pub fn set_status(&mut self, task_id: &str, status: TaskStatus) -> Option<u64> {
        let task = self.tasks.iter_mut().find(|task| task.id == task_id)?;
        if task.status == status {
            return None;
        }
        task.status = status;

        let seq = self.next_seq;
        self.next_seq += 1;
        self.latest.insert(
            task_id.to_string(),
            LatestChange {
                seq,
                status,
                settled: false,
            },
        );
        self.pending.push(StatusCommit {
            task_id: task_id.to_string(),
            status,
            seq,
        });
        debug!(task_id = %task_id, status = %status, seq, "status change queued");
        Some(seq)
    }

    /// Move the task to the next column in table order, wrapping at the end.
    pub fn advance_status(&mut self, task_id: &str) -> Option<u64> {
        let current = self.task(task_id)?.status;
        let next = match column_index(current, self.columns) {
            Some(index) => self.columns[(index + 1) % self.columns.len()].status,
            None => self.columns.first()?.status,
        };
        self.set_status(task_id, next)
    }

    pub fn cancel_task(&mut self, task_id: &str) -> Option<u64> {
        self.set_status(task_id, TaskStatus::Cancelled)
    }

    /// Drain commits queued since the last call, in the order they were made.
    pub fn take_pending(&mut self) -> Vec<StatusCommit> {
        std::mem::take(&mut self.pending)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Reconcile a gateway acknowledgement.
    ///
    /// Only the acknowledgement for the latest sequence of a task is applied.
    pub fn apply_ack(&mut self, ack: StatusAck) -> AckOutcome {
        let Some(change) = self.latest.get_mut(&ack.task_id) else {
            debug!(task_id = %ack.task_id, seq = ack.seq, "ack for untracked task");
            return AckOutcome::Unknown;
        };

        if change.seq != ack.seq {
            match &ack.result {
                Ok(_) => debug!(
                    task_id = %ack.task_id,
                    seq = ack.seq,
                    latest = change.seq,
                    "discarding stale ack"
                ),
                Err(err) => warn!(
                    task_id = %ack.task_id,
                    seq = ack.seq,
                    latest = change.seq,
                    error = %err,
                    "superseded status change failed"
                ),
            }
            return AckOutcome::Stale;
        }
        change.settled = true;
        let requested = change.status;

        let Some(index) = self.tasks.iter().position(|task| task.id == ack.task_id) else {
            return AckOutcome::Unknown;
        };

        match ack.result {
            Ok(task) => {
                info!(task_id = %ack.task_id, seq = ack.seq, status = %task.status, "status persisted");
                self.tasks[index] = task;
                AckOutcome::Applied
            }
            Err(err) => {
                let title = self.tasks[index].title.clone();
                let target = self.status_title(requested);
                warn!(
                    task_id = %ack.task_id,
                    seq = ack.seq,
                    status = %requested,
                    error = %err,
                    "status change failed; keeping local status"
                );
                self.notifications
                    .error(format!("Failed to move {title} to {target}: {err}"));
                AckOutcome::Rejected
            }
        }
    }

    /// Drop a task after the gateway confirmed its deletion.
    pub fn remove_task(&mut self, task_id: &str) -> Option<Task> {
        let index = self.tasks.iter().position(|task| task.id == task_id)?;
        self.latest.remove(task_id);
        self.pending.retain(|commit| commit.task_id != task_id);
        Some(self.tasks.remove(index))
    }

    /// Insert or replace a task by id.
    pub fn upsert(&mut self, task: Task) {
        match self.tasks.iter_mut().find(|existing| existing.id == task.id) {
            Some(existing) => *existing = task,
            None => self.tasks.push(task),
        }
    }

    fn status_title(&self, status: TaskStatus) -> &'static str {
        column_for_status(status, self.columns)
            .map(|column| column.title)
            .unwrap_or_else(|| status.label())
    }
}

impl BoardHost for TaskStore {
    fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    fn on_status_change(&mut self, task_id: &str, new_status: TaskStatus) {
        self.set_status(task_id, new_status);
    }
}
