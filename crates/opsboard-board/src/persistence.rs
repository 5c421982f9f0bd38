/*
[INPUT]:  Queued status commits, delete and reload requests
[OUTPUT]: Gateway calls on background tasks, results sent back as GatewayEvent
[POS]:    Persistence layer - async gateway dispatch
[UPDATE]: When a new gateway operation is wired into the board
*/

use std::sync::Arc;

use opsboard_adapter::{OpsboardError, Task, TaskGateway};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::store::{StatusAck, StatusCommit};

/// Results delivered back to the UI loop.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayEvent {
    Status(StatusAck),
    Deleted {
        task_id: String,
        result: Result<(), String>,
    },
    /// `mark` is the store's reload mark when the reload was requested.
    Loaded {
        mark: u64,
        result: Result<Vec<Task>, String>,
    },
}

pub type GatewayEventReceiver = mpsc::UnboundedReceiver<GatewayEvent>;

/// Fire-and-forget bridge between the synchronous board and the gateway.
///
/// Each call spawns one tokio task; nothing is awaited by the caller. Tasks
/// still running when `shutdown` is cancelled are dropped without sending.
#[derive(Clone)]
pub struct StatusDispatcher {
    gateway: Arc<dyn TaskGateway>,
    events: mpsc::UnboundedSender<GatewayEvent>,
    shutdown: CancellationToken,
}

impl StatusDispatcher {
    pub fn new(
        gateway: Arc<dyn TaskGateway>,
        shutdown: CancellationToken,
    ) -> (Self, GatewayEventReceiver) {
        let (events, rx) = mpsc::unbounded_channel();
        (
            Self {
                gateway,
                events,
                shutdown,
            },
            rx,
        )
    }

    pub fn dispatch_status(&self, commit: StatusCommit) {
        let gateway = self.gateway.clone();
        let events = self.events.clone();
        let shutdown = self.shutdown.clone();

        tokio::spawn(async move {
            debug!(task_id = %commit.task_id, status = %commit.status, seq = commit.seq, "persisting status");
            let result = tokio::select! {
                biased;
                _ = shutdown.cancelled() => return,
                result = gateway.update_status(&commit.task_id, commit.status) => result,
            };
            let ack = StatusAck {
                task_id: commit.task_id,
                seq: commit.seq,
                result: result.map_err(|err| describe_error(&err)),
            };
            if events.send(GatewayEvent::Status(ack)).is_err() {
                debug!("status ack dropped; receiver closed");
            }
        });
    }

    /// Dispatch every commit in order; each gets its own task.
    pub fn dispatch_all(&self, commits: Vec<StatusCommit>) {
        for commit in commits {
            self.dispatch_status(commit);
        }
    }

    pub fn dispatch_delete(&self, task_id: String) {
        let gateway = self.gateway.clone();
        let events = self.events.clone();
        let shutdown = self.shutdown.clone();

        tokio::spawn(async move {
            let result = tokio::select! {
                biased;
                _ = shutdown.cancelled() => return,
                result = gateway.delete_task(&task_id) => result,
            };
            if let Err(err) = &result {
                warn!(task_id = %task_id, error = %err, "delete failed");
            }
            let event = GatewayEvent::Deleted {
                task_id,
                result: result.map_err(|err| describe_error(&err)),
            };
            if events.send(event).is_err() {
                debug!("delete result dropped; receiver closed");
            }
        });
    }

    pub fn dispatch_refresh(&self, project_id: Option<String>, mark: u64) {
        let gateway = self.gateway.clone();
        let events = self.events.clone();
        let shutdown = self.shutdown.clone();

        tokio::spawn(async move {
            let result = tokio::select! {
                biased;
                _ = shutdown.cancelled() => return,
                result = gateway.list_tasks(project_id.as_deref()) => result,
            };
            if let Err(err) = &result {
                warn!(error = %err, "task reload failed");
            }
            let event = GatewayEvent::Loaded {
                mark,
                result: result.map_err(|err| describe_error(&err)),
            };
            if events.send(event).is_err() {
                debug!("reload result dropped; receiver closed");
            }
        });
    }
}

/// Error text shown to the user, with a hint when trying again may help.
fn describe_error(err: &OpsboardError) -> String {
    match err.retry_delay() {
        Some(seconds) => format!("{err} (temporary, try again in {seconds}s)"),
        None if err.is_retryable() => format!("{err} (temporary, try again)"),
        None => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opsboard_adapter::{InMemoryGateway, TaskStatus};

    fn dispatcher(gateway: Arc<InMemoryGateway>) -> (StatusDispatcher, GatewayEventReceiver) {
        StatusDispatcher::new(gateway, CancellationToken::new())
    }

    #[tokio::test]
    async fn status_commit_round_trips_as_ack() {
        let gateway = Arc::new(InMemoryGateway::new(vec![Task::new(
            "t-1",
            "Ship",
            TaskStatus::Todo,
        )]));
        let (dispatcher, mut rx) = dispatcher(gateway.clone());

        dispatcher.dispatch_status(StatusCommit {
            task_id: "t-1".to_string(),
            status: TaskStatus::Done,
            seq: 7,
        });

        let Some(GatewayEvent::Status(ack)) = rx.recv().await else {
            panic!("expected status ack");
        };
        assert_eq!(ack.seq, 7);
        assert_eq!(ack.result.map(|task| task.status), Ok(TaskStatus::Done));
        assert_eq!(
            gateway.status_calls(),
            vec![("t-1".to_string(), TaskStatus::Done)]
        );
    }

    #[tokio::test]
    async fn failed_write_is_reported_as_error_string() {
        let gateway = Arc::new(InMemoryGateway::new(vec![Task::new(
            "t-1",
            "Ship",
            TaskStatus::Todo,
        )]));
        gateway.fail_writes_for("t-1");
        let (dispatcher, mut rx) = dispatcher(gateway);

        dispatcher.dispatch_delete("t-1".to_string());

        match rx.recv().await {
            Some(GatewayEvent::Deleted { task_id, result }) => {
                assert_eq!(task_id, "t-1");
                let err = result.expect_err("delete should fail");
                assert!(err.contains("500"), "unexpected error: {err}");
                assert!(err.ends_with("(temporary, try again)"), "unexpected error: {err}");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn error_text_hints_when_trying_again_may_help() {
        let rate_limited = OpsboardError::RateLimit { retry_after: 7 };
        assert_eq!(
            describe_error(&rate_limited),
            "Rate limit exceeded, retry after 7s (temporary, try again in 7s)"
        );

        let server = OpsboardError::Api {
            code: 503,
            message: "maintenance".to_string(),
        };
        assert!(describe_error(&server).ends_with("(temporary, try again)"));

        let missing = OpsboardError::NotFound {
            resource: "task t-1".to_string(),
        };
        assert_eq!(describe_error(&missing), "Not found: task t-1");
    }

    #[tokio::test]
    async fn results_after_receiver_closed_are_dropped_quietly() {
        let gateway = Arc::new(InMemoryGateway::new(vec![Task::new(
            "t-1",
            "Ship",
            TaskStatus::Todo,
        )]));
        let (dispatcher, rx) = dispatcher(gateway.clone());
        drop(rx);

        dispatcher.dispatch_delete("t-1".to_string());
        dispatcher.dispatch_refresh(None, 1);
        for _ in 0..50 {
            if gateway.snapshot().is_empty() {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(gateway.snapshot().is_empty());
    }

    #[tokio::test]
    async fn refresh_loads_project_scoped_tasks() {
        let mut scoped = Task::new("t-1", "Scoped", TaskStatus::Todo);
        scoped.project_id = Some("p-1".to_string());
        let gateway = Arc::new(InMemoryGateway::new(vec![
            scoped,
            Task::new("t-2", "Other", TaskStatus::Done),
        ]));
        let (dispatcher, mut rx) = dispatcher(gateway);

        dispatcher.dispatch_refresh(Some("p-1".to_string()), 3);

        let Some(GatewayEvent::Loaded {
            mark,
            result: Ok(tasks),
        }) = rx.recv().await
        else {
            panic!("expected loaded tasks");
        };
        assert_eq!(mark, 3);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, "t-1");
    }

    #[tokio::test]
    async fn cancelled_dispatcher_sends_nothing() {
        let gateway = Arc::new(InMemoryGateway::new(Vec::new()));
        let shutdown = CancellationToken::new();
        let (dispatcher, mut rx) = StatusDispatcher::new(gateway, shutdown.clone());
        shutdown.cancel();

        dispatcher.dispatch_refresh(None, 1);
        drop(dispatcher);

        assert!(rx.recv().await.is_none());
    }
}
