/*
[INPUT]:  Task store, drag coordinator, board view and in-memory gateway
[OUTPUT]: End-to-end board behaviour checks without a terminal
[POS]:    Integration tests - board core with persistence
[UPDATE]: When drag or reconciliation behaviour changes
*/

use std::sync::Arc;

use opsboard_adapter::{InMemoryGateway, Task, TaskStatus};
use opsboard_board::board::{BoardHost, BoardView, DROP_PLACEHOLDER, DragCoordinator};
use opsboard_board::{AckOutcome, GatewayEvent, StatusDispatcher, TaskStore};
use tokio_util::sync::CancellationToken;

fn five_tasks() -> Vec<Task> {
    vec![
        Task::new("t-todo", "Patch kernel", TaskStatus::Todo),
        Task::new("t-doing", "Migrate DNS", TaskStatus::InProgress),
        Task::new("t-review", "Review alerts", TaskStatus::InReview),
        Task::new("t-done", "Renew certs", TaskStatus::Done),
        Task::new("t-blocked", "Vendor ticket", TaskStatus::Blocked),
    ]
}

#[test]
fn hover_then_release_over_another_column_commits_twice() {
    let mut store = TaskStore::with_tasks(five_tasks());
    let mut coordinator = DragCoordinator::new();

    {
        let view = BoardView::build(store.tasks(), &coordinator);
        assert_eq!(view.columns.len(), 5);
        assert!(view.columns.iter().all(|column| column.len() == 1));
        assert!(view.columns.iter().all(|column| !column.is_over));
    }

    assert!(coordinator.start(&store, "t-todo"));
    assert_eq!(
        coordinator.over(&mut store, Some("DONE")),
        Some(TaskStatus::Done)
    );
    assert_eq!(
        coordinator.end(&mut store, Some("BLOCKED")),
        Some(TaskStatus::Blocked)
    );

    let commits = store.take_pending();
    let statuses: Vec<TaskStatus> = commits.iter().map(|c| c.status).collect();
    assert_eq!(statuses, vec![TaskStatus::Done, TaskStatus::Blocked]);

    let view = BoardView::build(store.tasks(), &coordinator);
    assert_eq!(view.task_ids(TaskStatus::Blocked), vec!["t-todo", "t-blocked"]);
    assert!(view.task_ids(TaskStatus::Todo).is_empty());
    assert!(view.task_ids(TaskStatus::Done).iter().all(|id| *id != "t-todo"));
    assert!(view.overlay.is_none());
}

#[test]
fn hovering_an_empty_column_shows_drop_placeholder() {
    let mut store = TaskStore::with_tasks(vec![Task::new("t-1", "Solo", TaskStatus::Todo)]);
    let mut coordinator = DragCoordinator::new();
    coordinator.start(&store, "t-1");
    coordinator.over(&mut store, Some("IN_REVIEW"));

    let view = BoardView::build(store.tasks(), &coordinator);
    let review = view.column(TaskStatus::InReview).expect("review column");
    assert!(review.is_over);
    // The dragged card moved in on hover, so the column is no longer empty.
    assert_eq!(review.placeholder(), None);
    assert!(review.cards[0].is_ghost());

    let todo = view.column(TaskStatus::Todo).expect("todo column");
    assert_eq!(todo.placeholder(), Some("No tasks"));

    coordinator.over(&mut store, Some("DONE"));
    let view = BoardView::build(store.tasks(), &coordinator);
    let review = view.column(TaskStatus::InReview).expect("review column");
    assert!(!review.is_over);
    assert_eq!(review.placeholder(), Some("No tasks"));
    assert_ne!(review.placeholder(), Some(DROP_PLACEHOLDER));
}

#[tokio::test]
async fn rapid_moves_reconcile_to_the_latest_status() {
    let gateway = Arc::new(InMemoryGateway::new(five_tasks()));
    let (dispatcher, mut rx) = StatusDispatcher::new(gateway.clone(), CancellationToken::new());
    let mut store = TaskStore::with_tasks(five_tasks());
    let mut coordinator = DragCoordinator::new();

    coordinator.start(&store, "t-doing");
    coordinator.over(&mut store, Some("IN_REVIEW"));
    coordinator.over(&mut store, Some("t-done"));
    coordinator.end(&mut store, Some("t-done"));
    dispatcher.dispatch_all(store.take_pending());

    let mut outcomes = Vec::new();
    for _ in 0..2 {
        match rx.recv().await {
            Some(GatewayEvent::Status(ack)) => outcomes.push(store.apply_ack(ack)),
            other => panic!("unexpected event: {other:?}"),
        }
    }
    outcomes.sort_by_key(|outcome| *outcome == AckOutcome::Applied);
    assert_eq!(outcomes, vec![AckOutcome::Stale, AckOutcome::Applied]);

    let task = store.task("t-doing").expect("task");
    assert_eq!(task.status, TaskStatus::Done);
    assert!(!store.is_in_flight("t-doing"));
    assert_eq!(gateway.status_calls().len(), 2);
}

#[tokio::test]
async fn failed_persistence_keeps_card_and_raises_toast() {
    let gateway = Arc::new(InMemoryGateway::new(five_tasks()));
    gateway.fail_writes_for("t-review");
    let (dispatcher, mut rx) = StatusDispatcher::new(gateway, CancellationToken::new());
    let mut store = TaskStore::with_tasks(five_tasks());
    let mut coordinator = DragCoordinator::new();

    coordinator.start(&store, "t-review");
    coordinator.end(&mut store, Some("DONE"));
    dispatcher.dispatch_all(store.take_pending());

    let Some(GatewayEvent::Status(ack)) = rx.recv().await else {
        panic!("expected status ack");
    };
    assert_eq!(store.apply_ack(ack), AckOutcome::Rejected);

    assert_eq!(
        store.task("t-review").map(|t| t.status),
        Some(TaskStatus::Done)
    );
    let toast = store.notifications().current().expect("toast");
    assert!(
        toast.message.starts_with("Failed to move Review alerts to Done:"),
        "{}",
        toast.message
    );
}

#[test]
fn cancel_after_crossing_keeps_the_commit() {
    let mut store = TaskStore::with_tasks(five_tasks());
    let mut coordinator = DragCoordinator::new();

    coordinator.start(&store, "t-blocked");
    coordinator.over(&mut store, Some("TODO"));
    coordinator.cancel();

    assert_eq!(
        store.task("t-blocked").map(|t| t.status),
        Some(TaskStatus::Todo)
    );
    assert_eq!(store.take_pending().len(), 1);
    assert!(!coordinator.is_dragging());
}
