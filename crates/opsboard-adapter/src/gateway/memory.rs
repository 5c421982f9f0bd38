/*
[INPUT]:  Seed tasks and injected write failures
[OUTPUT]: TaskGateway implementation held in memory
[POS]:    Gateway layer - test double behind the test-util feature
[UPDATE]: When TaskGateway gains an operation
*/

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::TaskGateway;
use crate::http::{OpsboardError, Result};
use crate::types::{Task, TaskStatus};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-memory gateway for testing
#[derive(Debug, Default)]
pub struct InMemoryGateway {
    tasks: Mutex<Vec<Task>>,
    failing: Mutex<HashSet<String>>,
    status_calls: Mutex<Vec<(String, TaskStatus)>>,
}

impl InMemoryGateway {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Mutex::new(tasks),
            ..Self::default()
        }
    }

    /// Make every write for `task_id` fail with a 500 API error
    pub fn fail_writes_for(&self, task_id: &str) {
        lock(&self.failing).insert(task_id.to_string());
    }

    /// Status updates received so far, in call order
    pub fn status_calls(&self) -> Vec<(String, TaskStatus)> {
        lock(&self.status_calls).clone()
    }

    pub fn snapshot(&self) -> Vec<Task> {
        lock(&self.tasks).clone()
    }

    fn check_writable(&self, task_id: &str) -> Result<()> {
        if lock(&self.failing).contains(task_id) {
            return Err(OpsboardError::Api {
                code: 500,
                message: format!("write rejected for {task_id}"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl TaskGateway for InMemoryGateway {
    async fn list_tasks(&self, project_id: Option<&str>) -> Result<Vec<Task>> {
        let tasks = lock(&self.tasks);
        Ok(tasks
            .iter()
            .filter(|task| project_id.is_none() || task.project_id.as_deref() == project_id)
            .cloned()
            .collect())
    }

    async fn update_status(&self, task_id: &str, status: TaskStatus) -> Result<Task> {
        lock(&self.status_calls).push((task_id.to_string(), status));
        self.check_writable(task_id)?;

        let mut tasks = lock(&self.tasks);
        let task = tasks
            .iter_mut()
            .find(|task| task.id == task_id)
            .ok_or_else(|| OpsboardError::NotFound {
                resource: format!("task {task_id}"),
            })?;
        task.status = status;
        Ok(task.clone())
    }

    async fn delete_task(&self, task_id: &str) -> Result<()> {
        self.check_writable(task_id)?;
        let mut tasks = lock(&self.tasks);
        let before = tasks.len();
        tasks.retain(|task| task.id != task_id);
        if tasks.len() == before {
            return Err(OpsboardError::NotFound {
                resource: format!("task {task_id}"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_gateway_records_status_updates() {
        let gateway = InMemoryGateway::new(vec![Task::new("t-1", "Deploy", TaskStatus::Todo)]);

        let updated = gateway
            .update_status("t-1", TaskStatus::Done)
            .await
            .expect("update");
        assert_eq!(updated.status, TaskStatus::Done);
        assert_eq!(
            gateway.status_calls(),
            vec![("t-1".to_string(), TaskStatus::Done)]
        );
    }

    #[tokio::test]
    async fn in_memory_gateway_failure_and_missing() {
        let gateway = InMemoryGateway::new(vec![Task::new("t-1", "Deploy", TaskStatus::Todo)]);
        gateway.fail_writes_for("t-1");

        let err = gateway
            .update_status("t-1", TaskStatus::Done)
            .await
            .expect_err("write should fail");
        assert!(err.is_retryable());
        assert_eq!(gateway.snapshot()[0].status, TaskStatus::Todo);

        let err = gateway.delete_task("t-404").await.expect_err("missing");
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn in_memory_gateway_filters_by_project() {
        let mut scoped = Task::new("t-1", "Scoped", TaskStatus::Todo);
        scoped.project_id = Some("p-1".to_string());
        let gateway = InMemoryGateway::new(vec![scoped, Task::new("t-2", "Loose", TaskStatus::Todo)]);

        let tasks = gateway.list_tasks(Some("p-1")).await.expect("list");
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, "t-1");
        assert_eq!(gateway.list_tasks(None).await.expect("list").len(), 2);
    }
}
