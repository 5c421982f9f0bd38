/*
[INPUT]:  Task ids and target statuses from the board host
[OUTPUT]: Authoritative tasks or adapter errors
[POS]:    Gateway layer - persistence abstraction consumed by the board
[UPDATE]: When the board needs a new persistence operation
*/

use async_trait::async_trait;

use crate::http::{OpsboardClient, Result};
use crate::types::{Task, TaskStatus};

#[cfg(any(test, feature = "test-util"))]
mod memory;

#[cfg(any(test, feature = "test-util"))]
pub use memory::InMemoryGateway;

/// Persistence gateway for task state.
///
/// The REST client is the production implementation; `InMemoryGateway`
/// (feature `test-util`) backs tests.
#[async_trait]
pub trait TaskGateway: Send + Sync {
    /// Load the task collection, optionally scoped to a project
    async fn list_tasks(&self, project_id: Option<&str>) -> Result<Vec<Task>>;

    /// Record a status change and return the task as the backend now sees it
    async fn update_status(&self, task_id: &str, status: TaskStatus) -> Result<Task>;

    /// Delete a task permanently
    async fn delete_task(&self, task_id: &str) -> Result<()>;
}

#[async_trait]
impl TaskGateway for OpsboardClient {
    async fn list_tasks(&self, project_id: Option<&str>) -> Result<Vec<Task>> {
        OpsboardClient::list_tasks(self, project_id).await
    }

    async fn update_status(&self, task_id: &str, status: TaskStatus) -> Result<Task> {
        self.update_task_status(task_id, status).await
    }

    async fn delete_task(&self, task_id: &str) -> Result<()> {
        OpsboardClient::delete_task(self, task_id).await
    }
}
