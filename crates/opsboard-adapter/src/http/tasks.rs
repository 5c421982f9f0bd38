/*
[INPUT]:  Task identifiers, status values and task payloads
[OUTPUT]: Authoritative tasks returned by the backend
[POS]:    HTTP layer - task endpoints
[UPDATE]: When adding task endpoints or changing request shapes
*/

use reqwest::Method;

use crate::http::{OpsboardClient, Result};
use crate::types::{
    CreateTaskRequest, Task, TaskStatus, UpdateTaskRequest, UpdateTaskStatusRequest,
};

impl OpsboardClient {
    /// List tasks, optionally restricted to one project
    ///
    /// GET /api/tasks?project_id={project_id}
    pub async fn list_tasks(&self, project_id: Option<&str>) -> Result<Vec<Task>> {
        let mut builder = self.request(Method::GET, "api/tasks")?;
        if let Some(project_id) = project_id {
            builder = builder.query(&[("project_id", project_id)]);
        }
        self.send_json(builder).await
    }

    /// GET /api/tasks/{id}
    pub async fn get_task(&self, task_id: &str) -> Result<Task> {
        let builder = self.request(Method::GET, &format!("api/tasks/{task_id}"))?;
        self.send_json(builder).await
    }

    /// POST /api/tasks
    pub async fn create_task(&self, req: &CreateTaskRequest) -> Result<Task> {
        let builder = self.request(Method::POST, "api/tasks")?.json(req);
        self.send_json(builder).await
    }

    /// PUT /api/tasks/{id}
    pub async fn update_task(&self, task_id: &str, req: &UpdateTaskRequest) -> Result<Task> {
        let builder = self
            .request(Method::PUT, &format!("api/tasks/{task_id}"))?
            .json(req);
        self.send_json(builder).await
    }

    /// Persist a status change and return the task as recorded by the backend
    ///
    /// PATCH /api/tasks/{id}/status
    pub async fn update_task_status(&self, task_id: &str, status: TaskStatus) -> Result<Task> {
        let builder = self
            .request(Method::PATCH, &format!("api/tasks/{task_id}/status"))?
            .json(&UpdateTaskStatusRequest { status });
        self.send_json(builder).await
    }

    /// DELETE /api/tasks/{id}
    pub async fn delete_task(&self, task_id: &str) -> Result<()> {
        let builder = self.request(Method::DELETE, &format!("api/tasks/{task_id}"))?;
        self.send_empty(builder).await
    }
}
