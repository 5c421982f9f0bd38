/*
[INPUT]:  Task mutations issued by the dashboard
[OUTPUT]: Serializable request bodies for task endpoints
[POS]:    Data layer - request payloads
[UPDATE]: When task write endpoints change
*/

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{TaskPriority, TaskStatus};

/// PATCH /api/tasks/{id}/status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTaskStatusRequest {
    pub status: TaskStatus,
}

/// POST /api/tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub estimated_hours: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl CreateTaskRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            project_id: None,
            description: None,
            status: TaskStatus::Todo,
            priority: TaskPriority::default(),
            assignee: None,
            due_date: None,
            estimated_hours: None,
            tags: Vec::new(),
        }
    }
}

/// PUT /api/tasks/{id}; absent fields are left untouched by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_request_body_shape() {
        let body = serde_json::to_value(UpdateTaskStatusRequest {
            status: TaskStatus::InProgress,
        })
        .expect("serialize");
        assert_eq!(body, serde_json::json!({ "status": "IN_PROGRESS" }));
    }

    #[test]
    fn update_request_omits_absent_fields() {
        let request = UpdateTaskRequest {
            priority: Some(TaskPriority::High),
            ..UpdateTaskRequest::default()
        };
        let body = serde_json::to_value(&request).expect("serialize");
        assert_eq!(body, serde_json::json!({ "priority": "HIGH" }));
    }
}
