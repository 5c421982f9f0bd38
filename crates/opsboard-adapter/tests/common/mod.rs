/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for opsboard-adapter tests

use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Mock API token for testing
pub fn mock_api_token() -> String {
    "opsboard-test-token".to_string()
}

/// JSON body for a task in the given status
pub fn task_body(id: &str, status: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": format!("Task {id}"),
        "status": status,
        "priority": "MEDIUM"
    })
}
