/*
[INPUT]:  None (list endpoint)
[OUTPUT]: Projects available to scope the task board
[POS]:    HTTP layer - project endpoints
[UPDATE]: When project endpoints change
*/

use reqwest::Method;

use crate::http::{OpsboardClient, Result};
use crate::types::Project;

impl OpsboardClient {
    /// GET /api/projects
    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        let builder = self.request(Method::GET, "api/projects")?;
        self.send_json(builder).await
    }
}
