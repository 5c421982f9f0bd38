/*
[INPUT]:  Error payloads returned by the dashboard backend
[OUTPUT]: Typed error body used for error mapping
[POS]:    Data layer - response envelopes
[UPDATE]: When backend error format changes
*/

use serde::{Deserialize, Serialize};

/// Error body returned with non-2xx responses.
///
/// The backend is inconsistent about the field name, so `error` and
/// `detail` are accepted as aliases of `message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(alias = "error", alias = "detail")]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}
