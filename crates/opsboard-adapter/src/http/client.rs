/*
[INPUT]:  HTTP configuration (base URL, timeouts, bearer token)
[OUTPUT]: Configured reqwest client plus shared send/decode helpers
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, RETRY_AFTER};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::http::error::{OpsboardError, Result};
use crate::types::ApiErrorBody;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Credentials for authenticated requests
#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_token: String,
}

/// HTTP client for the dashboard REST backend
#[derive(Debug, Clone)]
pub struct OpsboardClient {
    http_client: Client,
    base_url: Url,
    credentials: Option<Credentials>,
    timeout: Duration,
}

impl OpsboardClient {
    /// Create a new client with default configuration
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(ClientConfig::default(), base_url)
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig, base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(OpsboardError::Config(format!(
                "unsupported base URL scheme: {}",
                base_url.scheme()
            )));
        }

        // Endpoints are joined relative to the base so a path prefix survives.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url,
            credentials: None,
            timeout: config.timeout,
        })
    }

    /// Set credentials for authenticated requests
    pub fn set_credentials(&mut self, credentials: Credentials) {
        self.credentials = Some(credentials);
    }

    /// Get credentials if set
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build full URL for an endpoint
    fn url(&self, endpoint: &str) -> Result<Url> {
        Ok(self.base_url.join(endpoint)?)
    }

    /// Build a request with bearer auth (when configured) and a fresh request id
    pub(crate) fn request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let url = self.url(endpoint)?;
        let request_id = Uuid::new_v4().to_string();
        tracing::debug!(%method, %url, request_id = %request_id, "dashboard api request");

        let mut builder = self
            .http_client
            .request(method, url)
            .header(REQUEST_ID_HEADER, request_id);
        if let Some(credentials) = &self.credentials {
            builder = builder.header(
                AUTHORIZATION,
                format!("Bearer {}", credentials.api_token),
            );
        }
        Ok(builder)
    }

    /// Send a request and decode a JSON body
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.send(builder).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|err| {
            tracing::warn!(error = %err, "failed to decode dashboard api response");
            OpsboardError::from(err)
        })
    }

    /// Send a request whose success body is ignored
    pub(crate) async fn send_empty(&self, builder: RequestBuilder) -> Result<()> {
        self.send(builder).await?;
        Ok(())
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await.map_err(|err| {
            if err.is_timeout() {
                OpsboardError::Timeout {
                    duration: self.timeout.as_secs(),
                }
            } else {
                OpsboardError::Http(err)
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<u64>().ok());
        let path = response.url().path().to_string();
        let body = response.text().await.unwrap_or_default();
        Err(map_error_status(status, &path, &body, retry_after))
    }
}

fn map_error_status(
    status: StatusCode,
    path: &str,
    body: &str,
    retry_after: Option<u64>,
) -> OpsboardError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .map(|parsed| parsed.message)
        .unwrap_or_else(|_| {
            if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            } else {
                body.trim().to_string()
            }
        });

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            OpsboardError::Authentication { message }
        }
        StatusCode::NOT_FOUND => OpsboardError::NotFound {
            resource: path.to_string(),
        },
        StatusCode::TOO_MANY_REQUESTS => OpsboardError::RateLimit {
            retry_after: retry_after.unwrap_or(1),
        },
        _ => OpsboardError::api_error(status, message),
    }
}
