//! reqwest-backed implementation of [`CategorySync`].
//!
//! Posts `{"category": ...}` to the dashboard endpoint with a JSON content
//! type and decodes whatever JSON object comes back.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Url;
use reqwest::header::{ACCEPT, CONTENT_TYPE};

use super::client::{CategorySync, SyncError};
use super::types::{CategoryRequest, DashboardResponse};

/// Builds the shared HTTP client. `None` keeps reqwest's default timeout.
pub fn build_client(timeout: Option<Duration>) -> Result<reqwest::Client, SyncError> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().map_err(|e| SyncError::Config(e.to_string()))
}

/// Resolves `target` against `base`. Absolute targets are returned as-is.
pub fn resolve_url(base: &str, target: &str) -> Result<Url, SyncError> {
    if let Ok(absolute) = Url::parse(target) {
        return Ok(absolute);
    }
    let base = Url::parse(base).map_err(|e| SyncError::Config(format!("bad base URL {base}: {e}")))?;
    base.join(target)
        .map_err(|e| SyncError::Config(format!("bad target {target}: {e}")))
}

/// Dashboard client posting over HTTP.
pub struct HttpCategorySync {
    url: String,
    client: reqwest::Client,
}

impl HttpCategorySync {
    /// Creates a client posting to `endpoint` resolved against `base_url`.
    pub fn new(
        base_url: &str,
        endpoint: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, SyncError> {
        let url = resolve_url(base_url, endpoint)?.to_string();
        Ok(Self {
            url,
            client: build_client(timeout)?,
        })
    }

    /// Uses an existing client (shared connection pool with the navigator).
    pub fn with_client(client: reqwest::Client, base_url: &str, endpoint: &str) -> Result<Self, SyncError> {
        let url = resolve_url(base_url, endpoint)?.to_string();
        Ok(Self { url, client })
    }
}

#[async_trait]
impl CategorySync for HttpCategorySync {
    fn endpoint(&self) -> &str {
        &self.url
    }

    async fn post_category(
        &self,
        request: &CategoryRequest,
    ) -> Result<DashboardResponse, SyncError> {
        info!("POST {} category={:?}", self.url, request.category);

        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(request)
            .send()
            .await?;

        debug!("Dashboard response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Dashboard error: {} - {}", status, err_body);
            return Err(SyncError::Api {
                status,
                message: err_body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str::<DashboardResponse>(&body).map_err(|e| {
            warn!("Dashboard returned non-JSON body: {}", body);
            SyncError::Parse(e.to_string())
        })
    }
}
