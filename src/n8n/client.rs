/// HTTP client for the n8n public REST API
///
/// Wraps GET and PUT on /api/v1/workflows/{id}, authenticated with the
/// X-N8N-API-KEY header. Non-2xx responses are mapped onto DeployError with the
/// status code and body kept for diagnostics. No retries.

use crate::config::N8nConfig;
use crate::error::{DeployError, Result};
use crate::n8n::api::WorkflowApi;
use crate::n8n::types::{Workflow, WorkflowUpdate};
use async_trait::async_trait;

/// Header n8n reads the API key from
pub const API_KEY_HEADER: &str = "X-N8N-API-KEY";

/// reqwest-backed n8n client
#[derive(Clone)]
pub struct N8nClient {
    /// Pooled HTTP client with the configured timeout
    http: reqwest::Client,
    /// Base URL without trailing slash
    base_url: String,
    /// API key for the X-N8N-API-KEY header
    api_key: String,
}

impl std::fmt::Debug for N8nClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("N8nClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl N8nClient {
    /// Create a client from the n8n section of the configuration
    pub fn new(config: &N8nConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DeployError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.host.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn workflow_url(&self, workflow_id: &str) -> String {
        format!("{}/api/v1/workflows/{}", self.base_url, workflow_id)
    }

    /// Turn a response into a Workflow, mapping non-2xx statuses with `on_error`
    async fn read_workflow<F>(response: reqwest::Response, on_error: F) -> Result<Workflow>
    where
        F: FnOnce(u16, String) -> DeployError,
    {
        let status = response.status();
        let body = response.text().await?;

        tracing::debug!("📡 Response status: {} ({} bytes)", status, body.len());

        if !status.is_success() {
            return Err(on_error(status.as_u16(), body));
        }

        serde_json::from_str(&body).map_err(|e| DeployError::Decode(e.to_string()))
    }
}

#[async_trait]
impl WorkflowApi for N8nClient {
    async fn get_workflow(&self, workflow_id: &str) -> Result<Workflow> {
        let url = self.workflow_url(workflow_id);
        tracing::debug!("🌍 GET {}", url);

        let response = self
            .http
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .header("Accept", "application/json")
            .send()
            .await?;

        Self::read_workflow(response, |status, body| {
            DeployError::from_status(status, body, workflow_id)
        })
        .await
    }

    async fn put_workflow(&self, workflow_id: &str, update: &WorkflowUpdate) -> Result<Workflow> {
        let url = self.workflow_url(workflow_id);
        tracing::debug!("🌍 PUT {} ({} nodes)", url, update.nodes.len());

        let response = self
            .http
            .put(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .header("Accept", "application/json")
            .json(update)
            .send()
            .await?;

        Self::read_workflow(response, DeployError::from_update_status).await
    }
}
