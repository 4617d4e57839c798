use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{info, warn};

use crate::config::BackendConfig;
use crate::error::{excerpt, BackendError, BackendResult};
use crate::source::JsonSource;

/// HTTP client for the Novel Saga backend API.
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> BackendResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BackendError::Config(anyhow::anyhow!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl JsonSource for BackendClient {
    async fn get_json(&self, path: &str, token: Option<&str>) -> BackendResult<Value> {
        let url = self.url_for(path);
        info!("Fetching from backend: {}", url);

        let mut request = self.client.get(&url);
        if let Some(token) = token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request.send().await.map_err(|e| {
            warn!("Backend request to {} failed: {}", url, e);
            BackendError::from(e)
        })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("Backend returned {} for {}", status, url);
            return Err(BackendError::UpstreamStatus {
                status: status.as_u16(),
                body: excerpt(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            warn!("Backend body from {} is not JSON: {}", url, e);
            BackendError::malformed(format!("invalid JSON: {}", e), &body)
        })
    }

    fn name(&self) -> &'static str {
        "Novel Saga backend"
    }
}
