use async_trait::async_trait;
use reqwest::{header, StatusCode};
use std::time::Duration;
use tracing::debug;

use super::{AnalysisBackend, BackendError};
use crate::config::BackendConfig;
use crate::models::{AnalysisRecord, AnalyzeResponse};

/// Analysis service reached over HTTP
pub struct HttpBackend {
    config: BackendConfig,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(config: BackendConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .user_agent(concat!("evalyn-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.endpoint.trim_end_matches('/'), path)
    }

    fn analysis_url(&self, video_id: &str) -> String {
        self.url(&format!("analysis/{}", urlencoding::encode(video_id)))
    }
}

async fn status_error(response: reqwest::Response) -> BackendError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    BackendError::Status { status, body }
}

#[async_trait]
impl AnalysisBackend for HttpBackend {
    async fn analyze_video(&self, video: Vec<u8>) -> Result<AnalyzeResponse, BackendError> {
        let url = self.url("analyze");
        debug!("Uploading {} bytes to {}", video.len(), url);

        let response = self
            .client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/octet-stream")
            .body(video)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| BackendError::Decode(e.to_string()))
    }

    async fn get_analysis_result(
        &self,
        video_id: &str,
    ) -> Result<Option<AnalysisRecord>, BackendError> {
        let url = self.analysis_url(video_id);
        debug!("Fetching analysis from {}", url);

        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        // The service answers `null` for unknown identifiers as well as 404.
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| BackendError::Decode(e.to_string()))
    }

    async fn is_available(&self) -> bool {
        match self.client.get(self.url("health")).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}
