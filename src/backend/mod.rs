pub mod http;

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::config::BackendConfig;
use crate::error::ClientError;
use crate::models::{AnalysisRecord, AnalyzeResponse};

pub use http::HttpBackend;

/// Transport and service failures reported by a backend
#[derive(thiserror::Error, Debug)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Remote analysis service
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Submit raw video bytes and receive the assigned identifier
    async fn analyze_video(&self, video: Vec<u8>) -> Result<AnalyzeResponse, BackendError>;

    /// Look up an analysis; `None` means the identifier is unknown
    async fn get_analysis_result(&self, video_id: &str)
        -> Result<Option<AnalysisRecord>, BackendError>;

    async fn is_available(&self) -> bool;
}

/// Create the backend described by the configuration
pub fn create_backend(config: &BackendConfig) -> Result<Arc<dyn AnalysisBackend>, BackendError> {
    Ok(Arc::new(HttpBackend::new(config.clone())?))
}

/// Await a remote call, converting expiry of the optional deadline into an error
pub async fn call_with_timeout<T, F>(timeout: Option<Duration>, call: F) -> Result<T, ClientError>
where
    F: Future<Output = Result<T, BackendError>>,
{
    match timeout {
        Some(limit) => match tokio::time::timeout(limit, call).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(ClientError::Timeout(limit)),
        },
        None => Ok(call.await?),
    }
}
