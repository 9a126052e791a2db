//! Poll flow steps: validate the identifier, fetch the record, render the report

use serde::Serialize;
use std::time::Duration;
use tracing::info;

use crate::backend::{call_with_timeout, AnalysisBackend};
use crate::error::{ClientError, ValidationError};
use crate::models::AnalysisStatus;
use crate::view;

/// Report produced by a successful poll
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedReport {
    pub video_id: String,
    pub status: AnalysisStatus,
    pub html: String,
}

/// Trim the identifier field, rejecting blank input
pub fn validate_video_id(input: &str) -> Result<&str, ValidationError> {
    let video_id = input.trim();
    if video_id.is_empty() {
        return Err(ValidationError::MissingId);
    }
    Ok(video_id)
}

/// Look up an analysis and render its report
pub async fn fetch_report(
    backend: &dyn AnalysisBackend,
    video_id: &str,
    timeout: Option<Duration>,
) -> Result<RenderedReport, ClientError> {
    let record = call_with_timeout(timeout, backend.get_analysis_result(video_id))
        .await?
        .ok_or_else(|| ClientError::NotFound(video_id.to_string()))?;

    info!("📊 {} is {}", record.video_id, record.status);

    let html = view::render_report(&record)?.into_string();
    Ok(RenderedReport {
        video_id: record.video_id,
        status: record.status,
        html,
    })
}

/// Message shown when a poll fails
pub fn failure_message(err: &ClientError) -> String {
    match err {
        ClientError::Validation(_) | ClientError::NotFound(_) => err.to_string(),
        other => format!("Error checking results: {}", other),
    }
}
