//! Upload flow steps: validate the selection, send the bytes, describe the outcome

use std::time::Duration;
use tracing::info;

use crate::backend::{call_with_timeout, AnalysisBackend};
use crate::config::MIB;
use crate::error::{ClientError, ValidationError};
use crate::models::AnalyzeResponse;
use crate::video::VideoFile;

/// Check that a file was picked and fits under `max_size` bytes
pub fn validate_selection(
    selected: Option<VideoFile>,
    max_size: u64,
) -> Result<VideoFile, ValidationError> {
    let file = selected.ok_or(ValidationError::NoFile)?;

    if file.size() > max_size {
        return Err(ValidationError::TooLarge {
            size: file.size(),
            limit_mib: max_size / MIB,
        });
    }

    Ok(file)
}

/// Read the file and submit it for analysis
pub async fn submit(
    backend: &dyn AnalysisBackend,
    file: VideoFile,
    timeout: Option<Duration>,
) -> Result<AnalyzeResponse, ClientError> {
    let name = file.name().to_string();
    let bytes = file.into_bytes().await?;

    info!("📤 Uploading {} ({} bytes)", name, bytes.len());
    call_with_timeout(timeout, backend.analyze_video(bytes)).await
}

/// Confirmation shown after a successful upload
pub fn confirmation_message(response: &AnalyzeResponse, file_name: &str, size: u64) -> String {
    format!(
        "✅ Upload Successful!\n\n\
        Video ID: {}\n\
        Status: {}\n\
        File: {}\n\
        Size: {:.2} MB\n\n\
        💡 Copy the Video ID above and use it in the \"Check Results\" section below to see your analysis results!",
        response.video_id,
        response.status,
        file_name,
        size as f64 / MIB as f64,
    )
}

/// Message shown when an upload attempt fails
pub fn failure_message(err: &ClientError) -> String {
    match err {
        ClientError::Validation(validation) => validation.to_string(),
        other => format!("Upload failed: {}", other),
    }
}
