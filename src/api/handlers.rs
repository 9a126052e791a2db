//! API request handlers

use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;
use tracing::debug;

use super::models::HealthStatus;
use crate::app::App;
use crate::video::VideoFile;

/// Form field carrying the video
pub const VIDEO_FIELD: &str = "video";

/// Handle health check requests
pub async fn health_check(app: &App) -> HealthStatus {
    let backend_available = app.backend().is_available().await;

    HealthStatus {
        status: "healthy".to_string(),
        service: "evalyn-client".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend_available,
        timestamp: chrono::Utc::now().to_rfc3339(),
    }
}

/// Pull the selected video out of an upload form.
///
/// Browsers send an empty part with an empty filename when nothing was
/// picked; that counts as no selection. Reading stops once the part grows
/// past `max_size`, and the result keeps only the size seen so far.
pub async fn read_selected_video(
    mut multipart: Multipart,
    max_size: u64,
) -> Result<Option<VideoFile>, MultipartError> {
    while let Some(mut field) = multipart.next_field().await? {
        if field.name() != Some(VIDEO_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        if file_name.is_empty() {
            return Ok(None);
        }

        let mut data = Vec::new();
        while let Some(chunk) = field.chunk().await? {
            data.extend_from_slice(&chunk);
            if data.len() as u64 > max_size {
                debug!("Stopped reading {} after {} bytes", file_name, data.len());
                return Ok(Some(VideoFile::discarded(file_name, data.len() as u64)));
            }
        }

        return Ok(Some(VideoFile::from_bytes(file_name, data)));
    }

    Ok(None)
}
