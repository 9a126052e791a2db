//! Page rendering
//!
//! `render` is a pure function of the two section states. Flows never touch
//! the display directly: `App` hands each freshly rendered page to a
//! [`DisplaySurface`], which is the only writer of what the user sees.

use chrono::{DateTime, Local};
use maud::{html, Markup, PreEscaped, DOCTYPE};
use std::sync::RwLock;

use crate::error::ClientError;
use crate::models::{nanos_to_millis, AiReport, AnalysisRecord, AnalysisStatus};
use crate::state::{MessageKind, PollState, UploadState};

/// Local time format used for record timestamps
pub const TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Seconds between reloads while a flow is loading
pub const REFRESH_SECS: u32 = 2;

/// Sink for rendered pages
pub trait DisplaySurface: Send + Sync {
    fn present(&self, page: Markup);
}

/// Keeps the most recently presented page in memory
#[derive(Debug, Default)]
pub struct PageSurface {
    page: RwLock<String>,
}

impl PageSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest presented page as HTML
    pub fn current(&self) -> String {
        self.page
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl DisplaySurface for PageSurface {
    fn present(&self, page: Markup) {
        let mut current = self
            .page
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *current = page.into_string();
    }
}

/// Render the whole page
pub fn render(upload: &UploadState, poll: &PollState) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                @if upload.loading || poll.loading {
                    meta http-equiv="refresh" content=(REFRESH_SECS);
                }
                title { "Evalyn | AI-Powered Video Analysis" }
                style { (PreEscaped(STYLES)) }
            }
            body {
                div class="container" {
                    div class="header" {
                        h1 { "EVALYN" }
                        p { "AI-Powered Video Analysis Platform" }
                    }
                    div class="content" {
                        (upload_section(upload))
                        (results_section(poll))
                    }
                }
            }
        }
    }
}

fn upload_section(upload: &UploadState) -> Markup {
    html! {
        div class="section" {
            h2 { "Upload & Analyze Video" }
            form method="post" action="/upload" enctype="multipart/form-data" {
                div class="input-group" {
                    label for="videoFile" { "Select Video File (MP4, MOV, AVI)" }
                    input type="file" id="videoFile" name="video" class="file-input" accept="video/*";
                }
                button type="submit" class="btn" id="uploadBtn" disabled[upload.loading] {
                    "Analyze Video"
                }
            }
            div class="loading" id="uploadLoading" style=(display(upload.loading)) {
                div class="spinner" {}
                p { "Uploading and processing video..." }
            }
            div id="uploadResult" class="result-box" style=(display(!upload.result_message.is_empty())) {
                @if !upload.result_message.is_empty() {
                    div class=(message_class(upload.message_kind)) { (upload.result_message) }
                }
            }
        }
    }
}

fn results_section(poll: &PollState) -> Markup {
    let has_result = !poll.rendered_html.is_empty() || !poll.result_message.is_empty();

    html! {
        div class="section" {
            h2 { "Check Analysis Results" }
            form method="post" action="/results" {
                div class="input-group" {
                    label for="videoId" { "Video ID" }
                    input type="text" id="videoId" name="video_id"
                        placeholder="vid_1234567890..." value=(poll.video_id_input);
                }
                button type="submit" class="btn" id="resultBtn" disabled[poll.loading] {
                    "Get Results"
                }
            }
            div class="loading" id="resultLoading" style=(display(poll.loading)) {
                div class="spinner" {}
                p { "Fetching results..." }
            }
            div id="analysisResult" class="result-box" style=(display(has_result)) {
                @if !poll.rendered_html.is_empty() {
                    (PreEscaped(&poll.rendered_html))
                } @else if !poll.result_message.is_empty() {
                    div class="error-message" { (poll.result_message) }
                }
            }
        }
    }
}

fn display(visible: bool) -> &'static str {
    if visible {
        "display: block"
    } else {
        "display: none"
    }
}

fn message_class(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::Success => "success-message",
        MessageKind::Error => "error-message",
    }
}

/// CSS class of the report container for a status
pub fn status_class(status: AnalysisStatus) -> String {
    format!("status-{}", status.as_str())
}

/// Format a nanosecond timestamp in local time
pub fn format_timestamp(nanos: i64) -> String {
    match DateTime::from_timestamp_millis(nanos_to_millis(nanos)) {
        Some(utc) => utc.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string(),
        None => format!("invalid timestamp ({})", nanos),
    }
}

/// Render the report for one analysis record.
///
/// The AI payload is parsed only for completed records.
pub fn render_report(record: &AnalysisRecord) -> Result<Markup, ClientError> {
    let body = match record.status {
        AnalysisStatus::Pending => html! {
            p class="status-note" {
                "⏳ Your video is queued for processing. Please check back in a few moments."
            }
        },
        AnalysisStatus::Processing => html! {
            p class="status-note" {
                "🔄 AI is currently analyzing your video. This may take a few minutes."
            }
        },
        AnalysisStatus::Completed => {
            let payload = record
                .ai_response
                .as_deref()
                .ok_or_else(|| ClientError::MalformedPayload("no AI report attached".to_string()))?;
            ai_report(&AiReport::parse(payload)?)
        }
        AnalysisStatus::Failed => html! {
            p class="status-note" {
                "❌ Analysis failed. Please try uploading the video again."
            }
        },
    };

    Ok(html! {
        div class=(status_class(record.status)) {
            h3 { "📊 Analysis Results" }
            p { "Video ID: " (record.video_id) }
            p { "Status: " (record.status.as_str().to_uppercase()) }
            p { "Timestamp: " (format_timestamp(record.timestamp)) }
            (body)
        }
    })
}

fn ai_report(report: &AiReport) -> Markup {
    html! {
        h4 { "🎯 AI Analysis Results" }
        h5 { "📈 GRADING:" }
        ul class="scores" {
            li { "Overall Score: " (report.grading.overall_score) "/100" }
            li { "Creativity: " (report.grading.creativity) "/100" }
            li { "Clarity: " (report.grading.clarity) "/100" }
        }
        h5 { "📝 SUMMARY:" }
        p class="summary" { (report.summary) }
        h5 { "🎭 PERFORMANCE METRICS:" }
        ul class="scores" {
            li { "Confidence: " (report.performance.confidence) "/100" }
            li { "Engagement: " (report.performance.engagement) "/100" }
            li { "Time Management: " (report.performance.time_management) "/100" }
        }
    }
}

const STYLES: &str = r#"
body { font-family: system-ui, sans-serif; background: #f4f5fb; margin: 0; }
.container { max-width: 860px; margin: 2rem auto; background: #fff; border-radius: 12px; box-shadow: 0 8px 24px rgba(0,0,0,.08); }
.header { padding: 2rem; text-align: center; background: linear-gradient(135deg, #667eea, #764ba2); color: #fff; border-radius: 12px 12px 0 0; }
.header h1 { margin: 0; letter-spacing: .2em; }
.content { padding: 1.5rem 2rem; }
.section { margin-bottom: 2rem; }
.input-group { margin-bottom: 1rem; display: flex; flex-direction: column; gap: .4rem; }
.btn { background: #667eea; color: #fff; border: 0; padding: .7rem 1.4rem; border-radius: 8px; cursor: pointer; }
.btn:disabled { background: #aab; cursor: not-allowed; }
.loading { margin-top: 1rem; color: #555; }
.spinner { width: 24px; height: 24px; border: 3px solid #ddd; border-top-color: #667eea; border-radius: 50%; animation: spin 1s linear infinite; }
@keyframes spin { to { transform: rotate(360deg); } }
.result-box { margin-top: 1rem; white-space: pre-wrap; }
.success-message { padding: 1rem; background: #e8f7ee; border-left: 4px solid #2e9d5b; }
.error-message { padding: 1rem; background: #fdecec; border-left: 4px solid #d64545; }
.status-pending, .status-processing, .status-completed, .status-failed { padding: 1rem; border-radius: 8px; }
.status-pending { background: #fff8e1; }
.status-processing { background: #e3f2fd; }
.status-completed { background: #e8f5e9; }
.status-failed { background: #ffebee; }
"#;
