//! Wire types exchanged with the analysis service

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Nanoseconds per millisecond; the service stamps records in nanoseconds.
pub const NANOS_PER_MILLI: i64 = 1_000_000;

/// Processing status of an uploaded video
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl AnalysisStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisStatus::Pending => "pending",
            AnalysisStatus::Processing => "processing",
            AnalysisStatus::Completed => "completed",
            AnalysisStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for AnalysisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reply to an upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub video_id: String,
    pub status: String,
}

/// Analysis record owned by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub video_id: String,
    pub status: AnalysisStatus,

    /// Nanoseconds since the Unix epoch
    #[serde(deserialize_with = "deserialize_nanos")]
    pub timestamp: i64,

    /// Raw JSON report, attached once analysis completes
    #[serde(default)]
    pub ai_response: Option<String>,
}

impl AnalysisRecord {
    /// Record timestamp in epoch milliseconds
    pub fn timestamp_millis(&self) -> i64 {
        nanos_to_millis(self.timestamp)
    }
}

/// Convert a nanosecond timestamp to epoch milliseconds
pub fn nanos_to_millis(nanos: i64) -> i64 {
    nanos / NANOS_PER_MILLI
}

// Large integers arrive as strings from some service bindings.
fn deserialize_nanos<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Nanos {
        Int(i64),
        Text(String),
    }

    match Nanos::deserialize(deserializer)? {
        Nanos::Int(value) => Ok(value),
        Nanos::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Grading section of the AI report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grading {
    pub overall_score: u32,
    pub creativity: u32,
    pub clarity: u32,
}

/// Performance section of the AI report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Performance {
    pub confidence: u32,
    pub engagement: u32,
    pub time_management: u32,
}

/// Report produced by the analysis model for a completed video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiReport {
    pub grading: Grading,
    pub summary: String,
    pub performance: Performance,
}

impl AiReport {
    /// Parse the JSON payload carried in `AnalysisRecord::ai_response`
    pub fn parse(payload: &str) -> serde_json::Result<Self> {
        serde_json::from_str(payload)
    }
}
