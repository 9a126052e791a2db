#![allow(dead_code)]

use async_trait::async_trait;
use maud::Markup;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use evalyn_client::{
    AnalysisBackend, AnalysisRecord, AnalysisStatus, AnalyzeResponse, App, BackendError, Config,
    DisplaySurface,
};

pub const MIB: usize = 1024 * 1024;

pub const REPORT: &str = r#"{
    "grading": {"overall_score": 85, "creativity": 78, "clarity": 90},
    "summary": "Engaging talk with a strong opening.",
    "performance": {"confidence": 82, "engagement": 74, "time_management": 91}
}"#;

pub fn record(video_id: &str, status: AnalysisStatus, ai_response: Option<&str>) -> AnalysisRecord {
    AnalysisRecord {
        video_id: video_id.to_string(),
        status,
        timestamp: 1_700_000_000_000_000_000,
        ai_response: ai_response.map(str::to_string),
    }
}

/// Surface that keeps every presented page
#[derive(Default)]
pub struct RecordingSurface {
    pages: Mutex<Vec<String>>,
}

impl RecordingSurface {
    pub fn pages(&self) -> Vec<String> {
        self.pages.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.pages.lock().unwrap().len()
    }

    pub fn last(&self) -> String {
        self.pages.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

impl DisplaySurface for RecordingSurface {
    fn present(&self, page: Markup) {
        self.pages.lock().unwrap().push(page.into_string());
    }
}

type UploadReply = Result<AnalyzeResponse, (u16, String)>;

/// Scripted analysis service
#[derive(Default)]
pub struct MockBackend {
    upload_replies: Mutex<VecDeque<(UploadReply, Duration)>>,
    records: HashMap<String, AnalysisRecord>,
    delays: HashMap<String, Duration>,
    observer: Option<Arc<RecordingSurface>>,
    pub analyze_calls: AtomicUsize,
    pub poll_calls: AtomicUsize,
    pub uploaded_sizes: Mutex<Vec<usize>>,
    pub pages_at_call: Mutex<Vec<String>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_upload_reply(self, video_id: &str, status: &str) -> Self {
        self.with_delayed_upload_reply(video_id, status, Duration::ZERO)
    }

    pub fn with_delayed_upload_reply(self, video_id: &str, status: &str, delay: Duration) -> Self {
        let reply = AnalyzeResponse {
            video_id: video_id.to_string(),
            status: status.to_string(),
        };
        self.upload_replies.lock().unwrap().push_back((Ok(reply), delay));
        self
    }

    pub fn with_upload_error(self, status: u16, body: &str) -> Self {
        self.upload_replies
            .lock()
            .unwrap()
            .push_back((Err((status, body.to_string())), Duration::ZERO));
        self
    }

    pub fn with_record(mut self, record: AnalysisRecord) -> Self {
        self.records.insert(record.video_id.clone(), record);
        self
    }

    pub fn with_delay(mut self, video_id: &str, delay: Duration) -> Self {
        self.delays.insert(video_id.to_string(), delay);
        self
    }

    pub fn observing(mut self, surface: Arc<RecordingSurface>) -> Self {
        self.observer = Some(surface);
        self
    }

    pub fn analyze_calls(&self) -> usize {
        self.analyze_calls.load(Ordering::SeqCst)
    }

    pub fn poll_calls(&self) -> usize {
        self.poll_calls.load(Ordering::SeqCst)
    }

    fn note_call(&self) {
        if let Some(surface) = &self.observer {
            self.pages_at_call.lock().unwrap().push(surface.last());
        }
    }
}

#[async_trait]
impl AnalysisBackend for MockBackend {
    async fn analyze_video(&self, video: Vec<u8>) -> Result<AnalyzeResponse, BackendError> {
        self.analyze_calls.fetch_add(1, Ordering::SeqCst);
        self.uploaded_sizes.lock().unwrap().push(video.len());
        self.note_call();

        let next = self.upload_replies.lock().unwrap().pop_front();
        let (reply, delay) = next.unwrap_or_else(|| {
            (Err((500, "no reply scripted".to_string())), Duration::ZERO)
        });
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        reply.map_err(|(status, body)| BackendError::Status { status, body })
    }

    async fn get_analysis_result(
        &self,
        video_id: &str,
    ) -> Result<Option<AnalysisRecord>, BackendError> {
        self.poll_calls.fetch_add(1, Ordering::SeqCst);
        self.note_call();

        if let Some(delay) = self.delays.get(video_id) {
            tokio::time::sleep(*delay).await;
        }

        Ok(self.records.get(video_id).cloned())
    }

    async fn is_available(&self) -> bool {
        true
    }
}

/// App wired to a recording surface that the backend observes
pub fn setup(backend: MockBackend, config: &Config) -> (Arc<App>, Arc<RecordingSurface>, Arc<MockBackend>) {
    let surface = Arc::new(RecordingSurface::default());
    let backend = Arc::new(backend.observing(surface.clone()));
    let app = Arc::new(App::new(backend.clone(), surface.clone(), config));
    (app, surface, backend)
}
