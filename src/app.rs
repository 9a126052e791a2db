//! Client state machine
//!
//! Each user action runs validate → loading → render → remote call →
//! result → render. The state lock is released while a remote call is in
//! flight, and every action takes a ticket from its flow's sequence first,
//! so a response is applied only if no newer action of the same flow was
//! issued meanwhile.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::backend::AnalysisBackend;
use crate::config::Config;
use crate::error::ClientError;
use crate::models::AnalyzeResponse;
use crate::poll::{self, RenderedReport};
use crate::state::{ClientState, Ticket};
use crate::upload;
use crate::video::VideoFile;
use crate::view::{self, DisplaySurface};

/// An upload that passed validation and awaits its remote call
#[derive(Debug)]
pub struct PendingUpload {
    ticket: Ticket,
    file: VideoFile,
}

/// A result check that passed validation and awaits its remote call
#[derive(Debug)]
pub struct PendingCheck {
    ticket: Ticket,
    video_id: String,
}

/// Upload and poll flows sharing one display
pub struct App {
    backend: Arc<dyn AnalysisBackend>,
    surface: Arc<dyn DisplaySurface>,
    state: Mutex<ClientState>,
    max_file_size: u64,
    timeout: Option<Duration>,
}

impl App {
    /// Create the client and present the initial page
    pub fn new(
        backend: Arc<dyn AnalysisBackend>,
        surface: Arc<dyn DisplaySurface>,
        config: &Config,
    ) -> Self {
        let state = ClientState::default();
        surface.present(view::render(&state.upload, &state.poll));

        Self {
            backend,
            surface,
            state: Mutex::new(state),
            max_file_size: config.upload.max_file_size,
            timeout: config.backend.request_timeout(),
        }
    }

    pub fn backend(&self) -> &Arc<dyn AnalysisBackend> {
        &self.backend
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> ClientState {
        self.state.lock().await.clone()
    }

    fn present(&self, state: &ClientState) {
        self.surface.present(view::render(&state.upload, &state.poll));
    }

    /// Upload the selected video for analysis
    pub async fn upload_video(
        &self,
        selected: Option<VideoFile>,
    ) -> Result<AnalyzeResponse, ClientError> {
        let pending = self.start_upload(selected).await?;
        self.finish_upload(pending).await
    }

    /// Validate the selection and show the loading state.
    ///
    /// Returns once the loading page is presented; the remote call happens in
    /// [`App::finish_upload`].
    pub async fn start_upload(&self, selected: Option<VideoFile>) -> Result<PendingUpload, ClientError> {
        let mut state = self.state.lock().await;
        let ticket = state.upload_requests.issue();

        let file = match upload::validate_selection(selected, self.max_file_size) {
            Ok(file) => file,
            Err(e) => {
                warn!("Upload rejected: {}", e);
                state.upload.fail(e.to_string());
                self.present(&state);
                return Err(e.into());
            }
        };

        state.upload.begin();
        self.present(&state);
        Ok(PendingUpload { ticket, file })
    }

    /// Submit a started upload and show its outcome
    pub async fn finish_upload(&self, pending: PendingUpload) -> Result<AnalyzeResponse, ClientError> {
        let PendingUpload { ticket, file } = pending;
        let file_name = file.name().to_string();
        let file_size = file.size();
        let outcome = upload::submit(self.backend.as_ref(), file, self.timeout).await;

        let mut state = self.state.lock().await;
        if !state.upload_requests.is_current(ticket) {
            debug!("Discarding superseded upload response for {}", file_name);
            return outcome;
        }

        match &outcome {
            Ok(response) => {
                info!("✅ Uploaded {} as {}", file_name, response.video_id);
                let message = upload::confirmation_message(response, &file_name, file_size);
                state.upload.succeed(response.video_id.clone(), message);
                state.poll.video_id_input = response.video_id.clone();
            }
            Err(e) => {
                warn!("❌ Upload of {} failed: {}", file_name, e);
                state.upload.fail(upload::failure_message(e));
            }
        }
        self.present(&state);

        outcome
    }

    /// Show an upload form that could not be read as a failed upload
    pub async fn reject_upload_form(&self, reason: &str) {
        let mut state = self.state.lock().await;
        state.upload_requests.issue();

        warn!("❌ Unreadable upload form: {}", reason);
        state.upload.fail(format!("Upload failed: {}", reason));
        self.present(&state);
    }

    /// Fetch and render the analysis for the identifier typed by the user
    pub async fn check_result(&self, input: &str) -> Result<RenderedReport, ClientError> {
        let pending = self.start_check(input).await?;
        self.finish_check(pending).await
    }

    /// Validate the identifier and show the loading state
    pub async fn start_check(&self, input: &str) -> Result<PendingCheck, ClientError> {
        let mut state = self.state.lock().await;
        let ticket = state.poll_requests.issue();
        state.poll.video_id_input = input.trim().to_string();

        let video_id = match poll::validate_video_id(input) {
            Ok(video_id) => video_id.to_string(),
            Err(e) => {
                warn!("Result check rejected: {}", e);
                state.poll.fail(e.to_string());
                self.present(&state);
                return Err(e.into());
            }
        };

        state.poll.begin();
        self.present(&state);
        Ok(PendingCheck { ticket, video_id })
    }

    /// Fetch a started result check and show its outcome
    pub async fn finish_check(&self, pending: PendingCheck) -> Result<RenderedReport, ClientError> {
        let PendingCheck { ticket, video_id } = pending;
        let outcome = poll::fetch_report(self.backend.as_ref(), &video_id, self.timeout).await;

        let mut state = self.state.lock().await;
        if !state.poll_requests.is_current(ticket) {
            debug!("Discarding superseded result for {}", video_id);
            return outcome;
        }

        match &outcome {
            Ok(report) => state.poll.show_report(report.html.clone()),
            Err(e) => {
                warn!("Result check for {} failed: {}", video_id, e);
                state.poll.fail(poll::failure_message(e));
            }
        }
        self.present(&state);

        outcome
    }
}
