//! Evalyn Client
//!
//! Submits videos to a remote analysis service and renders the analysis
//! reports it produces, served as a local web page.

pub mod api;
pub mod app;
pub mod backend;
pub mod config;
pub mod error;
pub mod models;
pub mod poll;
pub mod state;
pub mod upload;
pub mod video;
pub mod view;

// Re-export main types for easy access
pub use crate::app::App;
pub use crate::backend::{AnalysisBackend, BackendError, HttpBackend};
pub use crate::config::{Config, ConfigBuilder};
pub use crate::error::{ClientError, ValidationError};
pub use crate::models::{AiReport, AnalysisRecord, AnalysisStatus, AnalyzeResponse};
pub use crate::poll::RenderedReport;
pub use crate::state::{ClientState, MessageKind, PollState, UploadState};
pub use crate::video::VideoFile;
pub use crate::view::{DisplaySurface, PageSurface};
