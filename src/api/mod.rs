//! Local web surface for the Evalyn client
//!
//! Serves the latest rendered page and turns form posts into flow actions.

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::app::App;
use crate::config::Config;
use crate::view::PageSurface;

pub mod handlers;
pub mod models;
pub mod server;

/// API Server wiring the client state machine to HTTP
pub struct ApiServer {
    app: Arc<App>,
    page: Arc<PageSurface>,
    config: Arc<Config>,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(app: Arc<App>, page: Arc<PageSurface>, config: Arc<Config>) -> Self {
        Self { app, page, config }
    }

    /// Start the API server
    pub async fn start(self) -> Result<()> {
        info!("🚀 Starting web surface on port {}", self.config.server.port);

        let router = server::router(self.app, self.page, self.config.upload.max_file_size);
        server::start_http_server(router, &self.config.server.host, self.config.server.port).await
    }
}
