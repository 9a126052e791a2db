//! HTTP server implementation for the web surface

use anyhow::Result;
use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Form, Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Redirect},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use super::{handlers, models::{ApiResponse, ResultsForm}};
use crate::app::App;
use crate::view::PageSurface;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    pub app: Arc<App>,
    pub page: Arc<PageSurface>,
    pub max_file_size: u64,
}

/// Build the router for the web surface.
///
/// Uploads are read without the default body limit; the handler stops
/// reading a file part once it passes `max_file_size`.
pub fn router(app: Arc<App>, page: Arc<PageSurface>, max_file_size: u64) -> Router {
    let state = ServerState {
        app,
        page,
        max_file_size,
    };

    Router::new()
        .route("/", get(index_handler))
        .route(
            "/upload",
            post(upload_handler).layer(DefaultBodyLimit::disable()),
        )
        .route("/results", post(results_handler))
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

/// Configure and start the HTTP server
pub async fn start_http_server(router: Router, host: &str, port: u16) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    info!("🌐 Evalyn client listening on http://{}:{}", host, port);

    axum::serve(listener, router).await?;

    Ok(())
}

/// Latest presented page
async fn index_handler(State(state): State<ServerState>) -> impl IntoResponse {
    Html(state.page.current())
}

/// Start the upload flow and show the loading page right away
async fn upload_handler(
    State(state): State<ServerState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Redirect {
    let selected = match multipart {
        Ok(multipart) => handlers::read_selected_video(multipart, state.max_file_size).await,
        Err(rejection) => {
            state.app.reject_upload_form(&rejection.body_text()).await;
            return Redirect::to("/");
        }
    };

    match selected {
        Ok(selected) => {
            // Validation failures are already on the page.
            if let Ok(pending) = state.app.start_upload(selected).await {
                let app = state.app.clone();
                tokio::spawn(async move {
                    if let Err(e) = app.finish_upload(pending).await {
                        debug!("Upload finished with error: {}", e);
                    }
                });
            }
        }
        Err(e) => state.app.reject_upload_form(&e.body_text()).await,
    }

    Redirect::to("/")
}

/// Start the poll flow and show the loading page right away
async fn results_handler(
    State(state): State<ServerState>,
    Form(form): Form<ResultsForm>,
) -> Redirect {
    if let Ok(pending) = state.app.start_check(&form.video_id).await {
        let app = state.app.clone();
        tokio::spawn(async move {
            if let Err(e) = app.finish_check(pending).await {
                debug!("Result check finished with error: {}", e);
            }
        });
    }

    Redirect::to("/")
}

/// Health check handler
async fn health_handler(State(state): State<ServerState>) -> impl IntoResponse {
    let health = handlers::health_check(&state.app).await;
    (StatusCode::OK, Json(ApiResponse::success(health)))
}
