//! REST API server for the 3D asset viewer
//!
//! Serves the canned model/scenario/entity catalog, stores uploaded models and
//! drives a batch-mode Blender for conversion, combining and animation
//! inspection.

pub mod catalog;
pub mod config;
mod error;
mod handlers;
pub mod storage;
mod types;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use blender_bridge::BlenderRunner;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

pub use config::Settings;
pub use error::{status_for, ApiError};
pub use handlers::*;
pub use storage::ModelStore;
pub use types::*;

/// API server state shared across handlers
#[derive(Clone)]
pub struct ApiState {
    /// Directory holding uploaded and generated models
    pub store: Arc<ModelStore>,
    /// Blender handle; `None` when conversion is disabled
    pub converter: Option<Arc<BlenderRunner>>,
    /// Root of the `/static` mount
    pub static_dir: PathBuf,
    /// Request body cap for uploads
    pub max_upload_bytes: usize,
}

impl ApiState {
    /// Create state from resolved settings, creating the model directory
    pub fn from_settings(settings: &Settings) -> std::io::Result<Self> {
        let store = ModelStore::open(settings.models_dir())?;
        Ok(Self {
            store: Arc::new(store),
            converter: settings.blender.clone().map(Arc::new),
            static_dir: settings.static_dir.clone(),
            max_upload_bytes: settings.max_upload_bytes,
        })
    }

    #[must_use]
    pub fn converter_enabled(&self) -> bool {
        self.converter.is_some()
    }
}

/// Build the API router with all endpoints
pub fn build_router(state: ApiState) -> Router {
    let static_dir = state.static_dir.clone();
    let body_limit = state.max_upload_bytes;

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Canned catalog
        .route("/models", get(list_models))
        .route("/scenarios", get(list_scenarios))
        .route("/load_scenario/{scenario_id}", get(load_scenario))
        .route("/entities", get(list_entities))
        // Model files
        .route("/upload_model", post(upload_model))
        .route("/combine_models", post(combine_models))
        .route("/model_info/{name}", get(model_info))
        // Front-end assets
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .nest_service("/static", ServeDir::new(static_dir))
        // Middleware
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the API server
pub async fn start_server(addr: &str, state: ApiState) -> Result<(), std::io::Error> {
    tracing::info!("Starting API server on {}", addr);

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await
}
