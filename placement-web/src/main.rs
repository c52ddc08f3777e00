//! Placement Predictor Web Server
//!
//! Serves the assessment form and predictions from one co-versioned
//! artifact pair loaded at startup.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  PLACEMENT PREDICTOR WEB                 │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌──────────────┐   ┌─────────────────┐  │
//! │  │  Form     │   │  JSON API    │   │  Roadmap        │  │
//! │  │  (HTML)   │   │  /api/v1     │   │  (simulated)    │  │
//! │  └─────┬─────┘   └──────┬───────┘   └────────┬────────┘  │
//! │        └────────────────┼────────────────────┘           │
//! │                         ▼                                │
//! │                ┌──────────────────┐                      │
//! │                │ InferenceContext │  schema.json         │
//! │                │   (read-only)    │  model.json          │
//! │                └──────────────────┘                      │
//! └──────────────────────────────────────────────────────────┘
//! ```

mod config;
mod models;
mod handlers;
mod views;
mod error;

#[cfg(test)]
mod tests;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use placement_core::logic::roadmap::{RoadmapGenerator, SimulatedRoadmap};
use placement_core::InferenceContext;

pub use error::{AppError, AppResult};
use views::Views;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "placement_web=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("Placement Predictor server starting...");
    tracing::info!("Artifacts: {}", config.artifact_dir.display());

    // A missing or mismatched artifact pair is fatal
    let ctx = InferenceContext::load(&config.artifact_dir)
        .with_context(|| format!(
            "failed to load model artifacts from {} (run placement-train first)",
            config.artifact_dir.display()
        ))?;

    let metadata = ctx.metadata();
    tracing::info!(
        "Loaded run {} ({} features, layout {:08x}, trained {})",
        metadata.run_id,
        metadata.layout.feature_count,
        metadata.layout.hash,
        metadata.trained_at
    );

    let roadmap = SimulatedRoadmap::new().context("failed to load roadmap template")?;
    let views = Views::new().context("failed to load page templates")?;

    // Build application state
    let state = AppState {
        ctx: Arc::new(ctx),
        roadmap: Arc::new(roadmap),
        views: Arc::new(views),
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{} ({})", addr,
        if config.is_production() { "production" } else { "development" });

    let listener = tokio::net::TcpListener::bind(addr).await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub ctx: Arc<InferenceContext>,
    pub roadmap: Arc<dyn RoadmapGenerator + Send + Sync>,
    pub views: Arc<Views>,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    // HTML form
    let form_routes = Router::new()
        .route("/", get(handlers::form::index))
        .route("/predict", post(handlers::form::submit));

    // JSON API
    let api_routes = Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/v1/predict", post(handlers::api::predict))
        .route("/api/v1/schema", get(handlers::api::schema));

    Router::new()
        .merge(form_routes)
        .merge(api_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
