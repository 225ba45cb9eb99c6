//! PhishGuard API Server
//!
//! Thin HTTP transport over the scoring core: one analyze endpoint plus
//! model status/reload. All scoring logic lives in `phishguard-core`.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     PHISHGUARD API                       │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌──────────┐   ┌────────────────┐   ┌────────────────┐  │
//! │  │  Router  │──▶│ ScoringEngine  │──▶│ Safe Browsing  │  │
//! │  │  (Axum)  │   │ (model +       │   │ lookup (opt.)  │  │
//! │  └──────────┘   │  heuristics)   │   └────────────────┘  │
//! │                 └───────┬────────┘                       │
//! │                         ▼                                │
//! │                 model artifact (JSON)                    │
//! └──────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod models;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use phishguard_core::{SafeBrowsingClient, ScoringEngine};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "phishguard_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("PhishGuard API starting...");

    // Build the scoring engine
    let reputation = SafeBrowsingClient::new(config.safe_browsing_api_key.clone());
    let engine = ScoringEngine::new(reputation)
        .with_reputation_timeout(Duration::from_millis(config.reputation_timeout_ms));

    // A missing or broken artifact is not fatal: scoring degrades to the
    // heuristic path until a successful reload.
    if std::path::Path::new(&config.model_path).exists() {
        match engine.load_model(&config.model_path) {
            Ok(()) => tracing::info!("Model loaded from {}", config.model_path),
            Err(e) => tracing::warn!("Model load failed ({}), using heuristic scoring", e),
        }
    } else {
        tracing::warn!(
            "No model artifact at {}, using heuristic scoring",
            config.model_path
        );
    }

    let state = AppState {
        engine: Arc::new(engine),
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ScoringEngine<SafeBrowsingClient>>,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    // The analyze endpoint is consumed by browser frontends; keep CORS
    // permissive like the original deployment.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/v1/analyze", post(handlers::analyze::analyze))
        .route("/api/v1/model/status", get(handlers::model::status))
        .route("/api/v1/model/reload", post(handlers::model::reload))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
