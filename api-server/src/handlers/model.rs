//! Model lifecycle handlers

use axum::{extract::State, Json};
use serde_json::{json, Value};

use phishguard_core::EngineStatus;

use crate::error::{AppError, AppResult};
use crate::AppState;

/// GET /api/v1/model/status
pub async fn status(State(state): State<AppState>) -> Json<EngineStatus> {
    Json(state.engine.model_status())
}

/// POST /api/v1/model/reload
///
/// Re-reads the configured artifact. On failure the previously
/// published model (if any) stays in service.
pub async fn reload(State(state): State<AppState>) -> AppResult<Json<Value>> {
    state
        .engine
        .load_model(&state.config.model_path)
        .map_err(|e| AppError::ModelLoad(e.to_string()))?;

    tracing::info!("Model reloaded from {}", state.config.model_path);
    Ok(Json(json!({
        "reloaded": true,
        "model_path": state.config.model_path,
    })))
}
