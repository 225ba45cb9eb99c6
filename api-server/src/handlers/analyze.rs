//! URL analysis handler

use axum::{extract::State, Json};

use crate::error::{AppError, AppResult};
use crate::models::{AnalyzeRequest, AnalyzeResponse};
use crate::AppState;

/// POST /api/v1/analyze
///
/// Scores one URL. Only an empty URL is rejected; everything else
/// produces a result (possibly heuristic-backed and with an unknown
/// reputation verdict).
pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> AppResult<Json<AnalyzeResponse>> {
    let result = state
        .engine
        .score_url(&request.url)
        .await
        .map_err(|e| AppError::InvalidInput(e.to_string()))?;

    tracing::debug!(
        url = %result.url,
        score = result.risk_score,
        method = result.method.as_str(),
        "analyzed URL"
    );

    Ok(Json(AnalyzeResponse::from(result)))
}
