//! Podcast generation endpoints

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PodcastRequest {
    pub analysis: String,
}

#[derive(Debug, Serialize)]
pub struct PodcastResponse {
    pub path: String,
    pub extension: String,
}

#[derive(Debug, Serialize)]
pub struct ScriptResponse {
    pub script: String,
}

/// Generate a podcast audio file from analysis text
pub async fn generate(
    State(state): State<AppState>,
    Json(req): Json<PodcastRequest>,
) -> Result<Json<PodcastResponse>, ApiError> {
    if req.analysis.trim().is_empty() {
        return Err(ApiError::bad_request("analysis text is empty"));
    }

    info!("podcast request: {} chars of analysis", req.analysis.len());
    let artifact = state.generator.generate(&req.analysis).await?;

    Ok(Json(PodcastResponse {
        path: artifact.path.display().to_string(),
        extension: artifact.extension,
    }))
}

/// Generate only the dialogue script
pub async fn script(
    State(state): State<AppState>,
    Json(req): Json<PodcastRequest>,
) -> Result<Json<ScriptResponse>, ApiError> {
    if req.analysis.trim().is_empty() {
        return Err(ApiError::bad_request("analysis text is empty"));
    }

    let script = state.generator.script(&req.analysis).await?;
    Ok(Json(ScriptResponse { script }))
}
