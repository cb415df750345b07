//! Script API routes - scene generation and script expansion

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::dto::{ErrorBody, ExpandRequest, GenerateRequest};
use crate::application::services::ScriptError;
use crate::domain::Scene;
use crate::infrastructure::state::AppState;

/// Generate a scene script from a raw transcript
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<Vec<Scene>>, ApiError> {
    let req = parse_generate_request(body)?;

    let scenes = state
        .script_service
        .generate_scenes(&req.transcript, req.character_description.as_deref())
        .await?;

    tracing::info!(scene_count = scenes.len(), "generated scene script");
    Ok(Json(scenes))
}

/// Continue an existing script; returns only the new scenes
pub async fn expand(
    State(state): State<Arc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<Vec<Scene>>, ApiError> {
    let req = parse_expand_request(body)?;

    let scenes = state
        .script_service
        .expand_scenes(&req.existing_scenes, req.scenes_to_add)
        .await?;

    tracing::info!(scene_count = scenes.len(), "expanded scene script");
    Ok(Json(scenes))
}

/// Validate a generate body into its typed request
fn parse_generate_request(body: serde_json::Value) -> Result<GenerateRequest, ApiError> {
    let req: GenerateRequest = serde_json::from_value(body)
        .map_err(|_| ApiError::bad_request("Transcript is required."))?;
    if req.transcript.trim().is_empty() {
        return Err(ApiError::bad_request("Transcript is required."));
    }
    Ok(req)
}

/// Validate an expand body into its typed request
fn parse_expand_request(body: serde_json::Value) -> Result<ExpandRequest, ApiError> {
    serde_json::from_value(body)
        .map_err(|_| ApiError::bad_request("existingScenes and scenesToAdd are required."))
}

/// API error carrying a status code and an `{"error": ...}` body
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<ScriptError> for ApiError {
    fn from(err: ScriptError) -> Self {
        let status = match err {
            ScriptError::EmptyInput => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}
