//! Wire types for the engine's HTTP API
//!
//! Shared between the server routes and the terminal client so both sides
//! agree on field names.

use serde::{Deserialize, Serialize};

use crate::domain::Scene;

/// Body of `POST /api/generate`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub transcript: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_description: Option<String>,
}

/// Body of `POST /api/expand`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpandRequest {
    pub existing_scenes: Vec<Scene>,
    pub scenes_to_add: u32,
}

/// Error body returned on any failure response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
