//! HTTP client for the Scenescript engine

use reqwest::Client;
use serde::Serialize;

use crate::application::dto::{ErrorBody, ExpandRequest, GenerateRequest};
use crate::domain::Scene;

/// Client for the engine's REST API
pub struct EngineClient {
    client: Client,
    base_url: String,
}

impl EngineClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Generate a fresh scene list from a transcript
    pub async fn generate(
        &self,
        transcript: &str,
        character_description: Option<&str>,
    ) -> Result<Vec<Scene>, ClientError> {
        let request = GenerateRequest {
            transcript: transcript.to_string(),
            character_description: character_description.map(str::to_string),
        };
        self.post("/api/generate", &request).await
    }

    /// Continue the script; returns only the new scenes
    pub async fn expand(
        &self,
        existing_scenes: &[Scene],
        scenes_to_add: u32,
    ) -> Result<Vec<Scene>, ClientError> {
        let request = ExpandRequest {
            existing_scenes: existing_scenes.to_vec(),
            scenes_to_add,
        };
        self.post("/api/expand", &request).await
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<Vec<Scene>, ClientError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            // Best effort: the engine answers failures with {"error": ...}
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|b| b.error)
                .unwrap_or_else(|_| format!("engine returned {}", status));
            return Err(ClientError::Engine(message));
        }

        Ok(response.json().await?)
    }
}

/// Errors surfaced to the user as status text
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Could not reach the engine or read its response
    #[error("could not reach the engine: {0}")]
    Transport(#[from] reqwest::Error),
    /// The engine answered with an error body
    #[error("{0}")]
    Engine(String),
}
