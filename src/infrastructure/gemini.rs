//! Gemini client for schema-constrained text generation

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{CompletionRequest, TextCompletionPort};

/// Client for the Google Generative Language REST API
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(base_url: &str, model: &str, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Run one `generateContent` call and return the text of the first candidate
    pub async fn generate_content(
        &self,
        request: &CompletionRequest,
    ) -> Result<String, GeminiError> {
        let body = serde_json::json!({
            "contents": [{
                "parts": [{ "text": request.prompt }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": request.response_schema,
                "temperature": request.temperature,
            }
        });

        let response = self
            .client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(GeminiError::Api(error_text));
        }

        let content: GenerateContentResponse = response.json().await?;
        extract_text(content)
    }
}

#[async_trait]
impl TextCompletionPort for GeminiClient {
    type Error = GeminiError;

    async fn complete(&self, request: CompletionRequest) -> Result<String, Self::Error> {
        self.generate_content(&request).await
    }
}

/// Pull the first candidate's text out of a response
fn extract_text(response: GenerateContentResponse) -> Result<String, GeminiError> {
    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(GeminiError::EmptyResponse);
    }
    Ok(text)
}

#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error: {0}")]
    Api(String),
    #[error("empty response from API")]
    EmptyResponse,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_text_from_first_candidate() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{
                "candidates": [{
                    "content": { "parts": [{ "text": "[1, 2]" }] }
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(extract_text(response).unwrap(), "[1, 2]");
    }

    #[test]
    fn test_no_candidates_is_an_empty_response() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(
            extract_text(response),
            Err(GeminiError::EmptyResponse)
        ));
    }

    #[test]
    fn test_blank_text_is_an_empty_response() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{ "candidates": [{ "content": { "parts": [{ "text": "   " }] } }] }"#,
        )
        .unwrap();
        assert!(matches!(
            extract_text(response),
            Err(GeminiError::EmptyResponse)
        ));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = GeminiClient::new("https://example.test/", "gemini-2.5-pro", "key");
        assert_eq!(client.base_url, "https://example.test");
    }
}
