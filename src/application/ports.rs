//! Outbound ports - interfaces the application requires from external systems

use async_trait::async_trait;

/// A schema-constrained completion request
///
/// The provider is asked to answer with JSON conforming to
/// `response_schema`; whether it actually does is a trust boundary handled
/// by the caller.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub prompt: String,
    pub response_schema: serde_json::Value,
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>, response_schema: serde_json::Value) -> Self {
        Self {
            prompt: prompt.into(),
            response_schema,
            temperature: 1.0,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Capability interface for a generative text-completion provider
///
/// One operation: prompt plus schema in, raw text out. Test doubles
/// implement this to replace the real provider deterministically.
#[async_trait]
pub trait TextCompletionPort: Send + Sync {
    type Error: std::fmt::Display + Send + Sync + 'static;

    /// Run a single completion and return the raw text payload
    async fn complete(&self, request: CompletionRequest) -> Result<String, Self::Error>;
}
