//! Shared application state

use crate::application::services::ScriptService;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::gemini::GeminiClient;

/// Shared application state
///
/// Built once at startup and handed to every request handler behind an
/// `Arc`. Requests share no mutable state.
pub struct AppState {
    pub config: AppConfig,
    pub script_service: ScriptService<GeminiClient>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let provider = GeminiClient::new(
            &config.gemini_base_url,
            &config.gemini_model,
            &config.gemini_api_key,
        );
        let script_service = ScriptService::new(provider);

        Self {
            config,
            script_service,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_retains_config_for_startup_reporting() {
        let config = AppConfig {
            gemini_api_key: "test-key".to_string(),
            gemini_base_url: "http://127.0.0.1:9".to_string(),
            gemini_model: "gemini-2.5-pro".to_string(),
            server_port: 3001,
        };
        let state = AppState::new(config);

        assert_eq!(state.config.server_port, 3001);
        assert_eq!(state.config.gemini_model, "gemini-2.5-pro");
    }
}
