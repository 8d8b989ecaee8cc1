use crate::conversation::DEFAULT_MODEL;
use crate::provider::{DEFAULT_BASE_URL, OpenAiClient};

/// Runtime settings for the dashboard and the `ask` command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Provider credential; may be empty, in which case calls fail at the provider
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl AppConfig {
    pub fn new(api_key: Option<String>, model: String, base_url: String) -> Self {
        Self {
            api_key: api_key.unwrap_or_default(),
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// HTTP client for the configured endpoint using `api_key`
    pub fn client_with_key(&self, api_key: &str) -> OpenAiClient {
        OpenAiClient::new(api_key).with_base_url(self.base_url.as_str())
    }

    pub fn client(&self) -> OpenAiClient {
        self.client_with_key(&self.api_key)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(None, DEFAULT_MODEL.to_string(), DEFAULT_BASE_URL.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api_key, "");
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert_eq!(config.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn test_base_url_trailing_slash_removed() {
        let config = AppConfig::new(
            Some("sk-test".to_string()),
            "gpt-4o".to_string(),
            "http://localhost:1234/v1/".to_string(),
        );
        assert_eq!(config.base_url, "http://localhost:1234/v1");
        assert_eq!(config.client().base_url(), "http://localhost:1234/v1");
    }
}
