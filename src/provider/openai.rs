use std::collections::HashMap;

use reqwest::blocking::Client as HttpClient;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::{error, trace};

use super::CompletionProvider;
use super::error::ProviderError;
use super::types::{Completion, CompletionRequest, CompletionResponse, ErrorResponse};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Blocking client for OpenAI-compatible `chat/completions` endpoints.
///
/// The API key is sent as-is. An empty or wrong key is not checked locally; the
/// endpoint's authentication error comes back as [`ProviderError::Api`].
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    api_key: String,
    base_url: String,
    http_client: HttpClient,
}

impl OpenAiClient {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            http_client: HttpClient::new(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_headers(&self) -> Result<HeaderMap, ProviderError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            format!("Bearer {}", self.api_key)
                .parse()
                .map_err(|e| ProviderError::Config(format!("Invalid API key header format: {e}")))?,
        );
        Ok(headers)
    }
}

impl CompletionProvider for OpenAiClient {
    fn complete(&self, request: &CompletionRequest) -> Result<Completion, ProviderError> {
        let url = format!("{}/chat/completions", self.base_url);
        let headers = self.build_headers()?;

        let redacted_headers = headers
            .iter()
            .map(|(k, v)| {
                if *k == AUTHORIZATION {
                    return (k.to_string(), "[REDACTED]".to_string());
                }
                (k.to_string(), v.to_str().unwrap_or_default().to_string())
            })
            .collect::<HashMap<_, _>>();

        trace!(
            %url,
            headers = ?redacted_headers,
            model = %request.model,
            messages = request.messages.len(),
            "Triggering request."
        );
        let response = self.http_client.post(&url).headers(headers).json(request).send()?;

        let status = response.status();
        trace!(
            status = status.as_u16(),
            content_length = response.content_length().unwrap_or_default(),
            "Received response."
        );

        let body = response.text()?;
        if status.is_client_error() || status.is_server_error() {
            let status = status.as_u16();
            error!(status, %body, "Unexpected response.");
            return Err(ProviderError::Api { status, message: api_error_message(&body) });
        }

        parse_completion(&body)
    }
}

/// Extract the `error.message` of an OpenAI-style error body, falling back to the raw body
fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(response) => response.error.message,
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

fn parse_completion(body: &str) -> Result<Completion, ProviderError> {
    let response: CompletionResponse = serde_json::from_str(body)?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::MalformedResponse("response contained no choices".into()))?;
    let text = choice.message.content.ok_or_else(|| {
        ProviderError::MalformedResponse("first choice has no message content".into())
    })?;

    Ok(Completion { text, total_tokens: response.usage.map(|u| u.total_tokens).unwrap_or(0) })
}
