/// Any failure of a completion call.
///
/// The description is shown to the user as-is, so variants carry human-readable text
/// rather than structured codes.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("client config error: {0}")]
    Config(String),
}
