//! Chat-completion providers.
//!
//! [`CompletionProvider`] is the seam between the conversation manager and the outside
//! world. [`OpenAiClient`] talks to OpenAI-compatible HTTP endpoints; tests substitute
//! scripted implementations.

pub mod error;
pub mod openai;
pub mod types;

pub use error::ProviderError;
pub use openai::{DEFAULT_BASE_URL, OpenAiClient};
pub use types::{Completion, CompletionRequest};

/// Synchronous chat completion
pub trait CompletionProvider {
    /// Send the full message list and block until the provider answers or fails
    fn complete(&self, request: &CompletionRequest) -> Result<Completion, ProviderError>;
}

impl<P: CompletionProvider + ?Sized> CompletionProvider for &P {
    fn complete(&self, request: &CompletionRequest) -> Result<Completion, ProviderError> {
        (**self).complete(request)
    }
}

impl<P: CompletionProvider + ?Sized> CompletionProvider for Box<P> {
    fn complete(&self, request: &CompletionRequest) -> Result<Completion, ProviderError> {
        (**self).complete(request)
    }
}
