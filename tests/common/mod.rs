//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use ai_model_monitor::provider::{
    Completion, CompletionProvider, CompletionRequest, ProviderError,
};
use serde_json::{Value, json};

/// Provider that replays queued results and records every request it receives
#[derive(Default)]
pub struct ScriptedProvider {
    responses: RefCell<VecDeque<Result<Completion, ProviderError>>>,
    requests: RefCell<Vec<CompletionRequest>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful completion
    pub fn with_reply(self, text: &str, total_tokens: u64) -> Self {
        self.responses
            .borrow_mut()
            .push_back(Ok(Completion { text: text.to_string(), total_tokens }));
        self
    }

    /// Queue a provider failure
    pub fn with_error(self, error: ProviderError) -> Self {
        self.responses.borrow_mut().push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl CompletionProvider for ScriptedProvider {
    fn complete(&self, request: &CompletionRequest) -> Result<Completion, ProviderError> {
        self.requests.borrow_mut().push(request.clone());
        let n = self.requests.borrow().len();
        self.responses.borrow_mut().pop_front().unwrap_or_else(|| {
            Ok(Completion { text: format!("reply {n}"), total_tokens: 10 })
        })
    }
}

/// OpenAI-style success body
pub fn completion_body(content: &str, total_tokens: u64) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": {
            "prompt_tokens": total_tokens / 2,
            "completion_tokens": total_tokens - total_tokens / 2,
            "total_tokens": total_tokens
        }
    })
}

/// OpenAI-style error body
pub fn error_body(message: &str) -> Value {
    json!({
        "error": { "message": message, "type": "invalid_request_error", "code": null }
    })
}
