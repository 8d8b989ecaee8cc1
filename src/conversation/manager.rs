//! Conversation state machine.
//!
//! # Exchange lifecycle
//!
//! Each call to [`ConversationManager::submit`] runs one exchange:
//!
//! 1. The user turn is appended to the log
//! 2. A request is built from the system prompt followed by every logged turn
//! 3. The provider is called and blocks until it answers (`Idle` → `AwaitingProvider`)
//! 4. The answer, or a formatted error, is appended as an assistant turn
//! 5. The log is trimmed to the most recent [`HISTORY_WINDOW`] turns (`→ Idle`)
//!
//! Provider failures never escape `submit`; they become [`SubmitOutcome::Failure`] and an
//! assistant turn so the session stays usable. Failed calls are not retried.

use tracing::{debug, info, warn};

use super::log::{ConversationLog, HISTORY_WINDOW};
use super::messages::{DEFAULT_MODEL, SYSTEM_PROMPT, estimated_cost_usd, format_error_message};
use crate::models::ConversationTurn;
use crate::provider::{CompletionProvider, CompletionRequest};

/// Sampling temperature sent with every request
pub const TEMPERATURE: f32 = 0.7;
/// Upper bound on generated tokens per response
pub const MAX_RESPONSE_TOKENS: u32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerState {
    Idle,
    AwaitingProvider,
}

/// Result of one exchange
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Success { text: String, total_tokens: u64 },
    Failure { message: String },
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Success { .. })
    }

    /// The text appended to the log for this exchange
    pub fn text(&self) -> &str {
        match self {
            SubmitOutcome::Success { text, .. } => text,
            SubmitOutcome::Failure { message } => message,
        }
    }

    pub fn total_tokens(&self) -> Option<u64> {
        match self {
            SubmitOutcome::Success { total_tokens, .. } => Some(*total_tokens),
            SubmitOutcome::Failure { .. } => None,
        }
    }

    pub fn estimated_cost_usd(&self) -> Option<f64> {
        self.total_tokens().map(estimated_cost_usd)
    }
}

/// Owns one session's conversation and mediates every call to the provider
pub struct ConversationManager<P> {
    provider: P,
    model: String,
    log: ConversationLog,
    state: ManagerState,
}

impl<P: CompletionProvider> ConversationManager<P> {
    pub fn new(provider: P) -> Self {
        Self::with_model(provider, DEFAULT_MODEL)
    }

    pub fn with_model(provider: P, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            log: ConversationLog::new(),
            state: ManagerState::Idle,
        }
    }

    /// Run one exchange.
    ///
    /// Empty or whitespace-only input is ignored: the log is left untouched, the provider
    /// is not called and `None` is returned.
    pub fn submit(&mut self, user_text: &str) -> Option<SubmitOutcome> {
        if user_text.trim().is_empty() {
            debug!("Ignoring empty submission.");
            return None;
        }

        self.log.push(ConversationTurn::user(user_text));
        let request = self.build_request();

        info!(model = %self.model, messages = request.messages.len(), "Submitting exchange.");
        self.state = ManagerState::AwaitingProvider;
        let result = self.provider.complete(&request);
        self.state = ManagerState::Idle;

        let outcome = match result {
            Ok(completion) => {
                info!(total_tokens = completion.total_tokens, "Received completion.");
                self.log.push(ConversationTurn::assistant(completion.text.clone()));
                SubmitOutcome::Success {
                    text: completion.text,
                    total_tokens: completion.total_tokens,
                }
            }
            Err(error) => {
                warn!(%error, "Completion failed.");
                let message = format_error_message(&error);
                self.log.push(ConversationTurn::assistant(message.clone()));
                SubmitOutcome::Failure { message }
            }
        };

        let dropped = self.log.truncate_to_window();
        if dropped > 0 {
            debug!(dropped, kept = self.log.len(), "Trimmed conversation history.");
        }

        Some(outcome)
    }

    /// System prompt followed by every logged turn, oldest first
    fn build_request(&self) -> CompletionRequest {
        let mut messages = Vec::with_capacity(self.log.len() + 1);
        messages.push(ConversationTurn::system(SYSTEM_PROMPT));
        messages.extend(self.log.iter().cloned());

        CompletionRequest {
            model: self.model.clone(),
            messages,
            temperature: TEMPERATURE,
            max_tokens: MAX_RESPONSE_TOKENS,
        }
    }
}

impl<P> ConversationManager<P> {
    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        self.log.turns()
    }

    pub fn last_turn(&self) -> Option<&ConversationTurn> {
        self.log.last()
    }

    pub fn state(&self) -> ManagerState {
        self.state
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Swap the provider for subsequent exchanges, keeping the conversation
    pub fn set_provider(&mut self, provider: P) {
        self.provider = provider;
    }

    /// Forget the whole conversation
    pub fn clear(&mut self) {
        self.log.clear();
    }

    /// Maximum number of turns kept between exchanges
    pub fn window(&self) -> usize {
        self.log.window()
    }
}
