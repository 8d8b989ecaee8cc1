//! Chat session with the model-monitoring assistant.
//!
//! [`ConversationManager`] owns the bounded [`ConversationLog`] and runs each exchange
//! against a [`CompletionProvider`](crate::provider::CompletionProvider).

pub mod log;
pub mod manager;
pub mod messages;

pub use log::{ConversationLog, HISTORY_WINDOW};
pub use manager::{
    ConversationManager, MAX_RESPONSE_TOKENS, ManagerState, SubmitOutcome, TEMPERATURE,
};
pub use messages::{
    COST_PER_TOKEN_USD, DEFAULT_MODEL, SYSTEM_PROMPT, estimated_cost_usd, format_error_message,
    is_error_message, usage_note,
};
