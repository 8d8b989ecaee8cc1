//! AI Model Monitor - Terminal dashboard for model performance with an ML assistant
//!
//! This library provides the pieces behind the `ai-model-monitor` binary:
//!
//! - Generating a synthetic daily series of accuracy, latency and call counts
//! - Holding a bounded chat session with an OpenAI-compatible completion endpoint
//! - Rendering both in a `ratatui` dashboard
//!
//! # Example
//!
//! ```no_run
//! use ai_model_monitor::{AppConfig, ConversationManager, SubmitOutcome};
//!
//! let config = AppConfig { api_key: "sk-...".to_string(), ..AppConfig::default() };
//! let mut manager = ConversationManager::new(config.client());
//!
//! match manager.submit("What is overfitting?") {
//!     Some(SubmitOutcome::Success { text, total_tokens }) => {
//!         println!("{text} ({total_tokens} tokens)")
//!     }
//!     Some(SubmitOutcome::Failure { message }) => eprintln!("{message}"),
//!     None => {}
//! }
//! ```

pub mod cli;
pub mod clipboard;
pub mod config;
pub mod conversation;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod provider;
pub mod tui;
pub mod utils;

// Re-export commonly used types
pub use config::AppConfig;
pub use conversation::{ConversationLog, ConversationManager, SubmitOutcome};
pub use metrics::{generate, summarize};
pub use models::{ConversationTurn, MetricSample, MetricsSummary, Role};
pub use provider::{CompletionProvider, OpenAiClient, ProviderError};
