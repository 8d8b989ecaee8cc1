//! Data models for the model-monitoring dashboard.
//!
//! - [`ConversationTurn`] and [`Role`] - chat messages exchanged with the assistant
//! - [`MetricSample`] - one day of simulated model performance
//! - [`MetricsSummary`] - aggregates shown on the metric cards
//!
//! Chat types serialize with serde in the shape chat-completion APIs expect
//! (`{"role": "user", "content": "..."}`), so they double as request messages.

pub mod conversation;
pub mod metrics;

pub use conversation::{ConversationTurn, Role};
pub use metrics::{DATE_FORMAT, MetricSample, MetricsSummary};
