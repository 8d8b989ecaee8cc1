use std::fmt::Display;

/// Model used when none is configured, also suggested as the fallback in error hints
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Price per token used for the usage note (USD)
pub const COST_PER_TOKEN_USD: f64 = 0.000002;

/// Fixed instructions sent ahead of the history on every request
pub const SYSTEM_PROMPT: &str = "You are a machine learning expert. Answer in a way that is:
- Technical but accessible
- With practical examples when relevant
- At most 300 tokens";

const USAGE_URL: &str = "https://platform.openai.com/usage";
const ERROR_HEADER: &str = "⚠️ **API Error**";

/// Estimated cost of an exchange in USD
pub fn estimated_cost_usd(total_tokens: u64) -> f64 {
    total_tokens as f64 * COST_PER_TOKEN_USD
}

/// Usage note shown after a successful exchange, e.g. `Tokens used: 42 (≈ $0.0001)`
pub fn usage_note(total_tokens: u64) -> String {
    format!("Tokens used: {} (≈ ${:.4})", total_tokens, estimated_cost_usd(total_tokens))
}

/// Turn a provider failure into the assistant message stored in the conversation
pub fn format_error_message(error: &dyn Display) -> String {
    format!(
        "{ERROR_HEADER}\n{error}\n∙ Check your [API key and quota]({USAGE_URL})\n∙ Alternative model: `{DEFAULT_MODEL}`"
    )
}

/// Whether an assistant turn was produced by [`format_error_message`]
pub fn is_error_message(content: &str) -> bool {
    content.starts_with(ERROR_HEADER)
}
