//! TUI application state and event handling.
//!
//! This module implements the dashboard's interactive behavior. It manages:
//!
//! - **Metrics view**: Summary cards plus a data table and charts, switched with tabs
//! - **Chat session**: A [`ConversationManager`] fed from the chat input
//! - **Credential field**: Masked API key input in the sidebar
//! - **Status messages**: Transient feedback for clipboard operations and API failures
//! - **Dirty state tracking**: Optimized rendering only when state changes
//!
//! # Submission flow
//!
//! Pressing Enter moves the chat input into `pending_prompt` and marks the screen dirty.
//! The next loop iteration draws the pending message with a progress note, then runs the
//! exchange, which blocks until the provider answers. The provider is rebuilt from the
//! current API key whenever the key changed since the last exchange.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut app = App::new(samples, &config, factory);
//! app.run(&mut terminal)?;
//! ```

use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::Local;
use ratatui::Terminal;
use ratatui::backend::Backend;

use super::events::{Action, poll_event};
use super::rendering::{DashboardView, render_dashboard};
use crate::clipboard::copy_last_reply;
use crate::config::AppConfig;
use crate::conversation::{ConversationManager, SubmitOutcome};
use crate::metrics::summarize;
use crate::models::{MetricSample, MetricsSummary};
use crate::provider::CompletionProvider;

/// Duration for success status messages (milliseconds)
const STATUS_SUCCESS_DURATION_MS: u64 = 3000;
/// Duration for error status messages (milliseconds)
const STATUS_ERROR_DURATION_MS: u64 = 5000;
const MAX_INPUT_CHARS: usize = 2000;
const MAX_API_KEY_CHARS: usize = 256;
const PAGE_SCROLL_LINES: u16 = 5;

/// Builds a provider for the given API key
pub type ProviderFactory = Box<dyn Fn(&str) -> Box<dyn CompletionProvider>>;

/// Type of status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Error,
}

/// Transient status message with expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub expires_at: Instant,
}

/// Input field receiving keystrokes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    ChatInput,
    ApiKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Data,
    Charts,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Data, Tab::Charts];

    pub fn next(self) -> Self {
        match self {
            Tab::Data => Tab::Charts,
            Tab::Charts => Tab::Data,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Data => 0,
            Tab::Charts => 1,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Tab::Data => "📊 Detailed data",
            Tab::Charts => "📈 Visualizations",
        }
    }
}

pub struct App {
    samples: Vec<MetricSample>,
    summary: MetricsSummary,
    manager: ConversationManager<Box<dyn CompletionProvider>>,
    provider_factory: ProviderFactory,
    // Key the current provider was built with
    provider_key: String,
    api_key: String,
    api_connected: bool,
    last_usage: Option<u64>,
    focus: Focus,
    selected_tab: Tab,
    chat_input: String,
    pending_prompt: Option<String>,
    // Lines scrolled up from the bottom of the transcript
    chat_scroll: u16,
    should_quit: bool,
    status_message: Option<StatusMessage>,
    // Dirty state tracking for efficient rendering
    needs_redraw: bool,
    last_draw_time: Instant,
}

impl App {
    pub fn new(
        samples: Vec<MetricSample>,
        config: &AppConfig,
        provider_factory: ProviderFactory,
    ) -> Self {
        let provider = provider_factory(&config.api_key);
        let manager = ConversationManager::with_model(provider, config.model.clone());
        let summary = summarize(&samples);

        Self {
            samples,
            summary,
            manager,
            provider_factory,
            provider_key: config.api_key.clone(),
            api_key: config.api_key.clone(),
            api_connected: false,
            last_usage: None,
            focus: Focus::ChatInput,
            selected_tab: Tab::Data,
            chat_input: String::new(),
            pending_prompt: None,
            chat_scroll: 0,
            should_quit: false,
            status_message: None,
            needs_redraw: true, // Initial draw needed
            last_draw_time: Instant::now(),
        }
    }

    /// Set a transient status message with automatic expiry
    fn set_status(&mut self, text: impl Into<String>, message_type: MessageType, duration_ms: u64) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            message_type,
            expires_at: Instant::now() + Duration::from_millis(duration_ms),
        });
        self.needs_redraw = true;
    }

    /// Check and clear expired status messages
    fn check_and_clear_expired_status(&mut self) {
        let should_clear = self
            .status_message
            .as_ref()
            .map(|msg| Instant::now() >= msg.expires_at)
            .unwrap_or(false);
        if should_clear {
            self.status_message = None;
            self.needs_redraw = true;
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            self.check_and_clear_expired_status();

            // Draw if dirty or if it's been >100ms (for terminal resize handling)
            let now = Instant::now();
            let elapsed = now.duration_since(self.last_draw_time);
            if self.needs_redraw || elapsed >= Duration::from_millis(100) {
                terminal.draw(|f| render_dashboard(f, &self.view()))?;
                self.needs_redraw = false;
                self.last_draw_time = now;
            }

            // The pending message is on screen now; run the blocking exchange
            if self.pending_prompt.is_some() {
                self.process_pending();
                continue;
            }

            let action = poll_event(Duration::from_millis(100))?;
            self.handle_action(action);
        }

        Ok(())
    }

    fn view(&self) -> DashboardView<'_> {
        DashboardView {
            samples: &self.samples,
            summary: self.summary,
            selected_tab: self.selected_tab,
            focus: self.focus,
            api_key: &self.api_key,
            api_connected: self.api_connected,
            last_usage: self.last_usage,
            default_model: self.manager.model(),
            turns: self.manager.turns(),
            pending_prompt: self.pending_prompt.as_deref(),
            chat_input: &self.chat_input,
            chat_scroll: self.chat_scroll,
            status_message: self.status_message.as_ref(),
            updated_at: Local::now(),
        }
    }

    /// Handle a user action (extracted for testing)
    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::ClearInput => self.clear_input(),
            Action::ToggleFocus => {
                self.focus = match self.focus {
                    Focus::ChatInput => Focus::ApiKey,
                    Focus::ApiKey => Focus::ChatInput,
                };
                self.needs_redraw = true;
            }
            Action::NextTab => {
                self.selected_tab = self.selected_tab.next();
                self.needs_redraw = true;
            }
            Action::Submit => self.submit_input(),
            Action::CopyReply => match copy_last_reply(self.manager.log()) {
                Ok(chars) => self.set_status(
                    format!("✓ Copied reply to clipboard ({} chars)", chars),
                    MessageType::Success,
                    STATUS_SUCCESS_DURATION_MS,
                ),
                Err(e) => self.set_status(
                    format!("✗ Clipboard error: {}", e),
                    MessageType::Error,
                    STATUS_ERROR_DURATION_MS,
                ),
            },
            Action::ClearChat => {
                self.manager.clear();
                self.chat_scroll = 0;
                self.set_status(
                    "✓ Conversation cleared",
                    MessageType::Success,
                    STATUS_SUCCESS_DURATION_MS,
                );
            }
            Action::ScrollUp => self.scroll_chat(1),
            Action::ScrollDown => self.scroll_chat(-1),
            Action::PageUp => self.scroll_chat(PAGE_SCROLL_LINES as i32),
            Action::PageDown => self.scroll_chat(-(PAGE_SCROLL_LINES as i32)),
            Action::Input(c) => self.insert_char(c),
            Action::DeleteChar => self.delete_char(),
            Action::None => {}
        }
    }

    /// Clear the focused field, or quit when it is already empty
    fn clear_input(&mut self) {
        let field = match self.focus {
            Focus::ChatInput => &mut self.chat_input,
            Focus::ApiKey => &mut self.api_key,
        };
        if field.is_empty() {
            self.should_quit = true;
        } else {
            field.clear();
        }
        self.needs_redraw = true;
    }

    /// Queue the chat input for the next exchange. Blank input is ignored.
    fn submit_input(&mut self) {
        if self.focus == Focus::ApiKey {
            // Enter confirms the key and returns to the chat
            self.focus = Focus::ChatInput;
            self.needs_redraw = true;
            return;
        }

        if self.pending_prompt.is_some() || self.chat_input.trim().is_empty() {
            return;
        }

        self.pending_prompt = Some(std::mem::take(&mut self.chat_input));
        self.api_connected = !self.api_key.trim().is_empty();
        self.chat_scroll = 0;
        self.needs_redraw = true;
    }

    /// Run the queued exchange, blocking until the provider answers
    fn process_pending(&mut self) {
        let Some(prompt) = self.pending_prompt.take() else {
            return;
        };

        self.refresh_provider();
        match self.manager.submit(&prompt) {
            Some(SubmitOutcome::Success { total_tokens, .. }) => {
                self.last_usage = Some(total_tokens);
            }
            Some(SubmitOutcome::Failure { .. }) => {
                // Usage note only describes the latest successful exchange
                self.last_usage = None;
                self.set_status(
                    "✗ API request failed, see the assistant reply",
                    MessageType::Error,
                    STATUS_ERROR_DURATION_MS,
                );
            }
            None => {}
        }

        self.chat_scroll = 0;
        self.needs_redraw = true;
    }

    /// Rebuild the provider if the API key was edited since the last exchange
    fn refresh_provider(&mut self) {
        if self.provider_key != self.api_key {
            self.manager.set_provider((self.provider_factory)(&self.api_key));
            self.provider_key = self.api_key.clone();
        }
    }

    fn scroll_chat(&mut self, delta: i32) {
        let old = self.chat_scroll;
        self.chat_scroll = (self.chat_scroll as i32 + delta).clamp(0, u16::MAX as i32) as u16;
        if old != self.chat_scroll {
            self.needs_redraw = true;
        }
    }

    fn insert_char(&mut self, c: char) {
        let (field, limit) = match self.focus {
            Focus::ChatInput => (&mut self.chat_input, MAX_INPUT_CHARS),
            Focus::ApiKey => (&mut self.api_key, MAX_API_KEY_CHARS),
        };
        if field.chars().count() < limit {
            field.push(c);
            self.needs_redraw = true;
        }
    }

    fn delete_char(&mut self) {
        let field = match self.focus {
            Focus::ChatInput => &mut self.chat_input,
            Focus::ApiKey => &mut self.api_key,
        };
        if field.pop().is_some() {
            self.needs_redraw = true;
        }
    }
}
