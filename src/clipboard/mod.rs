//! Copy assistant replies to the system clipboard.

use anyhow::{Context, Result, bail};
use arboard::Clipboard;

use crate::conversation::ConversationLog;

/// Largest reply accepted for copying (1MB)
const MAX_COPY_SIZE: usize = 1024 * 1024;

/// Destination for copied text (swapped for a fake in tests)
trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    fn new() -> Result<Self> {
        let clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
        Ok(Self { clipboard })
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.clipboard.set_text(text).context("Failed to set clipboard contents")?;
        Ok(())
    }
}

/// Pick the text to copy: the most recent assistant reply
fn reply_to_copy(log: &ConversationLog) -> Result<&str> {
    let Some(turn) = log.last_assistant() else {
        bail!("No assistant reply to copy");
    };

    if turn.content.trim().is_empty() {
        bail!("Assistant reply is empty");
    }
    if turn.content.len() > MAX_COPY_SIZE {
        bail!(
            "Reply too large for clipboard ({} bytes, max {})",
            turn.content.len(),
            MAX_COPY_SIZE
        );
    }

    Ok(&turn.content)
}

fn copy_with_sink(log: &ConversationLog, sink: &mut dyn ClipboardSink) -> Result<usize> {
    let text = reply_to_copy(log)?;
    sink.set_text(text)?;
    Ok(text.chars().count())
}

/// Copy the latest assistant reply in `log` to the system clipboard.
///
/// Returns the number of characters copied.
///
/// # Errors
/// Returns error if:
/// - The log has no assistant reply, or the reply is blank
/// - The reply is larger than 1MB
/// - The system clipboard is unavailable (headless environment, permissions)
pub fn copy_last_reply(log: &ConversationLog) -> Result<usize> {
    // Validate before touching the system clipboard so headless runs get the precise error
    reply_to_copy(log)?;

    let mut clipboard = SystemClipboard::new()?;
    copy_with_sink(log, &mut clipboard)
}
