//! Terminal output sanitization.
//!
//! Assistant replies come from a remote endpoint and are printed by `ask` and drawn by
//! the dashboard. Escape sequences in them could move the cursor, recolor the terminal
//! or set the window title, so they are removed before display.

const ESC: char = '\x1b';
const BEL: char = '\x07';

/// Remove escape sequences and control characters from remote text.
///
/// Handles CSI (`ESC [ ... final`) and OSC (`ESC ] ... BEL` or `ESC ] ... ESC \`)
/// sequences and drops a lone `ESC` together with the character after it. Newlines
/// and tabs are kept; carriage returns are dropped so a reply cannot overwrite lines.
///
/// ```
/// use ai_model_monitor::utils::sanitize_for_terminal;
///
/// assert_eq!(sanitize_for_terminal("\x1b[31mRed\x1b[0m"), "Red");
/// ```
pub fn sanitize_for_terminal(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == ESC {
            match chars.next() {
                Some('[') => {
                    // Parameters and intermediates end at the first byte in 0x40..=0x7E
                    for next in chars.by_ref() {
                        if ('\x40'..='\x7e').contains(&next) {
                            break;
                        }
                    }
                }
                Some(']') => {
                    while let Some(next) = chars.next() {
                        if next == BEL {
                            break;
                        }
                        if next == ESC && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            }
            continue;
        }

        if ch.is_control() && ch != '\n' && ch != '\t' {
            continue;
        }

        result.push(ch);
    }

    result
}
