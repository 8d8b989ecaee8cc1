use crate::models::{ConversationTurn, Role};

/// Maximum number of turns kept after each exchange (three user/assistant pairs)
pub const HISTORY_WINDOW: usize = 6;

/// Chronological, bounded list of chat turns for one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationLog {
    turns: Vec<ConversationTurn>,
    window: usize,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::with_window(HISTORY_WINDOW)
    }

    pub fn with_window(window: usize) -> Self {
        Self { turns: Vec::new(), window }
    }

    pub fn push(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    /// Drop the oldest turns until at most `window` remain. Returns how many were dropped.
    pub fn truncate_to_window(&mut self) -> usize {
        let overflow = self.turns.len().saturating_sub(self.window);
        if overflow > 0 {
            self.turns.drain(..overflow);
        }
        overflow
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&ConversationTurn> {
        self.turns.last()
    }

    /// Most recent assistant turn, if any
    pub fn last_assistant(&self) -> Option<&ConversationTurn> {
        self.turns.iter().rev().find(|turn| turn.role == Role::Assistant)
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConversationTurn> {
        self.turns.iter()
    }
}

impl Default for ConversationLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(count: usize) -> ConversationLog {
        let mut log = ConversationLog::new();
        for i in 0..count {
            log.push(ConversationTurn::user(format!("turn {i}")));
        }
        log
    }

    #[test]
    fn test_truncate_under_window_is_noop() {
        let mut log = filled(5);
        assert_eq!(log.truncate_to_window(), 0);
        assert_eq!(log.len(), 5);
    }

    #[test]
    fn test_truncate_at_window_is_noop() {
        let mut log = filled(HISTORY_WINDOW);
        assert_eq!(log.truncate_to_window(), 0);
        assert_eq!(log.len(), HISTORY_WINDOW);
    }

    #[test]
    fn test_truncate_drops_oldest_first() {
        let mut log = filled(9);

        assert_eq!(log.truncate_to_window(), 3);

        let contents: Vec<&str> = log.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, ["turn 3", "turn 4", "turn 5", "turn 6", "turn 7", "turn 8"]);
    }

    #[test]
    fn test_custom_window() {
        let mut log = ConversationLog::with_window(2);
        log.push(ConversationTurn::user("a"));
        log.push(ConversationTurn::assistant("b"));
        log.push(ConversationTurn::user("c"));

        assert_eq!(log.truncate_to_window(), 1);
        assert_eq!(log.turns()[0].content, "b");
        assert_eq!(log.window(), 2);
    }

    #[test]
    fn test_last_assistant() {
        let mut log = ConversationLog::new();
        assert!(log.last_assistant().is_none());

        log.push(ConversationTurn::user("q1"));
        log.push(ConversationTurn::assistant("a1"));
        log.push(ConversationTurn::user("q2"));

        assert_eq!(log.last_assistant().unwrap().content, "a1");
        assert_eq!(log.last().unwrap().content, "q2");
    }

    #[test]
    fn test_clear() {
        let mut log = filled(3);
        log.clear();
        assert!(log.is_empty());
    }
}
