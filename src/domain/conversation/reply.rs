//! Outbound replies: a text block plus optional button rows.

use serde::Serialize;

use super::Action;

/// A labelled button that sends an action back when pressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Button {
    pub label: String,
    pub action: Action,
}

impl Button {
    pub fn new(label: impl Into<String>, action: Action) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }
}

/// One message to render to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub text: String,
    pub buttons: Vec<Vec<Button>>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            buttons: Vec::new(),
        }
    }

    /// Appends a row of buttons.
    pub fn with_row(mut self, row: Vec<Button>) -> Self {
        if !row.is_empty() {
            self.buttons.push(row);
        }
        self
    }

    /// Appends a single-button row.
    pub fn with_button(self, label: impl Into<String>, action: Action) -> Self {
        self.with_row(vec![Button::new(label, action)])
    }

    /// Returns true if any button carries the action.
    pub fn has_action(&self, action: &Action) -> bool {
        self.buttons.iter().flatten().any(|b| &b.action == action)
    }

    /// All actions offered by this reply, in row order.
    pub fn actions(&self) -> Vec<&Action> {
        self.buttons.iter().flatten().map(|b| &b.action).collect()
    }
}

/// Longest text the platform accepts in one message.
pub const MAX_MESSAGE_CHARS: usize = 4096;

/// Splits text into pieces of at most `max_chars` characters.
///
/// Always returns at least one piece; empty text yields one empty piece.
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars.chunks(max_chars).map(|c| c.iter().collect()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    mod split {
        use super::*;

        #[test]
        fn short_text_is_one_piece() {
            assert_eq!(split_text("hello", 4096), vec!["hello"]);
        }

        #[test]
        fn long_text_is_cut_at_limit() {
            let text = "a".repeat(10);
            let parts = split_text(&text, 4);
            assert_eq!(parts, vec!["aaaa", "aaaa", "aa"]);
        }

        #[test]
        fn counts_characters_not_bytes() {
            let parts = split_text("ąčęė", 2);
            assert_eq!(parts, vec!["ąč", "ęė"]);
        }

        #[test]
        fn message_limit_is_inclusive() {
            assert_eq!(split_text(&"a".repeat(MAX_MESSAGE_CHARS), MAX_MESSAGE_CHARS).len(), 1);
            assert_eq!(split_text(&"a".repeat(MAX_MESSAGE_CHARS + 1), MAX_MESSAGE_CHARS).len(), 2);
        }

        #[test]
        fn empty_text_yields_one_empty_piece() {
            assert_eq!(split_text("", 10), vec![String::new()]);
        }
    }

    #[test]
    fn with_button_adds_one_row_per_call() {
        let reply = Reply::text("Menu")
            .with_button("Browse", Action::Browse)
            .with_button("Cart", Action::ViewCart);
        assert_eq!(reply.buttons.len(), 2);
        assert!(reply.has_action(&Action::ViewCart));
    }

    #[test]
    fn empty_rows_are_skipped() {
        let reply = Reply::text("x").with_row(vec![]);
        assert!(reply.buttons.is_empty());
    }

    #[test]
    fn actions_are_listed_in_order() {
        let reply = Reply::text("x").with_row(vec![
            Button::new("a", Action::Browse),
            Button::new("b", Action::MainMenu),
        ]);
        assert_eq!(reply.actions(), vec![&Action::Browse, &Action::MainMenu]);
    }
}
