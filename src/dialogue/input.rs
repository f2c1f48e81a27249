//! Input events delivered to a dialogue session
//!
//! The host's input layer translates raw key presses or clicks into a
//! `DialogueInput` and hands it to `DialogueSession::handle_input`.
//! Key-binding layers resolve key names through
//! `DialogueInput::from_key_name`; line-based front ends such as the
//! terminal player use `DialogueInput::from_command`.

/// A discrete dialogue input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueInput {
    /// Skip the running reveal, or move to the next line
    Advance,
    /// Close the dialogue immediately
    End,
}

impl DialogueInput {
    /// Map a key name to an input. Unbound keys return `None`.
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "space" | "return" | "enter" | "mouse1" => Some(DialogueInput::Advance),
            "escape" | "esc" => Some(DialogueInput::End),
            _ => None,
        }
    }

    /// Map a line typed on a terminal to an input: an empty line advances,
    /// `q`/`quit` ends.
    pub fn from_command(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Some(DialogueInput::Advance);
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "q" | "quit" | "exit" => Some(DialogueInput::End),
            "n" | "next" => Some(DialogueInput::Advance),
            _ => None,
        }
    }
}
