//! Scene objects that open a dialogue when interacted with

use super::line::LineSet;
use super::session::DialogueSession;
use super::sink::DisplaySink;
use super::types::DialogueResult;

/// A scene element holding authored dialogue
#[derive(Debug, Clone, Default)]
pub struct Interactable {
    name: String,
    dialogue: Option<LineSet>,
}

impl Interactable {
    /// Create an interactable with dialogue attached
    pub fn new(name: &str, dialogue: LineSet) -> Self {
        Self {
            name: name.to_string(),
            dialogue: Some(dialogue),
        }
    }

    /// Create an interactable with nothing to say
    pub fn silent(name: &str) -> Self {
        Self {
            name: name.to_string(),
            dialogue: None,
        }
    }

    /// Object name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attached dialogue
    pub fn dialogue(&self) -> Option<&LineSet> {
        self.dialogue.as_ref()
    }

    /// Attach or replace the dialogue
    pub fn set_dialogue(&mut self, dialogue: Option<LineSet>) {
        self.dialogue = dialogue;
    }

    /// Start this object's dialogue on `session`.
    ///
    /// Returns `Ok(false)` without touching the session when no dialogue
    /// is attached.
    pub fn interact<S: DisplaySink>(&self, session: &mut DialogueSession<S>) -> DialogueResult<bool> {
        log::info!("Interacted with '{}'", self.name);

        match &self.dialogue {
            Some(lines) => {
                session.start(lines)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
