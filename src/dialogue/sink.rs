//! Display sink interface
//!
//! The session only ever writes to the sink; it never reads back.

/// Display surface a dialogue session writes to
pub trait DisplaySink {
    /// Show or hide the dialogue panel
    fn set_visible(&mut self, visible: bool);

    /// Replace the speaker name
    fn set_speaker(&mut self, speaker: &str);

    /// Replace the body text
    fn set_body(&mut self, body: &str);
}

impl<S: DisplaySink + ?Sized> DisplaySink for &mut S {
    fn set_visible(&mut self, visible: bool) {
        (**self).set_visible(visible);
    }

    fn set_speaker(&mut self, speaker: &str) {
        (**self).set_speaker(speaker);
    }

    fn set_body(&mut self, body: &str) {
        (**self).set_body(body);
    }
}

impl<S: DisplaySink + ?Sized> DisplaySink for Box<S> {
    fn set_visible(&mut self, visible: bool) {
        (**self).set_visible(visible);
    }

    fn set_speaker(&mut self, speaker: &str) {
        (**self).set_speaker(speaker);
    }

    fn set_body(&mut self, body: &str) {
        (**self).set_body(body);
    }
}

/// A single write to a sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    Visible(bool),
    Speaker(String),
    Body(String),
}

/// Sink that records every write, for headless hosts and tests
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    events: Vec<SinkEvent>,
    visible: bool,
    speaker: String,
    body: String,
}

impl RecordingSink {
    /// Create an empty recording sink
    pub fn new() -> Self {
        Self::default()
    }

    /// All writes so far, oldest first
    pub fn events(&self) -> &[SinkEvent] {
        &self.events
    }

    /// Body texts written so far, oldest first
    pub fn bodies(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SinkEvent::Body(b) => Some(b.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Drop the recorded history but keep the current display
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Current panel visibility
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Current speaker text
    pub fn speaker(&self) -> &str {
        &self.speaker
    }

    /// Current body text
    pub fn body(&self) -> &str {
        &self.body
    }
}

impl DisplaySink for RecordingSink {
    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.events.push(SinkEvent::Visible(visible));
    }

    fn set_speaker(&mut self, speaker: &str) {
        self.speaker = speaker.to_string();
        self.events.push(SinkEvent::Speaker(speaker.to_string()));
    }

    fn set_body(&mut self, body: &str) {
        self.body = body.to_string();
        self.events.push(SinkEvent::Body(body.to_string()));
    }
}
