//! Dialogue session state machine
//!
//! ```text
//!            start                tick completes
//!   Idle ─────────────► Revealing ──────────────► LineComplete
//!    ▲                     │  advance (skip)          │
//!    │                     └─────────────────────────►│
//!    │                                                │ advance, more lines
//!    │                     Revealing ◄────────────────┤
//!    │  end                                           │ advance, last line
//!    └──────────── Ended ◄────────────────────────────┘
//! ```
//!
//! An `advance` while revealing only completes the line; a second
//! `advance` is needed to move on.

use std::time::Duration;

use super::input::DialogueInput;
use super::line::{DialogueLine, LineSet};
use super::sink::DisplaySink;
use super::typewriter::{RevealState, Typewriter};
use super::types::{
    AdvanceOutcome, DialogueError, DialogueResult, SessionState, DEFAULT_TYPE_INTERVAL,
};

/// A single dialogue session writing to a display sink
#[derive(Debug)]
pub struct DialogueSession<S: DisplaySink> {
    sink: S,
    line_set: Option<LineSet>,
    current_index: usize,
    state: SessionState,
    /// At most one reveal alive at a time
    reveal: Option<Typewriter>,
    type_interval: Duration,
}

impl<S: DisplaySink> DialogueSession<S> {
    /// Create an idle session with the default typing speed
    pub fn new(sink: S) -> Self {
        Self::with_interval(sink, DEFAULT_TYPE_INTERVAL)
    }

    /// Create an idle session revealing one character every `type_interval`
    pub fn with_interval(sink: S, type_interval: Duration) -> Self {
        Self {
            sink,
            line_set: None,
            current_index: 0,
            state: SessionState::Idle,
            reveal: None,
            type_interval,
        }
    }

    /// Begin a dialogue at its first line.
    ///
    /// Replaces any dialogue already showing. An empty line set is
    /// rejected and leaves the session and display untouched.
    pub fn start(&mut self, line_set: &LineSet) -> DialogueResult<()> {
        if line_set.is_empty() {
            log::warn!("Refusing to start dialogue: line set has no lines");
            return Err(DialogueError::InvalidArgument(
                "line set has no lines".to_string(),
            ));
        }

        if self.state.is_active() {
            log::debug!("Replacing active dialogue");
        }
        self.cancel_reveal();

        log::info!("Starting dialogue ({} lines)", line_set.len());
        self.line_set = Some(line_set.clone());
        self.current_index = 0;
        self.sink.set_visible(true);
        self.show_current_line();
        Ok(())
    }

    /// Handle one "proceed" input
    pub fn advance(&mut self) -> AdvanceOutcome {
        match self.state {
            SessionState::Revealing => {
                self.cancel_reveal();
                if let Some(lines) = &self.line_set {
                    self.sink.set_body(lines[self.current_index].text());
                }
                self.state = SessionState::LineComplete;
                log::debug!("Skipped reveal of line {}", self.current_index);
                AdvanceOutcome::Skipped
            }
            SessionState::LineComplete => {
                if self.current_index + 1 < self.line_count() {
                    self.current_index += 1;
                    self.show_current_line();
                    AdvanceOutcome::NextLine(self.current_index)
                } else {
                    self.teardown();
                    self.state = SessionState::Ended;
                    log::info!("Dialogue finished");
                    AdvanceOutcome::Ended
                }
            }
            SessionState::Idle | SessionState::Ended => AdvanceOutcome::Ignored,
        }
    }

    /// Close the dialogue, whatever its state
    pub fn end(&mut self) {
        match self.state {
            SessionState::Idle => {}
            SessionState::Ended => self.state = SessionState::Idle,
            SessionState::Revealing | SessionState::LineComplete => {
                self.teardown();
                self.state = SessionState::Idle;
                log::info!("Dialogue ended early");
            }
        }
    }

    /// Let time pass for the running reveal
    pub fn update(&mut self, elapsed: Duration) -> SessionState {
        if self.state != SessionState::Revealing {
            return self.state;
        }

        if let Some(reveal) = self.reveal.as_mut() {
            match reveal.tick(elapsed, &mut self.sink) {
                RevealState::Complete | RevealState::Cancelled => {
                    self.reveal = None;
                    self.state = SessionState::LineComplete;
                }
                RevealState::Pending | RevealState::Revealing => {}
            }
        }
        self.state
    }

    /// Apply an input event from the host
    pub fn handle_input(&mut self, input: DialogueInput) -> SessionState {
        match input {
            DialogueInput::Advance => {
                self.advance();
            }
            DialogueInput::End => self.end(),
        }
        self.state
    }

    /// Current state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Check if a dialogue is showing
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Index of the line being shown (0 when idle)
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Line being shown, if any
    pub fn current_line(&self) -> Option<&DialogueLine> {
        self.line_set.as_ref()?.get(self.current_index)
    }

    /// Number of lines in the active dialogue (0 when idle)
    pub fn line_count(&self) -> usize {
        self.line_set.as_ref().map_or(0, LineSet::len)
    }

    /// Delay between revealed characters
    pub fn interval(&self) -> Duration {
        self.type_interval
    }

    /// Change the typing speed for lines started from now on
    pub fn set_interval(&mut self, type_interval: Duration) {
        self.type_interval = type_interval;
    }

    /// Get the display sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Get mutable display sink
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the session, returning its sink
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Write the speaker for the current line and start revealing its text
    fn show_current_line(&mut self) {
        self.cancel_reveal();

        let Some(lines) = &self.line_set else {
            return;
        };
        let line = &lines[self.current_index];
        self.sink.set_speaker(line.speaker_name());

        let mut reveal = Typewriter::new(line.text(), self.type_interval);
        match reveal.begin(&mut self.sink) {
            RevealState::Revealing => {
                self.reveal = Some(reveal);
                self.state = SessionState::Revealing;
            }
            _ => self.state = SessionState::LineComplete,
        }
        log::debug!("Showing line {}", self.current_index);
    }

    fn cancel_reveal(&mut self) {
        if let Some(mut reveal) = self.reveal.take() {
            reveal.cancel();
        }
    }

    /// Hide and clear the display and forget the line set
    fn teardown(&mut self) {
        self.cancel_reveal();
        self.sink.set_visible(false);
        self.sink.set_speaker("");
        self.sink.set_body("");
        self.line_set = None;
        self.current_index = 0;
    }
}
