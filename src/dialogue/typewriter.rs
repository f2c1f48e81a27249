//! Typewriter reveal process
//!
//! Reveals a line one character at a time. The process is an explicit
//! state machine advanced by `tick`; every elapsed interval is a
//! suspension point where the cancel flag is checked before the next
//! character is appended.
//!
//! Timeline for `"Hi"` at 50 ms:
//!
//! ```text
//! begin      -> ""  then "H"
//! +50 ms     -> "Hi"
//! +100 ms    -> Complete (nothing emitted)
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::sink::DisplaySink;

/// Reveal process state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealState {
    /// Created but `begin` not called yet
    #[default]
    Pending,
    /// Characters still being revealed
    Revealing,
    /// Every character shown and the final interval elapsed
    Complete,
    /// Stopped before completion; displayed text is left as is
    Cancelled,
}

/// Shared cancellation flag for a reveal process
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create a token that is not cancelled
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Check whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A single-use, cancellable character reveal
#[derive(Debug)]
pub struct Typewriter {
    text: String,
    /// Byte offset of the end of the revealed prefix
    revealed_end: usize,
    revealed_chars: usize,
    interval: Duration,
    /// Time spent in the current suspension
    waited: Duration,
    state: RevealState,
    cancel: CancelToken,
}

impl Typewriter {
    /// Create a reveal process for `text`, one character every `interval`
    pub fn new(text: impl Into<String>, interval: Duration) -> Self {
        Self {
            text: text.into(),
            revealed_end: 0,
            revealed_chars: 0,
            interval,
            waited: Duration::ZERO,
            state: RevealState::Pending,
            cancel: CancelToken::new(),
        }
    }

    /// Start revealing: clears the body, shows the first character and
    /// suspends. Text with no characters completes immediately.
    ///
    /// Has no effect on a process that was already started.
    pub fn begin(&mut self, sink: &mut dyn DisplaySink) -> RevealState {
        if self.state != RevealState::Pending {
            return self.state;
        }
        if self.cancel.is_cancelled() {
            self.state = RevealState::Cancelled;
            return self.state;
        }

        self.state = RevealState::Revealing;
        sink.set_body("");
        self.resume(sink);
        self.state
    }

    /// Let `elapsed` time pass, processing every suspension point it covers
    pub fn tick(&mut self, elapsed: Duration, sink: &mut dyn DisplaySink) -> RevealState {
        if self.state != RevealState::Revealing {
            return self.state;
        }

        self.waited += elapsed;
        loop {
            if self.cancel.is_cancelled() {
                self.state = RevealState::Cancelled;
                log::debug!(
                    "Reveal cancelled after {}/{} characters",
                    self.revealed_chars,
                    self.total_chars()
                );
                break;
            }
            if self.waited < self.interval {
                break;
            }
            self.waited -= self.interval;
            self.resume(sink);
            if self.state == RevealState::Complete {
                break;
            }
        }
        self.state
    }

    /// Stop the reveal. The displayed text is not touched.
    pub fn cancel(&mut self) {
        self.cancel.cancel();
        if matches!(self.state, RevealState::Pending | RevealState::Revealing) {
            self.state = RevealState::Cancelled;
        }
    }

    /// Handle to this process' cancel flag
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Current state
    pub fn state(&self) -> RevealState {
        self.state
    }

    /// Check if still revealing
    pub fn is_running(&self) -> bool {
        self.state == RevealState::Revealing
    }

    /// Full text being revealed
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Currently revealed prefix
    pub fn visible_text(&self) -> &str {
        &self.text[..self.revealed_end]
    }

    /// Number of characters revealed so far
    pub fn revealed_chars(&self) -> usize {
        self.revealed_chars
    }

    /// Number of characters in the text
    pub fn total_chars(&self) -> usize {
        self.text.chars().count()
    }

    /// Delay between characters
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Continue after a suspension: append the next character, or finish
    fn resume(&mut self, sink: &mut dyn DisplaySink) {
        match self.text[self.revealed_end..].chars().next() {
            Some(c) => {
                self.revealed_end += c.len_utf8();
                self.revealed_chars += 1;
                sink.set_body(&self.text[..self.revealed_end]);
            }
            None => {
                self.state = RevealState::Complete;
                log::trace!("Reveal complete ({} characters)", self.revealed_chars);
            }
        }
    }
}
