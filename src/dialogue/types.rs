//! Core types for the dialogue system

use std::time::Duration;

/// Error type for dialogue operations
#[derive(Debug, thiserror::Error)]
pub enum DialogueError {
    /// Caller passed something the session cannot use (e.g. an empty line set)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// Malformed dialogue script
    #[error("Invalid dialogue script at line {line}: {reason}")]
    Content { line: usize, reason: String },
    /// Failed to read a script or config file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Bad configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),
    /// The session driver thread is no longer running
    #[error("Session driver has stopped")]
    DriverStopped,
}

/// Result type for dialogue operations
pub type DialogueResult<T> = Result<T, DialogueError>;

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No dialogue showing
    #[default]
    Idle,
    /// Typewriter running for the current line
    Revealing,
    /// Current line fully shown, waiting for input
    LineComplete,
    /// Last line dismissed; behaves like `Idle`.
    ///
    /// Sticky: ticks and inputs leave it in place. The next `start` or
    /// `end` moves on from it.
    Ended,
}

impl SessionState {
    /// Whether a dialogue is on screen in this state
    pub fn is_active(self) -> bool {
        matches!(self, SessionState::Revealing | SessionState::LineComplete)
    }
}

/// What a single `advance()` call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Reveal was interrupted and the full line shown
    Skipped,
    /// Moved on to the line at this index
    NextLine(usize),
    /// No lines left; the session was torn down
    Ended,
    /// No active session
    Ignored,
}

/// Default delay between revealed characters
pub const DEFAULT_TYPE_INTERVAL: Duration = Duration::from_millis(50);

/// Default host frame interval (~60 FPS)
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);
