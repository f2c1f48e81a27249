//! Dialogue presentation
//!
//! This module reveals dialogue lines with a typewriter effect and steps
//! through them on player input.
//!
//! # Architecture
//!
//! The dialogue system consists of:
//! - Line sets (immutable speaker/text sequences)
//! - The typewriter reveal process
//! - The session state machine
//! - The display sink interface the session writes to
//! - Scene triggers and a real-time driver for hosts
//!
//! # Thread Safety
//!
//! A `DialogueSession` is a plain owned value driven through `&mut`.
//! Hosts that need to tick it from another thread use `SessionDriver`,
//! which keeps the session behind a single mutex.

pub mod driver;
pub mod input;
pub mod interactable;
pub mod line;
pub mod session;
pub mod sink;
pub mod typewriter;
pub mod types;

pub use driver::{DriverCommand, SessionDriver};
pub use input::DialogueInput;
pub use interactable::Interactable;
pub use line::{DialogueLine, LineSet};
pub use session::DialogueSession;
pub use sink::{DisplaySink, RecordingSink, SinkEvent};
pub use typewriter::{CancelToken, RevealState, Typewriter};
pub use types::{
    AdvanceOutcome, DialogueError, DialogueResult, SessionState, DEFAULT_FRAME_INTERVAL,
    DEFAULT_TYPE_INTERVAL,
};
