// Dialogue engine library
// Typewriter dialogue sessions, their content format and host plumbing

pub mod cli;
pub mod config;
pub mod dialogue;
pub mod logging;
pub mod resource;
pub mod terminal;

pub use cli::Cli;
pub use config::Options;
pub use dialogue::{DialogueError, DialogueSession, DisplaySink, LineSet};
pub use logging::LogLevel;
