use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::dialogue::{
    DialogueError, DialogueResult, DEFAULT_FRAME_INTERVAL, DEFAULT_TYPE_INTERVAL,
};
use crate::logging::LogLevel;
use crate::resource::parse_entries;

/// Player options that can be set via CLI or config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Delay between revealed characters
    pub type_interval: Duration,
    /// How often the driver ticks the session
    pub frame_interval: Duration,
    pub log_level: LogLevel,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            type_interval: DEFAULT_TYPE_INTERVAL,
            frame_interval: DEFAULT_FRAME_INTERVAL,
            log_level: LogLevel::Info,
        }
    }
}

/// Load options from a `key = value` config file.
///
/// `None` returns the defaults. Unknown keys are logged and ignored.
pub fn load_config(path: Option<&Path>) -> Result<Options> {
    let Some(path) = path else {
        return Ok(Options::default());
    };

    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    parse_config(&data).with_context(|| format!("Invalid config file {}", path.display()))
}

/// Parse config file text on top of the defaults
pub fn parse_config(data: &str) -> Result<Options> {
    let mut opts = Options::default();

    for entry in parse_entries(data, true)? {
        match entry.key {
            "type_interval_ms" => {
                opts.type_interval = parse_interval_ms(entry.value)
                    .with_context(|| format!("line {}", entry.line))?;
            }
            "frame_rate" => {
                opts.frame_interval = parse_frame_rate(entry.value)
                    .with_context(|| format!("line {}", entry.line))?;
            }
            "log_level" => {
                opts.log_level = parse_log_level(entry.value)
                    .with_context(|| format!("line {}", entry.line))?;
            }
            other => log::warn!("Unknown config key '{}' on line {}", other, entry.line),
        }
    }

    Ok(opts)
}

/// Parse a per-character delay in milliseconds (0-10000)
pub fn parse_interval_ms(s: &str) -> DialogueResult<Duration> {
    let ms: u64 = s
        .trim()
        .parse()
        .map_err(|e| DialogueError::Config(format!("typing interval '{}': {}", s.trim(), e)))?;
    if ms > 10_000 {
        return Err(DialogueError::Config(format!(
            "typing interval must be at most 10000 ms, got {}",
            ms
        )));
    }
    Ok(Duration::from_millis(ms))
}

/// Parse a frame rate (1-1000 frames per second) into a frame interval
pub fn parse_frame_rate(s: &str) -> DialogueResult<Duration> {
    let fps: u32 = s
        .trim()
        .parse()
        .map_err(|e| DialogueError::Config(format!("frame rate '{}': {}", s.trim(), e)))?;
    if fps == 0 || fps > 1000 {
        return Err(DialogueError::Config(format!(
            "frame rate must be between 1 and 1000, got {}",
            fps
        )));
    }
    Ok(Duration::from_secs(1) / fps)
}

/// Parse a log level name or number
pub fn parse_log_level(s: &str) -> DialogueResult<LogLevel> {
    s.parse::<LogLevel>().map_err(DialogueError::Config)
}
