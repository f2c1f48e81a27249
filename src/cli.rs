use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::{parse_frame_rate, parse_interval_ms, parse_log_level, Options};

/// Terminal dialogue player
#[derive(Parser, Debug)]
#[command(name = "dialogue-play")]
#[command(version)]
#[command(about = "Play a dialogue script with a typewriter effect", long_about = None)]
pub struct Cli {
    /// Dialogue script (`speaker = text` per line)
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,

    /// Config file path
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Delay between characters in milliseconds
    #[arg(short = 'i', long = "interval", value_name = "MS")]
    pub interval_ms: Option<String>,

    /// Frames per second for the reveal driver
    #[arg(short, long, value_name = "FPS")]
    pub fps: Option<String>,

    /// Log level (nothing, user, error, warning, info, debug, all or 0-6)
    #[arg(short, long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Show every line in full without the typewriter effect
    #[arg(long)]
    pub instant: bool,
}

impl Cli {
    /// Merge CLI arguments into the options struct
    pub fn merge_into_options(&self, mut opts: Options) -> Result<Options> {
        if let Some(ref ms) = self.interval_ms {
            opts.type_interval = parse_interval_ms(ms).context("Invalid --interval")?;
        }
        if self.instant {
            opts.type_interval = std::time::Duration::ZERO;
        }

        if let Some(ref fps) = self.fps {
            opts.frame_interval = parse_frame_rate(fps).context("Invalid --fps")?;
        }

        if let Some(ref level) = self.log_level {
            opts.log_level = parse_log_level(level).context("Invalid --log-level")?;
        }

        Ok(opts)
    }
}
