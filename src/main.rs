use std::io::{self, BufRead};

use anyhow::{Context, Result};
use clap::Parser;

use dialogue_engine::cli::Cli;
use dialogue_engine::dialogue::{DialogueInput, DialogueSession, SessionDriver};
use dialogue_engine::terminal::TerminalSink;
use dialogue_engine::{config, logging, resource};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config file first, then command line overrides
    let options = config::load_config(cli.config.as_deref())?;
    let options = cli.merge_into_options(options)?;
    logging::init_logging(options.log_level);

    let lines = resource::load_line_set(&cli.script)
        .with_context(|| format!("Failed to load script {}", cli.script.display()))?;
    log::info!(
        "Playing {} ({} lines, {:?} per character)",
        cli.script.display(),
        lines.len(),
        options.type_interval
    );

    let session = DialogueSession::with_interval(TerminalSink::new(io::stdout()), options.type_interval);
    let driver = SessionDriver::spawn(session, options.frame_interval)
        .context("Failed to start dialogue driver")?;
    driver.start(lines).context("Cannot play script")?;

    log::info!("Press Enter to continue, 'q' then Enter to quit");

    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read input")?;
        match DialogueInput::from_command(&line) {
            Some(input) => driver.send_input(input)?,
            None => log::warn!("Unknown command '{}'", line.trim()),
        }

        if !driver.sync()?.is_active() {
            break;
        }
    }

    // EOF while a line is still showing
    driver.send_input(DialogueInput::End)?;
    driver.shutdown()?;
    log::info!("Dialogue closed");
    Ok(())
}
