//! Terminal display sink
//!
//! Redraws the current line in place using a carriage return and an ANSI
//! "erase line" sequence; a new speaker starts a fresh terminal line.

use std::io::{self, Write};

use crate::dialogue::DisplaySink;

const ERASE_LINE: &str = "\r\x1b[2K";

/// Display sink writing to a terminal-like stream
#[derive(Debug)]
pub struct TerminalSink<W: Write> {
    out: W,
    speaker: String,
    /// A partially drawn line is on screen
    line_open: bool,
}

impl<W: Write> TerminalSink<W> {
    /// Create a sink writing to `out`
    pub fn new(out: W) -> Self {
        Self {
            out,
            speaker: String::new(),
            line_open: false,
        }
    }

    /// Get the underlying writer
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Consume the sink, returning the writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn close_line(&mut self) -> io::Result<()> {
        if self.line_open {
            writeln!(self.out)?;
            self.line_open = false;
        }
        self.out.flush()
    }

    fn redraw(&mut self, body: &str) -> io::Result<()> {
        write!(self.out, "{}", ERASE_LINE)?;
        if !self.speaker.is_empty() {
            write!(self.out, "{}: ", self.speaker)?;
        }
        write!(self.out, "{}", body)?;
        self.line_open = true;
        self.out.flush()
    }
}

impl<W: Write> DisplaySink for TerminalSink<W> {
    fn set_visible(&mut self, visible: bool) {
        if !visible {
            if let Err(e) = self.close_line() {
                log::warn!("Terminal write failed: {}", e);
            }
        }
    }

    fn set_speaker(&mut self, speaker: &str) {
        if let Err(e) = self.close_line() {
            log::warn!("Terminal write failed: {}", e);
        }
        self.speaker = speaker.to_string();
    }

    fn set_body(&mut self, body: &str) {
        // Clearing a closed panel draws nothing
        if body.is_empty() && self.speaker.is_empty() && !self.line_open {
            return;
        }
        if let Err(e) = self.redraw(body) {
            log::warn!("Terminal write failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(sink: &TerminalSink<Vec<u8>>) -> String {
        String::from_utf8(sink.get_ref().clone()).unwrap()
    }

    #[test]
    fn test_redraws_in_place() {
        let mut sink = TerminalSink::new(Vec::new());
        sink.set_visible(true);
        sink.set_speaker("A");
        sink.set_body("H");
        sink.set_body("Hi");

        assert_eq!(output(&sink), "\r\x1b[2KA: H\r\x1b[2KA: Hi");
    }

    #[test]
    fn test_new_speaker_starts_new_line() {
        let mut sink = TerminalSink::new(Vec::new());
        sink.set_speaker("A");
        sink.set_body("Hi");
        sink.set_speaker("B");
        sink.set_body("Bye");
        sink.set_visible(false);

        assert_eq!(
            output(&sink),
            "\r\x1b[2KA: Hi\n\r\x1b[2KB: Bye\n"
        );
    }

    #[test]
    fn test_teardown_after_close_is_silent() {
        let mut sink = TerminalSink::new(Vec::new());
        sink.set_speaker("A");
        sink.set_body("Hi");
        sink.set_visible(false);
        sink.set_speaker("");
        sink.set_body("");

        assert_eq!(output(&sink), "\r\x1b[2KA: Hi\n");
        assert_eq!(sink.into_inner().len(), "\r\x1b[2KA: Hi\n".len());
    }

    #[test]
    fn test_narration_has_no_prefix() {
        let mut sink = TerminalSink::new(Vec::new());
        sink.set_speaker("");
        sink.set_body("Rain falls.");

        assert_eq!(output(&sink), "\r\x1b[2KRain falls.");
    }
}
