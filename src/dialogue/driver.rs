//! Real-time session driver
//!
//! Runs a dialogue session on a worker thread. Input events and start
//! requests arrive over a channel; between them the worker ticks the
//! session with the measured frame time. Every mutation happens on the
//! worker while holding the session lock, so a reveal can never write a
//! character after an `Advance` has been applied.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam::channel::{self, RecvTimeoutError, Sender};
use parking_lot::Mutex;

use super::input::DialogueInput;
use super::line::LineSet;
use super::session::DialogueSession;
use super::sink::DisplaySink;
use super::types::{DialogueError, DialogueResult, SessionState};

/// Commands processed by the driver thread
#[derive(Debug)]
pub enum DriverCommand {
    /// Start a dialogue and report the result
    Start(LineSet, Sender<DialogueResult<()>>),
    /// Deliver an input event
    Input(DialogueInput),
    /// Reply with the session state once every earlier command is applied
    Sync(Sender<SessionState>),
    /// Stop the worker
    Shutdown,
}

/// Owns a session and ticks it on a background thread
pub struct SessionDriver<S: DisplaySink + Send + 'static> {
    session: Arc<Mutex<DialogueSession<S>>>,
    commands: Sender<DriverCommand>,
    handle: Option<JoinHandle<()>>,
}

impl<S: DisplaySink + Send + 'static> SessionDriver<S> {
    /// Move `session` onto a worker thread that wakes at least every
    /// `frame_interval`
    pub fn spawn(session: DialogueSession<S>, frame_interval: Duration) -> DialogueResult<Self> {
        let session = Arc::new(Mutex::new(session));
        let (commands, receiver) = channel::unbounded();

        let worker = Arc::clone(&session);
        let handle = thread::Builder::new()
            .name("dialogue-driver".to_string())
            .spawn(move || {
                let mut last = Instant::now();
                loop {
                    let received = receiver.recv_timeout(frame_interval);

                    let now = Instant::now();
                    let mut session = worker.lock();
                    session.update(now.duration_since(last));
                    last = now;

                    match received {
                        Ok(DriverCommand::Start(lines, reply)) => {
                            // Requester may have given up waiting
                            let _ = reply.send(session.start(&lines));
                        }
                        Ok(DriverCommand::Input(input)) => {
                            session.handle_input(input);
                        }
                        Ok(DriverCommand::Sync(reply)) => {
                            let _ = reply.send(session.state());
                        }
                        Ok(DriverCommand::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
                        Err(RecvTimeoutError::Timeout) => {}
                    }
                }
                log::debug!("Dialogue driver stopped");
            })?;

        log::debug!("Dialogue driver started ({:?} frames)", frame_interval);
        Ok(Self {
            session,
            commands,
            handle: Some(handle),
        })
    }

    /// Start a dialogue on the worker and wait for the outcome
    pub fn start(&self, lines: LineSet) -> DialogueResult<()> {
        let (reply, outcome) = channel::bounded(1);
        self.send(DriverCommand::Start(lines, reply))?;
        outcome.recv().map_err(|_| DialogueError::DriverStopped)?
    }

    /// Queue an input event
    pub fn send_input(&self, input: DialogueInput) -> DialogueResult<()> {
        self.send(DriverCommand::Input(input))
    }

    /// Wait until every queued command has been applied and return the
    /// resulting state
    pub fn sync(&self) -> DialogueResult<SessionState> {
        let (reply, state) = channel::bounded(1);
        self.send(DriverCommand::Sync(reply))?;
        state.recv().map_err(|_| DialogueError::DriverStopped)
    }

    /// Inspect the session under its lock
    pub fn with_session<R>(&self, f: impl FnOnce(&DialogueSession<S>) -> R) -> R {
        let session = self.session.lock();
        f(&session)
    }

    /// Check if the worker thread is still alive
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop the worker and take the session back
    pub fn shutdown(self) -> DialogueResult<DialogueSession<S>> {
        let session = Arc::clone(&self.session);
        drop(self);
        Arc::try_unwrap(session)
            .map(|session| session.into_inner())
            .map_err(|_| DialogueError::DriverStopped)
    }

    fn send(&self, command: DriverCommand) -> DialogueResult<()> {
        self.commands
            .send(command)
            .map_err(|_| DialogueError::DriverStopped)
    }
}

impl<S: DisplaySink + Send + 'static> Drop for SessionDriver<S> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = self.commands.send(DriverCommand::Shutdown);
            if handle.join().is_err() {
                log::error!("Dialogue driver thread panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::line::DialogueLine;
    use crate::dialogue::sink::{RecordingSink, SinkEvent};

    const FRAME: Duration = Duration::from_millis(2);

    fn wait_for<S, F>(driver: &SessionDriver<S>, mut done: F) -> bool
    where
        S: DisplaySink + Send + 'static,
        F: FnMut(&DialogueSession<S>) -> bool,
    {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if driver.with_session(&mut done) {
                return true;
            }
            thread::sleep(Duration::from_millis(1));
        }
        false
    }

    fn wait_for_exit<S: DisplaySink + Send + 'static>(driver: &SessionDriver<S>) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while driver.is_running() {
            if Instant::now() > deadline {
                return false;
            }
            thread::sleep(Duration::from_millis(1));
        }
        true
    }

    #[test]
    fn test_driver_reveals_in_real_time() {
        let session = DialogueSession::with_interval(RecordingSink::new(), Duration::from_millis(1));
        let driver = SessionDriver::spawn(session, FRAME).unwrap();
        assert!(driver.is_running());

        driver
            .start(LineSet::new(vec![DialogueLine::new("A", "Hello")]))
            .unwrap();
        assert!(wait_for(&driver, |s| s.state() == SessionState::LineComplete));
        assert_eq!(driver.with_session(|s| s.sink().body().to_string()), "Hello");

        let session = driver.shutdown().unwrap();
        let bodies = session.sink().bodies();
        assert_eq!(bodies.first(), Some(&""));
        assert_eq!(bodies.last(), Some(&"Hello"));
    }

    #[test]
    fn test_driver_applies_inputs_in_order() {
        let session = DialogueSession::with_interval(RecordingSink::new(), Duration::from_secs(60));
        let driver = SessionDriver::spawn(session, FRAME).unwrap();

        driver
            .start(LineSet::new(vec![
                DialogueLine::new("A", "Hi"),
                DialogueLine::new("B", "Bye"),
            ]))
            .unwrap();
        driver.send_input(DialogueInput::Advance).unwrap();
        driver.send_input(DialogueInput::Advance).unwrap();
        driver.send_input(DialogueInput::Advance).unwrap();

        assert_eq!(driver.sync().unwrap(), SessionState::LineComplete);
        assert_eq!(driver.with_session(|s| s.current_index()), 1);
        assert_eq!(driver.with_session(|s| s.sink().body().to_string()), "Bye");

        driver.send_input(DialogueInput::End).unwrap();
        assert_eq!(driver.sync().unwrap(), SessionState::Idle);
    }

    #[test]
    fn test_skip_is_never_followed_by_reveal_writes() {
        // Long enough that the reveal is still running when the skip lands
        let text = "Keep talking. ".repeat(60);
        for _ in 0..20 {
            let session =
                DialogueSession::with_interval(RecordingSink::new(), Duration::from_millis(1));
            let driver = SessionDriver::spawn(session, Duration::from_millis(1)).unwrap();

            driver
                .start(LineSet::new(vec![DialogueLine::new("A", text.as_str())]))
                .unwrap();
            thread::sleep(Duration::from_millis(3));
            driver.send_input(DialogueInput::Advance).unwrap();
            driver.sync().unwrap();

            // Give any stray reveal tick a chance to land
            thread::sleep(Duration::from_millis(30));
            let session = driver.shutdown().unwrap();

            let last_body = session.sink().events().iter().rev().find_map(|e| match e {
                SinkEvent::Body(body) => Some(body.as_str()),
                _ => None,
            });
            assert_eq!(last_body, Some(text.as_str()));
            assert_eq!(session.state(), SessionState::LineComplete);
        }
    }

    #[test]
    fn test_send_after_worker_exit() {
        let driver = SessionDriver::spawn(DialogueSession::new(RecordingSink::new()), FRAME).unwrap();
        driver.send(DriverCommand::Shutdown).unwrap();
        assert!(wait_for_exit(&driver));

        assert!(matches!(
            driver.send_input(DialogueInput::Advance),
            Err(DialogueError::DriverStopped)
        ));
        assert!(matches!(driver.sync(), Err(DialogueError::DriverStopped)));
    }

    #[test]
    fn test_driver_start_reports_errors() {
        let driver = SessionDriver::spawn(DialogueSession::new(RecordingSink::new()), FRAME).unwrap();

        let err = driver.start(LineSet::new(Vec::new())).unwrap_err();
        assert!(matches!(err, DialogueError::InvalidArgument(_)));
        assert_eq!(driver.with_session(|s| s.state()), SessionState::Idle);
    }

    #[test]
    fn test_shutdown_returns_session() {
        let driver = SessionDriver::spawn(DialogueSession::new(RecordingSink::new()), FRAME).unwrap();
        let session = driver.shutdown().unwrap();
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.sink().events().is_empty());
    }
}
