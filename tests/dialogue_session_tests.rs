//! Integration tests for the dialogue session state machine
//!
//! Drives sessions through the public API only, with a recording sink
//! standing in for the UI.

use std::time::Duration;

use proptest::prelude::*;
use rstest::rstest;

use dialogue_engine::dialogue::{
    AdvanceOutcome, DialogueError, DialogueInput, DialogueLine, DialogueSession, Interactable,
    LineSet, RecordingSink, SessionState, SinkEvent,
};
use dialogue_engine::resource::parse_line_set;

const INTERVAL: Duration = Duration::from_millis(50);

fn new_session() -> DialogueSession<RecordingSink> {
    DialogueSession::with_interval(RecordingSink::new(), INTERVAL)
}

fn line_set(lines: &[(&str, &str)]) -> LineSet {
    lines
        .iter()
        .map(|(speaker, text)| DialogueLine::new(*speaker, *text))
        .collect()
}

#[test]
fn test_two_line_walkthrough() {
    let mut session = new_session();
    session.start(&line_set(&[("A", "Hi"), ("B", "Bye")])).unwrap();

    assert_eq!(session.state(), SessionState::Revealing);
    assert!(session.sink().is_visible());
    assert_eq!(session.sink().speaker(), "A");

    session.update(INTERVAL);
    assert_eq!(session.update(INTERVAL), SessionState::LineComplete);
    assert_eq!(session.sink().bodies(), ["", "H", "Hi"]);

    assert_eq!(session.advance(), AdvanceOutcome::NextLine(1));
    assert_eq!(session.state(), SessionState::Revealing);
    assert_eq!(session.sink().speaker(), "B");

    assert_eq!(session.advance(), AdvanceOutcome::Skipped);
    assert_eq!(session.sink().body(), "Bye");
    assert_eq!(session.state(), SessionState::LineComplete);

    assert_eq!(session.advance(), AdvanceOutcome::Ended);
    assert_eq!(session.state(), SessionState::Ended);
    assert!(!session.sink().is_visible());
    assert_eq!(session.sink().speaker(), "");
    assert_eq!(session.sink().body(), "");
}

#[test]
fn test_walkthrough_from_script() {
    let lines = parse_line_set("A = Hi\nB = Bye\n").unwrap();
    let mut session = new_session();
    let door = Interactable::new("door", lines);

    assert!(door.interact(&mut session).unwrap());
    for _ in 0..4 {
        session.handle_input(DialogueInput::Advance);
    }
    assert_eq!(session.state(), SessionState::Ended);
}

#[test]
fn test_idle_session_ignores_input() {
    let mut session = new_session();

    assert_eq!(session.advance(), AdvanceOutcome::Ignored);
    session.end();
    session.update(Duration::from_secs(1));

    assert_eq!(session.state(), SessionState::Idle);
    assert!(session.sink().events().is_empty());
}

#[test]
fn test_empty_start_leaves_everything_untouched() {
    let mut session = new_session();
    let result = session.start(&LineSet::new(Vec::new()));

    assert!(matches!(result, Err(DialogueError::InvalidArgument(_))));
    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(session.current_index(), 0);
    assert!(session.sink().events().is_empty());
}

#[test]
fn test_end_mid_reveal_hides_and_clears() {
    let mut session = new_session();
    session.start(&line_set(&[("A", "Hello there")])).unwrap();
    session.update(INTERVAL * 3);
    session.sink_mut().clear_events();

    session.end();

    assert_eq!(
        session.sink().events(),
        [
            SinkEvent::Visible(false),
            SinkEvent::Speaker(String::new()),
            SinkEvent::Body(String::new()),
        ]
    );
    assert_eq!(session.state(), SessionState::Idle);

    // Can start again afterwards
    session.start(&line_set(&[("B", "Again")])).unwrap();
    assert_eq!(session.sink().speaker(), "B");
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(3)]
#[case(9)]
fn test_skip_shows_full_text_at_any_point(#[case] ticks: u32) {
    let text = "Ten chars!";
    let mut session = new_session();
    session.start(&line_set(&[("A", text)])).unwrap();
    session.update(INTERVAL * ticks);
    assert_eq!(session.state(), SessionState::Revealing);

    assert_eq!(session.advance(), AdvanceOutcome::Skipped);
    assert_eq!(session.sink().body(), text);
    assert_eq!(session.current_index(), 0);
}

fn arb_lines() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(("[A-Z][a-z]{0,6}", "[ -~éü日]{0,24}"), 1..8)
}

fn to_line_set(lines: &[(String, String)]) -> LineSet {
    lines
        .iter()
        .map(|(speaker, text)| DialogueLine::new(speaker.as_str(), text.as_str()))
        .collect()
}

proptest! {
    #[test]
    fn prop_skipping_every_line_takes_two_advances_per_line(lines in arb_lines()) {
        let set = to_line_set(&lines);
        let mut session = new_session();
        session.start(&set).unwrap();

        let mut moves = 0;
        loop {
            match session.advance() {
                AdvanceOutcome::Skipped | AdvanceOutcome::NextLine(_) => moves += 1,
                AdvanceOutcome::Ended => break,
                AdvanceOutcome::Ignored => prop_assert!(false, "session went idle early"),
            }
            prop_assert!(moves <= 2 * lines.len());
        }

        // Lines with empty text are complete without a skip
        let empty = lines.iter().filter(|(_, text)| text.is_empty()).count();
        prop_assert_eq!(moves, 2 * (lines.len() - 1) + 1 - empty);
        prop_assert_eq!(session.state(), SessionState::Ended);
        prop_assert!(!session.sink().is_visible());
    }

    #[test]
    fn prop_revealed_body_is_growing_prefix(
        lines in arb_lines(),
        steps in prop::collection::vec(0u64..120, 1..40),
    ) {
        let set = to_line_set(&lines);
        let mut session = new_session();
        session.start(&set).unwrap();
        let text = set[0].text().to_string();

        let mut last_len = 0;
        for step in steps {
            if session.update(Duration::from_millis(step)) != SessionState::Revealing {
                break;
            }
            let body = session.sink().body();
            prop_assert!(text.starts_with(body));
            prop_assert!(body.len() >= last_len);
            last_len = body.len();
        }

        for body in session.sink().bodies() {
            prop_assert!(text.starts_with(body));
        }
    }

    #[test]
    fn prop_skip_always_completes_line(lines in arb_lines(), wait in 0u64..2000) {
        let set = to_line_set(&lines);
        let mut session = new_session();
        session.start(&set).unwrap();
        session.update(Duration::from_millis(wait));

        if session.state() == SessionState::Revealing {
            prop_assert_eq!(session.advance(), AdvanceOutcome::Skipped);
        }
        prop_assert_eq!(session.state(), SessionState::LineComplete);
        prop_assert_eq!(session.sink().body(), set[0].text());
    }
}
