//! The interactive test loop.
//!
//! A single task waits on two event sources: lines typed by the test-taker
//! and a once-per-second countdown tick. Whichever comes first is handled to
//! completion before the next event is taken.

use std::time::Duration;

use anyhow::Result;
use tokio::time::{interval_at, Instant};

use quizdeck_core::model::OPTION_LETTERS;
use quizdeck_core::session::{Submission, SubmitReason, TestSession};
use quizdeck_core::timer::Tick;

use crate::console::Console;

const HELP: &str = "\
Commands:
  a-d or 1-9     select an option
  n, next        next question
  p, prev        previous question
  x, clear       clear your selection
  t, time        show the time left
  l, list        show which questions are answered
  f, finish      submit your answers
  h, help        show this help";

/// A command typed on a slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlideCommand {
    Next,
    Previous,
    /// Pick the option carrying this label letter.
    SelectLetter(char),
    /// Pick the option at this 0-based position.
    Select(usize),
    Clear,
    Time,
    List,
    Finish,
    Help,
    Empty,
    Unknown(String),
}

impl SlideCommand {
    pub fn parse(input: &str) -> Self {
        let input = input.trim().to_lowercase();
        match input.as_str() {
            "" => return SlideCommand::Empty,
            "n" | "next" => return SlideCommand::Next,
            "p" | "prev" | "previous" => return SlideCommand::Previous,
            "x" | "clear" => return SlideCommand::Clear,
            "t" | "time" => return SlideCommand::Time,
            "l" | "list" => return SlideCommand::List,
            "f" | "finish" => return SlideCommand::Finish,
            "h" | "help" | "?" => return SlideCommand::Help,
            _ => {}
        }

        let mut chars = input.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(&letter) = OPTION_LETTERS
                .iter()
                .find(|letter| letter.to_ascii_lowercase() == c)
            {
                return SlideCommand::SelectLetter(letter);
            }
        }
        match input.parse::<usize>() {
            Ok(n) if n >= 1 => SlideCommand::Select(n - 1),
            _ => SlideCommand::Unknown(input),
        }
    }
}

/// Run the slides until the test-taker finishes, time runs out, or input
/// closes. Returns the one and only submission of the session.
pub async fn run_slides(
    session: &mut TestSession,
    console: &mut Console,
    time_warnings: &[u64],
) -> Result<Submission> {
    let second = Duration::from_secs(1);
    let mut ticker = interval_at(Instant::now() + second, second);

    console.say(HELP);
    render_slide(session, console);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let (tick, submission) = session.tick();
                match (tick, submission) {
                    (_, Some(submission)) => {
                        console.say("\nTime is up! Submitting your answers.");
                        return Ok(submission);
                    }
                    (Tick::Running { remaining }, None) if time_warnings.contains(&remaining) => {
                        console.say(format!("\n*** Time left: {} ***", session.countdown().display()));
                    }
                    _ => {}
                }
            }
            line = console.next_line() => {
                let Some(line) = line else {
                    tracing::debug!("stdin closed during test");
                    return submit(session, SubmitReason::InputClosed);
                };
                if let Some(submission) = handle_command(session, console, &line)? {
                    return Ok(submission);
                }
            }
        }
    }
}

fn handle_command(
    session: &mut TestSession,
    console: &Console,
    line: &str,
) -> Result<Option<Submission>> {
    match SlideCommand::parse(line) {
        SlideCommand::Next => {
            if session.navigator_mut().next() {
                render_slide(session, console);
            } else {
                console.say("This is the last question. Type 'f' to finish.");
            }
        }
        SlideCommand::Previous => {
            if session.navigator_mut().previous() {
                render_slide(session, console);
            } else {
                console.say("This is the first question.");
            }
        }
        SlideCommand::SelectLetter(letter) => match session.navigator_mut().select_letter(letter) {
            Ok(()) => render_slide(session, console),
            Err(e) => console.say(format!("Cannot select: {e}")),
        },
        SlideCommand::Select(index) => match session.navigator_mut().select(index) {
            Ok(()) => render_slide(session, console),
            Err(e) => console.say(format!("Cannot select: {e}")),
        },
        SlideCommand::Clear => {
            session.navigator_mut().clear();
            render_slide(session, console);
        }
        SlideCommand::Time => {
            console.say(format!("Time left: {}", session.countdown().display()));
        }
        SlideCommand::List => render_overview(session, console),
        SlideCommand::Finish => return submit(session, SubmitReason::Finished).map(Some),
        SlideCommand::Help => console.say(HELP),
        SlideCommand::Empty => render_slide(session, console),
        SlideCommand::Unknown(input) => {
            console.say(format!("Unknown command '{input}'. Type 'h' for help."));
        }
    }
    Ok(None)
}

fn submit(session: &mut TestSession, reason: SubmitReason) -> Result<Submission> {
    session
        .submit(reason)
        .ok_or_else(|| anyhow::anyhow!("answers were already submitted"))
}

fn render_slide(session: &TestSession, console: &Console) {
    let nav = session.navigator();
    let Some(slide) = nav.current() else {
        return;
    };

    console.say(format!(
        "\n--- Question {}/{} ---{:>20}",
        nav.position() + 1,
        nav.len(),
        format!("Time left: {}", session.countdown().display())
    ));
    console.say(slide.question().text());
    for (i, option) in slide.question().options().iter().enumerate() {
        let mark = if slide.selected() == Some(i) { "(*)" } else { "( )" };
        console.say(format!("  {mark} {option}"));
    }
}

fn render_overview(session: &TestSession, console: &Console) {
    let nav = session.navigator();
    console.say(format!("\nAnswered {}/{}:", nav.answered(), nav.len()));
    for (i, slide) in nav.slides().iter().enumerate() {
        let here = if i == nav.position() { ">" } else { " " };
        let answer = slide.selected_text().unwrap_or("-");
        console.say(format!("{here} {:>3}. {answer}", i + 1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizdeck_core::model::{DurationMinutes, Question, NOT_ANSWERED};
    use tokio::sync::mpsc;

    #[test]
    fn parse_navigation_commands() {
        assert_eq!(SlideCommand::parse("n"), SlideCommand::Next);
        assert_eq!(SlideCommand::parse(" NEXT "), SlideCommand::Next);
        assert_eq!(SlideCommand::parse("prev"), SlideCommand::Previous);
        assert_eq!(SlideCommand::parse("f"), SlideCommand::Finish);
        assert_eq!(SlideCommand::parse("x"), SlideCommand::Clear);
        assert_eq!(SlideCommand::parse(""), SlideCommand::Empty);
    }

    #[test]
    fn parse_selection() {
        assert_eq!(SlideCommand::parse("a"), SlideCommand::SelectLetter('A'));
        assert_eq!(SlideCommand::parse("D"), SlideCommand::SelectLetter('D'));
        assert_eq!(SlideCommand::parse("2"), SlideCommand::Select(1));
        assert_eq!(SlideCommand::parse("c"), SlideCommand::SelectLetter('C'));
        assert_eq!(
            SlideCommand::parse("e"),
            SlideCommand::Unknown("e".to_string())
        );
        assert_eq!(
            SlideCommand::parse("0"),
            SlideCommand::Unknown("0".to_string())
        );
    }

    fn session(minutes: u32, questions: Vec<Question>) -> TestSession {
        TestSession::new(questions, DurationMinutes::new(minutes).unwrap(), NOT_ANSWERED)
    }

    #[tokio::test(start_paused = true)]
    async fn countdown_submits_when_time_runs_out() {
        let questions = vec![Question::new(1, "Q1. One", vec!["A) a".into(), "B) b".into()])];
        let mut session = session(1, questions);
        session.navigator_mut().select(1).unwrap();

        // Keep the sender alive so input never closes.
        let (_tx, rx) = mpsc::unbounded_channel();
        let mut console = Console::from_receiver(rx, true);

        let started = Instant::now();
        let submission = run_slides(&mut session, &mut console, &[10]).await.unwrap();

        assert_eq!(submission.reason, SubmitReason::TimeUp);
        assert_eq!(submission.answers, ["B) b"]);
        assert_eq!(session.countdown().remaining(), 0);
        assert!(!session.countdown().is_running());
        assert!(session.is_submitted());
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(60) && elapsed < Duration::from_secs(61));
    }

    #[tokio::test(start_paused = true)]
    async fn letters_select_by_label() {
        let questions = vec![Question::new(
            1,
            "Q1. Shuffled",
            vec!["A) one".into(), "C) three".into(), "B) two".into()],
        )];
        let mut session = session(5, questions);

        let (tx, rx) = mpsc::unbounded_channel();
        for line in ["c", "f"] {
            tx.send(line.to_string()).unwrap();
        }
        let mut console = Console::from_receiver(rx, true);

        let submission = run_slides(&mut session, &mut console, &[]).await.unwrap();
        assert_eq!(submission.reason, SubmitReason::Finished);
        assert_eq!(submission.answers, ["C) three"]);
    }
}
