//! The `quizdeck take` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::Instrument;

use quizdeck_core::config::{load_config_from, QuizdeckConfig};
use quizdeck_core::model::DurationMinutes;
use quizdeck_core::parser;
use quizdeck_core::scoring::score;
use quizdeck_core::session::{SubmitReason, TestSession};
use quizdeck_core::traits::collect_answer_key;

use crate::console::{Console, ConsoleKey, CANCEL};
use crate::shell::run_slides;

pub async fn execute(
    file: Option<PathBuf>,
    minutes: Option<u32>,
    config_path: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let mut console = Console::spawn_stdin(json)?;

    // Pick and read the question file
    let path = match file {
        Some(path) => path,
        None => pick_file(&mut console).await?,
    };
    anyhow::ensure!(
        config.accepts_file(&path),
        "not a question file (expected {}): {}",
        describe_extensions(&config),
        path.display()
    );
    let content = parser::read_question_file(&path)?;

    // Parse failures are reported, but they are not errors
    let questions = match parser::parse_questions(&content) {
        Ok(questions) => questions,
        Err(e) => {
            tracing::warn!("{}: {e}", path.display());
            eprintln!("Warning: {}", e.user_message());
            return Ok(());
        }
    };
    console.say(format!(
        "Loaded {} question(s) from {}",
        questions.len(),
        path.display()
    ));

    // Pick the duration
    let duration = match minutes {
        Some(m) => DurationMinutes::new(m)?,
        None => match config.default_minutes {
            Some(d) => d,
            None => pick_duration(&mut console).await?,
        },
    };

    let mut session = TestSession::new(questions, duration, config.not_answered_label.clone());
    let span = tracing::info_span!("session", id = %session.id());
    run_session(&mut session, &mut console, &config, json)
        .instrument(span)
        .await
}

async fn run_session(
    session: &mut TestSession,
    console: &mut Console,
    config: &QuizdeckConfig,
    json: bool,
) -> Result<()> {
    console.say(format!(
        "Test started: {} question(s), {}.",
        session.questions().len(),
        session.duration()
    ));

    let submission = run_slides(session, console, &config.time_warnings).await?;
    let elapsed = submission.submitted_at - session.started_at();
    console.say(format!(
        "\n{} after {}m {:02}s. Answered {}/{}.",
        match submission.reason {
            SubmitReason::Finished => "Submitted",
            SubmitReason::TimeUp => "Time up",
            SubmitReason::InputClosed => "Input closed, submitted",
        },
        elapsed.num_minutes(),
        elapsed.num_seconds() % 60,
        session.navigator().answered(),
        session.questions().len()
    ));

    console.say("\nAnswer key: type the exact correct option text for each question.");
    let key = collect_answer_key(&mut ConsoleKey::new(console), session.questions()).await?;
    let result = score(&submission.answers, &key)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("\n=== Test Results ===");
        print!("{}", result.summary());
    }

    Ok(())
}

async fn pick_file(console: &mut Console) -> Result<PathBuf> {
    let answer = console
        .prompt(&format!("Question file ('{CANCEL}' to cancel)> "))
        .await?
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty());
    answer
        .map(PathBuf::from)
        .context("no file selected")
}

async fn pick_duration(console: &mut Console) -> Result<DurationMinutes> {
    loop {
        let prompt = format!(
            "Test duration in minutes ({}-{})> ",
            DurationMinutes::MIN,
            DurationMinutes::MAX
        );
        let Some(line) = console.prompt(&prompt).await? else {
            anyhow::bail!("timer not set");
        };
        if line.trim().is_empty() {
            anyhow::bail!("timer not set");
        }
        match line.parse::<DurationMinutes>() {
            Ok(duration) => return Ok(duration),
            Err(e) => console.say(e),
        }
    }
}

fn describe_extensions(config: &QuizdeckConfig) -> String {
    config
        .allowed_extensions
        .iter()
        .map(|ext| format!(".{}", ext.trim_start_matches('.')))
        .collect::<Vec<_>>()
        .join(", ")
}
