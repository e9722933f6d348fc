//! Line-oriented terminal I/O.
//!
//! Stdin is read on a dedicated thread and forwarded over a channel, so the
//! event loop can wait on input and the countdown at the same time without
//! leaving a blocking read behind when the countdown wins.

use std::fmt::Display;
use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::sync::mpsc;

use quizdeck_core::model::Question;
use quizdeck_core::traits::AnswerKeySource;

/// Input typed at a prompt to cancel it.
pub const CANCEL: &str = ".";

pub struct Console {
    lines: mpsc::UnboundedReceiver<String>,
    ui_on_stderr: bool,
}

impl Console {
    /// Start reading stdin in the background.
    ///
    /// With `ui_on_stderr`, prompts and slides go to stderr so stdout only
    /// carries the final result.
    pub fn spawn_stdin(ui_on_stderr: bool) -> Result<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        std::thread::Builder::new()
            .name("stdin".into())
            .spawn(move || {
                for line in std::io::stdin().lock().lines() {
                    match line {
                        Ok(line) => {
                            if tx.send(line).is_err() {
                                break;
                            }
                        }
                        Err(e) => {
                            tracing::warn!("stopped reading stdin: {e}");
                            break;
                        }
                    }
                }
            })
            .context("failed to start stdin reader")?;

        Ok(Self::from_receiver(rx, ui_on_stderr))
    }

    /// Build a console over an existing line channel.
    pub fn from_receiver(lines: mpsc::UnboundedReceiver<String>, ui_on_stderr: bool) -> Self {
        Self {
            lines,
            ui_on_stderr,
        }
    }

    /// Next input line, or `None` once stdin is closed.
    pub async fn next_line(&mut self) -> Option<String> {
        self.lines.recv().await
    }

    /// Print a line of UI text.
    pub fn say(&self, text: impl Display) {
        if self.ui_on_stderr {
            eprintln!("{text}");
        } else {
            println!("{text}");
        }
    }

    /// Print `prompt` without a newline and wait for one line.
    ///
    /// Returns `None` when stdin closes or the user types [`CANCEL`].
    pub async fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        if self.ui_on_stderr {
            eprint!("{prompt}");
            std::io::stderr().flush()?;
        } else {
            print!("{prompt}");
            std::io::stdout().flush()?;
        }
        Ok(self
            .next_line()
            .await
            .filter(|line| line.trim() != CANCEL))
    }
}

/// Collects the answer key by prompting on the console.
pub struct ConsoleKey<'a> {
    console: &'a mut Console,
}

impl<'a> ConsoleKey<'a> {
    pub fn new(console: &'a mut Console) -> Self {
        Self { console }
    }
}

#[async_trait]
impl AnswerKeySource for ConsoleKey<'_> {
    async fn answer_for(
        &mut self,
        position: usize,
        question: &Question,
    ) -> anyhow::Result<Option<String>> {
        self.console.say("");
        self.console.say(question.key_prompt(position));
        self.console
            .prompt(&format!("Correct answer for Q{position} ('{CANCEL}' to skip)> "))
            .await
    }
}
