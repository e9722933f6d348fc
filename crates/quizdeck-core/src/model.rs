//! Core data model types for quizdeck.
//!
//! A [`Question`] is built once by the parser and never changes afterwards.
//! Answers are plain strings aligned with the question list by position.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DurationError;

/// Candidate answer recorded for a question with no selected option.
pub const NOT_ANSWERED: &str = "Not Answered";

/// Option letters that start a new option line.
pub const OPTION_LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    number: u32,
    text: String,
    options: Vec<String>,
}

impl Question {
    /// Create a question from its marker number, text, and options in order.
    pub fn new(number: u32, text: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            number,
            text: text.into(),
            options,
        }
    }

    /// The number written in the question marker (`Q 3.` gives 3).
    pub fn number(&self) -> u32 {
        self.number
    }

    /// The question text, including its marker line.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The options in document order, each starting with its letter (`A) ...`).
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// The first line of the question text.
    pub fn headline(&self) -> &str {
        self.text.lines().next().unwrap_or_default()
    }

    /// Prompt shown to the administrator when collecting the correct answer.
    ///
    /// `position` is the 1-based position of the question in the test.
    pub fn key_prompt(&self, position: usize) -> String {
        format!(
            "Enter the correct answer for Question {position} (type the exact option text):\n{}\nOptions:\n{}",
            self.text,
            self.options.join("\n")
        )
    }
}

/// A validated test duration in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct DurationMinutes(u32);

impl DurationMinutes {
    /// Shortest accepted duration.
    pub const MIN: u32 = 1;
    /// Longest accepted duration.
    pub const MAX: u32 = 180;

    /// Validate a duration in minutes.
    pub fn new(minutes: u32) -> Result<Self, DurationError> {
        Self::check(i64::from(minutes))
    }

    fn check(value: i64) -> Result<Self, DurationError> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u32))
        } else {
            Err(DurationError::OutOfRange {
                value,
                min: Self::MIN,
                max: Self::MAX,
            })
        }
    }

    pub fn minutes(self) -> u32 {
        self.0
    }

    /// Starting value for the countdown.
    pub fn as_seconds(self) -> u64 {
        u64::from(self.0) * 60
    }
}

impl TryFrom<u32> for DurationMinutes {
    type Error = DurationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DurationMinutes> for u32 {
    fn from(value: DurationMinutes) -> Self {
        value.0
    }
}

impl FromStr for DurationMinutes {
    type Err = DurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value: i64 = trimmed
            .parse()
            .map_err(|_| DurationError::NotANumber(trimmed.to_string()))?;
        Self::check(value)
    }
}

impl fmt::Display for DurationMinutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min", self.0)
    }
}

/// Format seconds as zero-padded `mm:ss`.
///
/// Minutes are not capped at 59, so three hours renders as `180:00`.
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
