//! Error types for the quizdeck core.
//!
//! Parse failures are recoverable: the shell reports them and declines to
//! build a session. The variants are distinct so the caller can tell an
//! unformatted document from one whose questions all lacked options.

use thiserror::Error;

/// Errors produced while turning a document into questions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No question marker (`Q1.`, `Q 2.`, `Q.3.`) was found anywhere.
    #[error("no question blocks found")]
    NoBlocks,

    /// Markers were found, but no block had at least one option line.
    #[error("found {blocks} question block(s) but none had options")]
    NoValidQuestions { blocks: usize },
}

/// Errors produced while validating a test duration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    /// The input was not an integer.
    #[error("duration must be a whole number of minutes, got '{0}'")]
    NotANumber(String),

    /// The input was outside the accepted range.
    #[error("duration must be between {min} and {max} minutes, got {value}")]
    OutOfRange { value: i64, min: u32, max: u32 },
}

/// Errors produced by the scoring engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    /// Candidate answers and answer key are not positionally aligned.
    #[error("{candidates} candidate answer(s) and {key} key answer(s) do not align")]
    LengthMismatch { candidates: usize, key: usize },
}

/// Errors produced by the slide navigator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// The requested option does not exist on the current slide.
    #[error("option {index} does not exist (question has {count} option(s))")]
    OptionOutOfRange { index: usize, count: usize },
    /// No option on the current slide carries this letter.
    #[error("there is no option {letter}) on this question")]
    NoSuchLetter { letter: char },
}

impl ParseError {
    /// Message shown to the test-taker when no session can be built.
    pub fn user_message(&self) -> &'static str {
        match self {
            ParseError::NoBlocks => "No questions found! Check your file formatting.",
            ParseError::NoValidQuestions { .. } => "Could not parse any valid questions!",
        }
    }
}
