//! Scoring engine.
//!
//! Candidate answers and the answer key are compared position by position
//! after trimming and case-folding. The raw texts are kept for the report.

use std::fmt;

use serde::Serialize;

use crate::error::ScoreError;

/// Verdict for a single question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "lowercase")]
pub enum Verdict {
    Correct,
    Wrong { candidate: String, key: String },
}

/// Outcome for one question, by 1-based position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionOutcome {
    pub position: usize,
    #[serde(flatten)]
    pub verdict: Verdict,
}

impl fmt::Display for QuestionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.verdict {
            Verdict::Correct => write!(f, "Question {}: Correct", self.position),
            Verdict::Wrong { candidate, key } => write!(
                f,
                "Question {}: Wrong (Your answer: {candidate}; Correct: {key})",
                self.position
            ),
        }
    }
}

/// Tally of a scored test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreResult {
    pub right: usize,
    pub wrong: usize,
    pub outcomes: Vec<QuestionOutcome>,
}

impl ScoreResult {
    pub fn total(&self) -> usize {
        self.right + self.wrong
    }

    /// Multi-line summary shown at the end of a test.
    pub fn summary(&self) -> String {
        let mut out = format!(
            "Results:\nRight: {}\nWrong: {}\n\nDetails:\n",
            self.right, self.wrong
        );
        for outcome in &self.outcomes {
            out.push_str(&outcome.to_string());
            out.push('\n');
        }
        out
    }
}

fn normalize(answer: &str) -> String {
    answer.trim().to_lowercase()
}

/// Two answers match when equal after trimming and case-folding.
pub fn answers_match(candidate: &str, key: &str) -> bool {
    normalize(candidate) == normalize(key)
}

/// Score candidate answers against an answer key of the same length.
pub fn score<C, K>(candidates: &[C], key: &[K]) -> Result<ScoreResult, ScoreError>
where
    C: AsRef<str>,
    K: AsRef<str>,
{
    if candidates.len() != key.len() {
        return Err(ScoreError::LengthMismatch {
            candidates: candidates.len(),
            key: key.len(),
        });
    }

    let mut right = 0;
    let mut wrong = 0;
    let outcomes = candidates
        .iter()
        .zip(key)
        .enumerate()
        .map(|(i, (candidate, expected))| {
            let (candidate, expected) = (candidate.as_ref(), expected.as_ref());
            let verdict = if answers_match(candidate, expected) {
                right += 1;
                Verdict::Correct
            } else {
                wrong += 1;
                Verdict::Wrong {
                    candidate: candidate.to_string(),
                    key: expected.to_string(),
                }
            };
            QuestionOutcome {
                position: i + 1,
                verdict,
            }
        })
        .collect();

    Ok(ScoreResult {
        right,
        wrong,
        outcomes,
    })
}
