//! A single sitting of a test.
//!
//! Ties the parsed questions, the countdown, and the navigator together and
//! guarantees answers are submitted at most once, whether by the test-taker
//! or by the countdown running out.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::model::{DurationMinutes, Question};
use crate::navigator::Navigator;
use crate::timer::{Countdown, Tick};

/// How a test ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitReason {
    /// The test-taker chose to finish.
    Finished,
    /// The countdown reached zero.
    TimeUp,
    /// Input closed before the test-taker finished.
    InputClosed,
}

/// Answers captured at submission.
#[derive(Debug, Clone)]
pub struct Submission {
    pub reason: SubmitReason,
    pub submitted_at: DateTime<Utc>,
    /// One answer per question, in order.
    pub answers: Vec<String>,
}

pub struct TestSession {
    id: Uuid,
    started_at: DateTime<Utc>,
    duration: DurationMinutes,
    questions: Vec<Question>,
    countdown: Countdown,
    navigator: Navigator,
    not_answered: String,
    submitted: bool,
}

impl TestSession {
    pub fn new(
        questions: Vec<Question>,
        duration: DurationMinutes,
        not_answered: impl Into<String>,
    ) -> Self {
        let id = Uuid::new_v4();
        tracing::info!(
            session = %id,
            questions = questions.len(),
            minutes = duration.minutes(),
            "test session started"
        );
        Self {
            id,
            started_at: Utc::now(),
            duration,
            navigator: Navigator::new(questions.clone()),
            questions,
            countdown: Countdown::from_duration(duration),
            not_answered: not_answered.into(),
            submitted: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn duration(&self) -> DurationMinutes {
        self.duration
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut Navigator {
        &mut self.navigator
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Advance the countdown by one second.
    ///
    /// Returns the submission when this tick runs the clock out.
    pub fn tick(&mut self) -> (Tick, Option<Submission>) {
        if self.submitted {
            return (Tick::Stopped, None);
        }
        let tick = self.countdown.tick();
        let submission = match tick {
            Tick::Expired => self.submit(SubmitReason::TimeUp),
            _ => None,
        };
        (tick, submission)
    }

    /// Capture the current selections and stop the countdown.
    ///
    /// Only the first call returns a submission.
    pub fn submit(&mut self, reason: SubmitReason) -> Option<Submission> {
        if self.submitted {
            return None;
        }
        self.submitted = true;
        self.countdown.stop();

        let answers = self.navigator.candidate_answers(&self.not_answered);
        tracing::info!(
            session = %self.id,
            ?reason,
            answered = self.navigator.answered(),
            total = answers.len(),
            "answers submitted"
        );
        Some(Submission {
            reason,
            submitted_at: Utc::now(),
            answers,
        })
    }
}
