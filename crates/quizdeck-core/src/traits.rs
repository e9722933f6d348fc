//! Answer-key acquisition protocol.
//!
//! After submission the administrator supplies the correct answer for every
//! question. Prompts are issued strictly one at a time and in question
//! order: the next prompt is not sent until the previous one has an answer
//! or was cancelled.

use async_trait::async_trait;

use crate::model::Question;

/// Something that can be asked for the correct answer to a question.
#[async_trait]
pub trait AnswerKeySource: Send {
    /// Ask for the correct answer to the question at 1-based `position`.
    ///
    /// `Ok(None)` means the prompt was cancelled.
    async fn answer_for(
        &mut self,
        position: usize,
        question: &Question,
    ) -> anyhow::Result<Option<String>>;
}

/// Collect one key answer per question, in order.
///
/// Answers are trimmed; cancelled prompts yield an empty string.
pub async fn collect_answer_key(
    source: &mut dyn AnswerKeySource,
    questions: &[Question],
) -> anyhow::Result<Vec<String>> {
    let mut key = Vec::with_capacity(questions.len());
    for (i, question) in questions.iter().enumerate() {
        let answer = match source.answer_for(i + 1, question).await? {
            Some(answer) => answer.trim().to_string(),
            None => {
                tracing::debug!("answer key prompt {} cancelled", i + 1);
                String::new()
            }
        };
        key.push(answer);
    }
    Ok(key)
}

/// Answer-key source backed by a fixed list, for tests and scripted runs.
///
/// Entries are consumed in order; `None` entries and a short list act as
/// cancelled prompts.
#[derive(Debug, Default)]
pub struct ScriptedKey {
    answers: std::collections::VecDeque<Option<String>>,
    asked: Vec<usize>,
}

impl ScriptedKey {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(|a| a.map(Into::into)).collect(),
            asked: Vec::new(),
        }
    }

    /// Positions asked so far, in the order they were asked.
    pub fn asked(&self) -> &[usize] {
        &self.asked
    }
}

#[async_trait]
impl AnswerKeySource for ScriptedKey {
    async fn answer_for(
        &mut self,
        position: usize,
        _question: &Question,
    ) -> anyhow::Result<Option<String>> {
        self.asked.push(position);
        Ok(self.answers.pop_front().flatten())
    }
}
