//! One-question-at-a-time navigation with single-choice selection.

use crate::error::NavigationError;
use crate::model::Question;
use crate::parser::option_letter;

/// A question together with the test-taker's current selection.
#[derive(Debug, Clone)]
pub struct Slide {
    question: Question,
    selected: Option<usize>,
}

impl Slide {
    pub fn new(question: Question) -> Self {
        Self {
            question,
            selected: None,
        }
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    /// Index of the selected option, if any.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Text of the selected option, if any.
    pub fn selected_text(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.question.options().get(i))
            .map(String::as_str)
    }

    /// Select an option. Any earlier selection on this slide is replaced.
    pub fn select(&mut self, index: usize) -> Result<(), NavigationError> {
        let count = self.question.options().len();
        if index >= count {
            return Err(NavigationError::OptionOutOfRange { index, count });
        }
        self.selected = Some(index);
        Ok(())
    }

    /// Index of the option labelled `letter`, matched case-insensitively.
    ///
    /// Options are looked up by their own label, so a question written as
    /// `A) / C) / B)` still maps `c` to the `C)` option.
    pub fn option_index(&self, letter: char) -> Option<usize> {
        self.question
            .options()
            .iter()
            .position(|o| option_letter(o).is_some_and(|l| l.eq_ignore_ascii_case(&letter)))
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }
}

/// Ordered slides and the position of the visible one.
#[derive(Debug, Clone)]
pub struct Navigator {
    slides: Vec<Slide>,
    position: usize,
}

impl Navigator {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            slides: questions.into_iter().map(Slide::new).collect(),
            position: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// 0-based position of the visible slide.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn current(&self) -> Option<&Slide> {
        self.slides.get(self.position)
    }

    pub fn current_mut(&mut self) -> Option<&mut Slide> {
        self.slides.get_mut(self.position)
    }

    /// Move forward one slide. Returns `false` at the last slide.
    pub fn next(&mut self) -> bool {
        if self.position + 1 < self.slides.len() {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// Move back one slide. Returns `false` at the first slide.
    pub fn previous(&mut self) -> bool {
        if self.position > 0 {
            self.position -= 1;
            true
        } else {
            false
        }
    }

    /// Select an option on the visible slide.
    pub fn select(&mut self, index: usize) -> Result<(), NavigationError> {
        match self.current_mut() {
            Some(slide) => slide.select(index),
            None => Err(NavigationError::OptionOutOfRange { index, count: 0 }),
        }
    }

    /// Select the option labelled `letter` on the visible slide.
    pub fn select_letter(&mut self, letter: char) -> Result<(), NavigationError> {
        let letter = letter.to_ascii_uppercase();
        let slide = self
            .current_mut()
            .ok_or(NavigationError::NoSuchLetter { letter })?;
        let index = slide
            .option_index(letter)
            .ok_or(NavigationError::NoSuchLetter { letter })?;
        slide.select(index)
    }

    /// Clear the selection on the visible slide.
    pub fn clear(&mut self) {
        if let Some(slide) = self.current_mut() {
            slide.clear();
        }
    }

    /// Number of slides with a selection.
    pub fn answered(&self) -> usize {
        self.slides.iter().filter(|s| s.selected.is_some()).count()
    }

    /// One answer per slide in order, using `not_answered` for empty slides.
    pub fn candidate_answers(&self, not_answered: &str) -> Vec<String> {
        self.slides
            .iter()
            .map(|s| s.selected_text().unwrap_or(not_answered).to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NOT_ANSWERED;

    fn questions(n: usize) -> Vec<Question> {
        (1..=n)
            .map(|i| {
                Question::new(
                    i as u32,
                    format!("Q{i}. Question {i}"),
                    vec![format!("A) a{i}"), format!("B) b{i}"), format!("C) c{i}")],
                )
            })
            .collect()
    }

    #[test]
    fn boundaries_are_no_ops() {
        let mut nav = Navigator::new(questions(3));
        assert!(!nav.previous());
        assert_eq!(nav.position(), 0);

        assert!(nav.next());
        assert_eq!(nav.position(), 1);
        assert!(nav.next());
        assert_eq!(nav.position(), 2);
        assert!(!nav.next());
        assert_eq!(nav.position(), 2);

        assert!(nav.previous());
        assert_eq!(nav.position(), 1);
    }

    #[test]
    fn single_slide_cannot_move() {
        let mut nav = Navigator::new(questions(1));
        assert!(!nav.next());
        assert!(!nav.previous());
        assert_eq!(nav.position(), 0);
    }

    #[test]
    fn selection_is_exclusive_per_slide() {
        let mut nav = Navigator::new(questions(2));
        nav.select(0).unwrap();
        nav.select(2).unwrap();
        assert_eq!(nav.current().unwrap().selected(), Some(2));

        nav.next();
        assert_eq!(nav.current().unwrap().selected(), None);
        nav.select(1).unwrap();

        nav.previous();
        assert_eq!(nav.current().unwrap().selected(), Some(2));
        assert_eq!(nav.answered(), 2);
    }

    #[test]
    fn out_of_range_selection_keeps_previous() {
        let mut nav = Navigator::new(questions(1));
        nav.select(1).unwrap();
        assert_eq!(
            nav.select(3),
            Err(NavigationError::OptionOutOfRange { index: 3, count: 3 })
        );
        assert_eq!(nav.current().unwrap().selected(), Some(1));
    }

    #[test]
    fn candidate_answers_use_sentinel() {
        let mut nav = Navigator::new(questions(3));
        nav.select(1).unwrap();
        nav.next();
        nav.next();
        nav.select(0).unwrap();
        nav.clear();

        assert_eq!(
            nav.candidate_answers(NOT_ANSWERED),
            ["B) b1", NOT_ANSWERED, NOT_ANSWERED]
        );
    }

    #[test]
    fn letters_resolve_by_label_not_position() {
        let shuffled = Question::new(
            1,
            "Q1. Shuffled",
            vec!["A) one".into(), "C) three".into(), "B) two".into()],
        );
        let gapped = Question::new(2, "Q2. Gapped", vec!["A) x".into(), "C) y".into()]);
        let mut nav = Navigator::new(vec![shuffled, gapped]);

        nav.select_letter('c').unwrap();
        assert_eq!(nav.current().unwrap().selected_text(), Some("C) three"));
        nav.select_letter('B').unwrap();
        assert_eq!(nav.current().unwrap().selected_text(), Some("B) two"));

        nav.next();
        nav.select_letter('c').unwrap();
        assert_eq!(nav.current().unwrap().selected_text(), Some("C) y"));
        assert_eq!(
            nav.select_letter('b'),
            Err(NavigationError::NoSuchLetter { letter: 'B' })
        );
        assert_eq!(nav.current().unwrap().selected_text(), Some("C) y"));
    }
}
