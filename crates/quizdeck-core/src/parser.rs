//! Plain-text question file parser.
//!
//! A document is a sequence of blocks. Each block starts at a marker line
//! (`Q1.`, `Q 2.`, `Q.3.`) and runs until the next marker line or the end of
//! the document. Inside a block, every line that starts with `A)` through
//! `D)` opens a new option; everything before the first option is the
//! question text.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};

use crate::error::ParseError;
use crate::model::{Question, OPTION_LETTERS};

/// Read a question file, dropping byte sequences that are not valid UTF-8.
pub fn read_question_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read question file: {}", path.display()))?;
    Ok(decode_ignoring_invalid(&bytes))
}

/// Decode UTF-8, skipping invalid sequences instead of replacing them.
///
/// A leading byte-order mark is dropped so the first marker line is seen.
pub fn decode_ignoring_invalid(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Parse a document into questions.
///
/// Blocks without any option line are dropped. Returns
/// [`ParseError::NoBlocks`] when the document has no marker at all and
/// [`ParseError::NoValidQuestions`] when every block was dropped.
pub fn parse_questions(content: &str) -> Result<Vec<Question>, ParseError> {
    let blocks = split_blocks(content);
    if blocks.is_empty() {
        return Err(ParseError::NoBlocks);
    }

    let questions: Vec<Question> = blocks
        .iter()
        .filter_map(|block| {
            let parsed = parse_block(block);
            if parsed.is_none() {
                tracing::debug!("dropping block without options: {:?}", first_line(block));
            }
            parsed
        })
        .collect();

    if questions.is_empty() {
        return Err(ParseError::NoValidQuestions {
            blocks: blocks.len(),
        });
    }

    tracing::debug!(
        "parsed {} question(s) from {} block(s)",
        questions.len(),
        blocks.len()
    );
    Ok(questions)
}

/// Split a document into raw blocks, one per marker line.
///
/// Text before the first marker is ignored. Each returned slice starts at
/// its marker.
pub fn split_blocks(content: &str) -> Vec<&str> {
    let mut starts = Vec::new();
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        let indent = line.len() - trim_line_start(line).len();
        if marker_number(line).is_some() {
            starts.push(offset + indent);
        }
        offset += line.len();
    }

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(content.len());
            &content[start..end]
        })
        .collect()
}

/// If `line` starts with a question marker, return the marker's number.
///
/// A marker is `Q`, then any run of whitespace or periods, then one or more
/// digits, then a period.
pub fn marker_number(line: &str) -> Option<u32> {
    let rest = trim_line_start(line).strip_prefix('Q')?;
    let rest = rest.trim_start_matches(|c: char| c.is_whitespace() || c == '.');
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 || !rest[digits_len..].starts_with('.') {
        return None;
    }
    Some(rest[..digits_len].parse().unwrap_or(u32::MAX))
}

/// If `line` opens an option, return its letter.
///
/// Only uppercase `A` through `D` directly followed by `)` count; `E)` or
/// `a)` stay part of whatever precedes them.
pub fn option_letter(line: &str) -> Option<char> {
    let mut chars = line.trim_start().chars();
    let letter = chars.next()?;
    if OPTION_LETTERS.contains(&letter) && chars.next() == Some(')') {
        Some(letter)
    } else {
        None
    }
}

/// Leading whitespace plus any stray byte-order mark.
fn trim_line_start(line: &str) -> &str {
    line.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

fn parse_block(block: &str) -> Option<Question> {
    let block = block.trim();
    let number = marker_number(block)?;
    let lines: Vec<&str> = block.lines().collect();

    let first_option = lines.iter().position(|line| option_letter(line).is_some())?;
    let text = lines[..first_option].join("\n").trim().to_string();

    let mut options = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in &lines[first_option..] {
        if option_letter(line).is_some() && !current.is_empty() {
            options.push(collapse_whitespace(&current));
            current.clear();
        }
        current.push(line);
    }
    options.push(collapse_whitespace(&current));

    Some(Question::new(number, text, options))
}

fn collapse_whitespace(lines: &[&str]) -> String {
    lines
        .iter()
        .flat_map(|line| line.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}

fn first_line(block: &str) -> &str {
    block.lines().next().unwrap_or_default().trim()
}

/// A warning from question-set validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// 1-based position of the question (if applicable).
    pub position: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Check a parsed question set for suspicious formatting.
///
/// None of these stop a test from being taken.
pub fn validate_questions(questions: &[Question]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen_numbers = HashSet::new();
    for (i, q) in questions.iter().enumerate() {
        if !seen_numbers.insert(q.number()) {
            warnings.push(ValidationWarning {
                position: Some(i + 1),
                message: format!("duplicate question number: Q{}", q.number()),
            });
        }
    }

    for (i, pair) in questions.windows(2).enumerate() {
        let (prev, next) = (pair[0].number(), pair[1].number());
        if next != prev.saturating_add(1) && next != prev {
            warnings.push(ValidationWarning {
                position: Some(i + 2),
                message: format!("question numbered Q{next} follows Q{prev}"),
            });
        }
    }

    for (i, q) in questions.iter().enumerate() {
        let letters: Vec<char> = q.options().iter().filter_map(|o| option_letter(o)).collect();
        if !letters.iter().copied().eq(OPTION_LETTERS.iter().copied().take(letters.len())) {
            let found: String = letters.iter().collect();
            warnings.push(ValidationWarning {
                position: Some(i + 1),
                message: format!("option letters out of order: {found}"),
            });
        }

        let mut seen_options = HashSet::new();
        for option in q.options() {
            let body = option_body(option).to_lowercase();
            if !seen_options.insert(body) {
                warnings.push(ValidationWarning {
                    position: Some(i + 1),
                    message: format!("duplicate option text: {option}"),
                });
            }
        }
    }

    warnings
}

/// Option text without its leading `X)` label.
fn option_body(option: &str) -> &str {
    match option_letter(option) {
        Some(_) => option.trim_start()[2..].trim(),
        None => option.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_QUESTIONS: &str = "\
Q1. What is the capital of France?
A) Rome
B) Paris
C) Berlin
D) Madrid

Q2. Which planet is known as
the red planet?
A) Venus
B)   Mars
";

    #[test]
    fn parses_well_formed_document() {
        let questions = parse_questions(TWO_QUESTIONS).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].number(), 1);
        assert_eq!(questions[0].text(), "Q1. What is the capital of France?");
        assert_eq!(
            questions[0].options(),
            ["A) Rome", "B) Paris", "C) Berlin", "D) Madrid"]
        );
        assert_eq!(
            questions[1].text(),
            "Q2. Which planet is known as\nthe red planet?"
        );
        assert_eq!(questions[1].options(), ["A) Venus", "B) Mars"]);
    }

    #[test]
    fn no_markers_is_no_blocks() {
        assert!(split_blocks("just some prose\nA) not a question\n").is_empty());
        assert_eq!(
            parse_questions("just some prose\nA) not a question\n"),
            Err(ParseError::NoBlocks)
        );
        assert_eq!(parse_questions(""), Err(ParseError::NoBlocks));
    }

    #[test]
    fn blocks_without_options_are_dropped() {
        let doc = "Q1. No options here\nQ2. Nor here\n";
        assert_eq!(split_blocks(doc).len(), 2);
        assert_eq!(
            parse_questions(doc),
            Err(ParseError::NoValidQuestions { blocks: 2 })
        );

        let mixed = "Q1. No options\nQ2. Has one\nA) yes\n";
        let questions = parse_questions(mixed).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].number(), 2);
    }

    #[test]
    fn marker_variants() {
        assert_eq!(marker_number("Q1. text"), Some(1));
        assert_eq!(marker_number("Q 12. text"), Some(12));
        assert_eq!(marker_number("Q.3."), Some(3));
        assert_eq!(marker_number("  Q . 4."), Some(4));
        assert_eq!(marker_number("Q1 missing period"), None);
        assert_eq!(marker_number("Q. no digits."), None);
        assert_eq!(marker_number("q1. lowercase"), None);
        assert_eq!(marker_number("See Q1. inline"), None);
    }

    #[test]
    fn letters_beyond_d_are_not_boundaries() {
        let doc = "Q1. Pick one\nA) a\nB) b\nC) c\nD) bar\nE) foo\n";
        let questions = parse_questions(doc).unwrap();
        assert_eq!(questions[0].options().len(), 4);
        assert_eq!(questions[0].options()[3], "D) bar E) foo");
    }

    #[test]
    fn lowercase_letters_are_not_boundaries() {
        let doc = "Q1. Pick one\nA) first\nb) second\n";
        let questions = parse_questions(doc).unwrap();
        assert_eq!(questions[0].options(), ["A) first b) second"]);
    }

    #[test]
    fn option_whitespace_is_collapsed() {
        let doc = "Q1. Wrap\nA)   spans\n   two\tlines  \n\n   B) indented\n";
        let questions = parse_questions(doc).unwrap();
        assert_eq!(questions[0].options(), ["A) spans two lines", "B) indented"]);
    }

    #[test]
    fn option_order_is_preserved() {
        let doc = "Q1. Order\nA) same\nB) same\nC) other\n";
        let questions = parse_questions(doc).unwrap();
        assert_eq!(questions[0].options(), ["A) same", "B) same", "C) other"]);
    }

    #[test]
    fn preamble_before_first_marker_is_ignored() {
        let doc = "Mock exam, 2 questions\n\nQ1. Only\nA) one\n";
        let questions = parse_questions(doc).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].text(), "Q1. Only");
    }

    #[test]
    fn crlf_line_endings() {
        let doc = "Q1. Windows?\r\nA) yes\r\nB) no\r\n";
        let questions = parse_questions(doc).unwrap();
        assert_eq!(questions[0].text(), "Q1. Windows?");
        assert_eq!(questions[0].options(), ["A) yes", "B) no"]);
    }

    #[test]
    fn n_blocks_with_k_options() {
        let mut doc = String::new();
        for n in 1..=5 {
            doc.push_str(&format!("Q{n}. Question {n}\n"));
            for letter in OPTION_LETTERS.iter().take(n % 4 + 1) {
                doc.push_str(&format!("{letter}) option   {letter}\n"));
            }
        }
        let questions = parse_questions(&doc).unwrap();
        assert_eq!(questions.len(), 5);
        for (i, q) in questions.iter().enumerate() {
            assert_eq!(q.options().len(), (i + 1) % 4 + 1);
            assert!(q.options().iter().all(|o| !o.contains("  ")));
        }
    }

    #[test]
    fn invalid_utf8_is_dropped() {
        let bytes = b"Q1. Caf\xff\xfee?\nA) yes\n";
        assert_eq!(decode_ignoring_invalid(bytes), "Q1. Cafe?\nA) yes\n");
    }

    #[test]
    fn byte_order_mark_keeps_first_question() {
        let bytes = b"\xef\xbb\xbfQ1. First\nA) a\nB) b\nQ2. Second\nA) c\n";
        let content = decode_ignoring_invalid(bytes);
        assert!(content.starts_with("Q1."));
        let questions = parse_questions(&content).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].number(), 1);
        assert_eq!(questions[0].text(), "Q1. First");

        // Already-decoded text carrying the mark parses the same way
        let questions = parse_questions("\u{feff}Q1. Only\nA) yes\n").unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].text(), "Q1. Only");
    }

    #[test]
    fn read_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.txt");
        std::fs::write(&path, TWO_QUESTIONS).unwrap();
        let content = read_question_file(&path).unwrap();
        assert_eq!(parse_questions(&content).unwrap().len(), 2);

        let missing = read_question_file(&dir.path().join("missing.txt"));
        assert!(missing.is_err());
    }

    #[test]
    fn validate_clean_set() {
        let questions = parse_questions(TWO_QUESTIONS).unwrap();
        assert!(validate_questions(&questions).is_empty());
    }

    #[test]
    fn validate_numbering_and_options() {
        let doc = "\
Q1. First
A) x
C) y
Q1. Duplicate number
A) same
B) SAME
Q5. Gap
A) z
";
        let questions = parse_questions(doc).unwrap();
        let warnings = validate_questions(&questions);
        assert!(warnings.iter().any(|w| w.message.contains("duplicate question number")));
        assert!(warnings.iter().any(|w| w.message.contains("Q5 follows Q1")));
        assert!(warnings.iter().any(|w| w.message.contains("out of order: AC")));
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("duplicate option text") && w.position == Some(2)));
    }
}
