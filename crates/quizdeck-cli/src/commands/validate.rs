//! The `quizdeck validate` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizdeck_core::parser;

pub fn execute(file: PathBuf) -> Result<()> {
    let content = parser::read_question_file(&file)?;
    let questions = match parser::parse_questions(&content) {
        Ok(questions) => questions,
        Err(e) => {
            println!("{}: WARNING: {} ({e})", file.display(), e.user_message());
            return Ok(());
        }
    };

    println!("{}: {} questions", file.display(), questions.len());

    let mut table = Table::new();
    table.set_header(vec!["#", "Marker", "Options", "Question"]);
    for (i, q) in questions.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(format!("Q{}", q.number())),
            Cell::new(q.options().len()),
            Cell::new(q.headline()),
        ]);
    }
    println!("{table}");

    let warnings = parser::validate_questions(&questions);
    for w in &warnings {
        let prefix = w
            .position
            .map(|pos| format!("  [question {pos}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("All questions valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
