//! The `quizdeck init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create quizdeck.toml
    if std::path::Path::new("quizdeck.toml").exists() {
        println!("quizdeck.toml already exists, skipping.");
    } else {
        std::fs::write("quizdeck.toml", SAMPLE_CONFIG)?;
        println!("Created quizdeck.toml");
    }

    // Create sample question file
    std::fs::create_dir_all("questions")?;
    let sample_path = std::path::Path::new("questions/sample.txt");
    if sample_path.exists() {
        println!("questions/sample.txt already exists, skipping.");
    } else {
        std::fs::write(sample_path, SAMPLE_QUESTIONS)?;
        println!("Created questions/sample.txt");
    }

    println!("\nNext steps:");
    println!("  1. Write your questions in questions/sample.txt");
    println!("  2. Run: quizdeck validate --file questions/sample.txt");
    println!("  3. Run: quizdeck take --file questions/sample.txt");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizdeck configuration

# Test length used when --minutes is not given (1-180).
# default_minutes = 30

# Only files with these extensions can be opened.
allowed_extensions = ["txt"]

# Print a notice when this many seconds are left.
time_warnings = [60, 10]

# Answer recorded for questions left blank.
not_answered_label = "Not Answered"
"#;

const SAMPLE_QUESTIONS: &str = "\
Q1. What is the capital of France?
A) Rome
B) Paris
C) Berlin
D) Madrid

Q2. Which planet is known as the red planet?
A) Venus
B) Jupiter
C) Mars
D) Saturn

Q3. How many bytes are in a kibibyte?
A) 1000
B) 1024
C) 512
D) 2048
";
