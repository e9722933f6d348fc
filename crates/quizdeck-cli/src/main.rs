//! quizdeck CLI — take timed multiple-choice tests in the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod console;
mod shell;

#[derive(Parser)]
#[command(
    name = "quizdeck",
    version,
    about = "Timed multiple-choice tests from plain-text question files"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a test
    Take {
        /// Question file (prompted for when omitted)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Test duration in minutes, 1-180 (prompted for when omitted)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=180))]
        minutes: Option<u32>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the results as JSON; prompts go to stderr
        #[arg(long)]
        json: bool,
    },

    /// Check a question file without taking it
    Validate {
        /// Path to the question file
        #[arg(long)]
        file: PathBuf,
    },

    /// Create a starter config and sample question file
    Init,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizdeck=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Take {
            file,
            minutes,
            config,
            json,
        } => commands::take::execute(file, minutes, config, json).await,
        Commands::Validate { file } => commands::validate::execute(file),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
