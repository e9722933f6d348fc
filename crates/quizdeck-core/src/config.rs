//! quizdeck configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::{DurationMinutes, NOT_ANSWERED};

/// Top-level quizdeck configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizdeckConfig {
    /// Test duration used when none is given on the command line.
    #[serde(default)]
    pub default_minutes: Option<DurationMinutes>,
    /// File extensions accepted as question files.
    #[serde(default = "default_extensions")]
    pub allowed_extensions: Vec<String>,
    /// Remaining-seconds marks at which a time notice is printed.
    #[serde(default = "default_time_warnings")]
    pub time_warnings: Vec<u64>,
    /// Answer recorded for questions left unanswered.
    #[serde(default = "default_not_answered")]
    pub not_answered_label: String,
}

fn default_extensions() -> Vec<String> {
    vec!["txt".to_string()]
}
fn default_time_warnings() -> Vec<u64> {
    vec![60, 10]
}
fn default_not_answered() -> String {
    NOT_ANSWERED.to_string()
}

impl Default for QuizdeckConfig {
    fn default() -> Self {
        Self {
            default_minutes: None,
            allowed_extensions: default_extensions(),
            time_warnings: default_time_warnings(),
            not_answered_label: default_not_answered(),
        }
    }
}

impl QuizdeckConfig {
    /// Whether `path` has one of the allowed extensions (case-insensitive).
    ///
    /// An empty allow-list accepts every file.
    pub fn accepts_file(&self, path: &Path) -> bool {
        if self.allowed_extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.allowed_extensions
                    .iter()
                    .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(ext))
            })
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `quizdeck.toml` in the current directory
/// 2. `~/.config/quizdeck/config.toml`
///
/// Environment variable override: `QUIZDECK_MINUTES`.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizdeckConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizdeck.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<QuizdeckConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizdeckConfig::default(),
    };

    if let Ok(minutes) = std::env::var("QUIZDECK_MINUTES") {
        let minutes = minutes
            .parse::<DurationMinutes>()
            .context("invalid QUIZDECK_MINUTES")?;
        config.default_minutes = Some(minutes);
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizdeck"))
}
