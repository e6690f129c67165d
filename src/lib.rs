//! QUIZBOSS - timed category quiz with a boss battle
//!
//! Pick a category, answer five timed multiple-choice questions, earn
//! points, and unlock the boss battle once every category is cleared.
//! The quiz state machine lives in [`quiz`] and runs without a terminal;
//! [`app`] is the ratatui front end.

use std::fmt;

// Public re-exports
pub mod app;
pub mod bank;
pub mod config;
pub mod models;
pub mod quiz;

// Common error types
#[derive(Debug)]
pub enum QuizError {
    /// I/O operation failed
    IoError(std::io::Error),
    /// Question data could not be loaded; the game cannot start
    DataUnavailable(String),
    /// A category has too few questions for a session
    InsufficientPool {
        category: String,
        available: usize,
        required: usize,
    },
    /// Persisted progress is missing fields or unparsable
    MalformedPersistedState(String),
    /// The boss battle was requested before every category was cleared
    BossLocked { remaining: usize },
    /// Configuration validation or parsing error
    ConfigError(String),
    /// TUI rendering or interaction error
    TuiError(String),
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizError::IoError(err) => write!(f, "I/O error: {}", err),
            QuizError::DataUnavailable(msg) => write!(f, "Question data unavailable: {}", msg),
            QuizError::InsufficientPool {
                category,
                available,
                required,
            } => write!(
                f,
                "Category '{}' has {} question(s), at least {} required",
                category, available, required
            ),
            QuizError::MalformedPersistedState(msg) => {
                write!(f, "Malformed saved progress: {}", msg)
            }
            QuizError::BossLocked { remaining } => write!(
                f,
                "Boss battle locked: {} categor{} left to clear",
                remaining,
                if *remaining == 1 { "y" } else { "ies" }
            ),
            QuizError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            QuizError::TuiError(msg) => write!(f, "TUI error: {}", msg),
        }
    }
}

impl std::error::Error for QuizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuizError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for QuizError {
    fn from(err: std::io::Error) -> Self {
        QuizError::IoError(err)
    }
}

impl From<serde_json::Error> for QuizError {
    fn from(err: serde_json::Error) -> Self {
        QuizError::MalformedPersistedState(format!("JSON error: {}", err))
    }
}

impl From<toml::de::Error> for QuizError {
    fn from(err: toml::de::Error) -> Self {
        QuizError::ConfigError(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for QuizError {
    fn from(err: toml::ser::Error) -> Self {
        QuizError::ConfigError(format!("TOML serialization error: {}", err))
    }
}

/// Result type alias for quiz operations
pub type Result<T> = std::result::Result<T, QuizError>;

/// Error handling utilities
pub mod error {
    use super::QuizError;

    /// Whether the error should abort startup instead of being shown as a notice
    pub fn is_fatal(error: &QuizError) -> bool {
        matches!(
            error,
            QuizError::DataUnavailable(_) | QuizError::ConfigError(_) | QuizError::TuiError(_)
        )
    }

    /// Convert error to a message suitable for the menu notice line
    pub fn user_friendly_message(error: &QuizError) -> String {
        match error {
            QuizError::DataUnavailable(_) => {
                "Failed to load the quiz data. Check the question file and restart.".to_string()
            }
            QuizError::InsufficientPool {
                category, required, ..
            } => format!(
                "'{}' has too few questions to play right now (at least {} needed). Pick another category.",
                category, required
            ),
            QuizError::BossLocked { remaining } => format!(
                "Clear {} more categor{} to challenge the boss!",
                remaining,
                if *remaining == 1 { "y" } else { "ies" }
            ),
            QuizError::MalformedPersistedState(_) => {
                "Saved progress was unreadable and has been reset.".to_string()
            }
            QuizError::ConfigError(msg) => {
                format!("Configuration error: {}. Check your settings.", msg)
            }
            _ => error.to_string(),
        }
    }
}

// Common types and constants
pub const APP_NAME: &str = "quizboss";
pub const CONFIG_FILE: &str = "quizboss.toml";
pub const PROGRESS_FILE: &str = "progress.json";
pub const LOG_FILE: &str = "quizboss.log";
pub const BOSS_CATEGORY: &str = "BossBattle";
pub const QUESTIONS_PER_SESSION: usize = 5;
pub const POINTS_PER_CORRECT_ANSWER: u64 = 10;
pub const SECONDS_PER_QUESTION: u32 = 10;
pub const OPTIONS_PER_QUESTION: usize = 4;
