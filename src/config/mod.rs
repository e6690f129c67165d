//! Configuration management module
//!
//! Handles loading, saving, and validation of the game rules and the
//! category roster.

use crate::{
    QuizError, Result, APP_NAME, BOSS_CATEGORY, CONFIG_FILE, POINTS_PER_CORRECT_ANSWER,
    QUESTIONS_PER_SESSION, SECONDS_PER_QUESTION,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub mod persistence;

/// Game rules and content location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Questions drawn per session
    pub questions_per_session: usize,
    /// Points awarded for each correct answer
    pub points_per_correct: u64,
    /// Countdown length for each question, in ticks
    pub seconds_per_question: u32,
    /// Wall-clock length of one countdown tick
    #[serde(with = "duration_serde")]
    pub tick_interval: Duration,
    /// How long an answered question stays on screen before advancing
    #[serde(with = "duration_serde")]
    pub answer_dwell: Duration,
    /// Ordinary categories; clearing all of them unlocks the boss
    pub categories: Vec<String>,
    /// Name of the boss pool in the question data
    pub boss_category: String,
    /// Question data file. The built-in questions are used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_file: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            questions_per_session: QUESTIONS_PER_SESSION,
            points_per_correct: POINTS_PER_CORRECT_ANSWER,
            seconds_per_question: SECONDS_PER_QUESTION,
            tick_interval: Duration::from_secs(1),
            answer_dwell: Duration::from_millis(1500),
            categories: ["Science", "History", "Geography", "Math", "Literature"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            boss_category: BOSS_CATEGORY.to_string(),
            question_file: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.questions_per_session == 0 {
            return Err(QuizError::ConfigError(
                "Questions per session must be greater than 0".to_string(),
            ));
        }

        if self.seconds_per_question == 0 {
            return Err(QuizError::ConfigError(
                "Seconds per question must be greater than 0".to_string(),
            ));
        }

        if self.tick_interval.is_zero() {
            return Err(QuizError::ConfigError(
                "Tick interval must be greater than 0".to_string(),
            ));
        }

        const MAX_DWELL: Duration = Duration::from_secs(60);
        if self.answer_dwell > MAX_DWELL {
            return Err(QuizError::ConfigError(format!(
                "Answer dwell too long: {} (max: {})",
                humantime::format_duration(self.answer_dwell),
                humantime::format_duration(MAX_DWELL)
            )));
        }

        if self.categories.is_empty() {
            return Err(QuizError::ConfigError(
                "At least one category is required".to_string(),
            ));
        }

        for (i, category) in self.categories.iter().enumerate() {
            if category.trim().is_empty() {
                return Err(QuizError::ConfigError(
                    "Category names must not be empty".to_string(),
                ));
            }
            if self.categories[..i].contains(category) {
                return Err(QuizError::ConfigError(format!(
                    "Duplicate category: {}",
                    category
                )));
            }
        }

        if self.boss_category.trim().is_empty() {
            return Err(QuizError::ConfigError(
                "Boss category name must not be empty".to_string(),
            ));
        }

        if self.categories.contains(&self.boss_category) {
            return Err(QuizError::ConfigError(format!(
                "Boss category '{}' cannot also be an ordinary category",
                self.boss_category
            )));
        }

        Ok(())
    }

    /// Set the number of questions per session
    pub fn with_questions_per_session(mut self, count: usize) -> Self {
        self.questions_per_session = count;
        self
    }

    /// Set the points awarded per correct answer
    pub fn with_points_per_correct(mut self, points: u64) -> Self {
        self.points_per_correct = points;
        self
    }

    /// Set the countdown length per question
    pub fn with_seconds_per_question(mut self, seconds: u32) -> Self {
        self.seconds_per_question = seconds;
        self
    }

    /// Set the tick interval
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Set the answer dwell time
    pub fn with_answer_dwell(mut self, dwell: Duration) -> Self {
        self.answer_dwell = dwell;
        self
    }

    /// Set the ordinary category roster
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Set the boss category name
    pub fn with_boss_category(mut self, name: impl Into<String>) -> Self {
        self.boss_category = name.into();
        self
    }

    /// Set the question data file
    pub fn with_question_file(mut self, path: PathBuf) -> Self {
        self.question_file = Some(path);
        self
    }

    /// Load configuration from the standard config file location
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load configuration from a specific file
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            log::debug!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| {
            QuizError::ConfigError(format!(
                "Failed to read config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            QuizError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        config.validate()?;
        log::info!("Loaded config from {}", config_path.display());

        Ok(config)
    }

    /// Save configuration to the standard config file location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                QuizError::ConfigError(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = toml::to_string_pretty(self)?;

        fs::write(config_path, content).map_err(|e| {
            QuizError::ConfigError(format!(
                "Failed to write config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Get the standard configuration file path
    /// Uses $CONFIG_HOME/quizboss/quizboss.toml
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            QuizError::ConfigError("Unable to determine config directory".to_string())
        })?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Number of ordinary categories that must be cleared to face the boss
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }
}

/// Human-readable durations in config files, e.g. `"1s 500ms"`
mod duration_serde {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&humantime::format_duration(*duration).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        humantime::parse_duration(&text).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.questions_per_session, 5);
        assert_eq!(config.seconds_per_question, 10);
        assert_eq!(config.answer_dwell, Duration::from_millis(1500));
        assert_eq!(config.category_count(), 5);
    }

    #[test]
    fn test_toml_serialization() {
        let config = GameConfig::default()
            .with_answer_dwell(Duration::from_millis(750))
            .with_question_file(PathBuf::from("questions.json"));
        let toml_str = toml::to_string(&config).expect("Failed to serialize to TOML");
        assert!(toml_str.contains("answer_dwell = \"750ms\""));

        let deserialized: GameConfig =
            toml::from_str(&toml_str).expect("Failed to deserialize from TOML");
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: GameConfig = toml::from_str("seconds_per_question = 20\n").unwrap();
        assert_eq!(config.seconds_per_question, 20);
        assert_eq!(config.questions_per_session, 5);
        assert_eq!(config.boss_category, BOSS_CATEGORY);
    }

    #[test]
    fn test_validation_rejects_bad_rosters() {
        let duplicate = GameConfig::default().with_categories(["Math", "Math"]);
        assert!(duplicate.validate().is_err());

        let empty = GameConfig::default().with_categories(Vec::<String>::new());
        assert!(empty.validate().is_err());

        let boss_as_category = GameConfig::default().with_categories(["Math", BOSS_CATEGORY]);
        assert!(boss_as_category.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_rules() {
        assert!(GameConfig::default()
            .with_questions_per_session(0)
            .validate()
            .is_err());
        assert!(GameConfig::default()
            .with_seconds_per_question(0)
            .validate()
            .is_err());
        assert!(GameConfig::default()
            .with_tick_interval(Duration::ZERO)
            .validate()
            .is_err());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join(CONFIG_FILE);

        let config = GameConfig::default().with_categories(["Art", "Music"]);
        config.save_to(&path).unwrap();

        let loaded = GameConfig::load_from(&path).unwrap();
        assert_eq!(loaded.categories, vec!["Art", "Music"]);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = GameConfig::load_from(&temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded, GameConfig::default());
    }

    #[test]
    fn test_config_file_path() {
        let path = GameConfig::config_file_path();
        assert!(path.is_ok());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("quizboss.toml"));
    }
}
