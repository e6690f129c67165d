//! Question bank module
//!
//! Loads the category -> question list document once at startup. Any
//! problem with the document is fatal; there is no partially loaded bank.

use crate::config::GameConfig;
use crate::models::{Question, QuestionRecord};
use crate::{QuizError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Questions built into the binary, used when no question file is configured
const EMBEDDED_QUESTIONS: &str = include_str!("../../data/quiz_data.json");

/// Read-only access to question pools
pub trait QuestionSource {
    /// Full pool for `category`, empty if the category is unknown
    fn questions_for(&self, category: &str) -> &[Question];
}

/// Question pools keyed by category name
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    pools: BTreeMap<String, Vec<Question>>,
}

impl QuestionBank {
    /// Build a bank from already validated pools
    pub fn from_pools<I, S>(pools: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<Question>)>,
        S: Into<String>,
    {
        Self {
            pools: pools
                .into_iter()
                .map(|(name, questions)| (name.into(), questions))
                .collect(),
        }
    }

    /// Parse a question document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, Vec<QuestionRecord>> = serde_json::from_str(json)
            .map_err(|e| QuizError::DataUnavailable(format!("invalid question document: {}", e)))?;

        let mut pools = BTreeMap::new();
        for (category, records) in raw {
            let questions = records
                .into_iter()
                .enumerate()
                .map(|(i, record)| {
                    Question::try_from(record).map_err(|e| {
                        QuizError::DataUnavailable(format!(
                            "category '{}', question {}: {}",
                            category,
                            i + 1,
                            e
                        ))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            pools.insert(category, questions);
        }

        Ok(Self { pools })
    }

    /// Read and parse a question file
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            QuizError::DataUnavailable(format!(
                "failed to read question file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json_str(&content)
    }

    /// The built-in question set
    pub fn embedded() -> Result<Self> {
        Self::from_json_str(EMBEDDED_QUESTIONS)
    }

    /// Load the bank the configuration points at
    pub fn load(config: &GameConfig) -> Result<Self> {
        let bank = match &config.question_file {
            Some(path) => {
                log::info!("Loading questions from {}", path.display());
                Self::from_path(path)?
            }
            None => Self::embedded()?,
        };

        for category in config
            .categories
            .iter()
            .chain(std::iter::once(&config.boss_category))
        {
            let available = bank.pool_size(category);
            if available < config.questions_per_session {
                log::warn!(
                    "Category '{}' has {} question(s); sessions need {}",
                    category,
                    available,
                    config.questions_per_session
                );
            }
        }
        log::info!(
            "Question bank ready: {} categories, {} questions",
            bank.pools.len(),
            bank.total_questions()
        );

        Ok(bank)
    }

    /// Category names present in the document
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.pools.keys().map(String::as_str)
    }

    pub fn pool_size(&self, category: &str) -> usize {
        self.questions_for(category).len()
    }

    pub fn total_questions(&self) -> usize {
        self.pools.values().map(Vec::len).sum()
    }
}

impl QuestionSource for QuestionBank {
    fn questions_for(&self, category: &str) -> &[Question] {
        self.pools
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SMALL_DOC: &str = r#"{
        "Art": [
            { "question": "Who painted the Mona Lisa?", "options": ["Leonardo", "Raphael", "Titian", "Bosch"], "correct": 0 }
        ]
    }"#;

    #[test]
    fn test_embedded_bank_covers_default_roster() {
        let config = GameConfig::default();
        let bank = QuestionBank::embedded().unwrap();

        for category in &config.categories {
            assert!(bank.pool_size(category) >= config.questions_per_session);
        }
        assert!(bank.pool_size(&config.boss_category) >= config.questions_per_session);
    }

    #[test]
    fn test_unknown_category_is_empty() {
        let bank = QuestionBank::from_json_str(SMALL_DOC).unwrap();
        assert!(bank.questions_for("Nope").is_empty());
        assert_eq!(bank.pool_size("Art"), 1);
        assert_eq!(bank.categories().collect::<Vec<_>>(), vec!["Art"]);
    }

    #[test]
    fn test_malformed_document_is_fatal() {
        let err = QuestionBank::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, QuizError::DataUnavailable(_)));
        assert!(crate::error::is_fatal(&err));
    }

    #[test]
    fn test_wrong_option_count_is_rejected() {
        let doc = r#"{ "Art": [ { "question": "q", "options": ["a", "b", "c"], "correct": 0 } ] }"#;
        assert!(matches!(
            QuestionBank::from_json_str(doc),
            Err(QuizError::DataUnavailable(_))
        ));
    }

    #[test]
    fn test_out_of_range_answer_is_rejected() {
        let doc = r#"{ "Art": [ { "question": "q", "options": ["a", "b", "c", "d"], "correct": 4 } ] }"#;
        let err = QuestionBank::from_json_str(doc).unwrap_err();
        assert!(err.to_string().contains("category 'Art', question 1"));
    }

    #[test]
    fn test_load_from_configured_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("questions.json");
        fs::write(&path, SMALL_DOC).unwrap();

        let config = GameConfig::default().with_question_file(path);
        let bank = QuestionBank::load(&config).unwrap();
        assert_eq!(bank.total_questions(), 1);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let config = GameConfig::default().with_question_file(temp_dir.path().join("gone.json"));
        assert!(matches!(
            QuestionBank::load(&config),
            Err(QuizError::DataUnavailable(_))
        ));
    }
}
