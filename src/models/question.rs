//! Question and category models
//!
//! `QuestionRecord` mirrors the on-disk JSON shape; `Question` is the
//! validated, immutable form the quiz works with.

use crate::{QuizError, Result, OPTIONS_PER_QUESTION};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Question as it appears in the question data document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Prompt text
    pub question: String,
    /// Exactly four answer options
    pub options: [String; OPTIONS_PER_QUESTION],
    /// Index of the correct option
    pub correct: i64,
}

/// A validated multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    options: [String; OPTIONS_PER_QUESTION],
    correct_index: usize,
}

impl Question {
    /// Create a question, rejecting a correct index outside the options
    pub fn new(
        prompt: impl Into<String>,
        options: [String; OPTIONS_PER_QUESTION],
        correct_index: usize,
    ) -> Result<Self> {
        let prompt = prompt.into();
        if correct_index >= OPTIONS_PER_QUESTION {
            return Err(QuizError::DataUnavailable(format!(
                "question '{}' has correct index {} (must be below {})",
                prompt, correct_index, OPTIONS_PER_QUESTION
            )));
        }
        Ok(Self {
            prompt,
            options,
            correct_index,
        })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn options(&self) -> &[String; OPTIONS_PER_QUESTION] {
        &self.options
    }

    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    /// `None` is the no-selection sentinel and is never correct
    pub fn is_correct(&self, selected: Option<usize>) -> bool {
        selected == Some(self.correct_index)
    }
}

impl TryFrom<QuestionRecord> for Question {
    type Error = QuizError;

    fn try_from(record: QuestionRecord) -> Result<Self> {
        let index = usize::try_from(record.correct).map_err(|_| {
            QuizError::DataUnavailable(format!(
                "question '{}' has negative correct index {}",
                record.question, record.correct
            ))
        })?;
        Question::new(record.question, record.options, index)
    }
}

/// A question pool identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    /// One of the fixed categories that count towards the boss gate
    Ordinary(String),
    /// The boss battle pseudo-category
    Boss(String),
}

impl Category {
    /// Classify a category name against the configured boss name
    pub fn classify(name: &str, boss_name: &str) -> Self {
        if name == boss_name {
            Category::Boss(name.to_string())
        } else {
            Category::Ordinary(name.to_string())
        }
    }

    /// Name used to look the pool up in the question bank
    pub fn name(&self) -> &str {
        match self {
            Category::Ordinary(name) | Category::Boss(name) => name,
        }
    }

    pub fn is_boss(&self) -> bool {
        matches!(self, Category::Boss(_))
    }

    /// Heading shown above the questions
    pub fn title(&self) -> String {
        match self {
            Category::Ordinary(name) => format!("{} Quiz", name),
            Category::Boss(_) => "Boss Battle".to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> [String; OPTIONS_PER_QUESTION] {
        ["a", "b", "c", "d"].map(String::from)
    }

    #[test]
    fn test_correct_index_bounds() {
        assert!(Question::new("q", options(), 3).is_ok());
        assert!(matches!(
            Question::new("q", options(), 4),
            Err(QuizError::DataUnavailable(_))
        ));
    }

    #[test]
    fn test_no_selection_is_never_correct() {
        for index in 0..OPTIONS_PER_QUESTION {
            let question = Question::new("q", options(), index).unwrap();
            assert!(!question.is_correct(None));
            assert!(question.is_correct(Some(index)));
        }
    }

    #[test]
    fn test_record_with_negative_index_is_rejected() {
        let record = QuestionRecord {
            question: "q".to_string(),
            options: options(),
            correct: -1,
        };
        assert!(Question::try_from(record).is_err());
    }

    #[test]
    fn test_category_classification() {
        let boss = Category::classify("BossBattle", "BossBattle");
        assert!(boss.is_boss());
        assert_eq!(boss.title(), "Boss Battle");

        let science = Category::classify("Science", "BossBattle");
        assert!(!science.is_boss());
        assert_eq!(science.name(), "Science");
        assert_eq!(science.title(), "Science Quiz");
    }
}
