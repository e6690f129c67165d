//! Persisted player progress
//!
//! Three fields under fixed keys: total points, the cleared categories,
//! and whether the boss has been defeated.

use crate::{QuizError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const KEY_TOTAL_POINTS: &str = "totalPoints";
pub const KEY_CLEARED_CATEGORIES: &str = "clearedCategories";
pub const KEY_BOSS_DEFEATED: &str = "bossDefeated";

/// Player progress across sessions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Points earned over all sessions
    #[serde(rename = "totalPoints")]
    total_points: u64,
    /// Cleared category names in the order they were cleared, no duplicates
    #[serde(rename = "clearedCategories")]
    cleared_categories: Vec<String>,
    /// Whether the boss battle has been won
    #[serde(rename = "bossDefeated")]
    boss_defeated: bool,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_points(&self) -> u64 {
        self.total_points
    }

    pub fn add_points(&mut self, points: u64) {
        self.total_points = self.total_points.saturating_add(points);
    }

    pub fn cleared_categories(&self) -> &[String] {
        &self.cleared_categories
    }

    pub fn cleared_count(&self) -> usize {
        self.cleared_categories.len()
    }

    pub fn is_cleared(&self, category: &str) -> bool {
        self.cleared_categories.iter().any(|c| c == category)
    }

    /// Add a category to the cleared set. Returns false if it was already there.
    pub fn mark_cleared(&mut self, category: &str) -> bool {
        if self.is_cleared(category) {
            return false;
        }
        self.cleared_categories.push(category.to_string());
        true
    }

    pub fn boss_defeated(&self) -> bool {
        self.boss_defeated
    }

    pub fn mark_boss_defeated(&mut self) {
        self.boss_defeated = true;
    }

    /// Drop cleared entries that are not in `known`; returns the dropped names
    pub fn retain_known(&mut self, known: &[String]) -> Vec<String> {
        let (kept, dropped) = self
            .cleared_categories
            .drain(..)
            .partition(|c| known.contains(c));
        self.cleared_categories = kept;
        dropped
    }

    /// Back to zero points, nothing cleared, boss undefeated
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Build progress from a persisted JSON document, field by field.
    ///
    /// A missing field takes its default silently. A field with an
    /// unusable value takes its default and is reported in the returned
    /// list. Only a document that is not a JSON object is an error.
    pub fn from_json_lenient(value: &Value) -> Result<(Self, Vec<String>)> {
        let object = value.as_object().ok_or_else(|| {
            QuizError::MalformedPersistedState(format!(
                "expected a JSON object, found {}",
                json_kind(value)
            ))
        })?;

        let mut problems = Vec::new();
        let mut progress = Self::default();

        if let Some(raw) = object.get(KEY_TOTAL_POINTS) {
            match parse_points(raw) {
                Some(points) => progress.total_points = points,
                None => problems.push(format!("{}: unusable value {}", KEY_TOTAL_POINTS, raw)),
            }
        }

        if let Some(raw) = object.get(KEY_CLEARED_CATEGORIES) {
            match raw.as_array() {
                Some(entries) => {
                    for entry in entries {
                        match entry.as_str() {
                            Some(name) => {
                                progress.mark_cleared(name);
                            }
                            None => problems.push(format!(
                                "{}: skipped non-string entry {}",
                                KEY_CLEARED_CATEGORIES, entry
                            )),
                        }
                    }
                }
                None => problems.push(format!(
                    "{}: expected an array, found {}",
                    KEY_CLEARED_CATEGORIES,
                    json_kind(raw)
                )),
            }
        }

        if let Some(raw) = object.get(KEY_BOSS_DEFEATED) {
            match parse_flag(raw) {
                Some(flag) => progress.boss_defeated = flag,
                None => problems.push(format!("{}: unusable value {}", KEY_BOSS_DEFEATED, raw)),
            }
        }

        Ok((progress, problems))
    }
}

fn parse_points(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn parse_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => s.trim().parse().ok(),
        Value::Null => Some(false),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mark_cleared_is_idempotent() {
        let mut progress = Progress::new();
        assert!(progress.mark_cleared("Science"));
        assert!(!progress.mark_cleared("Science"));
        assert_eq!(progress.cleared_count(), 1);
    }

    #[test]
    fn test_reset() {
        let mut progress = Progress::new();
        progress.add_points(30);
        progress.mark_cleared("Math");
        progress.mark_boss_defeated();

        progress.reset();
        assert_eq!(progress, Progress::default());
    }

    #[test]
    fn test_serialized_keys() {
        let mut progress = Progress::new();
        progress.add_points(20);
        progress.mark_cleared("History");

        let value = serde_json::to_value(&progress).unwrap();
        assert_eq!(value[KEY_TOTAL_POINTS], json!(20));
        assert_eq!(value[KEY_CLEARED_CATEGORIES], json!(["History"]));
        assert_eq!(value[KEY_BOSS_DEFEATED], json!(false));
    }

    #[test]
    fn test_lenient_parse_keeps_good_fields() {
        let doc = json!({
            "totalPoints": "not a number",
            "clearedCategories": ["Science", 7, "Science", "Math"],
            "bossDefeated": "true"
        });
        let (progress, problems) = Progress::from_json_lenient(&doc).unwrap();

        assert_eq!(progress.total_points(), 0);
        assert_eq!(progress.cleared_categories(), ["Science", "Math"]);
        assert!(progress.boss_defeated());
        assert_eq!(problems.len(), 2);
    }

    #[test]
    fn test_lenient_parse_accepts_string_points() {
        let (progress, problems) =
            Progress::from_json_lenient(&json!({ "totalPoints": "120" })).unwrap();
        assert_eq!(progress.total_points(), 120);
        assert!(problems.is_empty());
    }

    #[test]
    fn test_lenient_parse_rejects_non_object() {
        assert!(matches!(
            Progress::from_json_lenient(&json!([1, 2, 3])),
            Err(QuizError::MalformedPersistedState(_))
        ));
    }

    #[test]
    fn test_retain_known() {
        let mut progress = Progress::new();
        progress.mark_cleared("Science");
        progress.mark_cleared("Retired");

        let dropped = progress.retain_known(&["Science".to_string()]);
        assert_eq!(dropped, vec!["Retired".to_string()]);
        assert_eq!(progress.cleared_categories(), ["Science"]);
    }
}
