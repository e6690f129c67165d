//! Session outcome resolution
//!
//! How a finished session is judged depends only on whether it was the
//! boss battle and how many questions were answered correctly.

use serde::{Deserialize, Serialize};

/// Result of answering a single question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    /// Option the player picked, `None` if time ran out
    pub selected: Option<usize>,
    /// Option that was correct
    pub correct_index: usize,
    pub is_correct: bool,
}

/// Outcome of a finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Every boss question answered correctly
    BossDefeated,
    /// Boss battle finished with at least one miss
    BossLost,
    /// Every question correct. `newly_cleared` is false on a repeat clear.
    CategoryCleared { newly_cleared: bool },
    /// At least half correct, but not all
    Partial,
    /// Fewer than half correct
    Failure,
}

impl Outcome {
    /// Judge a finished session.
    ///
    /// "At least half" is measured against the exact half, so for five
    /// questions 3 is the first partial score and 2 is still a failure.
    /// `CategoryCleared` is returned with `newly_cleared: true`; the caller
    /// downgrades it when the category was already cleared.
    pub fn resolve(is_boss_battle: bool, correct: usize, total: usize) -> Self {
        let all_correct = total > 0 && correct >= total;
        match (is_boss_battle, all_correct) {
            (true, true) => Outcome::BossDefeated,
            (true, false) => Outcome::BossLost,
            (false, true) => Outcome::CategoryCleared {
                newly_cleared: true,
            },
            (false, false) if correct * 2 >= total => Outcome::Partial,
            (false, false) => Outcome::Failure,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Outcome::BossDefeated => "You defeated the boss!",
            Outcome::BossLost => "The boss was too strong... Train some more and try again!",
            Outcome::CategoryCleared { .. } => "Perfect score! Outstanding!",
            Outcome::Partial => "Well fought! Almost there!",
            Outcome::Failure => "Too bad! Try again and sharpen your knowledge!",
        }
    }

    pub fn is_victory(&self) -> bool {
        matches!(
            self,
            Outcome::BossDefeated | Outcome::CategoryCleared { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinary_tiers() {
        assert_eq!(Outcome::resolve(false, 0, 5), Outcome::Failure);
        assert_eq!(Outcome::resolve(false, 2, 5), Outcome::Failure);
        assert_eq!(Outcome::resolve(false, 3, 5), Outcome::Partial);
        assert_eq!(Outcome::resolve(false, 4, 5), Outcome::Partial);
        assert_eq!(
            Outcome::resolve(false, 5, 5),
            Outcome::CategoryCleared {
                newly_cleared: true
            }
        );
    }

    #[test]
    fn test_boss_tiers() {
        assert_eq!(Outcome::resolve(true, 5, 5), Outcome::BossDefeated);
        assert_eq!(Outcome::resolve(true, 4, 5), Outcome::BossLost);
        assert_eq!(Outcome::resolve(true, 0, 5), Outcome::BossLost);
    }

    #[test]
    fn test_even_session_half_is_partial() {
        assert_eq!(Outcome::resolve(false, 2, 4), Outcome::Partial);
        assert_eq!(Outcome::resolve(false, 1, 4), Outcome::Failure);
    }

    #[test]
    fn test_messages_differ_per_tier() {
        assert_ne!(Outcome::Partial.message(), Outcome::Failure.message());
        assert!(Outcome::BossDefeated.is_victory());
        assert!(!Outcome::BossLost.is_victory());
    }
}
