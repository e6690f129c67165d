//! Data models module
//!
//! Contains the question and category types, the persisted progress
//! record, and session outcome resolution.

pub mod outcome;
pub mod progress;
pub mod question;

// Re-export commonly used types
pub use outcome::{Outcome, Verdict};
pub use progress::Progress;
pub use question::{Category, Question, QuestionRecord};
