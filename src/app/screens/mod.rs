//! TUI screen components
//!
//! Contains individual screen implementations for different application states.

pub mod menu;
pub mod question;
pub mod result;

pub use menu::{EntryKind, MenuEntry, MenuScreen};
pub use question::QuestionScreen;
pub use result::ResultScreen;
