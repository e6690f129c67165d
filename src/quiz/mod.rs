//! Quiz engine module
//!
//! `session` holds the state of a single five-question run, `game` owns
//! progress and drives sessions from input events, and `timer` turns the
//! countdown and answer dwell into cancellable tokio tasks.

pub mod game;
pub mod session;
pub mod timer;

pub use game::{Game, GameState, QuestionView, SessionSummary, Step};
pub use session::{Next, Phase, QuizSession, SessionId, TickOutcome, Ticket};
pub use timer::{QuestionTimer, TimerEvent};

/// Answer submitted when the countdown runs out. Never matches a correct index.
pub const NO_SELECTION: Option<usize> = None;
