//! Single quiz session
//!
//! A session samples its questions up front and then only moves forward:
//! answer or skip the active question, wait out the dwell, repeat until
//! every question is used. Points and progress live in [`super::Game`].

use crate::models::{Category, Outcome, Question, Verdict};
use crate::{QuizError, Result};
use rand::seq::SliceRandom;
use rand::Rng;

/// Identity of a session; every start gets a fresh one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u64);

/// Names the question a scheduled callback was created for.
///
/// Tick and advance callbacks carry a ticket so that one created for an
/// earlier question or a superseded session can be recognised and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub session: SessionId,
    pub question: usize,
}

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Question is live and the countdown is running
    InProgress,
    /// Answer locked in; waiting for the dwell to finish
    Answered(Verdict),
    /// All questions used
    Ended(Outcome),
}

/// Result of a countdown tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Running { remaining: u32 },
    Expired,
}

/// What follows an advance or a skip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Next {
    Question(Ticket),
    Finished(Outcome),
}

/// State of one in-progress quiz
#[derive(Debug, Clone)]
pub struct QuizSession {
    id: SessionId,
    category: Category,
    questions: Vec<Question>,
    current_index: usize,
    correct_count: usize,
    seconds_remaining: u32,
    seconds_per_question: u32,
    phase: Phase,
}

impl QuizSession {
    /// Sample `count` distinct questions from `pool` and open the first one.
    ///
    /// The pool is shuffled with an unbiased Fisher-Yates shuffle driven by
    /// `rng`, so a seeded rng gives a reproducible question order.
    pub fn start<R: Rng + ?Sized>(
        id: SessionId,
        category: Category,
        pool: &[Question],
        count: usize,
        seconds_per_question: u32,
        rng: &mut R,
    ) -> Result<Self> {
        if pool.is_empty() || pool.len() < count {
            return Err(QuizError::InsufficientPool {
                category: category.name().to_string(),
                available: pool.len(),
                required: count,
            });
        }

        let mut order: Vec<usize> = (0..pool.len()).collect();
        order.shuffle(rng);
        let questions = order
            .into_iter()
            .take(count)
            .map(|i| pool[i].clone())
            .collect();

        Ok(Self {
            id,
            category,
            questions,
            current_index: 0,
            correct_count: 0,
            seconds_remaining: seconds_per_question,
            seconds_per_question,
            phase: Phase::InProgress,
        })
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn is_boss_battle(&self) -> bool {
        self.category.is_boss()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    /// Questions resolved so far, counting one that is locked but not yet advanced past
    pub fn answered_count(&self) -> usize {
        match self.phase {
            Phase::Answered(_) => self.current_index + 1,
            _ => self.current_index,
        }
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    pub fn seconds_per_question(&self) -> u32 {
        self.seconds_per_question
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_ended(&self) -> bool {
        matches!(self.phase, Phase::Ended(_))
    }

    /// The active question; `None` once the session has ended
    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            Phase::Ended(_) => None,
            _ => self.questions.get(self.current_index),
        }
    }

    /// Ticket for the active question
    pub fn ticket(&self) -> Ticket {
        Ticket {
            session: self.id,
            question: self.current_index,
        }
    }

    /// Count down one unit. `None` unless a question is live.
    pub fn tick(&mut self) -> Option<TickOutcome> {
        if self.phase != Phase::InProgress {
            return None;
        }
        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        if self.seconds_remaining == 0 {
            Some(TickOutcome::Expired)
        } else {
            Some(TickOutcome::Running {
                remaining: self.seconds_remaining,
            })
        }
    }

    /// Lock in an answer for the live question. `None` if nothing is live.
    pub fn answer(&mut self, selected: Option<usize>) -> Option<Verdict> {
        if self.phase != Phase::InProgress {
            return None;
        }
        let question = self.questions.get(self.current_index)?;
        let verdict = Verdict {
            selected,
            correct_index: question.correct_index(),
            is_correct: question.is_correct(selected),
        };
        if verdict.is_correct {
            self.correct_count += 1;
        }
        self.phase = Phase::Answered(verdict);
        Some(verdict)
    }

    /// Leave the answered question behind. `None` unless an answer is locked in.
    pub fn advance(&mut self) -> Option<Next> {
        match self.phase {
            Phase::Answered(_) => Some(self.move_on()),
            _ => None,
        }
    }

    /// Drop the live question unscored. `None` unless a question is live.
    pub fn skip(&mut self) -> Option<Next> {
        match self.phase {
            Phase::InProgress => Some(self.move_on()),
            _ => None,
        }
    }

    /// Replace the outcome of an ended session
    pub(crate) fn conclude(&mut self, outcome: Outcome) {
        if self.is_ended() {
            self.phase = Phase::Ended(outcome);
        }
    }

    fn move_on(&mut self) -> Next {
        self.current_index += 1;
        if self.current_index >= self.questions.len() {
            let outcome = Outcome::resolve(
                self.is_boss_battle(),
                self.correct_count,
                self.questions.len(),
            );
            self.phase = Phase::Ended(outcome);
            Next::Finished(outcome)
        } else {
            self.seconds_remaining = self.seconds_per_question;
            self.phase = Phase::InProgress;
            Next::Question(self.ticket())
        }
    }
}
