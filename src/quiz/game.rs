//! Game controller
//!
//! Owns the player's progress and at most one quiz session, and is the
//! only place either of them changes. Every input (category chosen,
//! option picked, countdown tick, dwell elapsed, skip) is a `&mut self`
//! method that returns a [`Step`] describing what the caller should
//! schedule next.

use crate::bank::QuestionSource;
use crate::config::persistence::ProgressStore;
use crate::config::GameConfig;
use crate::models::{Category, Outcome, Progress, Question, Verdict};
use crate::quiz::session::{Next, Phase, QuizSession, SessionId, TickOutcome, Ticket};
use crate::{QuizError, Result, OPTIONS_PER_QUESTION};
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Coarse state of the game, as the front end sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// No session; the category menu is showing
    Idle,
    /// A question is live
    InProgress,
    /// An answer is locked in and the dwell is running
    Answered,
    /// The session finished; its outcome is available
    Ended,
}

/// What an event did, and what needs scheduling because of it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Event was stale or not valid in the current state
    Ignored,
    /// Countdown moved on; the question is still live
    Ticked { remaining: u32 },
    /// Answer locked in. Schedule `advance(ticket)` after the dwell.
    Answered { verdict: Verdict, ticket: Ticket },
    /// A new question is live. Start its countdown with this ticket.
    Question(Ticket),
    /// The session is over
    Ended(Outcome),
}

/// Read-only snapshot of the active question for rendering
#[derive(Debug, Clone)]
pub struct QuestionView<'a> {
    pub title: String,
    pub is_boss_battle: bool,
    /// 1-based question number
    pub number: usize,
    pub total: usize,
    pub prompt: &'a str,
    pub options: &'a [String; OPTIONS_PER_QUESTION],
    pub seconds_remaining: u32,
    pub seconds_per_question: u32,
    pub total_points: u64,
    pub correct_so_far: usize,
    /// Set while the answer is locked in
    pub verdict: Option<Verdict>,
}

/// Summary of a finished session for the result screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub title: String,
    pub outcome: Outcome,
    pub correct: usize,
    pub total: usize,
    pub total_points: u64,
}

/// The quiz game: progress, content, and the active session
pub struct Game<B: QuestionSource, S: ProgressStore> {
    config: GameConfig,
    bank: B,
    store: S,
    progress: Progress,
    session: Option<QuizSession>,
    rng: SmallRng,
    next_session_id: u64,
}

impl<B: QuestionSource, S: ProgressStore> Game<B, S> {
    /// Create a game with an entropy-seeded random source
    pub fn new(config: GameConfig, bank: B, store: S) -> Self {
        Self::with_rng(config, bank, store, SmallRng::from_entropy())
    }

    /// Create a game with a specific random source
    pub fn with_rng(config: GameConfig, bank: B, store: S, rng: SmallRng) -> Self {
        let mut progress = store.load();
        let dropped = progress.retain_known(&config.categories);
        if !dropped.is_empty() {
            log::warn!(
                "Ignoring cleared categories that are no longer configured: {}",
                dropped.join(", ")
            );
        }
        log::info!(
            "Progress loaded: {} points, {}/{} categories cleared, boss defeated: {}",
            progress.total_points(),
            progress.cleared_count(),
            config.category_count(),
            progress.boss_defeated()
        );

        Self {
            config,
            bank,
            store,
            progress,
            session: None,
            rng,
            next_session_id: 1,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn bank(&self) -> &B {
        &self.bank
    }

    /// Ordinary categories in menu order
    pub fn categories(&self) -> &[String] {
        &self.config.categories
    }

    pub fn state(&self) -> GameState {
        match self.session.as_ref().map(QuizSession::phase) {
            None => GameState::Idle,
            Some(Phase::InProgress) => GameState::InProgress,
            Some(Phase::Answered(_)) => GameState::Answered,
            Some(Phase::Ended(_)) => GameState::Ended,
        }
    }

    pub fn is_cleared(&self, category: &str) -> bool {
        self.progress.is_cleared(category)
    }

    /// Categories still to clear before the boss opens
    pub fn remaining_to_unlock(&self) -> usize {
        self.config
            .category_count()
            .saturating_sub(self.progress.cleared_count())
    }

    /// Whether the boss battle is selectable
    pub fn boss_unlocked(&self) -> bool {
        self.remaining_to_unlock() == 0
    }

    /// Status line for the category menu
    pub fn menu_message(&self) -> String {
        if self.progress.boss_defeated() {
            "The boss has been defeated!".to_string()
        } else if self.boss_unlocked() {
            "All categories cleared! Challenge the boss!".to_string()
        } else {
            let remaining = self.remaining_to_unlock();
            format!(
                "Clear {} more categor{} to challenge the boss!",
                remaining,
                if remaining == 1 { "y" } else { "ies" }
            )
        }
    }

    /// Start a session on `category`, discarding any session in flight.
    ///
    /// The boss gate is not checked here; see [`Game::start_boss_battle`].
    /// On error nothing changes.
    pub fn start_session(&mut self, category: &str) -> Result<Ticket> {
        let category = Category::classify(category, &self.config.boss_category);
        let pool = self.bank.questions_for(category.name());
        let id = SessionId(self.next_session_id);
        let session = QuizSession::start(
            id,
            category,
            pool,
            self.config.questions_per_session,
            self.config.seconds_per_question,
            &mut self.rng,
        )?;

        if let Some(previous) = &self.session {
            log::debug!("Session {:?} superseded by {:?}", previous.id(), id);
        }
        log::info!(
            "Session {:?} started: {} ({} questions)",
            id,
            session.category(),
            session.total_questions()
        );

        self.next_session_id += 1;
        let ticket = session.ticket();
        self.session = Some(session);
        Ok(ticket)
    }

    /// Start the boss battle if every category is cleared
    pub fn start_boss_battle(&mut self) -> Result<Ticket> {
        if !self.boss_unlocked() {
            return Err(QuizError::BossLocked {
                remaining: self.remaining_to_unlock(),
            });
        }
        let boss = self.config.boss_category.clone();
        self.start_session(&boss)
    }

    /// Countdown tick for the question named by `ticket`
    pub fn tick(&mut self, ticket: Ticket) -> Step {
        if !self.is_current(ticket) {
            log::trace!("Dropping stale tick {:?}", ticket);
            return Step::Ignored;
        }
        let Some(session) = self.session.as_mut() else {
            return Step::Ignored;
        };
        match session.tick() {
            Some(TickOutcome::Running { remaining }) => Step::Ticked { remaining },
            Some(TickOutcome::Expired) => {
                log::debug!("Time up on question {}", ticket.question + 1);
                self.submit_answer(crate::quiz::NO_SELECTION)
            }
            None => Step::Ignored,
        }
    }

    /// Lock in `selected` for the live question; `None` means no selection.
    ///
    /// Progress is saved whether or not the answer scored.
    pub fn submit_answer(&mut self, selected: Option<usize>) -> Step {
        let Some(session) = self.session.as_mut() else {
            return Step::Ignored;
        };
        let Some(verdict) = session.answer(selected) else {
            log::debug!("Answer {:?} ignored in {:?}", selected, session.phase());
            return Step::Ignored;
        };
        let ticket = session.ticket();

        if verdict.is_correct {
            self.progress.add_points(self.config.points_per_correct);
        }
        log::debug!(
            "Question {} answered {:?}: {}",
            ticket.question + 1,
            selected,
            if verdict.is_correct { "correct" } else { "wrong" }
        );
        self.persist();

        Step::Answered { verdict, ticket }
    }

    /// Dwell elapsed for the answered question named by `ticket`
    pub fn advance(&mut self, ticket: Ticket) -> Step {
        if !self.is_current(ticket) {
            log::trace!("Dropping stale advance {:?}", ticket);
            return Step::Ignored;
        }
        let next = match self.session.as_mut() {
            Some(session) => session.advance(),
            None => None,
        };
        self.follow(next)
    }

    /// Drop the live question without scoring it
    pub fn skip(&mut self) -> Step {
        let next = match self.session.as_mut() {
            Some(session) => session.skip(),
            None => None,
        };
        if next.is_some() {
            log::debug!("Question skipped");
        }
        self.follow(next)
    }

    /// Leave a finished session and go back to the menu
    pub fn return_to_menu(&mut self) {
        self.session = None;
    }

    /// Discard the session in flight; its pending callbacks become stale
    pub fn abandon(&mut self) {
        if let Some(session) = self.session.take() {
            log::info!(
                "Session {:?} abandoned at question {}",
                session.id(),
                session.current_index() + 1
            );
        }
    }

    /// Zero the points, forget cleared categories and the boss win
    pub fn reset_progress(&mut self) {
        self.abandon();
        self.progress.reset();
        self.persist();
        log::info!("Progress reset");
    }

    /// Snapshot of the active question, if one is showing
    pub fn question_view(&self) -> Option<QuestionView<'_>> {
        let session = self.session.as_ref()?;
        let question: &Question = session.current_question()?;
        let verdict = match session.phase() {
            Phase::Answered(verdict) => Some(verdict),
            _ => None,
        };

        Some(QuestionView {
            title: session.category().title(),
            is_boss_battle: session.is_boss_battle(),
            number: session.current_index() + 1,
            total: session.total_questions(),
            prompt: question.prompt(),
            options: question.options(),
            seconds_remaining: session.seconds_remaining(),
            seconds_per_question: session.seconds_per_question(),
            total_points: self.progress.total_points(),
            correct_so_far: session.correct_count(),
            verdict,
        })
    }

    /// Summary of the finished session, if there is one
    pub fn summary(&self) -> Option<SessionSummary> {
        let session = self.session.as_ref()?;
        match session.phase() {
            Phase::Ended(outcome) => Some(SessionSummary {
                title: session.category().title(),
                outcome,
                correct: session.correct_count(),
                total: session.total_questions(),
                total_points: self.progress.total_points(),
            }),
            _ => None,
        }
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        self.session
            .as_ref()
            .map_or(false, |session| session.ticket() == ticket)
    }

    fn follow(&mut self, next: Option<Next>) -> Step {
        match next {
            None => Step::Ignored,
            Some(Next::Question(ticket)) => Step::Question(ticket),
            Some(Next::Finished(outcome)) => Step::Ended(self.finish(outcome)),
        }
    }

    /// Apply a finished session's outcome to progress
    fn finish(&mut self, outcome: Outcome) -> Outcome {
        let Some(session) = self.session.as_mut() else {
            return outcome;
        };

        let outcome = match outcome {
            Outcome::BossDefeated => {
                self.progress.mark_boss_defeated();
                outcome
            }
            Outcome::CategoryCleared { .. } => {
                let name = session.category().name();
                let newly_cleared = self.config.categories.iter().any(|c| c == name)
                    && self.progress.mark_cleared(name);
                Outcome::CategoryCleared { newly_cleared }
            }
            other => other,
        };
        session.conclude(outcome);

        log::info!(
            "Session {:?} ended: {:?} ({}/{} correct)",
            session.id(),
            outcome,
            session.correct_count(),
            session.total_questions()
        );

        if matches!(
            outcome,
            Outcome::BossDefeated
                | Outcome::CategoryCleared {
                    newly_cleared: true
                }
        ) {
            self.persist();
        }
        outcome
    }

    fn persist(&mut self) {
        if let Err(err) = self.store.save(&self.progress) {
            log::error!("Failed to save progress: {}", err);
        }
    }
}
