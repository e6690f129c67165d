//! Application state management
//!
//! Tracks which screen is showing and maps keyboard events to actions.
//! The screen follows the game: no session shows the menu, a live or
//! answered question shows the quiz, a finished session shows the result.

use crate::quiz::GameState;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Application screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Category menu with points and boss status
    #[default]
    Menu,
    /// Question with options and countdown
    Quiz,
    /// Session result
    Result,
}

impl From<GameState> for AppState {
    fn from(state: GameState) -> Self {
        match state {
            GameState::Idle => AppState::Menu,
            GameState::InProgress | GameState::Answered => AppState::Quiz,
            GameState::Ended => AppState::Result,
        }
    }
}

/// Actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationAction {
    /// Move selection up (arrow up, k)
    Up,
    /// Move selection down (arrow down, j)
    Down,
    /// Move selection left (arrow left, h)
    Left,
    /// Move selection right (arrow right, l)
    Right,
    /// Confirm selection (Enter, Space)
    Select,
    /// Go back/cancel (Esc, Backspace)
    Back,
    /// Pick an answer directly (1-4)
    Answer(usize),
    /// Skip the current question (s)
    Skip,
    /// Challenge the boss (b)
    Boss,
    /// Reset progress (r)
    Reset,
    /// Accept a confirmation prompt (y)
    Yes,
    /// Decline a confirmation prompt (n)
    No,
    /// Quit application (q, Q, Ctrl+C)
    Quit,
    /// No action
    None,
}

/// Application state manager
#[derive(Debug, Default)]
pub struct StateManager {
    current_state: AppState,
    previous_state: Option<AppState>,
    should_quit: bool,
}

impl StateManager {
    /// Create a new state manager starting at the menu
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current application state
    pub fn current_state(&self) -> AppState {
        self.current_state
    }

    /// Get the previous state if available
    pub fn previous_state(&self) -> Option<AppState> {
        self.previous_state
    }

    /// Check if the application should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Set the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Transition to a new state
    pub fn transition_to(&mut self, new_state: AppState) {
        if new_state != self.current_state {
            self.previous_state = Some(self.current_state);
            self.current_state = new_state;
        }
    }

    /// Show the screen that matches the game state
    pub fn sync(&mut self, game_state: GameState) {
        self.transition_to(AppState::from(game_state));
    }

    /// Convert keyboard event to navigation action
    pub fn key_to_navigation(key: KeyEvent) -> NavigationAction {
        match key.code {
            // Quit keys
            KeyCode::Char('q') | KeyCode::Char('Q') => NavigationAction::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                NavigationAction::Quit
            }

            // Navigation keys
            KeyCode::Up | KeyCode::Char('k') => NavigationAction::Up,
            KeyCode::Down | KeyCode::Char('j') => NavigationAction::Down,
            KeyCode::Left | KeyCode::Char('h') => NavigationAction::Left,
            KeyCode::Right | KeyCode::Char('l') => NavigationAction::Right,

            // Selection and confirmation
            KeyCode::Enter | KeyCode::Char(' ') => NavigationAction::Select,
            KeyCode::Char('y') | KeyCode::Char('Y') => NavigationAction::Yes,
            KeyCode::Char('n') | KeyCode::Char('N') => NavigationAction::No,

            // Back/cancel
            KeyCode::Esc | KeyCode::Backspace => NavigationAction::Back,

            // Game actions
            KeyCode::Char(c @ '1'..='4') => NavigationAction::Answer(c as usize - '1' as usize),
            KeyCode::Char('s') | KeyCode::Char('S') => NavigationAction::Skip,
            KeyCode::Char('b') | KeyCode::Char('B') => NavigationAction::Boss,
            KeyCode::Char('r') | KeyCode::Char('R') => NavigationAction::Reset,

            _ => NavigationAction::None,
        }
    }
}
