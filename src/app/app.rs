//! Main application controller
//!
//! Owns the terminal, the game and its timer, and routes keys and timer
//! events into the game. The visible screen always follows the game state.

use crate::{
    app::{
        screens::{EntryKind, MenuScreen, QuestionScreen, ResultScreen},
        state::{AppState, NavigationAction, StateManager},
        tui::Tui,
    },
    bank::QuestionBank,
    config::persistence::FileProgressStore,
    error::user_friendly_message,
    quiz::{Game, GameState, QuestionTimer, Step, Ticket, TimerEvent},
    Result,
};
use ratatui::{
    layout::Alignment,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tokio::sync::mpsc;

/// Game wired to the on-disk question bank and progress file
pub type QuizGame = Game<QuestionBank, FileProgressStore>;

/// TUI application controller
pub struct App {
    /// Terminal UI handler
    tui: Tui,
    /// Application state manager
    state_manager: StateManager,
    game: QuizGame,
    timer: QuestionTimer,
    timer_rx: mpsc::Receiver<TimerEvent>,
    /// Screen components
    menu_screen: MenuScreen,
    question_screen: QuestionScreen,
    result_screen: ResultScreen,
}

impl App {
    /// Create a new application instance. Must be called inside a tokio runtime.
    pub fn new(game: QuizGame) -> Result<Self> {
        let (timer, timer_rx) = QuestionTimer::channel(game.config());
        let mut menu_screen = MenuScreen::new();
        menu_screen.refresh(&game);

        Ok(Self {
            tui: Tui::new()?,
            state_manager: StateManager::new(),
            game,
            timer,
            timer_rx,
            menu_screen,
            question_screen: QuestionScreen::new(),
            result_screen: ResultScreen::new(),
        })
    }

    /// Initialize the application and TUI
    pub fn init(&mut self) -> Result<()> {
        self.tui.init()?;
        Ok(())
    }

    /// Run the main application loop
    pub async fn run(&mut self) -> Result<()> {
        while !self.state_manager.should_quit() {
            while let Ok(event) = self.timer_rx.try_recv() {
                self.handle_timer_event(event);
            }
            self.draw()?;
            self.handle_key().await?;
        }
        self.timer.cancel();
        Ok(())
    }

    /// Leave the alternate screen and give the terminal back
    pub fn restore(&mut self) -> Result<()> {
        self.timer.cancel();
        self.tui.restore()?;
        Ok(())
    }

    pub fn game(&self) -> &QuizGame {
        &self.game
    }

    /// Draw the current screen
    fn draw(&mut self) -> Result<()> {
        let size_ok = self.tui.is_size_adequate()?;
        let Self {
            tui,
            state_manager,
            game,
            menu_screen,
            question_screen,
            result_screen,
            ..
        } = self;

        tui.draw(|f| {
            if !size_ok {
                let warning = Paragraph::new("Terminal too small. Resize to at least 60x20.")
                    .style(Style::default().fg(Color::Yellow))
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true })
                    .block(Block::default().borders(Borders::ALL));
                let area = f.size();
                f.render_widget(warning, area);
                return;
            }
            match state_manager.current_state() {
                AppState::Menu => menu_screen.render(f),
                AppState::Quiz => {
                    if let Some(view) = game.question_view() {
                        question_screen.render(f, &view);
                    }
                }
                AppState::Result => {
                    if let Some(summary) = game.summary() {
                        result_screen.render(f, &summary);
                    }
                }
            }
        })?;
        Ok(())
    }

    /// Wait briefly for a key and act on it
    async fn handle_key(&mut self) -> Result<()> {
        let Some(key) = self.tui.next_key()? else {
            // Let the timer tasks run between polls
            tokio::task::yield_now().await;
            return Ok(());
        };
        let action = StateManager::key_to_navigation(key);

        // Global key handling
        if action == NavigationAction::Quit {
            log::info!("Quit requested");
            self.state_manager.quit();
            return Ok(());
        }

        match self.state_manager.current_state() {
            AppState::Menu => self.handle_menu_action(action),
            AppState::Quiz => self.handle_quiz_action(action),
            AppState::Result => self.handle_result_action(action),
        }
        self.state_manager.sync(self.game.state());
        Ok(())
    }

    fn handle_menu_action(&mut self, action: NavigationAction) {
        if self.menu_screen.is_confirming_reset() {
            match action {
                NavigationAction::Yes => {
                    self.menu_screen.finish_reset_prompt();
                    self.timer.cancel();
                    self.game.reset_progress();
                    self.menu_screen.refresh(&self.game);
                    self.menu_screen.set_notice("Progress reset.");
                }
                NavigationAction::No | NavigationAction::Back => {
                    self.menu_screen.finish_reset_prompt();
                }
                _ => {}
            }
            return;
        }

        match action {
            NavigationAction::Up => self.menu_screen.select_previous(),
            NavigationAction::Down => self.menu_screen.select_next(),
            NavigationAction::Select => {
                let Some(entry) = self.menu_screen.selected_entry().cloned() else {
                    return;
                };
                let started = match entry.kind {
                    EntryKind::Category { .. } => self.game.start_session(&entry.name),
                    EntryKind::Boss { .. } => self.game.start_boss_battle(),
                };
                self.begin(started);
            }
            NavigationAction::Boss => {
                let started = self.game.start_boss_battle();
                self.begin(started);
            }
            NavigationAction::Reset => self.menu_screen.request_reset(),
            NavigationAction::Back => self.menu_screen.clear_notice(),
            _ => {}
        }
    }

    /// Start the countdown for a new session, or explain why it did not start
    fn begin(&mut self, started: Result<Ticket>) {
        match started {
            Ok(ticket) => {
                self.menu_screen.clear_notice();
                self.question_screen.reset();
                self.timer.start_countdown(ticket);
            }
            Err(err) => {
                log::warn!("Session not started: {}", err);
                self.menu_screen.set_notice(user_friendly_message(&err));
            }
        }
    }

    fn handle_quiz_action(&mut self, action: NavigationAction) {
        if self.question_screen.is_confirming_skip() {
            match action {
                NavigationAction::Yes | NavigationAction::Skip => {
                    self.question_screen.finish_skip_prompt();
                    let step = self.game.skip();
                    self.apply(step);
                }
                NavigationAction::No | NavigationAction::Back => {
                    self.question_screen.finish_skip_prompt();
                }
                _ => {}
            }
            return;
        }

        match action {
            NavigationAction::Up | NavigationAction::Left => {
                self.question_screen.highlight_previous()
            }
            NavigationAction::Down | NavigationAction::Right => {
                self.question_screen.highlight_next()
            }
            NavigationAction::Answer(index) => {
                let step = self.game.submit_answer(Some(index));
                self.apply(step);
            }
            NavigationAction::Select => {
                let step = self
                    .game
                    .submit_answer(Some(self.question_screen.highlighted()));
                self.apply(step);
            }
            NavigationAction::Skip => {
                if self.game.state() == GameState::InProgress {
                    self.question_screen.request_skip();
                }
            }
            NavigationAction::Back => {
                self.timer.cancel();
                self.game.abandon();
                self.menu_screen.refresh(&self.game);
            }
            _ => {}
        }
    }

    fn handle_result_action(&mut self, action: NavigationAction) {
        if matches!(action, NavigationAction::Select | NavigationAction::Back) {
            self.game.return_to_menu();
            self.menu_screen.refresh(&self.game);
        }
    }

    fn handle_timer_event(&mut self, event: TimerEvent) {
        let step = match event {
            TimerEvent::Tick(ticket) => self.game.tick(ticket),
            TimerEvent::Advance(ticket) => self.game.advance(ticket),
        };
        self.apply(step);
        self.state_manager.sync(self.game.state());
    }

    /// Schedule what a step calls for and refresh the affected screens
    fn apply(&mut self, step: Step) {
        self.timer.follow(&step);
        match step {
            Step::Question(_) => self.question_screen.reset(),
            Step::Answered { .. } => {
                // A timeout can land while the skip prompt is open
                self.question_screen.finish_skip_prompt();
            }
            Step::Ended(_) => self.menu_screen.refresh(&self.game),
            Step::Ticked { .. } | Step::Ignored => {}
        }
    }
}
