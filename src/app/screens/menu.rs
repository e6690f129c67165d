//! Menu screen implementation
//!
//! Category list with cleared markers, the boss entry, total points,
//! and the boss gate status line.

use crate::bank::QuestionSource;
use crate::config::persistence::ProgressStore;
use crate::quiz::Game;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// What a menu entry starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    Category { cleared: bool },
    Boss { unlocked: bool, defeated: bool },
}

/// One selectable line of the menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub name: String,
    pub kind: EntryKind,
}

impl MenuEntry {
    fn label(&self) -> String {
        match &self.kind {
            EntryKind::Category { cleared: true } => format!("{}  [cleared]", self.name),
            EntryKind::Category { cleared: false } => self.name.clone(),
            EntryKind::Boss { defeated: true, .. } => "Boss Battle  [defeated]".to_string(),
            EntryKind::Boss { unlocked: true, .. } => "Boss Battle".to_string(),
            EntryKind::Boss { unlocked: false, .. } => "Boss Battle  [locked]".to_string(),
        }
    }

    fn style(&self) -> Style {
        match &self.kind {
            EntryKind::Category { cleared: true } => Style::default().fg(Color::Green),
            EntryKind::Category { cleared: false } => Style::default().fg(Color::White),
            EntryKind::Boss { unlocked: true, .. } => {
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
            }
            EntryKind::Boss { unlocked: false, .. } => Style::default().fg(Color::DarkGray),
        }
    }
}

/// Start screen component with category selection
#[derive(Debug)]
pub struct MenuScreen {
    entries: Vec<MenuEntry>,
    selected_index: usize,
    list_state: ListState,
    total_points: u64,
    status: String,
    notice: Option<String>,
    confirm_reset: bool,
}

impl MenuScreen {
    /// Create a new menu screen
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        Self {
            entries: Vec::new(),
            selected_index: 0,
            list_state,
            total_points: 0,
            status: String::new(),
            notice: None,
            confirm_reset: false,
        }
    }

    /// Rebuild entries and status from the game
    pub fn refresh<B: QuestionSource, S: ProgressStore>(&mut self, game: &Game<B, S>) {
        let mut entries: Vec<MenuEntry> = game
            .categories()
            .iter()
            .map(|name| MenuEntry {
                name: name.clone(),
                kind: EntryKind::Category {
                    cleared: game.is_cleared(name),
                },
            })
            .collect();
        entries.push(MenuEntry {
            name: game.config().boss_category.clone(),
            kind: EntryKind::Boss {
                unlocked: game.boss_unlocked(),
                defeated: game.progress().boss_defeated(),
            },
        });

        self.entries = entries;
        if self.selected_index >= self.entries.len() {
            self.selected_index = 0;
        }
        self.list_state.select(Some(self.selected_index));
        self.total_points = game.progress().total_points();
        self.status = game.menu_message();
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    /// Get the currently selected entry
    pub fn selected_entry(&self) -> Option<&MenuEntry> {
        self.entries.get(self.selected_index)
    }

    /// Move selection up
    pub fn select_previous(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        if self.selected_index > 0 {
            self.selected_index -= 1;
        } else {
            self.selected_index = self.entries.len() - 1;
        }
        self.list_state.select(Some(self.selected_index));
    }

    /// Move selection down
    pub fn select_next(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        if self.selected_index < self.entries.len() - 1 {
            self.selected_index += 1;
        } else {
            self.selected_index = 0;
        }
        self.list_state.select(Some(self.selected_index));
    }

    /// Show a one-line notice under the menu
    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Ask for confirmation before resetting progress
    pub fn request_reset(&mut self) {
        self.confirm_reset = true;
        self.notice = Some("Reset all points and cleared categories? (y/n)".to_string());
    }

    /// Close the reset prompt. Returns whether one was open.
    pub fn finish_reset_prompt(&mut self) -> bool {
        let was_open = self.confirm_reset;
        self.confirm_reset = false;
        self.notice = None;
        was_open
    }

    pub fn is_confirming_reset(&self) -> bool {
        self.confirm_reset
    }

    /// Render the menu screen
    pub fn render(&mut self, f: &mut Frame) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Title and points
                Constraint::Min(8),    // Category list
                Constraint::Length(4), // Status and notice
                Constraint::Length(3), // Help text
            ])
            .split(size);

        self.render_title(f, chunks[0]);
        self.render_menu(f, chunks[1]);
        self.render_status(f, chunks[2]);
        self.render_help(f, chunks[3]);
    }

    /// Render the title section
    fn render_title(&self, f: &mut Frame, area: Rect) {
        let title_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(2)])
            .split(area);

        let title = Paragraph::new("QUIZBOSS")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            );
        f.render_widget(title, title_chunks[0]);

        let points = Paragraph::new(format!("Points: {}", self.total_points))
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center);
        f.render_widget(points, title_chunks[1]);
    }

    /// Render the category list
    fn render_menu(&mut self, f: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|entry| ListItem::new(entry.label()).style(entry.style()))
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Choose a Category"),
            )
            .highlight_style(Style::default().bg(Color::Cyan).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    /// Render the boss status and any notice
    fn render_status(&self, f: &mut Frame, area: Rect) {
        let mut lines = vec![Line::from(Span::styled(
            self.status.as_str(),
            Style::default().fg(Color::White),
        ))];
        if let Some(notice) = &self.notice {
            lines.push(Line::from(Span::styled(
                notice.as_str(),
                Style::default().fg(Color::Yellow),
            )));
        }

        let status = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(status, area);
    }

    /// Render the help text
    fn render_help(&self, f: &mut Frame, area: Rect) {
        let key = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let help_text = if self.confirm_reset {
            vec![Line::from(vec![
                Span::styled("Y", key),
                Span::raw(" Reset  "),
                Span::styled("N", key),
                Span::raw(" Cancel"),
            ])]
        } else {
            vec![Line::from(vec![
                Span::styled("↑↓", key),
                Span::raw(" Navigate  "),
                Span::styled("Enter", key),
                Span::raw(" Start  "),
                Span::styled("B", key),
                Span::raw(" Boss  "),
                Span::styled("R", key),
                Span::raw(" Reset  "),
                Span::styled("Q", key),
                Span::raw(" Quit"),
            ])]
        };

        let help = Paragraph::new(help_text)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            );

        f.render_widget(help, area);
    }
}

impl Default for MenuScreen {
    fn default() -> Self {
        Self::new()
    }
}
