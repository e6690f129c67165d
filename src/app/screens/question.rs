//! Question screen implementation
//!
//! Shows the active question, its four options, the countdown gauge and
//! the running score. After an answer the correct option is marked green
//! and a wrong pick red until the game moves on.

use crate::quiz::QuestionView;
use crate::OPTIONS_PER_QUESTION;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Question screen component
#[derive(Debug, Default)]
pub struct QuestionScreen {
    highlighted: usize,
    confirm_skip: bool,
}

impl QuestionScreen {
    /// Create a new question screen
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget per-question UI state when a new question appears
    pub fn reset(&mut self) {
        self.highlighted = 0;
        self.confirm_skip = false;
    }

    /// Option under the cursor
    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn highlight_next(&mut self) {
        self.highlighted = (self.highlighted + 1) % OPTIONS_PER_QUESTION;
    }

    pub fn highlight_previous(&mut self) {
        self.highlighted = (self.highlighted + OPTIONS_PER_QUESTION - 1) % OPTIONS_PER_QUESTION;
    }

    /// Ask for confirmation before skipping
    pub fn request_skip(&mut self) {
        self.confirm_skip = true;
    }

    /// Close the skip prompt. Returns whether one was open.
    pub fn finish_skip_prompt(&mut self) -> bool {
        std::mem::replace(&mut self.confirm_skip, false)
    }

    pub fn is_confirming_skip(&self) -> bool {
        self.confirm_skip
    }

    /// Render the question screen
    pub fn render(&self, f: &mut Frame, view: &QuestionView<'_>) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Countdown
                Constraint::Min(4),    // Prompt
                Constraint::Length(6), // Options
                Constraint::Length(3), // Help text
            ])
            .split(size);

        self.render_title(f, chunks[0], view);
        self.render_countdown(f, chunks[1], view);
        self.render_prompt(f, chunks[2], view);
        self.render_options(f, chunks[3], view);
        self.render_help(f, chunks[4], view);
    }

    fn render_title(&self, f: &mut Frame, area: Rect, view: &QuestionView<'_>) {
        let color = if view.is_boss_battle {
            Color::Red
        } else {
            Color::Cyan
        };
        let title = Paragraph::new(format!(
            "{}  -  Question {}/{}  -  Points: {}",
            view.title, view.number, view.total, view.total_points
        ))
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
        f.render_widget(title, area);
    }

    fn render_countdown(&self, f: &mut Frame, area: Rect, view: &QuestionView<'_>) {
        let ratio = if view.seconds_per_question == 0 {
            0.0
        } else {
            f64::from(view.seconds_remaining) / f64::from(view.seconds_per_question)
        };
        let color = match view.seconds_remaining {
            0..=3 => Color::Red,
            4..=6 => Color::Yellow,
            _ => Color::Green,
        };

        let gauge = Gauge::default()
            .block(Block::default().title("Time").borders(Borders::ALL))
            .gauge_style(Style::default().fg(color))
            .ratio(ratio.clamp(0.0, 1.0))
            .label(format!("{}s", view.seconds_remaining));
        f.render_widget(gauge, area);
    }

    fn render_prompt(&self, f: &mut Frame, area: Rect, view: &QuestionView<'_>) {
        let prompt = Paragraph::new(view.prompt)
            .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(prompt, area);
    }

    fn render_options(&self, f: &mut Frame, area: Rect, view: &QuestionView<'_>) {
        let items: Vec<ListItem> = view
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let marker = if view.verdict.is_none() && i == self.highlighted {
                    ">> "
                } else {
                    "   "
                };
                ListItem::new(format!("{}{}. {}", marker, i + 1, option))
                    .style(option_style(view, i, self.highlighted))
            })
            .collect();

        let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Options"));
        f.render_widget(list, area);
    }

    fn render_help(&self, f: &mut Frame, area: Rect, view: &QuestionView<'_>) {
        let key = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let line = if self.confirm_skip {
            Line::from(vec![
                Span::raw("Skip this question? "),
                Span::styled("Y", key),
                Span::raw(" Skip  "),
                Span::styled("N", key),
                Span::raw(" Keep playing"),
            ])
        } else if let Some(verdict) = view.verdict {
            let (text, color) = match (verdict.is_correct, verdict.selected) {
                (true, _) => ("Correct!", Color::Green),
                (false, None) => ("Time's up!", Color::Red),
                (false, Some(_)) => ("Wrong!", Color::Red),
            };
            Line::from(Span::styled(
                text,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(vec![
                Span::styled("1-4", key),
                Span::raw(" Answer  "),
                Span::styled("↑↓ Enter", key),
                Span::raw(" Choose  "),
                Span::styled("S", key),
                Span::raw(" Skip  "),
                Span::styled("Esc", key),
                Span::raw(" Menu"),
            ])
        };

        let help = Paragraph::new(line).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );
        f.render_widget(help, area);
    }
}

fn option_style(view: &QuestionView<'_>, index: usize, highlighted: usize) -> Style {
    match view.verdict {
        Some(verdict) if index == verdict.correct_index => Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD),
        Some(verdict) if verdict.selected == Some(index) => {
            Style::default().fg(Color::Black).bg(Color::Red)
        }
        Some(_) => Style::default().fg(Color::DarkGray),
        None if index == highlighted => Style::default().fg(Color::Black).bg(Color::Cyan),
        None => Style::default().fg(Color::White),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Verdict;

    fn view<'a>(options: &'a [String; OPTIONS_PER_QUESTION], verdict: Option<Verdict>) -> QuestionView<'a> {
        QuestionView {
            title: "Science Quiz".to_string(),
            is_boss_battle: false,
            number: 1,
            total: 5,
            prompt: "prompt",
            options,
            seconds_remaining: 10,
            seconds_per_question: 10,
            total_points: 0,
            correct_so_far: 0,
            verdict,
        }
    }

    #[test]
    fn test_highlight_wraps() {
        let mut screen = QuestionScreen::new();
        screen.highlight_previous();
        assert_eq!(screen.highlighted(), 3);
        screen.highlight_next();
        assert_eq!(screen.highlighted(), 0);
    }

    #[test]
    fn test_skip_prompt_and_reset() {
        let mut screen = QuestionScreen::new();
        screen.highlight_next();
        screen.request_skip();
        assert!(screen.is_confirming_skip());

        screen.reset();
        assert_eq!(screen.highlighted(), 0);
        assert!(!screen.finish_skip_prompt());
    }

    #[test]
    fn test_option_styles_after_wrong_answer() {
        let options = ["a", "b", "c", "d"].map(String::from);
        let verdict = Verdict {
            selected: Some(2),
            correct_index: 1,
            is_correct: false,
        };
        let view = view(&options, Some(verdict));

        assert_eq!(option_style(&view, 1, 0).bg, Some(Color::Green));
        assert_eq!(option_style(&view, 2, 0).bg, Some(Color::Red));
        assert_eq!(option_style(&view, 0, 0).fg, Some(Color::DarkGray));
    }

    #[test]
    fn test_option_styles_while_live() {
        let options = ["a", "b", "c", "d"].map(String::from);
        let view = view(&options, None);
        assert_eq!(option_style(&view, 3, 3).bg, Some(Color::Cyan));
        assert_eq!(option_style(&view, 0, 3).bg, None);
    }
}
