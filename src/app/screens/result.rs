//! Result screen implementation
//!
//! Shows how the session went: the outcome message, correct answers,
//! and total points. A boss win gets its own banner.

use crate::models::Outcome;
use crate::quiz::SessionSummary;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};

/// Results screen component
#[derive(Debug, Default)]
pub struct ResultScreen;

impl ResultScreen {
    /// Create a new result screen
    pub fn new() -> Self {
        Self
    }

    /// Render the result screen
    pub fn render(&self, f: &mut Frame, summary: &SessionSummary) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(5), // Outcome message
                Constraint::Min(5),    // Score table
                Constraint::Length(3), // Help text
            ])
            .split(size);

        self.render_title(f, chunks[0], summary);
        self.render_message(f, chunks[1], summary);
        self.render_score(f, chunks[2], summary);
        self.render_help(f, chunks[3]);
    }

    fn render_title(&self, f: &mut Frame, area: Rect, summary: &SessionSummary) {
        let (text, color) = match summary.outcome {
            Outcome::BossDefeated => ("VICTORY".to_string(), Color::Yellow),
            _ => (format!("{} - Results", summary.title), outcome_color(summary.outcome)),
        };
        let title = Paragraph::new(text)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            );
        f.render_widget(title, area);
    }

    fn render_message(&self, f: &mut Frame, area: Rect, summary: &SessionSummary) {
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                summary.outcome.message(),
                Style::default()
                    .fg(outcome_color(summary.outcome))
                    .add_modifier(Modifier::BOLD),
            )),
        ];
        match summary.outcome {
            Outcome::CategoryCleared {
                newly_cleared: true,
            } => lines.push(Line::from("Category cleared!")),
            Outcome::BossDefeated => {
                lines.push(Line::from("Peace returns to the land. You are the hero!"))
            }
            _ => {}
        }

        let message = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(message, area);
    }

    fn render_score(&self, f: &mut Frame, area: Rect, summary: &SessionSummary) {
        let correct = format!("{} / {}", summary.correct, summary.total);
        let points = summary.total_points.to_string();
        let rows = vec![
            Row::new(vec!["Correct answers:", correct.as_str()]),
            Row::new(vec!["Total points:", points.as_str()]),
        ];

        let table = Table::new(rows, [Constraint::Length(20), Constraint::Min(10)])
            .block(
                Block::default()
                    .title("Score")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .column_spacing(2);
        f.render_widget(table, area);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let help = Paragraph::new(Line::from(vec![
            Span::styled(
                "Enter",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Back to Menu"),
        ]))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );
        f.render_widget(help, area);
    }
}

fn outcome_color(outcome: Outcome) -> Color {
    match outcome {
        Outcome::BossDefeated | Outcome::CategoryCleared { .. } => Color::Green,
        Outcome::Partial => Color::Yellow,
        Outcome::BossLost | Outcome::Failure => Color::Red,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_colors() {
        assert_eq!(outcome_color(Outcome::Partial), Color::Yellow);
        assert_eq!(outcome_color(Outcome::Failure), Color::Red);
        assert_eq!(
            outcome_color(Outcome::CategoryCleared {
                newly_cleared: false
            }),
            Color::Green
        );
    }
}
