//! # Status View
//!
//! Fills the list area while there is nothing to list yet: a spinner during
//! the first load, or the failure message with a retry hint.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::catalog::FailureKind;
use crate::tui::component::Component;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub enum StatusView<'a> {
    Loading { spinner_frame: usize },
    Failed { message: &'a str },
}

impl StatusView<'_> {
    fn lines(&self) -> Vec<Line<'static>> {
        match self {
            StatusView::Loading { spinner_frame } => {
                let glyph = SPINNER[spinner_frame % SPINNER.len()];
                vec![Line::from(Span::styled(
                    format!("{glyph} Loading characters…"),
                    Style::default().fg(Color::Yellow),
                ))]
            }
            StatusView::Failed { message } => {
                let kind = FailureKind::of(message);
                vec![
                    Line::from(Span::styled(
                        kind.heading(),
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )),
                    Line::default(),
                    Line::from(message.to_string()),
                    Line::default(),
                    Line::from(Span::styled(
                        "Press Ctrl+R to retry",
                        Style::default().fg(Color::DarkGray),
                    )),
                ]
            }
        }
    }
}

impl Component for StatusView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = self.lines();
        let block = Block::bordered();
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let height = lines.len() as u16;
        let [_, body, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .areas(inner);

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, body);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(view: &mut StatusView) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal.draw(|f| view.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_loading_cycles_spinner() {
        let first = render(&mut StatusView::Loading { spinner_frame: 0 });
        let wrapped = render(&mut StatusView::Loading {
            spinner_frame: SPINNER.len(),
        });
        assert!(first.contains("Loading characters"));
        assert_eq!(first, wrapped);
    }

    #[test]
    fn test_failure_shows_heading_and_retry_hint() {
        let text = render(&mut StatusView::Failed {
            message: "No internet connection",
        });
        assert!(text.contains("Offline"));
        assert!(text.contains("No internet connection"));
        assert!(text.contains("Ctrl+R"));

        let text = render(&mut StatusView::Failed {
            message: "Server error: 500 Internal Server Error",
        });
        assert!(text.contains("Catalog unavailable"));
    }
}
