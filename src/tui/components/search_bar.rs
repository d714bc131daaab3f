//! # SearchBar Component
//!
//! Single-line text field above the list. Every edit is reported so the
//! parent can re-run the client-side search immediately.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const PLACEHOLDER: &str = "Search characters…";

#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    Changed(String),
}

#[derive(Debug, Default)]
pub struct SearchBar {
    pub buffer: String,
    /// Prop: whether this field currently owns the terminal cursor.
    pub focused: bool,
}

impl SearchBar {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            focused: true,
        }
    }

    /// Clears the buffer, reporting a change only if there was text.
    pub fn clear(&mut self) -> Option<SearchEvent> {
        if self.buffer.is_empty() {
            return None;
        }
        self.buffer.clear();
        Some(SearchEvent::Changed(String::new()))
    }
}

impl EventHandler for SearchBar {
    type Event = SearchEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.push(*c);
                Some(SearchEvent::Changed(self.buffer.clone()))
            }
            TuiEvent::Paste(text) => {
                // Single-line field.
                let line = text.lines().next().unwrap_or("");
                if line.is_empty() {
                    return None;
                }
                self.buffer.push_str(line);
                Some(SearchEvent::Changed(self.buffer.clone()))
            }
            TuiEvent::Backspace => self
                .buffer
                .pop()
                .map(|_| SearchEvent::Changed(self.buffer.clone())),
            _ => None,
        }
    }
}

impl Component for SearchBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = if self.buffer.is_empty() {
            Line::from(Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray)))
        } else {
            Line::from(self.buffer.as_str())
        };

        let paragraph = Paragraph::new(line).block(Block::bordered().title("Search"));
        frame.render_widget(paragraph, area);

        if self.focused && area.width > 2 && area.height > 2 {
            let max_x = area.x + area.width - 2;
            let x = (area.x + 1 + self.buffer.width() as u16).min(max_x);
            frame.set_cursor_position(Position::new(x, area.y + 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_reports_full_text() {
        let mut bar = SearchBar::new();
        assert_eq!(
            bar.handle_event(&TuiEvent::InputChar('r')),
            Some(SearchEvent::Changed("r".into()))
        );
        assert_eq!(
            bar.handle_event(&TuiEvent::InputChar('i')),
            Some(SearchEvent::Changed("ri".into()))
        );
        assert_eq!(
            bar.handle_event(&TuiEvent::Backspace),
            Some(SearchEvent::Changed("r".into()))
        );
    }

    #[test]
    fn test_backspace_on_empty_is_silent() {
        let mut bar = SearchBar::new();
        assert_eq!(bar.handle_event(&TuiEvent::Backspace), None);
    }

    #[test]
    fn test_paste_keeps_first_line() {
        let mut bar = SearchBar::new();
        let event = bar.handle_event(&TuiEvent::Paste("rick\nmorty".into()));
        assert_eq!(event, Some(SearchEvent::Changed("rick".into())));
    }

    #[test]
    fn test_clear() {
        let mut bar = SearchBar::new();
        assert_eq!(bar.clear(), None);
        bar.buffer = "summer".into();
        assert_eq!(bar.clear(), Some(SearchEvent::Changed(String::new())));
        assert!(bar.buffer.is_empty());
    }

    #[test]
    fn test_ignores_navigation() {
        let mut bar = SearchBar::new();
        assert_eq!(bar.handle_event(&TuiEvent::CursorDown), None);
        assert_eq!(bar.handle_event(&TuiEvent::Submit), None);
    }
}
