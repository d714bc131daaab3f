//! # TitleBar Component
//!
//! Top status bar: how many characters are loaded, which filters are active,
//! and whether a fetch is running.
//!
//! Purely presentational. Every field is a prop set by `draw_ui` each frame.

use crate::catalog::Filters;
use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

pub struct TitleBar {
    pub count: usize,
    pub filters: Filters,
    /// Shown after the filters when non-empty (e.g. "Loading more…").
    pub status_message: String,
}

impl TitleBar {
    pub fn new(count: usize, filters: Filters, status_message: String) -> Self {
        Self {
            count,
            filters,
            status_message,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let base = format!(
            "Rickdex ({} loaded) | filters: {}",
            self.count, self.filters
        );
        let title_text = if self.status_message.is_empty() {
            base
        } else {
            format!("{base} | {}", self.status_message)
        };

        frame.render_widget(Span::raw(title_text), area);
    }
}
