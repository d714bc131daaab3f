//! # Detail Component
//!
//! Full-screen view of a single character, opened with Enter from the list.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph, Wrap};

use crate::catalog::Character;
use crate::tui::component::Component;
use crate::tui::components::status_color;

pub struct Detail<'a> {
    pub character: &'a Character,
}

impl<'a> Detail<'a> {
    pub fn new(character: &'a Character) -> Self {
        Self { character }
    }
}

impl Component for Detail<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let c = self.character;
        let label = Style::default().fg(Color::DarkGray);

        let lines = vec![
            Line::from(Span::styled(
                c.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(vec![
                Span::styled("Status   ", label),
                Span::styled(c.status.label(), Style::default().fg(status_color(c.status))),
            ]),
            Line::from(vec![Span::styled("Species  ", label), Span::raw(c.species.clone())]),
            Line::from(vec![Span::styled("ID       ", label), Span::raw(c.id.to_string())]),
            Line::from(vec![Span::styled("Image    ", label), Span::raw(c.image.clone())]),
        ];

        let block = Block::bordered()
            .title(" Character ")
            .title_bottom(Line::from(" Esc to go back ").centered())
            .padding(Padding::uniform(1));
        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}
