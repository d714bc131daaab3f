//! # CharacterList Component
//!
//! Scrollable list of fetched characters, one row each.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `CharacterListState` lives in `TuiState` (selection, scroll offset)
//! - `CharacterList` is created each frame with borrowed state and props
//!
//! Rendering records whether the last row is on screen. The event loop uses
//! that to trigger the next page, the way a mobile list loads more when it is
//! scrolled to the bottom.

use std::collections::HashSet;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::catalog::Character;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::status_color;
use crate::tui::event::TuiEvent;

/// Rows moved by PageUp / PageDown.
const PAGE_STEP: usize = 10;
/// Below this many rows the "scroll for more" hint is not worth showing.
const HINT_MIN_ITEMS: usize = 20;
/// Highlight background for items matching the active search.
const MATCH_BG: Color = Color::Rgb(18, 52, 86);

#[derive(Debug, Clone, PartialEq)]
pub enum ListEvent {
    /// Selection moved onto the last row.
    ReachedEnd,
}

/// Persistent state for the character list.
#[derive(Debug, Default)]
pub struct CharacterListState {
    pub list_state: ListState,
    /// Number of rows at the last render.
    pub len: usize,
    /// True when the last row was visible at the last render.
    pub at_bottom: bool,
}

impl CharacterListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    /// Back to the top, e.g. after a filter change or a new search.
    pub fn reset(&mut self) {
        self.list_state = ListState::default();
        self.at_bottom = false;
    }

    fn select(&mut self, index: usize) -> Option<ListEvent> {
        if self.len == 0 {
            self.list_state.select(None);
            return None;
        }
        let index = index.min(self.len - 1);
        self.list_state.select(Some(index));
        (index == self.len - 1).then_some(ListEvent::ReachedEnd)
    }
}

impl EventHandler for CharacterListState {
    type Event = ListEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        let current = self.list_state.selected();
        match event {
            TuiEvent::CursorUp => {
                self.select(current.map(|i| i.saturating_sub(1)).unwrap_or(0));
                None
            }
            TuiEvent::CursorDown => self.select(current.map(|i| i + 1).unwrap_or(0)),
            TuiEvent::PageUp => {
                self.select(current.unwrap_or(0).saturating_sub(PAGE_STEP));
                None
            }
            TuiEvent::PageDown => self.select(current.map(|i| i + PAGE_STEP).unwrap_or(0)),
            TuiEvent::Home => {
                self.select(0);
                None
            }
            TuiEvent::End => self.select(self.len.saturating_sub(1)),
            _ => None,
        }
    }
}

/// Transient render wrapper.
pub struct CharacterList<'a> {
    state: &'a mut CharacterListState,
    characters: &'a [Character],
    highlighted: &'a HashSet<u32>,
    is_paginating: bool,
    end_of_data: bool,
}

impl<'a> CharacterList<'a> {
    pub fn new(
        state: &'a mut CharacterListState,
        characters: &'a [Character],
        highlighted: &'a HashSet<u32>,
        is_paginating: bool,
        end_of_data: bool,
    ) -> Self {
        Self {
            state,
            characters,
            highlighted,
            is_paginating,
            end_of_data,
        }
    }

    fn footer(&self) -> Option<Line<'static>> {
        if self.is_paginating {
            return Some(Line::from(Span::styled(
                "Loading more…",
                Style::default().fg(Color::Yellow),
            )));
        }
        let scrolled = self.state.list_state.offset() > 0;
        if !self.end_of_data && self.characters.len() > HINT_MIN_ITEMS && scrolled {
            return Some(Line::from(Span::styled(
                "Scroll to load more…",
                Style::default().fg(Color::DarkGray),
            )));
        }
        None
    }

    fn row(&self, character: &Character, width: usize) -> ListItem<'static> {
        let marker = Span::styled("● ", Style::default().fg(status_color(character.status)));
        let detail = format!("  {} · {}", character.species, character.status);
        let name_width = width.saturating_sub(2 + detail.width());
        let name = Span::styled(
            truncate_to_width(&character.name, name_width),
            Style::default().add_modifier(Modifier::BOLD),
        );
        let detail = Span::styled(detail, Style::default().fg(Color::Gray));

        let mut item = ListItem::new(Line::from(vec![marker, name, detail]));
        if self.highlighted.contains(&character.id) {
            item = item.style(Style::default().bg(MATCH_BG));
        }
        item
    }
}

impl Component for CharacterList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.len = self.characters.len();

        if self.characters.is_empty() {
            self.state.list_state.select(None);
            self.state.at_bottom = false;
            let empty = Paragraph::new("No characters found.")
                .alignment(Alignment::Center)
                .block(Block::bordered());
            frame.render_widget(empty, area);
            return;
        }

        if self.state.list_state.selected().is_none() {
            self.state.list_state.select(Some(0));
        } else if let Some(selected) = self.state.list_state.selected()
            && selected >= self.characters.len()
        {
            self.state.list_state.select(Some(self.characters.len() - 1));
        }

        let footer = self.footer();
        let [list_area, footer_area] = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(u16::from(footer.is_some())),
        ])
        .areas(area);

        let inner_width = list_area.width.saturating_sub(2) as usize;
        let items: Vec<ListItem> = self
            .characters
            .iter()
            .map(|c| self.row(c, inner_width))
            .collect();

        let title = format!("Characters ({})", self.characters.len());
        let list = List::new(items)
            .block(Block::bordered().title(title))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_stateful_widget(list, list_area, &mut self.state.list_state);

        let visible_rows = list_area.height.saturating_sub(2) as usize;
        self.state.at_bottom = self.state.list_state.offset() + visible_rows >= self.characters.len();

        if let Some(footer) = footer {
            frame.render_widget(
                Paragraph::new(footer).alignment(Alignment::Center),
                footer_area,
            );
        }
    }
}

/// Cuts `text` to at most `max_width` terminal columns, marking the cut with `…`.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
