//! # Filter Sheet Component
//!
//! Overlay for choosing the server-side status and species filters. Opened
//! with Ctrl+F. Two sections, each starting with an "All" entry; Tab moves
//! between them and Enter applies both choices at once.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `FilterSheetState` lives in `TuiState` while the sheet is open
//! - `FilterSheet` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding};

use crate::catalog::{Filters, Species, Status};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Status,
    Species,
}

/// Events emitted by the filter sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterEvent {
    Apply(Filters),
    Dismiss,
}

/// Persistent state for the filter sheet overlay.
///
/// Row 0 of each section is "All"; row `i + 1` is `Status::ALL[i]` or
/// `Species::ALL[i]`.
pub struct FilterSheetState {
    pub section: Section,
    status_list: ListState,
    species_list: ListState,
}

impl FilterSheetState {
    /// Opens the sheet with the current filters preselected.
    pub fn new(current: Filters) -> Self {
        let status_row = current
            .status
            .and_then(|s| Status::ALL.iter().position(|v| *v == s))
            .map_or(0, |i| i + 1);
        let species_row = current
            .species
            .and_then(|s| Species::ALL.iter().position(|v| *v == s))
            .map_or(0, |i| i + 1);
        Self {
            section: Section::Status,
            status_list: ListState::default().with_selected(Some(status_row)),
            species_list: ListState::default().with_selected(Some(species_row)),
        }
    }

    /// The filters the sheet would apply right now.
    pub fn selection(&self) -> Filters {
        let status = self
            .status_list
            .selected()
            .and_then(|row| row.checked_sub(1))
            .and_then(|i| Status::ALL.get(i).copied());
        let species = self
            .species_list
            .selected()
            .and_then(|row| row.checked_sub(1))
            .and_then(|i| Species::ALL.get(i).copied());
        Filters::new(status, species)
    }

    fn active(&mut self) -> (&mut ListState, usize) {
        match self.section {
            Section::Status => (&mut self.status_list, Status::ALL.len() + 1),
            Section::Species => (&mut self.species_list, Species::ALL.len() + 1),
        }
    }
}

impl EventHandler for FilterSheetState {
    type Event = FilterEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::Escape => Some(FilterEvent::Dismiss),
            TuiEvent::Submit => Some(FilterEvent::Apply(self.selection())),
            TuiEvent::NextSection => {
                self.section = match self.section {
                    Section::Status => Section::Species,
                    Section::Species => Section::Status,
                };
                None
            }
            TuiEvent::CursorUp => {
                let (list, _) = self.active();
                let row = list.selected().unwrap_or(0).saturating_sub(1);
                list.select(Some(row));
                None
            }
            TuiEvent::CursorDown => {
                let (list, len) = self.active();
                let row = (list.selected().unwrap_or(0) + 1).min(len - 1);
                list.select(Some(row));
                None
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the filter sheet overlay.
pub struct FilterSheet<'a> {
    state: &'a mut FilterSheetState,
}

impl<'a> FilterSheet<'a> {
    pub fn new(state: &'a mut FilterSheetState) -> Self {
        Self { state }
    }
}

impl Component for FilterSheet<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(60, 70, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Filters ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Tab Section  Enter Apply  Esc Back ").centered())
            .padding(Padding::horizontal(1));
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let [status_area, species_area] =
            Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
                .areas(inner);

        let status_labels = Status::ALL.iter().map(|s| s.label().to_string());
        let species_labels = Species::ALL.iter().map(|s| s.to_string());

        let status_active = self.state.section == Section::Status;
        render_section(
            frame,
            status_area,
            "Status",
            status_labels,
            status_active,
            &mut self.state.status_list,
        );
        render_section(
            frame,
            species_area,
            "Species",
            species_labels,
            !status_active,
            &mut self.state.species_list,
        );
    }
}

fn render_section(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    labels: impl Iterator<Item = String>,
    active: bool,
    list_state: &mut ListState,
) {
    let items: Vec<ListItem> = std::iter::once("All".to_string())
        .chain(labels)
        .map(|label| ListItem::new(Span::raw(label)))
        .collect();

    let (title_style, highlight) = if active {
        (
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        )
    } else {
        (
            Style::default().fg(Color::DarkGray),
            Style::default().fg(Color::Cyan),
        )
    };

    let list = List::new(items)
        .block(Block::default().title(Span::styled(title.to_string(), title_style)))
        .highlight_style(highlight)
        .highlight_symbol("› ");
    frame.render_stateful_widget(list, area, list_state);
}

/// A rect centered in `area`, sized as a percentage of it.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(area);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(middle);
    center
}
