//! # TUI Components
//!
//! All UI pieces of the terminal interface.
//!
//! ## Stateless Components (props only)
//!
//! - `TitleBar`: loaded count, active filters, fetch indicator
//! - `Detail`: a single character
//! - `StatusView`: first-load spinner or failure message
//!
//! ## Stateful Components (event-driven)
//!
//! - `SearchBar`: text field, emits the whole query on every edit
//! - `CharacterList`: scrollable rows, reports when the end is reached
//! - `FilterSheet`: status/species overlay
//!
//! Stateful components keep their persistent state in `TuiState` and are
//! wrapped by a short-lived render struct each frame.

use ratatui::style::Color;

use crate::catalog::Status;

pub mod character_list;
pub mod detail;
pub mod filter_sheet;
pub mod search_bar;
pub mod status_view;
mod title_bar;

pub use character_list::{CharacterList, CharacterListState, ListEvent};
pub use detail::Detail;
pub use filter_sheet::{FilterEvent, FilterSheet, FilterSheetState};
pub use search_bar::{SearchBar, SearchEvent};
pub use status_view::StatusView;
pub use title_bar::TitleBar;

/// Colour used wherever a status is drawn.
pub fn status_color(status: Status) -> Color {
    match status {
        Status::Alive => Color::Green,
        Status::Dead => Color::Red,
        Status::Unknown => Color::Gray,
    }
}
