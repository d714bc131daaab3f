//! # Session State
//!
//! Everything one browsing session knows, owned by exactly one engine.
//!
//! ```text
//! Session
//! ├── characters: Vec<Character>   // accumulated, in fetch order
//! ├── page: u32                    // next page to request
//! ├── end_of_data: bool            // remote has nothing more for these filters
//! ├── is_paginating: bool          // a fetch is in flight
//! ├── is_fetching: bool            // second guard, cleared alongside
//! ├── ticket: u64                  // id of the latest issued fetch
//! ├── filters: Filters             // remembered across pagination
//! ├── query: String                // active search text
//! ├── highlighted: HashSet<u32>    // ids matching a non-blank query
//! └── ui: UiState                  // what the presentation layer sees
//! ```
//!
//! State changes only happen through `update(session, action)` in action.rs.

use std::collections::HashSet;

use crate::catalog::{Character, Filters};

/// Render-ready view of the session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UiState {
    /// Nothing to show yet.
    #[default]
    Loading,
    Loaded(Vec<Character>),
    Failed(String),
}

impl UiState {
    pub fn characters(&self) -> &[Character] {
        match self {
            UiState::Loaded(characters) => characters,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    pub characters: Vec<Character>,
    pub page: u32,
    pub end_of_data: bool,
    pub is_paginating: bool,
    pub is_fetching: bool,
    pub ticket: u64,
    pub filters: Filters,
    pub query: String,
    pub highlighted: HashSet<u32>,
    pub ui: UiState,
}

impl Session {
    pub fn new(filters: Filters) -> Self {
        Self {
            page: 1,
            filters,
            ..Default::default()
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.is_paginating || self.is_fetching
    }

    /// Back to page one with nothing accumulated. Filters, query and
    /// highlights survive.
    pub fn reset(&mut self) {
        self.characters.clear();
        self.page = 1;
        self.end_of_data = false;
    }

    pub fn release_guards(&mut self) {
        self.is_paginating = false;
        self.is_fetching = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::character;

    #[test]
    fn test_session_new_defaults() {
        let session = Session::new(Filters::default());
        assert_eq!(session.page, 1);
        assert!(session.characters.is_empty());
        assert!(!session.end_of_data);
        assert!(!session.is_in_flight());
        assert_eq!(session.ui, UiState::Loading);
    }

    #[test]
    fn test_reset_keeps_filters_and_query() {
        let filters = Filters::new(Some(crate::catalog::Status::Dead), None);
        let mut session = Session::new(filters);
        session.characters.push(character(1, "Rick Sanchez"));
        session.page = 4;
        session.end_of_data = true;
        session.query = "rick".into();

        session.reset();

        assert!(session.characters.is_empty());
        assert_eq!(session.page, 1);
        assert!(!session.end_of_data);
        assert_eq!(session.filters, filters);
        assert_eq!(session.query, "rick");
    }

    #[test]
    fn test_ui_state_characters_only_when_loaded() {
        assert!(UiState::Loading.characters().is_empty());
        assert!(UiState::Failed("x".into()).characters().is_empty());
        let loaded = UiState::Loaded(vec![character(7, "Morty Smith")]);
        assert_eq!(loaded.characters().len(), 1);
    }
}
