//! # Actions
//!
//! Everything that can happen to a browsing session becomes an `Action`.
//! User scrolls to the bottom? That's `Action::FetchNextPage { reset: false, .. }`.
//! The catalog answers? That's `Action::PageLoaded { ticket, result }`.
//!
//! The `update()` function takes the current session and an action, mutates
//! the session and returns the `Effect` the caller must carry out. No I/O
//! here. Network calls happen in the engine.
//!
//! ```text
//! Session + Action  →  update()  →  Session' + Effect
//! ```
//!
//! Guard order for a fetch trigger:
//!
//! 1. a fetch is already in flight → dropped, nothing changes
//! 2. `reset` → page 1, nothing accumulated, end-of-data cleared, `Loading`
//! 3. end-of-data → dropped
//! 4. otherwise → `Effect::Fetch` for the current page

use log::{debug, info, warn};

use crate::catalog::envelope::is_end_of_data;
use crate::catalog::{Character, Filters, PageRequest, Resource};
use crate::core::state::{Session, UiState};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Load the next page. `filters: None` reuses the remembered filters.
    FetchNextPage { reset: bool, filters: Option<Filters> },
    /// Remember new filters and start over from page one.
    ApplyFilters(Filters),
    /// Manual retry after a failure: a full reset fetch.
    Retry,
    /// Client-side name filter over what has been fetched so far.
    Search(String),
    /// A fetch finished (either way).
    PageLoaded {
        ticket: u64,
        result: Resource<Vec<Character>>,
    },
    /// A fetch was torn down before it produced a result.
    FetchCancelled { ticket: u64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Fetch { ticket: u64, request: PageRequest },
}

pub fn update(session: &mut Session, action: Action) -> Effect {
    match action {
        Action::FetchNextPage { reset, filters } => fetch_next_page(session, reset, filters),
        Action::Retry => fetch_next_page(session, true, None),
        Action::ApplyFilters(filters) => {
            if session.is_in_flight() {
                info!(
                    "Filter change supersedes in-flight fetch (ticket={})",
                    session.ticket
                );
                session.release_guards();
            }
            fetch_next_page(session, true, Some(filters))
        }
        Action::Search(text) => {
            search(session, text);
            Effect::None
        }
        Action::PageLoaded { ticket, result } => {
            page_loaded(session, ticket, result);
            Effect::None
        }
        Action::FetchCancelled { ticket } => {
            if ticket == session.ticket && session.is_in_flight() {
                info!("Fetch cancelled (ticket={}), releasing guards", ticket);
                session.release_guards();
            }
            Effect::None
        }
    }
}

fn fetch_next_page(session: &mut Session, reset: bool, filters: Option<Filters>) -> Effect {
    if session.is_in_flight() {
        debug!(
            "Dropping fetch trigger: page {} already in flight",
            session.page
        );
        return Effect::None;
    }

    if let Some(filters) = filters {
        session.filters = filters;
    }

    if reset {
        session.reset();
        session.ui = UiState::Loading;
    }

    if session.end_of_data {
        debug!("Dropping fetch trigger: end of data reached");
        return Effect::None;
    }

    session.is_paginating = true;
    session.is_fetching = true;
    session.ticket += 1;

    let request = PageRequest::new(session.page, session.filters);
    debug!(
        "Issuing fetch ticket={} page={} filters={}",
        session.ticket, request.page, request.filters
    );
    Effect::Fetch {
        ticket: session.ticket,
        request,
    }
}

fn page_loaded(session: &mut Session, ticket: u64, result: Resource<Vec<Character>>) {
    if ticket != session.ticket || !session.is_in_flight() {
        debug!(
            "Discarding stale result (ticket={}, current={})",
            ticket, session.ticket
        );
        return;
    }
    session.release_guards();

    match result {
        Resource::Success(characters) if characters.is_empty() => reach_end_of_data(session),
        Resource::Success(characters) => {
            debug!(
                "Page {} loaded: {} new, {} total",
                session.page,
                characters.len(),
                session.characters.len() + characters.len()
            );
            session.characters.extend(characters);
            session.page += 1;
            session.ui = UiState::Loaded(session.characters.clone());
        }
        Resource::Error(message) if is_end_of_data(&message) => reach_end_of_data(session),
        Resource::Error(message) => {
            warn!("Page {} failed: {}", session.page, message);
            session.ui = UiState::Failed(message);
        }
    }
}

/// Marks the session exhausted. The visible list is left alone unless the
/// first page of a fresh load came back empty, in which case the spinner is
/// replaced by an empty list.
fn reach_end_of_data(session: &mut Session) {
    info!("End of data at page {}", session.page);
    session.end_of_data = true;
    if session.ui == UiState::Loading {
        session.ui = UiState::Loaded(session.characters.clone());
    }
}

fn search(session: &mut Session, text: String) {
    session.query = text;
    let needle = session.query.trim().to_lowercase();

    if needle.is_empty() {
        session.highlighted.clear();
        session.ui = UiState::Loaded(session.characters.clone());
        return;
    }

    let matches: Vec<Character> = session
        .characters
        .iter()
        .filter(|c| name_matches(&c.name, &needle))
        .cloned()
        .collect();
    debug!("Search {:?}: {} of {} match", needle, matches.len(), session.characters.len());

    session.highlighted = matches.iter().map(|c| c.id).collect();
    session.ui = UiState::Loaded(matches);
}

/// `needle` must already be trimmed and lowercased.
pub fn name_matches(name: &str, needle: &str) -> bool {
    name.trim().to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::envelope::NO_CONNECTION_MESSAGE;
    use crate::catalog::{Species, Status};
    use crate::test_support::{character, page_of};

    /// Runs a fetch trigger and answers it with `result`.
    fn load(session: &mut Session, reset: bool, result: Resource<Vec<Character>>) {
        let effect = update(session, Action::FetchNextPage { reset, filters: None });
        let Effect::Fetch { ticket, .. } = effect else {
            panic!("expected a fetch");
        };
        update(session, Action::PageLoaded { ticket, result });
    }

    #[test]
    fn test_initial_reset_emits_loading_then_loaded() {
        let mut session = Session::new(Filters::default());

        let effect = update(
            &mut session,
            Action::FetchNextPage {
                reset: true,
                filters: None,
            },
        );
        assert_eq!(session.ui, UiState::Loading);
        let Effect::Fetch { ticket, request } = effect else {
            panic!("expected fetch");
        };
        assert_eq!(request.page, 1);
        assert!(session.is_paginating);

        update(
            &mut session,
            Action::PageLoaded {
                ticket,
                result: Resource::Success(page_of(1, 20)),
            },
        );

        assert_eq!(session.ui.characters().len(), 20);
        assert_eq!(session.page, 2);
        assert!(!session.end_of_data);
        assert!(!session.is_in_flight());
    }

    #[test]
    fn test_accumulation_preserves_fetch_order() {
        let mut session = Session::new(Filters::default());
        load(&mut session, true, Resource::Success(page_of(1, 3)));
        load(&mut session, false, Resource::Success(page_of(4, 3)));
        load(&mut session, false, Resource::Success(page_of(7, 2)));

        let ids: Vec<u32> = session.characters.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(session.page, 4);
        assert_eq!(session.ui, UiState::Loaded(session.characters.clone()));
    }

    #[test]
    fn test_trigger_while_in_flight_is_noop() {
        let mut session = Session::new(Filters::default());
        let first = update(
            &mut session,
            Action::FetchNextPage {
                reset: true,
                filters: None,
            },
        );
        assert!(matches!(first, Effect::Fetch { .. }));
        let before_page = session.page;
        let before_ticket = session.ticket;

        for reset in [false, true] {
            let effect = update(
                &mut session,
                Action::FetchNextPage {
                    reset,
                    filters: None,
                },
            );
            assert_eq!(effect, Effect::None);
        }
        assert_eq!(update(&mut session, Action::Retry), Effect::None);

        assert_eq!(session.page, before_page);
        assert_eq!(session.ticket, before_ticket);
        assert_eq!(session.ui, UiState::Loading);
    }

    #[test]
    fn test_empty_page_sets_end_of_data_and_keeps_items() {
        let mut session = Session::new(Filters::default());
        load(&mut session, true, Resource::Success(page_of(1, 20)));
        let shown = session.ui.clone();

        load(&mut session, false, Resource::Success(vec![]));

        assert!(session.end_of_data);
        assert_eq!(session.ui, shown);
        assert_eq!(session.page, 2);

        let effect = update(
            &mut session,
            Action::FetchNextPage {
                reset: false,
                filters: None,
            },
        );
        assert_eq!(effect, Effect::None);
        assert!(!session.is_in_flight());
    }

    #[test]
    fn test_not_found_is_exhaustion_not_failure() {
        let mut session = Session::new(Filters::default());
        load(&mut session, true, Resource::Success(page_of(1, 20)));

        load(
            &mut session,
            false,
            Resource::Error("Server error: 404 Not Found".into()),
        );

        assert!(session.end_of_data);
        assert_eq!(session.ui.characters().len(), 20);
    }

    #[test]
    fn test_not_found_on_first_page_shows_empty_list() {
        let mut session = Session::new(Filters::new(Some(Status::Dead), Some(Species::Robot)));
        load(
            &mut session,
            true,
            Resource::Error("Server error: 404 Not Found".into()),
        );
        assert!(session.end_of_data);
        assert_eq!(session.ui, UiState::Loaded(vec![]));
    }

    #[test]
    fn test_connectivity_failure_on_first_load() {
        let mut session = Session::new(Filters::default());
        load(
            &mut session,
            true,
            Resource::Error(NO_CONNECTION_MESSAGE.to_string()),
        );

        assert_eq!(session.ui, UiState::Failed(NO_CONNECTION_MESSAGE.to_string()));
        assert!(session.characters.is_empty());
        assert!(!session.end_of_data);
        assert!(!session.is_in_flight());
    }

    #[test]
    fn test_failure_keeps_accumulated_items_and_retry_resets() {
        let mut session = Session::new(Filters::default());
        load(&mut session, true, Resource::Success(page_of(1, 20)));
        load(
            &mut session,
            false,
            Resource::Error("Server error: 500 Internal Server Error".into()),
        );
        assert!(matches!(session.ui, UiState::Failed(_)));
        assert_eq!(session.characters.len(), 20);
        assert_eq!(session.page, 2);

        let effect = update(&mut session, Action::Retry);
        let Effect::Fetch { request, .. } = effect else {
            panic!("expected fetch");
        };
        assert_eq!(request.page, 1);
        assert!(session.characters.is_empty());
        assert_eq!(session.ui, UiState::Loading);
    }

    #[test]
    fn test_apply_filters_resets_and_remembers() {
        let mut session = Session::new(Filters::default());
        load(&mut session, true, Resource::Success(page_of(1, 20)));
        load(&mut session, false, Resource::Success(vec![]));
        assert!(session.end_of_data);

        let filters = Filters::new(Some(Status::Alive), Some(Species::Alien));
        let effect = update(&mut session, Action::ApplyFilters(filters));

        let Effect::Fetch { request, .. } = effect else {
            panic!("expected fetch");
        };
        assert_eq!(request.page, 1);
        assert_eq!(request.filters, filters);
        assert!(session.characters.is_empty());
        assert!(!session.end_of_data);
        assert_eq!(session.filters, filters);

        // Filters persist into subsequent pagination.
        let ticket = session.ticket;
        update(
            &mut session,
            Action::PageLoaded {
                ticket,
                result: Resource::Success(page_of(100, 5)),
            },
        );
        let Effect::Fetch { request, .. } = update(
            &mut session,
            Action::FetchNextPage {
                reset: false,
                filters: None,
            },
        ) else {
            panic!("expected fetch");
        };
        assert_eq!(request.page, 2);
        assert_eq!(request.filters, filters);
    }

    #[test]
    fn test_apply_filters_supersedes_in_flight_fetch() {
        let mut session = Session::new(Filters::default());
        let Effect::Fetch { ticket: stale, .. } = update(
            &mut session,
            Action::FetchNextPage {
                reset: true,
                filters: None,
            },
        ) else {
            panic!("expected fetch");
        };

        let filters = Filters::new(Some(Status::Dead), None);
        let Effect::Fetch { ticket: fresh, .. } =
            update(&mut session, Action::ApplyFilters(filters))
        else {
            panic!("expected fetch");
        };
        assert_ne!(stale, fresh);

        // The stale page arrives first and is ignored.
        update(
            &mut session,
            Action::PageLoaded {
                ticket: stale,
                result: Resource::Success(page_of(1, 20)),
            },
        );
        assert!(session.characters.is_empty());
        assert!(session.is_in_flight());

        update(
            &mut session,
            Action::PageLoaded {
                ticket: fresh,
                result: Resource::Success(page_of(50, 2)),
            },
        );
        let ids: Vec<u32> = session.characters.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![50, 51]);
    }

    #[test]
    fn test_cancel_releases_guards_only_for_current_ticket() {
        let mut session = Session::new(Filters::default());
        update(
            &mut session,
            Action::FetchNextPage {
                reset: true,
                filters: None,
            },
        );
        let current = session.ticket;

        update(&mut session, Action::FetchCancelled { ticket: current - 1 });
        assert!(session.is_in_flight());

        update(&mut session, Action::FetchCancelled { ticket: current });
        assert!(!session.is_in_flight());
        assert_eq!(session.page, 1);
    }

    #[test]
    fn test_search_filters_without_mutating_session() {
        let mut session = Session::new(Filters::default());
        let page = vec![character(1, "Rick Sanchez"), character(2, "Morty Smith")];
        load(&mut session, true, Resource::Success(page));

        update(&mut session, Action::Search("rick".into()));

        assert_eq!(session.ui, UiState::Loaded(vec![character(1, "Rick Sanchez")]));
        assert_eq!(session.characters.len(), 2);
        assert_eq!(session.page, 2);
        assert!(session.highlighted.contains(&1));
        assert!(!session.highlighted.contains(&2));
    }

    #[test]
    fn test_search_normalizes_query_and_names() {
        let mut session = Session::new(Filters::default());
        let page = vec![character(1, "  Rick Sanchez "), character(2, "Morty Smith")];
        load(&mut session, true, Resource::Success(page));

        update(&mut session, Action::Search("  SANCH ".into()));
        assert_eq!(session.ui.characters().len(), 1);
        assert_eq!(session.ui.characters()[0].id, 1);
    }

    #[test]
    fn test_search_is_idempotent_and_blank_restores() {
        let mut session = Session::new(Filters::default());
        load(&mut session, true, Resource::Success(page_of(1, 12)));

        update(&mut session, Action::Search("character 1".into()));
        let first = session.ui.clone();
        update(&mut session, Action::Search("character 1".into()));
        assert_eq!(session.ui, first);

        update(&mut session, Action::Search("   ".into()));
        assert_eq!(session.ui, UiState::Loaded(session.characters.clone()));
        assert!(session.highlighted.is_empty());
    }

    #[test]
    fn test_new_page_shows_all_items_and_keeps_highlights() {
        let mut session = Session::new(Filters::default());
        let page = vec![character(1, "Rick Sanchez"), character(2, "Morty Smith")];
        load(&mut session, true, Resource::Success(page));
        update(&mut session, Action::Search("rick".into()));

        load(
            &mut session,
            false,
            Resource::Success(vec![character(3, "Evil Rick")]),
        );

        assert_eq!(session.ui.characters().len(), 3);
        assert!(session.highlighted.contains(&1));
    }

    #[test]
    fn test_duplicate_ids_across_pages_are_kept() {
        let mut session = Session::new(Filters::default());
        load(&mut session, true, Resource::Success(page_of(1, 2)));
        load(&mut session, false, Resource::Success(page_of(2, 2)));
        let ids: Vec<u32> = session.characters.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 2, 3]);
    }
}
