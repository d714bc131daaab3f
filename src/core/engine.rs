//! # Engine
//!
//! One engine per browsing session. It owns the [`Session`], runs every
//! action through the reducer, carries out the resulting effects on the tokio
//! runtime, and publishes the current [`UiState`] on a watch channel.
//!
//! ```text
//!  UI trigger ──► dispatch() ──► update() ──► Effect::Fetch ──► tokio task
//!                    ▲                                            │
//!                    └──────── Action::PageLoaded / Cancelled ◄───┘
//! ```
//!
//! Completions come back through an internal channel and are applied on the
//! engine's own thread of control, either by awaiting [`Engine::settle`] or by
//! draining with [`Engine::poll_completions`] from a synchronous UI loop.
//! Ordering of state transitions is therefore decided by the reducer alone.
//!
//! Dropping the engine aborts the in-flight fetch. Each fetch task holds a
//! guard that reports `FetchCancelled` if it is torn down before delivering,
//! so the in-flight flag can never stay stuck. A client that panics is
//! reported as an ordinary failure.

use std::any::Any;
use std::collections::HashSet;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use log::{info, warn};
use tokio::sync::{mpsc, watch};
use tokio::task::AbortHandle;

use crate::catalog::envelope::error_message;
use crate::catalog::{
    CatalogClient, CatalogError, Character, Filters, PageRequest, Resource, Species, Status,
    safe_call,
};
use crate::core::action::{Action, Effect, update};
use crate::core::state::{Session, UiState};

pub struct Engine {
    session: Session,
    client: Arc<dyn CatalogClient>,
    ui_tx: watch::Sender<UiState>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    active_fetch: Option<AbortHandle>,
}

impl Engine {
    pub fn new(client: Arc<dyn CatalogClient>, filters: Filters) -> Self {
        let session = Session::new(filters);
        let (ui_tx, _ui_rx) = watch::channel(session.ui.clone());
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        info!(
            "Session started (client={}, filters={})",
            client.name(),
            filters
        );
        Self {
            session,
            client,
            ui_tx,
            action_tx,
            action_rx,
            active_fetch: None,
        }
    }

    // ------------------------------------------------------------------
    // Triggers
    // ------------------------------------------------------------------

    /// Loads the next page, or page one again when `reset` is set.
    /// `filters: None` keeps the remembered filters.
    pub fn fetch_next_page(&mut self, reset: bool, filters: Option<Filters>) {
        self.dispatch(Action::FetchNextPage { reset, filters });
    }

    /// Scroll-to-bottom trigger.
    pub fn load_more(&mut self) {
        self.fetch_next_page(false, None);
    }

    pub fn retry(&mut self) {
        self.dispatch(Action::Retry);
    }

    pub fn apply_filters(&mut self, status: Option<Status>, species: Option<Species>) {
        self.dispatch(Action::ApplyFilters(Filters::new(status, species)));
    }

    pub fn search(&mut self, text: impl Into<String>) {
        self.dispatch(Action::Search(text.into()));
    }

    /// Aborts the in-flight fetch, if any, and releases the guards now.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.active_fetch.take() {
            handle.abort();
        }
        let ticket = self.session.ticket;
        self.dispatch(Action::FetchCancelled { ticket });
    }

    pub fn dispatch(&mut self, action: Action) {
        let effect = update(&mut self.session, action);
        self.publish();
        if let Effect::Fetch { ticket, request } = effect {
            self.spawn_fetch(ticket, request);
        }
    }

    // ------------------------------------------------------------------
    // Completion handling
    // ------------------------------------------------------------------

    /// Applies completions until no fetch is in flight.
    pub async fn settle(&mut self) {
        while self.session.is_in_flight() {
            match self.action_rx.recv().await {
                Some(action) => self.dispatch(action),
                None => break,
            }
        }
    }

    /// Applies whatever completions are already waiting. Never blocks.
    /// Returns true if anything was applied.
    pub fn poll_completions(&mut self) -> bool {
        let mut applied = false;
        while let Ok(action) = self.action_rx.try_recv() {
            self.dispatch(action);
            applied = true;
        }
        applied
    }

    // ------------------------------------------------------------------
    // Observation
    // ------------------------------------------------------------------

    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.ui_tx.subscribe()
    }

    pub fn state(&self) -> &UiState {
        &self.session.ui
    }

    pub fn is_paginating(&self) -> bool {
        self.session.is_paginating
    }

    pub fn is_end_of_data(&self) -> bool {
        self.session.end_of_data
    }

    pub fn highlighted_ids(&self) -> &HashSet<u32> {
        &self.session.highlighted
    }

    pub fn filters(&self) -> Filters {
        self.session.filters
    }

    pub fn page(&self) -> u32 {
        self.session.page
    }

    pub fn characters(&self) -> &[Character] {
        &self.session.characters
    }

    pub fn query(&self) -> &str {
        &self.session.query
    }

    fn publish(&self) {
        let next = &self.session.ui;
        self.ui_tx.send_if_modified(|current| {
            if current == next {
                false
            } else {
                *current = next.clone();
                true
            }
        });
    }

    fn spawn_fetch(&mut self, ticket: u64, request: PageRequest) {
        if let Some(previous) = self.active_fetch.take() {
            previous.abort();
        }

        info!("Spawning fetch ticket={} page={}", ticket, request.page);
        let client = Arc::clone(&self.client);
        let guard = FetchGuard {
            tx: self.action_tx.clone(),
            ticket,
            delivered: false,
        };

        let handle = tokio::spawn(async move {
            let call = AssertUnwindSafe(safe_call(client.fetch_page(&request)));
            let result = match call.catch_unwind().await {
                Ok(result) => result,
                Err(payload) => {
                    let detail = panic_detail(payload.as_ref());
                    warn!("Fetch ticket={} panicked: {}", ticket, detail);
                    Resource::Error(error_message(&CatalogError::Other(detail)))
                }
            };
            guard.deliver(result);
        });
        self.active_fetch = Some(handle.abort_handle());
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        if let Some(handle) = self.active_fetch.take() {
            info!("Session ended, aborting fetch ticket={}", self.session.ticket);
            handle.abort();
        }
    }
}

/// Text of a panic payload, empty when it is not a string.
fn panic_detail(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        String::new()
    }
}

/// Reports the fate of one fetch task back to the engine exactly once.
struct FetchGuard {
    tx: mpsc::UnboundedSender<Action>,
    ticket: u64,
    delivered: bool,
}

impl FetchGuard {
    fn deliver(mut self, result: Resource<Vec<Character>>) {
        self.delivered = true;
        let action = Action::PageLoaded {
            ticket: self.ticket,
            result,
        };
        if self.tx.send(action).is_err() {
            warn!("Dropping result for ticket={}: session ended", self.ticket);
        }
    }
}

impl Drop for FetchGuard {
    fn drop(&mut self) {
        if !self.delivered {
            // The receiver may already be gone with the engine.
            let _ = self.tx.send(Action::FetchCancelled {
                ticket: self.ticket,
            });
        }
    }
}
