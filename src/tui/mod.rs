//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into engine triggers.
//!
//! This is the only module that knows about ratatui and crossterm. The engine
//! underneath has no idea it is being driven from a terminal.
//!
//! ## Redraw Strategy
//!
//! - **Fetching** (spinner, "Loading more…"): draws every ~80ms and drains
//!   engine completions at the same rate.
//! - **Idle**: sleeps up to 500ms, only redraws on input or when the engine's
//!   watch channel reports a new `UiState`.
//!
//! ## Keys
//!
//! Typing edits the search, arrows move through the list, Enter opens the
//! selected character, Ctrl+F opens filters, Ctrl+R retries, Ctrl+C quits.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::catalog::{Character, RickAndMortyClient};
use crate::core::config::ResolvedConfig;
use crate::core::{Engine, UiState};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    CharacterListState, FilterEvent, FilterSheetState, ListEvent, SearchBar, SearchEvent,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which full-screen view is showing.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    List,
    Detail(Character),
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub screen: Screen,
    // Persistent component states
    pub search_bar: SearchBar,
    pub character_list: CharacterListState,
    // Filter overlay (None = hidden)
    pub filter_sheet: Option<FilterSheetState>,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            screen: Screen::List,
            search_bar: SearchBar::new(),
            character_list: CharacterListState::new(),
            filter_sheet: None,
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Cursor lives in the search bar
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste, Hide);
    }
}

/// What the event loop should do after an event.
#[derive(Debug, PartialEq)]
enum Flow {
    Continue,
    Quit,
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let client = RickAndMortyClient::new(Some(config.base_url.clone()), config.timeout)
        .map_err(std::io::Error::other)?;
    let mut engine = Engine::new(Arc::new(client), config.filters);
    let mut tui = TuiState::new();
    let mut ui_rx = engine.subscribe();

    engine.fetch_next_page(true, None);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let animating = engine.is_paginating() || matches!(engine.state(), UiState::Loading);
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &engine, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Bottom of the list is on screen: ask for the next page. Search
        // narrows the visible list, so paging is paused while it is active.
        if should_load_more(&engine, &tui) {
            debug!("List bottom visible, requesting page {}", engine.page());
            engine.load_more();
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain all pending events before next draw
        let mut flow = Flow::Continue;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            flow = handle_event(&mut engine, &mut tui, event);
            if flow == Flow::Quit {
                break;
            }
        }
        if flow == Flow::Quit {
            break;
        }

        if engine.poll_completions() {
            needs_redraw = true;
        }
        if ui_rx.has_changed().unwrap_or(false) {
            ui_rx.mark_unchanged();
            needs_redraw = true;
        }
    }

    engine.cancel();
    ratatui::restore();
    Ok(())
}

fn should_load_more(engine: &Engine, tui: &TuiState) -> bool {
    tui.screen == Screen::List
        && tui.filter_sheet.is_none()
        && tui.character_list.at_bottom
        && engine.query().trim().is_empty()
        && !engine.is_paginating()
        && !engine.is_end_of_data()
        && matches!(engine.state(), UiState::Loaded(list) if !list.is_empty())
}

fn handle_event(engine: &mut Engine, tui: &mut TuiState, event: TuiEvent) -> Flow {
    match event {
        TuiEvent::ForceQuit => return Flow::Quit,
        TuiEvent::Resize => return Flow::Continue,
        _ => {}
    }

    // Filter overlay captures everything while open
    if let Some(sheet) = tui.filter_sheet.as_mut() {
        match sheet.handle_event(&event) {
            Some(FilterEvent::Apply(filters)) => {
                info!("Applying filters: {}", filters);
                if tui.search_bar.clear().is_some() {
                    engine.search("");
                }
                engine.apply_filters(filters.status, filters.species);
                tui.character_list.reset();
                tui.filter_sheet = None;
            }
            Some(FilterEvent::Dismiss) => tui.filter_sheet = None,
            None => {}
        }
        return Flow::Continue;
    }

    if let Screen::Detail(_) = tui.screen {
        if event == TuiEvent::Escape {
            tui.screen = Screen::List;
        }
        return Flow::Continue;
    }

    match event {
        TuiEvent::OpenFilters => {
            tui.filter_sheet = Some(FilterSheetState::new(engine.filters()));
        }
        TuiEvent::Retry => {
            info!("Manual retry");
            if tui.search_bar.clear().is_some() {
                engine.search("");
            }
            engine.retry();
            tui.character_list.reset();
        }
        TuiEvent::Submit => {
            let selected = tui
                .character_list
                .selected()
                .and_then(|i| engine.state().characters().get(i).cloned());
            if let Some(character) = selected {
                debug!("Opening character {}", character.id);
                tui.screen = Screen::Detail(character);
            }
        }
        TuiEvent::Escape => {
            if let Some(SearchEvent::Changed(text)) = tui.search_bar.clear() {
                engine.search(text);
                tui.character_list.reset();
            }
        }
        TuiEvent::CursorUp
        | TuiEvent::CursorDown
        | TuiEvent::PageUp
        | TuiEvent::PageDown
        | TuiEvent::Home
        | TuiEvent::End => {
            if let Some(ListEvent::ReachedEnd) = tui.character_list.handle_event(&event) {
                // Picked up by `should_load_more` after the next draw
                debug!("Selection reached the last loaded row");
            }
        }
        // Search narrows a loaded list; there is nothing to narrow yet.
        TuiEvent::InputChar(_) | TuiEvent::Paste(_) | TuiEvent::Backspace
            if !matches!(engine.state(), UiState::Loaded(_)) => {}
        TuiEvent::InputChar(_) | TuiEvent::Paste(_) | TuiEvent::Backspace => {
            if let Some(SearchEvent::Changed(text)) = tui.search_bar.handle_event(&event) {
                engine.search(text);
                tui.character_list.reset();
            }
        }
        _ => {}
    }
    Flow::Continue
}
