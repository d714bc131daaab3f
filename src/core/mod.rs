//! # Core Application Logic
//!
//! This module contains the browsing session's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Session (state)      │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • Engine (effects)     │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │  Catalog   │      │   Tests    │
//!     │  Adapter   │      │  Client    │      │  (doubles) │
//!     │ (ratatui)  │      │ (reqwest)  │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: `Session` and `UiState`
//! - [`action`]: the `Action` enum and the `update()` reducer
//! - [`engine`]: runs effects on tokio and publishes `UiState`
//! - [`config`]: settings file, env and CLI resolution

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

pub use engine::Engine;
pub use state::UiState;
