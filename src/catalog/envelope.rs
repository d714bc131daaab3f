//! # Result Envelope
//!
//! Crossing the network boundary never propagates an error type upward.
//! Every outcome becomes a [`Resource`]: the value, or a message ready to be
//! shown to a person.
//!
//! ```text
//! CatalogError::Network(_)          → "No internet connection. Please check your network."
//! CatalogError::Http { 503, .. }    → "Server error: 503 Service Unavailable"
//! CatalogError::Parse / Other       → "Something went wrong: <detail>"
//! ```
//!
//! The engine relies on one property of these messages: a not-found answer
//! keeps its `404` code in the text, which marks pagination exhaustion rather
//! than a failure.

use std::future::Future;

use log::warn;

use super::client::CatalogError;

pub const NO_CONNECTION_MESSAGE: &str = "No internet connection. Please check your network.";

/// Marker the catalog uses for "no such page" / "no results for this filter".
const END_OF_DATA_MARKER: &str = "404";

/// Outcome of a boundary call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource<T> {
    Success(T),
    Error(String),
}

/// Awaits a client call and folds any error into a display message.
pub async fn safe_call<T, F>(call: F) -> Resource<T>
where
    F: Future<Output = Result<T, CatalogError>>,
{
    match call.await {
        Ok(value) => Resource::Success(value),
        Err(e) => {
            warn!("Catalog call failed: {}", e);
            Resource::Error(error_message(&e))
        }
    }
}

/// Maps a client error to the text shown to the user.
pub fn error_message(error: &CatalogError) -> String {
    match error {
        CatalogError::Network(_) => NO_CONNECTION_MESSAGE.to_string(),
        CatalogError::Http { status, reason } => format!("Server error: {status} {reason}"),
        CatalogError::Parse(detail) | CatalogError::Other(detail) => {
            let detail = if detail.trim().is_empty() {
                "Unknown error"
            } else {
                detail.as_str()
            };
            format!("Something went wrong: {detail}")
        }
    }
}

/// True when a failure message means "no more pages" rather than an error.
pub fn is_end_of_data(message: &str) -> bool {
    message.contains(END_OF_DATA_MARKER)
}

/// Coarse category of a displayed failure, used to pick the error heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Connectivity,
    Server,
    Unknown,
}

impl FailureKind {
    pub fn of(message: &str) -> Self {
        let lower = message.to_lowercase();
        if lower.contains("internet") {
            FailureKind::Connectivity
        } else if lower.contains("server") {
            FailureKind::Server
        } else {
            FailureKind::Unknown
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            FailureKind::Connectivity => "Offline",
            FailureKind::Server => "Catalog unavailable",
            FailureKind::Unknown => "Error",
        }
    }
}
