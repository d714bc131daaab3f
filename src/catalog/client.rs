use std::fmt;

use async_trait::async_trait;

use super::types::{Character, PageRequest};

/// Errors a catalog client can raise. The engine never sees these directly;
/// they are flattened into a message by [`safe_call`](super::envelope::safe_call).
#[derive(Debug)]
pub enum CatalogError {
    /// Connectivity failure (DNS, refused connection, timeout).
    Network(String),
    /// The catalog answered with a non-success status.
    Http { status: u16, reason: String },
    /// The body could not be decoded into catalog records.
    Parse(String),
    /// Anything else.
    Other(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Network(msg) => write!(f, "network error: {msg}"),
            CatalogError::Http { status, reason } => write!(f, "HTTP {status} {reason}"),
            CatalogError::Parse(msg) => write!(f, "parse error: {msg}"),
            CatalogError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CatalogError {}

#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Returns the name of the catalog backend.
    fn name(&self) -> &str;

    /// Fetches one page of characters matching the request's filters.
    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<Character>, CatalogError>;
}
