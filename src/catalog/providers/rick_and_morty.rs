//! Rick and Morty catalog client over the public REST API.
//!
//! Only `GET /character` is used. Paging is 1-based; a page past the end, or
//! a filter with no matches, comes back as `404 {"error": "There is nothing here"}`.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Deserialize;

use crate::catalog::{CatalogClient, CatalogError, Character, PageRequest};

pub const DEFAULT_BASE_URL: &str = "https://rickandmortyapi.com/api";

// ============================================================================
// Wire Types
// ============================================================================

/// Pagination metadata returned alongside every page.
#[derive(Deserialize, Debug)]
struct PageInfo {
    count: u32,
    pages: u32,
    next: Option<String>,
}

/// Body of `GET /character`.
#[derive(Deserialize, Debug)]
struct CharacterPage {
    info: PageInfo,
    results: Vec<Character>,
}

// ============================================================================
// Client Implementation
// ============================================================================

pub struct RickAndMortyClient {
    base_url: String,
    client: reqwest::Client,
}

impl RickAndMortyClient {
    pub fn new(base_url: Option<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let final_url = base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Other(e.to_string()))?;

        Ok(Self {
            base_url: final_url,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Classifies a transport failure. Anything that never produced a response
/// is treated as a connectivity problem.
fn transport_error(e: reqwest::Error) -> CatalogError {
    if e.is_connect() || e.is_timeout() || e.is_request() {
        CatalogError::Network(e.to_string())
    } else if e.is_decode() {
        CatalogError::Parse(e.to_string())
    } else {
        CatalogError::Other(e.to_string())
    }
}

#[async_trait]
impl CatalogClient for RickAndMortyClient {
    fn name(&self) -> &str {
        "rickandmorty"
    }

    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<Character>, CatalogError> {
        info!(
            "Catalog request: page={}, filters={}, name={:?}",
            request.page, request.filters, request.name
        );

        let response = self
            .client
            .get(format!("{}/character", self.base_url))
            .query(&request.query_pairs())
            .send()
            .await
            .map_err(transport_error)?;

        debug!("Catalog response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status();
            let reason = status.canonical_reason().unwrap_or("Unknown").to_string();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Catalog API error: {} - {}", status.as_u16(), body);
            return Err(CatalogError::Http {
                status: status.as_u16(),
                reason,
            });
        }

        let page: CharacterPage = response.json().await.map_err(|e| {
            if e.is_decode() {
                CatalogError::Parse(e.to_string())
            } else {
                transport_error(e)
            }
        })?;

        debug!(
            "Catalog page {}/{} ({} total): {} results, has_next={}",
            request.page,
            page.info.pages,
            page.info.count,
            page.results.len(),
            page.info.next.is_some()
        );

        Ok(page.results)
    }
}
