//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::Semaphore;

use crate::catalog::{CatalogClient, CatalogError, Character, PageRequest, Status};

pub fn character(id: u32, name: &str) -> Character {
    Character {
        id,
        name: name.to_string(),
        species: "Human".to_string(),
        status: Status::Alive,
        image: format!("https://rickandmortyapi.com/api/character/avatar/{id}.jpeg"),
    }
}

/// `count` characters with consecutive ids starting at `first_id`.
pub fn page_of(first_id: u32, count: u32) -> Vec<Character> {
    (first_id..first_id + count)
        .map(|id| character(id, &format!("Character {id}")))
        .collect()
}

/// Answers fetches from a fixed script, in order. Once the script runs out
/// every page is empty.
pub struct ScriptedClient {
    responses: Mutex<VecDeque<Result<Vec<Character>, CatalogError>>>,
    requests: Mutex<Vec<PageRequest>>,
}

impl ScriptedClient {
    pub fn new(responses: Vec<Result<Vec<Character>, CatalogError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every request seen so far.
    pub fn requests(&self) -> Vec<PageRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, request: &PageRequest) {
        self.requests.lock().unwrap().push(request.clone());
    }

    fn next_response(&self) -> Result<Vec<Character>, CatalogError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(Vec::new()))
    }
}

#[async_trait]
impl CatalogClient for ScriptedClient {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<Character>, CatalogError> {
        self.record(request);
        self.next_response()
    }
}

/// A scripted client whose fetches block until the test opens the gate.
pub struct GatedClient {
    inner: ScriptedClient,
    gate: Semaphore,
}

impl GatedClient {
    pub fn new(responses: Vec<Result<Vec<Character>, CatalogError>>) -> Self {
        Self {
            inner: ScriptedClient::new(responses),
            gate: Semaphore::new(0),
        }
    }

    /// Lets `n` blocked (or future) fetches proceed.
    pub fn release(&self, n: usize) {
        self.gate.add_permits(n);
    }

    pub fn requests(&self) -> Vec<PageRequest> {
        self.inner.requests()
    }
}

#[async_trait]
impl CatalogClient for GatedClient {
    fn name(&self) -> &str {
        "gated"
    }

    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<Character>, CatalogError> {
        self.inner.record(request);
        let permit = self
            .gate
            .acquire()
            .await
            .map_err(|e| CatalogError::Other(e.to_string()))?;
        permit.forget();
        self.inner.next_response()
    }
}

/// A client whose every fetch panics.
pub struct PanickingClient;

#[async_trait]
impl CatalogClient for PanickingClient {
    fn name(&self) -> &str {
        "panicking"
    }

    async fn fetch_page(&self, _request: &PageRequest) -> Result<Vec<Character>, CatalogError> {
        panic!("catalog exploded")
    }
}
