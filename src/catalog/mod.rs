pub mod client;
pub mod envelope;
pub mod providers;
pub mod types;

pub use client::{CatalogClient, CatalogError};
pub use envelope::{FailureKind, Resource, safe_call};
pub use providers::RickAndMortyClient;
pub use types::{Character, Filters, PageRequest, Species, Status};
