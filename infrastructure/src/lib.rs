// Module declarations
pub mod persistence;
pub mod search;

use application::{DocumentStore, StoreConfig};
use std::sync::Arc;

pub use persistence::InMemoryDocumentRepository;

/// Builds a [`DocumentStore`] backed by a fresh in-memory repository.
pub fn in_memory_store(config: &StoreConfig) -> DocumentStore {
    DocumentStore::new(Arc::new(InMemoryDocumentRepository::from_config(config)))
}

/// Builds an in-memory [`DocumentStore`] configured from the process environment.
pub fn in_memory_store_from_env() -> DocumentStore {
    in_memory_store(&StoreConfig::from_env())
}
