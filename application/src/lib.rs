use domain::{Document, DocumentId, SearchRequest};
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

// --- Application Errors ---
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Document has no identifier; the repository only stores identified documents")]
    MissingIdentifier,
    #[error("Repository error: {0}")]
    Repository(String),
    #[error("Invalid configuration value for '{key}': {reason}")]
    InvalidConfig { key: String, reason: String },
}

// --- Configuration ---

/// Environment variable holding the initial capacity hint for the backing map.
pub const INITIAL_CAPACITY_VAR: &str = "DOCSTORE_INITIAL_CAPACITY";

/// Settings for building a document store.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreConfig {
    /// Number of documents the backing map reserves room for up front.
    #[serde(default)]
    pub initial_capacity: usize,
}

impl StoreConfig {
    /// Reads the configuration from the process environment.
    /// Missing or malformed values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(std::env::var(INITIAL_CAPACITY_VAR).ok())
    }

    /// Builds the configuration from an already looked-up capacity value.
    pub fn from_lookup(initial_capacity: Option<String>) -> Self {
        let initial_capacity = match initial_capacity {
            Some(raw) => match Self::parse_capacity(&raw) {
                Ok(capacity) => capacity,
                Err(e) => {
                    warn!("{}. Using default initial capacity.", e);
                    0
                }
            },
            None => {
                info!(
                    "{} environment variable not set. Using default initial capacity.",
                    INITIAL_CAPACITY_VAR
                );
                0
            }
        };
        Self { initial_capacity }
    }

    pub fn parse_capacity(raw: &str) -> Result<usize, ApplicationError> {
        raw.trim()
            .parse::<usize>()
            .map_err(|e| ApplicationError::InvalidConfig {
                key: INITIAL_CAPACITY_VAR.to_string(),
                reason: format!("'{}' is not a valid capacity ({})", raw, e),
            })
    }
}

// --- Infrastructure Interfaces (Traits) ---

/// Storage seam for documents.
///
/// Implementations key documents by `Document::id` and overwrite on save.
/// They perform no identifier generation; that belongs to [`DocumentStore`].
pub trait DocumentRepository: Send + Sync {
    /// Inserts or fully replaces the document stored under its identifier.
    /// Fails with [`ApplicationError::MissingIdentifier`] if the document has none.
    fn save(&self, document: &Document) -> Result<(), ApplicationError>;
    /// Retrieves a document by its ID.
    fn get(&self, id: &DocumentId) -> Result<Option<Document>, ApplicationError>;
    /// Returns every stored document matching all active predicates of `request`.
    fn search(&self, request: &SearchRequest) -> Result<Vec<Document>, ApplicationError>;
    /// Number of stored documents.
    fn count(&self) -> Result<usize, ApplicationError>;
}

// --- Application Services (Use Cases) ---

/// Upsert, lookup and filtered search over a [`DocumentRepository`].
///
/// Each store owns whatever repository it was built with; two stores over
/// two repositories never observe each other's documents.
#[derive(Clone)]
pub struct DocumentStore {
    repository: Arc<dyn DocumentRepository>,
}

impl DocumentStore {
    pub fn new(repository: Arc<dyn DocumentRepository>) -> Self {
        Self { repository }
    }

    /// Upserts a document and returns it as stored.
    ///
    /// A document without an identifier (or with an empty one) gets a fresh
    /// UUID and is inserted with the caller's `created` untouched. A document
    /// with an identifier replaces whatever is stored under it, except that
    /// `created` stays at the value recorded by the first insert.
    #[instrument(skip(self, document), fields(doc_id = ?document.id().map(DocumentId::as_str)))]
    pub fn save(&self, mut document: Document) -> Result<Document, ApplicationError> {
        match document.id().cloned() {
            None => {
                let id = self.generate_id()?;
                info!(doc_id = %id, "Assigned new identifier to document");
                document.id = Some(id);
            }
            Some(id) => {
                if let Some(existing) = self.repository.get(&id)? {
                    if existing.created != document.created {
                        debug!(doc_id = %id, "Ignoring changed creation timestamp on update");
                    }
                    document.created = existing.created;
                }
            }
        }

        self.repository.save(&document)?;
        debug!("Document saved");
        Ok(document)
    }

    /// Saves each document in order, stopping at the first failure.
    #[instrument(skip(self, documents), fields(count = documents.len()))]
    pub fn save_all(&self, documents: Vec<Document>) -> Result<Vec<Document>, ApplicationError> {
        documents
            .into_iter()
            .map(|document| self.save(document))
            .collect()
    }

    /// Looks up a document by identifier. Unknown and empty identifiers yield `None`.
    #[instrument(skip(self))]
    pub fn find_by_id(&self, id: &str) -> Result<Option<Document>, ApplicationError> {
        let id = DocumentId::from(id);
        if id.is_empty() {
            return Ok(None);
        }
        self.repository.get(&id)
    }

    /// Returns all documents matching `request`, in no particular order.
    #[instrument(skip(self, request), fields(unconstrained = request.is_unconstrained()))]
    pub fn search(&self, request: &SearchRequest) -> Result<Vec<Document>, ApplicationError> {
        let documents = self.repository.search(request)?;
        debug!(hits = documents.len(), "Search finished");
        Ok(documents)
    }

    pub fn count(&self) -> Result<usize, ApplicationError> {
        self.repository.count()
    }

    fn generate_id(&self) -> Result<DocumentId, ApplicationError> {
        loop {
            let id = DocumentId::new(Uuid::new_v4().to_string());
            if self.repository.get(&id)?.is_none() {
                return Ok(id);
            }
            warn!(doc_id = %id, "Generated identifier already in use, retrying");
        }
    }
}
