use application::{ApplicationError, DocumentRepository, StoreConfig};
use dashmap::DashMap;
use domain::{Document, DocumentId, SearchRequest};
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::search;

/// In-memory document repository.
///
/// Clones are handles to the same map; separately constructed repositories
/// are independent. Each call is atomic on its own, but a `search` running
/// next to a `save` may or may not observe it.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentRepository {
    // Document ID -> Document
    documents: Arc<DashMap<DocumentId, Arc<Document>>>,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self {
            documents: Arc::new(DashMap::new()),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            documents: Arc::new(DashMap::with_capacity(capacity)),
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        debug!(initial_capacity = config.initial_capacity, "Creating in-memory document repository");
        Self::with_capacity(config.initial_capacity)
    }
}

impl DocumentRepository for InMemoryDocumentRepository {
    #[instrument(skip(self, document))]
    fn save(&self, document: &Document) -> Result<(), ApplicationError> {
        let id = document.id().ok_or(ApplicationError::MissingIdentifier)?;
        debug!(doc_id = %id, "Saving document to in-memory store");
        // Full overwrite: whatever was stored under this ID is replaced.
        self.documents.insert(id.clone(), Arc::new(document.clone()));
        Ok(())
    }

    #[instrument(skip(self))]
    fn get(&self, id: &DocumentId) -> Result<Option<Document>, ApplicationError> {
        debug!(doc_id = %id, "Getting document from in-memory store");
        let doc = self.documents.get(id).map(|doc_ref| (**doc_ref).clone());
        Ok(doc)
    }

    #[instrument(skip(self, request))]
    fn search(&self, request: &SearchRequest) -> Result<Vec<Document>, ApplicationError> {
        debug!(total = self.documents.len(), "Scanning in-memory store");
        let hits = self
            .documents
            .iter()
            .filter(|entry| search::matches(request, entry.value()))
            .map(|entry| (**entry.value()).clone())
            .collect::<Vec<_>>();
        debug!(hits = hits.len(), "In-memory search finished.");
        Ok(hits)
    }

    fn count(&self) -> Result<usize, ApplicationError> {
        Ok(self.documents.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use domain::Author;

    fn stored(id: &str, title: &str) -> Document {
        let mut doc = Document::new(
            title,
            "content",
            Author::new("a1", "Ada"),
            Utc.with_ymd_and_hms(2024, 2, 2, 0, 0, 0).unwrap(),
        );
        doc.id = Some(DocumentId::from(id));
        doc
    }

    #[test]
    fn save_requires_identifier() {
        let repo = InMemoryDocumentRepository::new();
        let mut doc = stored("x", "Alpha");
        doc.id = None;

        assert!(matches!(
            repo.save(&doc),
            Err(ApplicationError::MissingIdentifier)
        ));
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn save_overwrites_existing_entry() {
        let repo = InMemoryDocumentRepository::new();
        repo.save(&stored("d1", "first")).unwrap();
        repo.save(&stored("d1", "second")).unwrap();

        assert_eq!(repo.count().unwrap(), 1);
        let doc = repo.get(&DocumentId::from("d1")).unwrap().unwrap();
        assert_eq!(doc.title, "second");
    }

    #[test]
    fn get_unknown_id_is_none() {
        let repo = InMemoryDocumentRepository::new();
        assert!(repo.get(&DocumentId::from("nope")).unwrap().is_none());
    }

    #[test]
    fn clones_share_state() {
        let repo = InMemoryDocumentRepository::with_capacity(8);
        let handle = repo.clone();
        handle.save(&stored("d1", "Alpha")).unwrap();

        assert_eq!(repo.count().unwrap(), 1);
        assert_eq!(InMemoryDocumentRepository::new().count().unwrap(), 0);
    }

    #[test]
    fn stored_copy_is_detached_from_caller() {
        let repo = InMemoryDocumentRepository::new();
        let mut doc = stored("d1", "Alpha");
        repo.save(&doc).unwrap();
        doc.title = "changed after save".to_string();

        let fetched = repo.get(&DocumentId::from("d1")).unwrap().unwrap();
        assert_eq!(fetched.title, "Alpha");
    }
}
