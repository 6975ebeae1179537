use crate::models::{Document, DocumentId};
use crate::sentences::split_sentences;
use crate::NotFoundError;
use chrono::Utc;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Insertion-ordered map from id to document.
///
/// Documents are published as `Arc<Document>` under the write lock, so readers
/// only ever see fully built entries. Re-ingesting an id replaces the entry in
/// place and keeps its original position.
#[derive(Debug, Default)]
pub struct DocumentStore {
    inner: RwLock<Entries>,
}

#[derive(Debug, Default)]
struct Entries {
    order: Vec<Arc<Document>>,
    positions: HashMap<DocumentId, usize>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ingest(&self, id: DocumentId, title: impl Into<String>, raw_text: String) -> Arc<Document> {
        let document = Arc::new(Document {
            sentences: split_sentences(&raw_text),
            checksum: text_checksum(&raw_text),
            title: title.into(),
            id,
            raw_text,
            ingested_at: Utc::now(),
        });

        let mut entries = self.write();
        match entries.positions.get(&document.id) {
            Some(&position) => entries.order[position] = Arc::clone(&document),
            None => {
                let position = entries.order.len();
                entries.positions.insert(document.id.clone(), position);
                entries.order.push(Arc::clone(&document));
            }
        }

        document
    }

    pub fn get(&self, id: &DocumentId) -> Result<Arc<Document>, NotFoundError> {
        let entries = self.read();
        entries
            .positions
            .get(id)
            .map(|&position| Arc::clone(&entries.order[position]))
            .ok_or_else(|| NotFoundError(id.clone()))
    }

    /// Snapshot of every document in insertion order.
    pub fn all(&self) -> Vec<(DocumentId, Arc<Document>)> {
        self.read()
            .order
            .iter()
            .map(|document| (document.id.clone(), Arc::clone(document)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.read().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> RwLockReadGuard<'_, Entries> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Entries> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

pub fn text_checksum(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observable(store: &DocumentStore) -> Vec<(DocumentId, String, Vec<String>)> {
        store
            .all()
            .into_iter()
            .map(|(id, document)| (id, document.raw_text.clone(), document.sentences.clone()))
            .collect()
    }

    #[test]
    fn ingest_derives_sentences_from_text() {
        let store = DocumentStore::new();
        let document = store.ingest("a.pdf".into(), "a.pdf", "A. B. C".to_string());

        assert_eq!(document.sentences, vec!["A", "B", "C"]);
        assert_eq!(document.checksum, text_checksum("A. B. C"));
    }

    #[test]
    fn reingesting_same_text_is_idempotent() {
        let once = DocumentStore::new();
        once.ingest("a.pdf".into(), "a.pdf", "A. B".to_string());

        let twice = DocumentStore::new();
        twice.ingest("a.pdf".into(), "a.pdf", "A. B".to_string());
        twice.ingest("a.pdf".into(), "a.pdf", "A. B".to_string());

        assert_eq!(observable(&once), observable(&twice));
        assert_eq!(twice.len(), 1);
    }

    #[test]
    fn reingest_overwrites_in_place() -> Result<(), Box<dyn std::error::Error>> {
        let store = DocumentStore::new();
        store.ingest("first".into(), "first", "One".to_string());
        store.ingest("second".into(), "second", "Two".to_string());
        store.ingest("first".into(), "first", "Uno. Eins".to_string());

        let ids: Vec<_> = store.all().into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![DocumentId::from("first"), DocumentId::from("second")]);
        assert_eq!(store.get(&"first".into())?.sentences, vec!["Uno", "Eins"]);
        Ok(())
    }

    #[test]
    fn unknown_id_is_not_found() {
        let store = DocumentStore::new();
        let missing = DocumentId::from("missing.pdf");
        assert_eq!(store.get(&missing).unwrap_err(), NotFoundError(missing));
    }

    #[test]
    fn concurrent_ingest_keeps_every_document() {
        let store = Arc::new(DocumentStore::new());
        let handles: Vec<_> = (0..8)
            .map(|index| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    store.ingest(
                        DocumentId::new(format!("doc-{index}")),
                        "doc",
                        format!("Sentence {index}. Another"),
                    );
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("writer thread should finish");
        }

        assert_eq!(store.len(), 8);
        for (_, document) in store.all() {
            assert_eq!(document.sentences.len(), 2);
        }
    }
}
