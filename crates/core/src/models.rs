use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Opaque key of a document in the store.
///
/// Depending on [`DocumentIdentity`] this is either the canonical path the
/// document was read from or the SHA-256 of its extracted text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for DocumentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentIdentity {
    #[default]
    Path,
    ContentHash,
}

/// One ingested unit of text. `sentences` is always `split_sentences(raw_text)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub title: String,
    pub raw_text: String,
    pub sentences: Vec<String>,
    pub checksum: String,
    pub ingested_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub document_id: DocumentId,
    /// Matched sentence with its trailing period restored.
    pub sentence: String,
    pub sentence_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefinitionResult {
    FoundInDocuments(Vec<SearchHit>),
    FoundExternally(String),
    NotFound,
}

/// Dictionary answer keyed by part of speech (`"Noun"`, `"Verb"`, ...).
pub type Meanings = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryIntent {
    Summarize {
        document_id: Option<DocumentId>,
        max_sentences: Option<usize>,
    },
    SearchKeyword {
        keyword: String,
    },
    Define {
        term: String,
    },
    Translate {
        text: String,
        target_lang: Option<String>,
    },
    Rephrase {
        text: String,
    },
}
