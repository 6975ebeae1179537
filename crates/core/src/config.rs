use crate::models::DocumentIdentity;
use crate::search::DEFAULT_SUMMARY_SENTENCES;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AssistantConfig {
    pub summary_sentences: usize,
    pub extract_timeout: Duration,
    pub collaborator_timeout: Duration,
    pub translation_source_lang: String,
    pub translation_target_lang: String,
    pub identity: DocumentIdentity,
    /// Upper bound on files extracted at once during folder ingestion.
    pub ingest_concurrency: usize,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            summary_sentences: DEFAULT_SUMMARY_SENTENCES,
            extract_timeout: Duration::from_secs(30),
            collaborator_timeout: Duration::from_secs(10),
            translation_source_lang: "en".to_string(),
            translation_target_lang: "pt".to_string(),
            identity: DocumentIdentity::Path,
            ingest_concurrency: 4,
        }
    }
}
