use crate::{AgentError, ExtractError, LookupError, Meanings, TranslationError};
use async_trait::async_trait;
use std::path::Path;

/// Turns a file into its full text. Blocking; callers run it off the async runtime.
pub trait Extractor {
    fn extract(&self, path: &Path) -> Result<String, ExtractError>;
}

#[async_trait]
pub trait DictionaryLookup {
    /// `Ok(None)` when the source has no entry for `term`.
    async fn lookup(&self, term: &str) -> Result<Option<Meanings>, LookupError>;
}

#[async_trait]
pub trait Translator {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, TranslationError>;
}

pub trait Rephraser {
    fn rephrase(&self, text: &str) -> String;
}

#[async_trait]
pub trait ConversationalAgent {
    async fn respond(&self, message: &str) -> Result<String, AgentError>;
}
