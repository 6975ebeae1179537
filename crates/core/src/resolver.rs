use crate::models::DefinitionResult;
use crate::search::SearchEngine;
use crate::store::DocumentStore;
use crate::traits::DictionaryLookup;
use crate::LookupError;
use std::time::Duration;
use tracing::{debug, warn};

pub const NOUN_SENSE: &str = "Noun";

/// Looks a term up in the ingested documents first, then in the dictionary.
pub struct DefinitionResolver<'a, D: ?Sized> {
    store: &'a DocumentStore,
    dictionary: &'a D,
    timeout: Duration,
}

impl<'a, D> DefinitionResolver<'a, D>
where
    D: DictionaryLookup + Send + Sync + ?Sized,
{
    pub fn new(store: &'a DocumentStore, dictionary: &'a D, timeout: Duration) -> Self {
        Self {
            store,
            dictionary,
            timeout,
        }
    }

    pub async fn resolve(&self, term: &str) -> DefinitionResult {
        let hits = SearchEngine::new(self.store).search(term);
        if !hits.is_empty() {
            debug!(term, hits = hits.len(), "term found in documents");
            return DefinitionResult::FoundInDocuments(hits);
        }

        let lookup = match tokio::time::timeout(self.timeout, self.dictionary.lookup(term)).await {
            Ok(result) => result,
            Err(_) => Err(LookupError::Timeout(self.timeout)),
        };

        match lookup {
            Ok(Some(meanings)) => match meanings.get(NOUN_SENSE) {
                Some(senses) if !senses.is_empty() => {
                    DefinitionResult::FoundExternally(senses.join(", "))
                }
                _ => DefinitionResult::NotFound,
            },
            Ok(None) => DefinitionResult::NotFound,
            Err(error) => {
                warn!(term, error = %error, "dictionary lookup failed");
                DefinitionResult::NotFound
            }
        }
    }
}
