use crate::models::{DocumentId, SearchHit};
use crate::sentences::{join_sentences, with_period};
use crate::store::DocumentStore;
use crate::NotFoundError;

pub const DEFAULT_SUMMARY_SENTENCES: usize = 3;

/// Read-only queries over a [`DocumentStore`].
#[derive(Debug, Clone, Copy)]
pub struct SearchEngine<'a> {
    store: &'a DocumentStore,
}

impl<'a> SearchEngine<'a> {
    pub fn new(store: &'a DocumentStore) -> Self {
        Self { store }
    }

    /// First `max_sentences` sentences rejoined with `". "` plus a trailing period.
    pub fn summarize(&self, id: &DocumentId, max_sentences: usize) -> Result<String, NotFoundError> {
        let document = self.store.get(id)?;
        let take = max_sentences.min(document.sentences.len());
        Ok(join_sentences(&document.sentences[..take]))
    }

    /// Case-insensitive substring match, in store order then sentence order.
    pub fn search(&self, keyword: &str) -> Vec<SearchHit> {
        let needle = keyword.to_lowercase();

        self.store
            .all()
            .into_iter()
            .flat_map(|(document_id, document)| {
                document
                    .sentences
                    .iter()
                    .enumerate()
                    .filter(|(_, sentence)| sentence.to_lowercase().contains(&needle))
                    .map(|(sentence_index, sentence)| SearchHit {
                        document_id: document_id.clone(),
                        sentence: with_period(sentence),
                        sentence_index,
                    })
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}
