use crate::config::AssistantConfig;
use crate::ingest::{
    discover_pdf_files, document_id, document_title, extract_with_timeout, IngestionReport,
    SkippedPdf,
};
use crate::models::{DefinitionResult, DocumentId, QueryIntent, SearchHit};
use crate::resolver::DefinitionResolver;
use crate::search::SearchEngine;
use crate::store::DocumentStore;
use crate::traits::{ConversationalAgent, DictionaryLookup, Extractor, Rephraser, Translator};
use crate::{AgentError, IngestError, NotFoundError, QueryError, TranslationError};
use std::path::Path;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

pub const NO_DEFINITION: &str = "No definition found";

/// The external services the assistant delegates to.
#[derive(Clone)]
pub struct Collaborators {
    pub extractor: Arc<dyn Extractor + Send + Sync>,
    pub dictionary: Arc<dyn DictionaryLookup + Send + Sync>,
    pub translator: Arc<dyn Translator + Send + Sync>,
    pub rephraser: Arc<dyn Rephraser + Send + Sync>,
    pub agent: Arc<dyn ConversationalAgent + Send + Sync>,
}

/// Everything the "explain a keyword" action produces. Agent and translator
/// failures are kept per field so one outage does not hide the other answers.
#[derive(Debug)]
pub struct Explanation {
    pub keyword: String,
    pub definition: DefinitionResult,
    pub agent_response: Result<String, AgentError>,
    pub rephrased: String,
    pub translated: Result<String, TranslationError>,
}

impl Explanation {
    pub fn definition_message(&self) -> String {
        format_definition(&self.keyword, &self.definition)
    }
}

/// Single entry point for the shell: owns the store and the collaborators.
pub struct Assistant {
    store: DocumentStore,
    collaborators: Collaborators,
    config: AssistantConfig,
}

impl Assistant {
    pub fn new(collaborators: Collaborators, config: AssistantConfig) -> Self {
        Self {
            store: DocumentStore::new(),
            collaborators,
            config,
        }
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    pub fn search_engine(&self) -> SearchEngine<'_> {
        SearchEngine::new(&self.store)
    }

    /// Extracts `path` and registers it. Nothing is stored when extraction fails.
    pub async fn ingest_path(&self, path: &Path) -> Result<DocumentId, IngestError> {
        let title = document_title(path)?;
        let text = extract_with_timeout(
            Arc::clone(&self.collaborators.extractor),
            path.to_path_buf(),
            self.config.extract_timeout,
        )
        .await?;

        self.register(path, title, text)
    }

    /// Ingests every PDF under `folder`, skipping the ones that fail.
    ///
    /// Files are extracted concurrently but registered in discovery order, so
    /// the store order does not depend on which extraction finished first.
    pub async fn ingest_folder(&self, folder: &Path) -> Result<IngestionReport, IngestError> {
        let files = discover_pdf_files(folder);

        if files.is_empty() {
            return Err(IngestError::InvalidArgument(format!(
                "no pdf files found in {}",
                folder.display()
            )));
        }

        let mut report = IngestionReport::default();
        let batch_size = self.config.ingest_concurrency.max(1);

        for batch in files.chunks(batch_size) {
            let mut extractions = JoinSet::new();
            for (position, path) in batch.iter().enumerate() {
                let extractor = Arc::clone(&self.collaborators.extractor);
                let path = path.clone();
                let timeout = self.config.extract_timeout;
                extractions.spawn(async move {
                    let result = extract_with_timeout(extractor, path, timeout).await;
                    (position, result)
                });
            }

            let mut extracted: Vec<Option<Result<String, IngestError>>> =
                batch.iter().map(|_| None).collect();
            while let Some(joined) = extractions.join_next().await {
                let (position, result) = joined?;
                extracted[position] = Some(result);
            }

            for (path, result) in batch.iter().zip(extracted) {
                let outcome = match result {
                    Some(Ok(text)) => {
                        document_title(path).and_then(|title| self.register(path, title, text))
                    }
                    Some(Err(error)) => Err(error),
                    None => Err(IngestError::InvalidArgument(format!(
                        "extraction never reported for {}",
                        path.display()
                    ))),
                };

                match outcome {
                    Ok(id) if report.registered.contains(&id) => {
                        info!(
                            path = %path.display(),
                            document_id = %id,
                            "duplicate of a registered document"
                        );
                    }
                    Ok(id) => report.registered.push(id),
                    Err(error) => {
                        warn!(path = %path.display(), reason = %error, "skipped pdf");
                        report.skipped_files.push(SkippedPdf {
                            path: path.clone(),
                            reason: error.to_string(),
                        });
                    }
                }
            }
        }

        info!(
            folder = %folder.display(),
            registered = report.registered.len(),
            skipped = report.skipped_files.len(),
            "folder ingested"
        );
        Ok(report)
    }

    fn register(&self, path: &Path, title: String, text: String) -> Result<DocumentId, IngestError> {
        let id = document_id(path, &text, self.config.identity)?;
        let document = self.store.ingest(id, title, text);

        info!(
            path = %path.display(),
            document_id = %document.id,
            sentences = document.sentences.len(),
            "document registered"
        );
        Ok(document.id.clone())
    }

    pub fn summarize(&self, id: &DocumentId, max_sentences: usize) -> Result<String, NotFoundError> {
        self.search_engine().summarize(id, max_sentences)
    }

    /// Default-length summary of each id, in the given order.
    pub fn summarize_all(&self, ids: &[DocumentId]) -> Vec<(DocumentId, Result<String, NotFoundError>)> {
        ids.iter()
            .map(|id| (id.clone(), self.summarize(id, self.config.summary_sentences)))
            .collect()
    }

    pub fn search(&self, keyword: &str) -> Vec<SearchHit> {
        self.search_engine().search(keyword)
    }

    pub async fn resolve(&self, term: &str) -> DefinitionResult {
        DefinitionResolver::new(
            &self.store,
            self.collaborators.dictionary.as_ref(),
            self.config.collaborator_timeout,
        )
        .resolve(term)
        .await
    }

    pub async fn translate(&self, text: &str, target_lang: &str) -> Result<String, TranslationError> {
        let timeout = self.config.collaborator_timeout;
        let call = self.collaborators.translator.translate(
            text,
            &self.config.translation_source_lang,
            target_lang,
        );

        tokio::time::timeout(timeout, call)
            .await
            .unwrap_or(Err(TranslationError::Timeout(timeout)))
    }

    pub fn rephrase(&self, text: &str) -> String {
        self.collaborators.rephraser.rephrase(text)
    }

    pub async fn agent_response(&self, message: &str) -> Result<String, AgentError> {
        let timeout = self.config.collaborator_timeout;
        tokio::time::timeout(timeout, self.collaborators.agent.respond(message))
            .await
            .unwrap_or(Err(AgentError::Timeout(timeout)))
    }

    pub async fn handle_query(&self, intent: QueryIntent) -> Result<String, QueryError> {
        debug!(?intent, "handling query");

        match intent {
            QueryIntent::Summarize {
                document_id,
                max_sentences,
            } => {
                let id = document_id.ok_or_else(|| {
                    QueryError::InvalidPayload("couldn't find the PDF to summarize".to_string())
                })?;
                let summary = self.summarize(
                    &id,
                    max_sentences.unwrap_or(self.config.summary_sentences),
                )?;
                Ok(format!("Summary of the PDF: {summary}"))
            }
            QueryIntent::SearchKeyword { keyword } => {
                let keyword = required(keyword, "keyword is empty")?;
                Ok(format_search(&keyword, &self.search(&keyword)))
            }
            QueryIntent::Define { term } => {
                let term = required(term, "term is empty")?;
                let definition = self.resolve(&term).await;
                Ok(format_definition(&term, &definition))
            }
            QueryIntent::Translate { text, target_lang } => {
                let text = required(text, "couldn't translate that text")?;
                let target = target_lang
                    .filter(|lang| !lang.trim().is_empty())
                    .unwrap_or_else(|| self.config.translation_target_lang.clone());
                let translated = self.translate(&text, &target).await?;
                Ok(format!("Translated Text: {translated}"))
            }
            QueryIntent::Rephrase { text } => {
                let text = required(text, "couldn't rephrase that text")?;
                Ok(format!("Rephrased Text: {}", self.rephrase(&text)))
            }
        }
    }

    /// Definition, agent reply, rephrasing and translation for one keyword.
    pub async fn explain(&self, keyword: &str) -> Result<Explanation, QueryError> {
        let keyword = required(keyword.to_string(), "keyword is empty")?;

        let definition = self.resolve(&keyword).await;
        let agent_response = self.agent_response(&keyword).await;
        if let Err(error) = &agent_response {
            warn!(keyword = %keyword, error = %error, "agent did not respond");
        }
        let rephrased = self.rephrase(&keyword);
        let translated = self
            .translate(&keyword, &self.config.translation_target_lang)
            .await;
        if let Err(error) = &translated {
            warn!(keyword = %keyword, error = %error, "translation failed");
        }

        Ok(Explanation {
            keyword,
            definition,
            agent_response,
            rephrased,
            translated,
        })
    }
}

fn required(value: String, reason: &str) -> Result<String, QueryError> {
    if value.trim().is_empty() {
        Err(QueryError::InvalidPayload(reason.to_string()))
    } else {
        Ok(value)
    }
}

/// Hits grouped per document, one line per document, sentences joined by a space.
pub fn format_search(keyword: &str, hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return format!("No matches for {keyword}");
    }

    let mut lines: Vec<(&DocumentId, Vec<&str>)> = Vec::new();
    for hit in hits {
        if let Some((id, sentences)) = lines.last_mut() {
            if *id == &hit.document_id {
                sentences.push(hit.sentence.as_str());
                continue;
            }
        }
        lines.push((&hit.document_id, vec![hit.sentence.as_str()]));
    }

    let body = lines
        .into_iter()
        .map(|(id, sentences)| format!("{id}: {}", sentences.join(" ")))
        .collect::<Vec<_>>()
        .join("\n");

    format!("{keyword} found in the following documents:\n\n{body}")
}

pub fn format_definition(term: &str, definition: &DefinitionResult) -> String {
    match definition {
        DefinitionResult::FoundInDocuments(hits) => format_search(term, hits),
        DefinitionResult::FoundExternally(senses) => format!("{term}: {senses}"),
        DefinitionResult::NotFound => format!("{term}: {NO_DEFINITION}"),
    }
}
