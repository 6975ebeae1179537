pub mod assistant;
pub mod collaborators;
pub mod config;
pub mod error;
pub mod extractor;
pub mod ingest;
pub mod models;
pub mod resolver;
pub mod search;
pub mod sentences;
pub mod store;
pub mod traits;

pub use assistant::{format_definition, format_search, Assistant, Collaborators, Explanation};
pub use collaborators::{FreeDictionaryLookup, MyMemoryTranslator, RasaRestAgent, SynonymRephraser};
pub use config::AssistantConfig;
pub use error::{
    AgentError, ExtractError, IngestError, LookupError, NotFoundError, QueryError,
    TranslationError,
};
pub use extractor::{LopdfExtractor, PageText};
pub use ingest::{discover_pdf_files, IngestionReport, SkippedPdf};
pub use models::{
    DefinitionResult, Document, DocumentId, DocumentIdentity, Meanings, QueryIntent, SearchHit,
};
pub use resolver::DefinitionResolver;
pub use search::{SearchEngine, DEFAULT_SUMMARY_SENTENCES};
pub use sentences::split_sentences;
pub use store::DocumentStore;
pub use traits::{ConversationalAgent, DictionaryLookup, Extractor, Rephraser, Translator};
