use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use pdf_assistant_core::{
    format_definition, Assistant, AssistantConfig, Collaborators, DocumentIdentity,
    FreeDictionaryLookup, IngestionReport, LopdfExtractor, MyMemoryTranslator, QueryIntent,
    RasaRestAgent, SynonymRephraser,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "pdf-assistant", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// MyMemory translation API base URL
    #[arg(long, env = "PDF_ASSISTANT_TRANSLATOR_URL", default_value = "https://api.mymemory.translated.net")]
    translator_url: String,

    /// Dictionary API base URL (entries are fetched from <url>/<term>)
    #[arg(
        long,
        env = "PDF_ASSISTANT_DICTIONARY_URL",
        default_value = "https://api.dictionaryapi.dev/api/v2/entries/en"
    )]
    dictionary_url: String,

    /// Rasa REST webhook URL
    #[arg(
        long,
        env = "PDF_ASSISTANT_AGENT_URL",
        default_value = "http://localhost:5005/webhooks/rest/webhook"
    )]
    agent_url: String,

    /// Sender id reported to the conversational agent
    #[arg(long, env = "PDF_ASSISTANT_AGENT_SENDER", default_value = "pdf-assistant")]
    agent_sender: String,

    /// Source language for translations
    #[arg(long, env = "PDF_ASSISTANT_SOURCE_LANG", default_value = "en")]
    source_lang: String,

    /// Target language for translations
    #[arg(long, env = "PDF_ASSISTANT_TARGET_LANG", default_value = "pt")]
    target_lang: String,

    /// Seconds allowed for extracting one PDF
    #[arg(long, env = "PDF_ASSISTANT_EXTRACT_TIMEOUT", default_value = "30")]
    extract_timeout_secs: u64,

    /// Seconds allowed for each dictionary, translator or agent call
    #[arg(long, env = "PDF_ASSISTANT_COLLABORATOR_TIMEOUT", default_value = "10")]
    collaborator_timeout_secs: u64,

    /// How documents are identified in the index
    #[arg(long, env = "PDF_ASSISTANT_IDENTITY", value_enum, default_value_t = Identity::Path)]
    identity: Identity,

    /// Number of sentences in each summary
    #[arg(long, env = "PDF_ASSISTANT_SUMMARY_SENTENCES", default_value = "3")]
    summary_sentences: usize,

    /// PDFs extracted concurrently during folder ingestion
    #[arg(long, env = "PDF_ASSISTANT_INGEST_CONCURRENCY", default_value = "4")]
    ingest_concurrency: usize,
}

#[derive(Clone, Copy, ValueEnum)]
enum Identity {
    Path,
    ContentHash,
}

#[derive(Subcommand)]
enum Command {
    /// Ingest a PDF folder and print a summary of each document.
    Summarize {
        /// Folder that contains PDFs recursively.
        #[arg(long)]
        folder: String,
    },
    /// Ingest a PDF folder and list every sentence that contains a keyword.
    Search {
        #[arg(long)]
        folder: String,
        #[arg(long)]
        keyword: String,
    },
    /// Define a term from the PDFs, falling back to the dictionary.
    Define {
        #[arg(long)]
        folder: String,
        #[arg(long)]
        term: String,
    },
    /// Definition, agent reply, rephrasing and translation of a keyword.
    Explain {
        #[arg(long)]
        folder: String,
        #[arg(long)]
        keyword: String,
    },
    /// Translate text without touching the index.
    Translate {
        #[arg(long)]
        text: String,
        /// Overrides the configured target language.
        #[arg(long)]
        to: Option<String>,
    },
    /// Rephrase text with synonym substitution.
    Rephrase {
        #[arg(long)]
        text: String,
    },
}

impl Cli {
    fn config(&self) -> AssistantConfig {
        AssistantConfig {
            extract_timeout: Duration::from_secs(self.extract_timeout_secs),
            collaborator_timeout: Duration::from_secs(self.collaborator_timeout_secs),
            translation_source_lang: self.source_lang.clone(),
            translation_target_lang: self.target_lang.clone(),
            identity: match self.identity {
                Identity::Path => DocumentIdentity::Path,
                Identity::ContentHash => DocumentIdentity::ContentHash,
            },
            summary_sentences: self.summary_sentences,
            ingest_concurrency: self.ingest_concurrency,
        }
    }

    fn collaborators(&self) -> anyhow::Result<Collaborators> {
        Ok(Collaborators {
            extractor: Arc::new(LopdfExtractor),
            dictionary: Arc::new(FreeDictionaryLookup::new(&self.dictionary_url)),
            translator: Arc::new(MyMemoryTranslator::new(&self.translator_url)),
            rephraser: Arc::new(SynonymRephraser::with_default_thesaurus()?),
            agent: Arc::new(RasaRestAgent::new(&self.agent_url, &self.agent_sender)),
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_version = env!("CARGO_PKG_VERSION");

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();
    let assistant = Assistant::new(cli.collaborators()?, cli.config());

    info!(
        version = app_version,
        started_at = %Utc::now().to_rfc3339(),
        "pdf-assistant boot"
    );

    match cli.command {
        Command::Summarize { folder } => {
            let report = ingest(&assistant, &folder).await?;
            for (id, summary) in assistant.summarize_all(&report.registered) {
                println!("Summary for {id}:\n{}\n", summary?);
            }
        }
        Command::Search { folder, keyword } => {
            ingest(&assistant, &folder).await?;
            let response = assistant
                .handle_query(QueryIntent::SearchKeyword { keyword })
                .await?;
            println!("{response}");
        }
        Command::Define { folder, term } => {
            ingest(&assistant, &folder).await?;
            let response = assistant.handle_query(QueryIntent::Define { term }).await?;
            println!("{response}");
        }
        Command::Explain { folder, keyword } => {
            ingest(&assistant, &folder).await?;
            let explanation = assistant.explain(&keyword).await?;

            println!("{}", format_definition(&explanation.keyword, &explanation.definition));
            match &explanation.agent_response {
                Ok(reply) => println!("Agent: {reply}"),
                Err(error) => println!("Agent unavailable: {error}"),
            }
            println!("Rephrased Text: {}", explanation.rephrased);
            match &explanation.translated {
                Ok(translated) => println!("Translated Text: {translated}"),
                Err(error) => println!("Translation unavailable: {error}"),
            }
        }
        Command::Translate { text, to } => {
            let response = assistant
                .handle_query(QueryIntent::Translate {
                    text,
                    target_lang: to,
                })
                .await?;
            println!("{response}");
        }
        Command::Rephrase { text } => {
            let response = assistant.handle_query(QueryIntent::Rephrase { text }).await?;
            println!("{response}");
        }
    }

    Ok(())
}

async fn ingest(assistant: &Assistant, folder: &str) -> anyhow::Result<IngestionReport> {
    let report = assistant.ingest_folder(Path::new(folder)).await?;

    if !report.skipped_files.is_empty() {
        warn!(
            "skipped_files={} for folder={}",
            report.skipped_files.len(),
            folder
        );
    }

    if report.registered.is_empty() {
        println!("0 documents ingested (all files were skipped)");
    }

    info!(folder = %folder, document_count = report.registered.len(), "documents ingested");
    Ok(report)
}
