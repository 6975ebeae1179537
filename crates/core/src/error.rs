use crate::models::DocumentId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("pdf parse error: {0}")]
    PdfParse(String),

    #[error("unsupported document format: {0}")]
    Unsupported(String),

    #[error("extraction produced no readable text: {0}")]
    Empty(String),

    #[error("extraction timed out after {0:?}")]
    Timeout(std::time::Duration),
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("extraction failed: {0}")]
    Extract(#[from] ExtractError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("path has no file name: {0}")]
    MissingFileName(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("extraction task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("no such document: {0}")]
pub struct NotFoundError(pub DocumentId);

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("malformed dictionary response: {0}")]
    MalformedResponse(String),

    #[error("dictionary lookup timed out after {0:?}")]
    Timeout(std::time::Duration),
}

#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("invalid response from translator ({status}): {details}")]
    BackendResponse { status: u16, details: String },

    #[error("malformed translation response: {0}")]
    MalformedResponse(String),

    #[error("translation timed out after {0:?}")]
    Timeout(std::time::Duration),
}

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid response from agent ({status}): {details}")]
    BackendResponse { status: u16, details: String },

    #[error("malformed agent response: {0}")]
    MalformedResponse(String),

    #[error("agent timed out after {0:?}")]
    Timeout(std::time::Duration),
}

#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error("invalid query payload: {0}")]
    InvalidPayload(String),

    #[error(transparent)]
    Translation(#[from] TranslationError),
}

pub type Result<T, E = IngestError> = std::result::Result<T, E>;
