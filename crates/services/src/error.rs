//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::import::ImportError;
use quiz_core::model::WireError;
use storage::repository::StorageError;

/// Failures while obtaining a question set from a `QuestionSource`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    #[error("invalid question source url: {0}")]
    InvalidUrl(String),
    #[error("question request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("malformed question payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    InvalidQuestion(#[from] WireError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The recoverable outcomes of starting a quiz that do not produce an active session.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no quiz questions available")]
    NoQuestionsAvailable,
    #[error("failed to load quiz questions: {0}")]
    QuestionLoadFailed(#[source] SourceError),
    #[error("load was superseded by a newer request")]
    Superseded,
}

/// Errors emitted by `ImportService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ImportServiceError {
    #[error("upload contains no questions")]
    NoQuestions,
    #[error(transparent)]
    Parse(#[from] ImportError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
