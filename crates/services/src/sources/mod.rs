//! Where a quiz run gets its questions from.

mod remote;
mod repository;
mod static_source;

use async_trait::async_trait;
use quiz_core::model::QuizSet;

use crate::error::SourceError;

pub use remote::{DEFAULT_TIMEOUT, RemoteSource};
pub use repository::RepositorySource;
pub use static_source::StaticSource;

/// Supplies the ordered question set for a quiz run.
///
/// Called once per start and again on every restart. An empty set is a normal
/// result, not an error.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// # Errors
    ///
    /// Returns `SourceError` when the questions cannot be obtained or are malformed.
    async fn load(&self) -> Result<QuizSet, SourceError>;

    /// Short human-readable label for logs.
    fn describe(&self) -> String;
}
