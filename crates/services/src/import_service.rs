use std::sync::Arc;

use quiz_core::Clock;
use quiz_core::import::parse_questions;
use quiz_core::model::QuestionId;
use storage::repository::QuestionRepository;

use crate::error::ImportServiceError;

/// Outcome of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub question_count: usize,
    pub ids: Vec<QuestionId>,
}

/// Parses uploaded question files and appends them to the question bank.
#[derive(Clone)]
pub struct ImportService {
    clock: Clock,
    questions: Arc<dyn QuestionRepository>,
}

impl ImportService {
    #[must_use]
    pub fn new(clock: Clock, questions: Arc<dyn QuestionRepository>) -> Self {
        Self { clock, questions }
    }

    /// Parse `input` in the upload text format and store every question.
    ///
    /// Nothing is stored unless the whole file parses.
    ///
    /// # Errors
    ///
    /// Returns `ImportServiceError::Parse` for malformed input,
    /// `ImportServiceError::NoQuestions` if the file has no question blocks, and
    /// `ImportServiceError::Storage` if persistence fails.
    pub async fn import_text(&self, input: &str) -> Result<ImportReport, ImportServiceError> {
        let questions = parse_questions(input)?;
        if questions.is_empty() {
            return Err(ImportServiceError::NoQuestions);
        }

        let ids = self
            .questions
            .append_questions(&questions, self.clock.now())
            .await?;
        tracing::info!(count = ids.len(), "imported questions");

        Ok(ImportReport {
            question_count: ids.len(),
            ids,
        })
    }
}
