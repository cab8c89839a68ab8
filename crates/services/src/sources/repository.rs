use std::sync::Arc;

use async_trait::async_trait;
use quiz_core::model::QuizSet;
use storage::repository::QuestionRepository;

use super::QuestionSource;
use crate::error::SourceError;

/// Reads the whole stored question bank on every load.
#[derive(Clone)]
pub struct RepositorySource {
    questions: Arc<dyn QuestionRepository>,
}

impl RepositorySource {
    #[must_use]
    pub fn new(questions: Arc<dyn QuestionRepository>) -> Self {
        Self { questions }
    }
}

#[async_trait]
impl QuestionSource for RepositorySource {
    async fn load(&self) -> Result<QuizSet, SourceError> {
        let records = self.questions.list_questions().await?;
        Ok(records.into_iter().map(|r| r.question).collect())
    }

    fn describe(&self) -> String {
        "question bank".to_string()
    }
}
