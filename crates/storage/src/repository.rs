use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quiz_core::model::{Question, QuestionId};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted question together with its storage metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRecord {
    pub id: QuestionId,
    pub question: Question,
    pub imported_at: DateTime<Utc>,
}

/// Repository contract for the question bank.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Append questions in order and return their assigned ids.
    ///
    /// Either every question is stored or none is.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the questions cannot be stored.
    async fn append_questions(
        &self,
        questions: &[Question],
        imported_at: DateTime<Utc>,
    ) -> Result<Vec<QuestionId>, StorageError>;

    /// List every stored question in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the rows cannot be read or mapped.
    async fn list_questions(&self) -> Result<Vec<QuestionRecord>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn count_questions(&self) -> Result<u64, StorageError>;

    /// Remove every stored question.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn clear_questions(&self) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    questions: Arc<Mutex<Vec<QuestionRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuestionRepository for InMemoryRepository {
    async fn append_questions(
        &self,
        questions: &[Question],
        imported_at: DateTime<Utc>,
    ) -> Result<Vec<QuestionId>, StorageError> {
        let mut guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut next = guard.last().map_or(1, |r| r.id.value() + 1);
        let mut ids = Vec::with_capacity(questions.len());
        for question in questions {
            let id = QuestionId::new(next);
            next += 1;
            guard.push(QuestionRecord {
                id,
                question: question.clone(),
                imported_at,
            });
            ids.push(id);
        }
        Ok(ids)
    }

    async fn list_questions(&self) -> Result<Vec<QuestionRecord>, StorageError> {
        let guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn count_questions(&self) -> Result<u64, StorageError> {
        let guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        u64::try_from(guard.len()).map_err(|_| StorageError::Serialization("count overflow".into()))
    }

    async fn clear_questions(&self) -> Result<(), StorageError> {
        let mut guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.clear();
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub questions: Arc<dyn QuestionRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let questions: Arc<dyn QuestionRepository> = Arc::new(InMemoryRepository::new());
        Self { questions }
    }
}
