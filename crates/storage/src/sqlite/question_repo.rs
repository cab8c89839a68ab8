use chrono::{DateTime, Utc};
use quiz_core::model::{Question, QuestionId};

use super::SqliteRepository;
use super::mapping::{map_question_rows, position_i64, question_id_from_i64};
use crate::repository::{QuestionRecord, QuestionRepository, StorageError};

fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait::async_trait]
impl QuestionRepository for SqliteRepository {
    async fn append_questions(
        &self,
        questions: &[Question],
        imported_at: DateTime<Utc>,
    ) -> Result<Vec<QuestionId>, StorageError> {
        let mut tx = self.pool.begin().await.map_err(conn)?;
        let mut ids = Vec::with_capacity(questions.len());

        for question in questions {
            let res = sqlx::query(
                r"
                INSERT INTO questions (text, imported_at)
                VALUES (?1, ?2)
                ",
            )
            .bind(question.text())
            .bind(imported_at)
            .execute(&mut *tx)
            .await
            .map_err(conn)?;
            let question_id = res.last_insert_rowid();

            for (position, answer) in question.answers().iter().enumerate() {
                sqlx::query(
                    r"
                    INSERT INTO answers (question_id, position, text, correct)
                    VALUES (?1, ?2, ?3, ?4)
                    ",
                )
                .bind(question_id)
                .bind(position_i64(position)?)
                .bind(answer.text())
                .bind(answer.is_correct())
                .execute(&mut *tx)
                .await
                .map_err(conn)?;
            }

            ids.push(question_id_from_i64(question_id)?);
        }

        tx.commit().await.map_err(conn)?;
        Ok(ids)
    }

    async fn list_questions(&self) -> Result<Vec<QuestionRecord>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT
                q.id, q.text, q.imported_at,
                a.position, a.text AS answer_text, a.correct
            FROM questions q
            JOIN answers a ON a.question_id = q.id
            ORDER BY q.id ASC, a.position ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        map_question_rows(&rows)
    }

    async fn count_questions(&self) -> Result<u64, StorageError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM questions")
            .fetch_one(&self.pool)
            .await
            .map_err(conn)?;
        u64::try_from(count).map_err(|_| StorageError::Serialization("count overflow".into()))
    }

    async fn clear_questions(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM questions")
            .execute(&self.pool)
            .await
            .map_err(conn)?;
        Ok(())
    }
}
