use quiz_core::model::{Answer, Question, QuestionId};
use sqlx::Row;

use crate::repository::{QuestionRecord, StorageError};

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn question_id_from_i64(v: i64) -> Result<QuestionId, StorageError> {
    u64::try_from(v)
        .map(QuestionId::new)
        .map_err(|_| StorageError::Serialization("question_id sign overflow".into()))
}

pub(crate) fn position_i64(position: usize) -> Result<i64, StorageError> {
    i64::try_from(position).map_err(|_| StorageError::Serialization("position overflow".into()))
}

/// Folds joined question/answer rows (ordered by question id, then position) into records.
pub(crate) fn map_question_rows(
    rows: &[sqlx::sqlite::SqliteRow],
) -> Result<Vec<QuestionRecord>, StorageError> {
    struct Pending {
        id: QuestionId,
        text: String,
        imported_at: chrono::DateTime<chrono::Utc>,
        answers: Vec<Answer>,
    }

    fn finish(p: Pending) -> Result<QuestionRecord, StorageError> {
        let question = Question::new(p.text, p.answers).map_err(ser)?;
        Ok(QuestionRecord {
            id: p.id,
            question,
            imported_at: p.imported_at,
        })
    }

    let mut out = Vec::new();
    let mut current: Option<Pending> = None;

    for row in rows {
        let id = question_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?;
        let answer = Answer::new(
            row.try_get::<String, _>("answer_text").map_err(ser)?,
            row.try_get::<bool, _>("correct").map_err(ser)?,
        );

        match current.as_mut() {
            Some(p) if p.id == id => p.answers.push(answer),
            _ => {
                if let Some(done) = current.take() {
                    out.push(finish(done)?);
                }
                current = Some(Pending {
                    id,
                    text: row.try_get("text").map_err(ser)?,
                    imported_at: row.try_get("imported_at").map_err(ser)?,
                    answers: vec![answer],
                });
            }
        }
    }

    if let Some(done) = current {
        out.push(finish(done)?);
    }
    Ok(out)
}
