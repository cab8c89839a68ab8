//! JSON shape exchanged with the question endpoint.
//!
//! `[{"question": "...", "answers": [{"text": "...", "correct": true}, ...]}, ...]`

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Answer, Question, QuestionError, QuizSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerPayload {
    pub text: String,
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionPayload {
    pub question: String,
    pub answers: Vec<AnswerPayload>,
}

/// A payload entry that could not be turned into a `Question`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("question {index}: {source}")]
pub struct WireError {
    pub index: usize,
    #[source]
    pub source: QuestionError,
}

impl From<&Question> for QuestionPayload {
    fn from(question: &Question) -> Self {
        Self {
            question: question.text().to_owned(),
            answers: question
                .answers()
                .iter()
                .map(|a| AnswerPayload {
                    text: a.text().to_owned(),
                    correct: a.is_correct(),
                })
                .collect(),
        }
    }
}

impl TryFrom<QuestionPayload> for Question {
    type Error = QuestionError;

    fn try_from(payload: QuestionPayload) -> Result<Self, Self::Error> {
        let answers = payload
            .answers
            .into_iter()
            .map(|a| Answer::new(a.text, a.correct))
            .collect();
        Question::new(payload.question, answers)
    }
}

/// Validate every payload and collect them in order.
///
/// # Errors
///
/// Returns `WireError` naming the first payload (0-based) that fails validation.
pub fn decode_quiz_set(payloads: Vec<QuestionPayload>) -> Result<QuizSet, WireError> {
    payloads
        .into_iter()
        .enumerate()
        .map(|(index, payload)| {
            Question::try_from(payload).map_err(|source| WireError { index, source })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(QuizSet::new)
}

#[must_use]
pub fn encode_quiz_set(quiz: &QuizSet) -> Vec<QuestionPayload> {
    quiz.iter().map(QuestionPayload::from).collect()
}
