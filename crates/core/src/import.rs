//! Parser for the plain-text question upload format.
//!
//! ```text
//! Question: Capital of Nigeria?
//! Options: Lagos, Abuja, Kano, Port Harcourt
//! Correct Answer: Abuja
//! ```
//!
//! Lines are trimmed before matching. A `Question:` line opens a new block; lines that
//! match none of the three prefixes are ignored.

use thiserror::Error;

use crate::model::{Answer, Question, QuestionError};

const QUESTION_PREFIX: &str = "Question:";
const OPTIONS_PREFIX: &str = "Options:";
const CORRECT_PREFIX: &str = "Correct Answer:";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ImportError {
    #[error("line {line}: field appears before any `Question:` line")]
    FieldOutsideQuestion { line: usize },

    #[error("question {question} has no `Options:` line")]
    MissingOptions { question: usize },

    #[error("question {question} has no `Correct Answer:` line")]
    MissingCorrectAnswer { question: usize },

    #[error("question {question}: {source}")]
    InvalidQuestion {
        question: usize,
        #[source]
        source: QuestionError,
    },
}

#[derive(Debug, Clone, Copy)]
enum Field {
    Options,
    Correct,
}

#[derive(Debug, Default)]
struct Block {
    text: String,
    options: Option<String>,
    correct: Option<String>,
}

impl Block {
    fn into_question(self, ordinal: usize) -> Result<Question, ImportError> {
        let options = self
            .options
            .ok_or(ImportError::MissingOptions { question: ordinal })?;
        let correct = self
            .correct
            .ok_or(ImportError::MissingCorrectAnswer { question: ordinal })?;

        let answers = options
            .split(',')
            .map(str::trim)
            .map(|opt| Answer::new(opt, opt == correct))
            .collect();

        Question::new(self.text, answers).map_err(|source| ImportError::InvalidQuestion {
            question: ordinal,
            source,
        })
    }
}

fn field_value<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    line.strip_prefix(prefix).map(str::trim)
}

/// Parse an uploaded question file.
///
/// Questions are numbered from 1 in error messages. Input without any `Question:` line
/// yields an empty list.
///
/// # Errors
///
/// Returns `ImportError` for blocks missing a field, fields outside a block, or blocks
/// that do not form a valid question.
pub fn parse_questions(input: &str) -> Result<Vec<Question>, ImportError> {
    let mut blocks: Vec<Block> = Vec::new();

    for (idx, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if let Some(text) = field_value(line, QUESTION_PREFIX) {
            blocks.push(Block {
                text: text.to_owned(),
                ..Block::default()
            });
            continue;
        }

        let (field, value) = if let Some(value) = field_value(line, OPTIONS_PREFIX) {
            (Field::Options, value)
        } else if let Some(value) = field_value(line, CORRECT_PREFIX) {
            (Field::Correct, value)
        } else {
            continue;
        };

        let block = blocks
            .last_mut()
            .ok_or(ImportError::FieldOutsideQuestion { line: idx + 1 })?;
        let value = Some(value.to_owned());
        match field {
            Field::Options => block.options = value,
            Field::Correct => block.correct = value,
        }
    }

    blocks
        .into_iter()
        .enumerate()
        .map(|(i, block)| block.into_question(i + 1))
        .collect()
}
