use thiserror::Error;

//
// ─── ANSWER ────────────────────────────────────────────────────────────────────
//

/// One selectable choice of a question. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    text: String,
    correct: bool,
}

impl Answer {
    #[must_use]
    pub fn new(text: impl Into<String>, correct: bool) -> Self {
        Self {
            text: text.into(),
            correct,
        }
    }

    #[must_use]
    pub fn correct(text: impl Into<String>) -> Self {
        Self::new(text, true)
    }

    #[must_use]
    pub fn incorrect(text: impl Into<String>) -> Self {
        Self::new(text, false)
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.correct
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text must not be empty")]
    EmptyText,

    #[error("question has no answers")]
    NoAnswers,

    #[error("answer {position} has empty text")]
    EmptyAnswer { position: usize },

    #[error("question has no correct answer")]
    NoCorrectAnswer,

    #[error("question has {count} correct answers, expected exactly one")]
    MultipleCorrectAnswers { count: usize },
}

/// A prompt with an ordered list of answers, exactly one of which is correct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    text: String,
    answers: Vec<Answer>,
    correct_position: usize,
}

impl Question {
    /// Build a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the text is blank, there are no answers, an answer is
    /// blank, or the number of correct answers is not exactly one.
    pub fn new(text: impl Into<String>, answers: Vec<Answer>) -> Result<Self, QuestionError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if answers.is_empty() {
            return Err(QuestionError::NoAnswers);
        }
        if let Some(position) = answers.iter().position(|a| a.text.trim().is_empty()) {
            return Err(QuestionError::EmptyAnswer { position });
        }

        let mut correct = answers
            .iter()
            .enumerate()
            .filter(|(_, a)| a.correct)
            .map(|(i, _)| i);
        let correct_position = correct.next().ok_or(QuestionError::NoCorrectAnswer)?;
        let extra = correct.count();
        if extra > 0 {
            return Err(QuestionError::MultipleCorrectAnswers { count: extra + 1 });
        }

        Ok(Self {
            text,
            answers,
            correct_position,
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    #[must_use]
    pub fn answer(&self, position: usize) -> Option<&Answer> {
        self.answers.get(position)
    }

    /// Index of the one correct answer in source order.
    #[must_use]
    pub fn correct_position(&self) -> usize {
        self.correct_position
    }

    #[must_use]
    pub fn correct_answer(&self) -> &Answer {
        &self.answers[self.correct_position]
    }
}
