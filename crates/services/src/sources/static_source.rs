use async_trait::async_trait;
use quiz_core::model::{Answer, Question, QuestionError, QuizSet};

use super::QuestionSource;
use crate::error::SourceError;

/// A fixed question set held in memory; every load returns the same questions.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    quiz: QuizSet,
}

impl StaticSource {
    #[must_use]
    pub fn new(quiz: QuizSet) -> Self {
        Self { quiz }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in question set used when no other source is configured.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if a built-in question fails validation.
    pub fn sample() -> Result<Self, QuestionError> {
        let questions = vec![
            Question::new(
                "Capital of Nigeria?",
                vec![
                    Answer::incorrect("Lagos"),
                    Answer::correct("Abuja"),
                    Answer::incorrect("Kano"),
                    Answer::incorrect("Port Harcourt"),
                ],
            )?,
            Question::new(
                "Which is the largest planet in the solar system?",
                vec![
                    Answer::incorrect("Saturn"),
                    Answer::incorrect("Earth"),
                    Answer::correct("Jupiter"),
                    Answer::incorrect("Neptune"),
                ],
            )?,
            Question::new(
                "Which is the smallest continent?",
                vec![
                    Answer::incorrect("Europe"),
                    Answer::correct("Australia"),
                    Answer::incorrect("Antarctica"),
                    Answer::incorrect("South America"),
                ],
            )?,
            Question::new(
                "Which animal is the largest living mammal?",
                vec![
                    Answer::incorrect("Elephant"),
                    Answer::incorrect("Giraffe"),
                    Answer::correct("Blue whale"),
                    Answer::incorrect("Hippopotamus"),
                ],
            )?,
        ];
        Ok(Self::new(QuizSet::new(questions)))
    }

    #[must_use]
    pub fn quiz(&self) -> &QuizSet {
        &self.quiz
    }
}

#[async_trait]
impl QuestionSource for StaticSource {
    async fn load(&self) -> Result<QuizSet, SourceError> {
        Ok(self.quiz.clone())
    }

    fn describe(&self) -> String {
        format!("static ({} questions)", self.quiz.len())
    }
}
