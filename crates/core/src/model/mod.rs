mod ids;
mod question;
mod quiz_set;
pub mod wire;

pub use ids::QuestionId;
pub use question::{Answer, Question, QuestionError};
pub use quiz_set::QuizSet;
pub use wire::{AnswerPayload, QuestionPayload, WireError};
