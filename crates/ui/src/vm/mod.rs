mod quiz_vm;

pub use quiz_vm::{AnswerButtonVm, Heading, QuizScreen};
