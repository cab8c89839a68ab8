#![forbid(unsafe_code)]

pub mod error;
pub mod import_service;
pub mod quiz;
pub mod sources;

pub use quiz_core::Clock;

pub use error::{ImportServiceError, QuizError, SourceError};
pub use import_service::{ImportReport, ImportService};
pub use quiz::{
    Advance, AdvanceControl, AnswerControl, AnswerMark, AnswerSlot, AnswerVerdict,
    CompletedLoad, LoadOutcome, LoadTicket, PendingLoad, QuizController, QuizPhase, QuizView,
    SessionState,
};
pub use sources::{QuestionSource, RemoteSource, RepositorySource, StaticSource};
