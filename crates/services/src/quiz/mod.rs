//! The quiz session controller and the view contract it drives.

mod controller;
mod load;
mod state;
mod view;

pub use controller::{Advance, AnswerVerdict, QuizController, QuizPhase};
pub use load::{CompletedLoad, LoadOutcome, LoadTicket, PendingLoad};
pub use state::SessionState;
pub use view::{AdvanceControl, AnswerControl, AnswerMark, AnswerSlot, QuizView};
