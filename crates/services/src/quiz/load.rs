use std::fmt;
use std::sync::Arc;

use quiz_core::model::QuizSet;

use crate::error::{QuizError, SourceError};
use crate::sources::QuestionSource;

/// Generation number of a load request. Only the newest ticket may apply its result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub(crate) fn new(generation: u64) -> Self {
        Self(generation)
    }

    #[must_use]
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// A load that has been requested but not yet run.
///
/// Detached from the controller so the await can happen without holding it.
pub struct PendingLoad {
    ticket: LoadTicket,
    source: Arc<dyn QuestionSource>,
}

impl PendingLoad {
    pub(crate) fn new(ticket: LoadTicket, source: Arc<dyn QuestionSource>) -> Self {
        Self { ticket, source }
    }

    #[must_use]
    pub fn ticket(&self) -> LoadTicket {
        self.ticket
    }

    pub async fn run(self) -> CompletedLoad {
        let result = self.source.load().await;
        CompletedLoad {
            ticket: self.ticket,
            result,
        }
    }
}

impl fmt::Debug for PendingLoad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingLoad")
            .field("ticket", &self.ticket)
            .field("source", &self.source.describe())
            .finish()
    }
}

/// The result of a `PendingLoad`, to be handed back to `QuizController::finish_load`.
#[derive(Debug)]
pub struct CompletedLoad {
    pub ticket: LoadTicket,
    pub result: Result<QuizSet, SourceError>,
}

/// What `finish_load` did with a completed load.
#[derive(Debug)]
pub enum LoadOutcome {
    Started { total: usize },
    NoQuestions,
    Failed(SourceError),
    /// A newer load was requested after this one; its result was dropped.
    Stale,
}

impl LoadOutcome {
    /// # Errors
    ///
    /// Maps every outcome except `Started` to its `QuizError`.
    pub fn into_result(self) -> Result<usize, QuizError> {
        match self {
            Self::Started { total } => Ok(total),
            Self::NoQuestions => Err(QuizError::NoQuestionsAvailable),
            Self::Failed(err) => Err(QuizError::QuestionLoadFailed(err)),
            Self::Stale => Err(QuizError::Superseded),
        }
    }
}
