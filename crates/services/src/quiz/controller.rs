use std::fmt;
use std::sync::Arc;

use quiz_core::model::QuizSet;

use super::load::{CompletedLoad, LoadOutcome, LoadTicket, PendingLoad};
use super::state::SessionState;
use super::view::{AdvanceControl, AnswerControl, AnswerMark, AnswerSlot, QuizView};
use crate::error::QuizError;
use crate::sources::QuestionSource;

//
// ─── PHASES ────────────────────────────────────────────────────────────────────
//

/// Externally visible state of the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizPhase {
    /// Constructed, no load requested yet.
    Idle,
    Loading,
    /// The source returned no questions.
    Empty,
    LoadError,
    Active,
    Finished,
}

enum Stage {
    Idle,
    Loading,
    Empty,
    LoadError,
    Running { quiz: QuizSet, session: SessionState },
}

/// Result of `select_answer` when the choice was accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnswerVerdict {
    pub chosen: AnswerSlot,
    pub correct_slot: AnswerSlot,
    pub is_correct: bool,
    pub score: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the question at `index` (0-based).
    Next { index: usize },
    Finished { score: usize, total: usize },
    /// Nothing to advance: not active, not yet answered, or already finished.
    Ignored,
}

//
// ─── CONTROLLER ────────────────────────────────────────────────────────────────
//

/// Drives one quiz through its questions and keeps the view in sync.
///
/// All mutation happens synchronously inside the event methods. The only
/// asynchronous step is loading, which is split into `begin_load` / `PendingLoad::run`
/// / `finish_load` so callers can await without holding the controller. Each
/// `begin_load` issues a new ticket; completions carrying an older ticket are dropped,
/// so the most recently requested load always wins.
pub struct QuizController<V> {
    source: Arc<dyn QuestionSource>,
    view: V,
    stage: Stage,
    generation: u64,
}

impl<V: QuizView> QuizController<V> {
    #[must_use]
    pub fn new(source: Arc<dyn QuestionSource>, view: V) -> Self {
        Self {
            source,
            view,
            stage: Stage::Idle,
            generation: 0,
        }
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        match &self.stage {
            Stage::Idle => QuizPhase::Idle,
            Stage::Loading => QuizPhase::Loading,
            Stage::Empty => QuizPhase::Empty,
            Stage::LoadError => QuizPhase::LoadError,
            Stage::Running { quiz, session } if session.is_finished(quiz.len()) => {
                QuizPhase::Finished
            }
            Stage::Running { .. } => QuizPhase::Active,
        }
    }

    /// Session progress, present only after a successful non-empty load.
    #[must_use]
    pub fn session(&self) -> Option<&SessionState> {
        match &self.stage {
            Stage::Running { session, .. } => Some(session),
            _ => None,
        }
    }

    #[must_use]
    pub fn quiz(&self) -> Option<&QuizSet> {
        match &self.stage {
            Stage::Running { quiz, .. } => Some(quiz),
            _ => None,
        }
    }

    #[must_use]
    pub fn score(&self) -> Option<usize> {
        self.session().map(SessionState::score)
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.session().map(SessionState::current_index)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.quiz().map_or(0, QuizSet::len)
    }

    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    //
    // ─── LOADING ───────────────────────────────────────────────────────────────
    //

    /// Enter `Loading` and issue a new load ticket.
    ///
    /// Any session in progress is discarded. Answer and advance events are ignored
    /// until the returned load is finished.
    pub fn begin_load(&mut self) -> PendingLoad {
        self.generation += 1;
        self.stage = Stage::Loading;
        self.view.clear_answers();
        self.view.set_advance(AdvanceControl::Hidden);
        self.view.show_loading();
        tracing::debug!(
            generation = self.generation,
            source = %self.source.describe(),
            "loading quiz questions"
        );
        PendingLoad::new(LoadTicket::new(self.generation), Arc::clone(&self.source))
    }

    /// Apply a completed load if it is the newest one requested.
    pub fn finish_load(&mut self, done: CompletedLoad) -> LoadOutcome {
        if done.ticket.generation() != self.generation {
            tracing::debug!(
                ticket = done.ticket.generation(),
                latest = self.generation,
                "dropping superseded question load"
            );
            return LoadOutcome::Stale;
        }

        match done.result {
            Ok(quiz) if quiz.is_empty() => {
                tracing::info!("question source returned no questions");
                self.stage = Stage::Empty;
                self.view.clear_answers();
                self.view.set_advance(AdvanceControl::Hidden);
                self.view.show_empty();
                LoadOutcome::NoQuestions
            }
            Ok(quiz) => {
                let total = quiz.len();
                tracing::info!(total, "quiz started");
                self.stage = Stage::Running {
                    quiz,
                    session: SessionState::new(),
                };
                self.render_current_question();
                LoadOutcome::Started { total }
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load quiz questions");
                self.stage = Stage::LoadError;
                self.view.clear_answers();
                self.view.set_advance(AdvanceControl::Hidden);
                self.view.show_load_error(&err.to_string());
                LoadOutcome::Failed(err)
            }
        }
    }

    /// Load from the configured source and start at the first question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoQuestionsAvailable` for an empty set and
    /// `QuizError::QuestionLoadFailed` when the source fails. The controller is left in
    /// the matching display state either way.
    pub async fn load_and_start(&mut self) -> Result<usize, QuizError> {
        let pending = self.begin_load();
        let done = pending.run().await;
        self.finish_load(done).into_result()
    }

    /// Request a fresh load from `Finished`, `Empty`, `LoadError` or `Idle`.
    ///
    /// Returns `None` while a quiz is in progress or a load is outstanding.
    pub fn restart(&mut self) -> Option<PendingLoad> {
        match self.phase() {
            QuizPhase::Finished | QuizPhase::Empty | QuizPhase::LoadError | QuizPhase::Idle => {
                Some(self.begin_load())
            }
            QuizPhase::Loading | QuizPhase::Active => None,
        }
    }

    //
    // ─── EVENTS ────────────────────────────────────────────────────────────────
    //

    /// Redraw the current question with fresh, unmarked answer controls.
    pub fn render_current_question(&mut self) {
        let Stage::Running { quiz, session } = &self.stage else {
            return;
        };
        let index = session.current_index();
        let Some(question) = quiz.get(index) else {
            return;
        };

        self.view.clear_answers();
        self.view.set_advance(AdvanceControl::Hidden);
        self.view.show_question(index + 1, question.text());
        for (position, answer) in question.answers().iter().enumerate() {
            self.view.add_answer(AnswerControl {
                slot: AnswerSlot::new(position),
                text: answer.text().to_owned(),
            });
        }
    }

    /// Lock in the answer at `slot` for the current question.
    ///
    /// Only the first choice per question counts; later calls, calls outside an active
    /// question, and unknown slots return `None` and change nothing.
    pub fn select_answer(&mut self, slot: AnswerSlot) -> Option<AnswerVerdict> {
        let Stage::Running { quiz, session } = &mut self.stage else {
            return None;
        };
        let question = quiz.get(session.current_index())?;
        let answer = question.answer(slot.index())?;
        let is_correct = answer.is_correct();
        if !session.lock(is_correct) {
            return None;
        }

        let correct_slot = AnswerSlot::new(question.correct_position());
        if is_correct {
            self.view.mark_answer(slot, AnswerMark::Correct);
        } else {
            self.view.mark_answer(slot, AnswerMark::Incorrect);
            self.view.mark_answer(correct_slot, AnswerMark::Correct);
        }
        self.view.disable_answers();
        self.view.set_advance(AdvanceControl::Next);

        tracing::debug!(
            question = session.current_index(),
            slot = slot.index(),
            is_correct,
            score = session.score(),
            "answer selected"
        );

        Some(AnswerVerdict {
            chosen: slot,
            correct_slot,
            is_correct,
            score: session.score(),
        })
    }

    /// Move to the next question, or to the final score after the last one.
    pub fn advance(&mut self) -> Advance {
        let Stage::Running { quiz, session } = &mut self.stage else {
            return Advance::Ignored;
        };
        let total = quiz.len();
        if !session.step(total) {
            return Advance::Ignored;
        }

        if session.is_finished(total) {
            let score = session.score();
            tracing::info!(score, total, "quiz finished");
            self.view.clear_answers();
            self.view.show_score(score, total);
            self.view.set_advance(AdvanceControl::PlayAgain);
            return Advance::Finished { score, total };
        }

        let index = session.current_index();
        self.render_current_question();
        Advance::Next { index }
    }

    /// Handler for the advance control: next question, or restart once finished.
    pub fn press_advance(&mut self) -> Option<PendingLoad> {
        if self.phase() == QuizPhase::Finished {
            return self.restart();
        }
        self.advance();
        None
    }
}

impl<V> fmt::Debug for QuizController<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match &self.stage {
            Stage::Idle => "idle",
            Stage::Loading => "loading",
            Stage::Empty => "empty",
            Stage::LoadError => "load_error",
            Stage::Running { .. } => "running",
        };
        f.debug_struct("QuizController")
            .field("source", &self.source.describe())
            .field("stage", &stage)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::StaticSource;
    use quiz_core::model::{Answer, Question};

    #[derive(Default)]
    struct CountingView {
        loading: usize,
        questions: Vec<(usize, String)>,
        marks: Vec<(AnswerSlot, AnswerMark)>,
        empty: usize,
        errors: usize,
    }

    impl QuizView for CountingView {
        fn show_loading(&mut self) {
            self.loading += 1;
        }
        fn show_question(&mut self, ordinal: usize, text: &str) {
            self.questions.push((ordinal, text.to_owned()));
        }
        fn clear_answers(&mut self) {}
        fn add_answer(&mut self, _control: AnswerControl) {}
        fn mark_answer(&mut self, slot: AnswerSlot, mark: AnswerMark) {
            self.marks.push((slot, mark));
        }
        fn disable_answers(&mut self) {}
        fn set_advance(&mut self, _control: AdvanceControl) {}
        fn show_empty(&mut self) {
            self.empty += 1;
        }
        fn show_load_error(&mut self, _detail: &str) {
            self.errors += 1;
        }
        fn show_score(&mut self, _score: usize, _total: usize) {}
    }

    fn one_question() -> QuizSet {
        QuizSet::new(vec![
            Question::new("Q", vec![Answer::incorrect("a"), Answer::correct("b")]).unwrap(),
        ])
    }

    fn controller() -> QuizController<CountingView> {
        QuizController::new(
            Arc::new(StaticSource::new(one_question())),
            CountingView::default(),
        )
    }

    #[test]
    fn events_are_ignored_before_any_load() {
        let mut ctl = controller();
        assert_eq!(ctl.phase(), QuizPhase::Idle);
        assert_eq!(ctl.select_answer(AnswerSlot::new(0)), None);
        assert_eq!(ctl.advance(), Advance::Ignored);
        assert!(ctl.session().is_none());
    }

    #[test]
    fn events_are_ignored_while_loading() {
        let mut ctl = controller();
        let _pending = ctl.begin_load();
        assert_eq!(ctl.phase(), QuizPhase::Loading);
        assert_eq!(ctl.select_answer(AnswerSlot::new(1)), None);
        assert_eq!(ctl.advance(), Advance::Ignored);
        assert!(ctl.restart().is_none());
        assert_eq!(ctl.view().loading, 1);
    }

    #[test]
    fn stale_completion_is_dropped() {
        let mut ctl = controller();
        let first = ctl.begin_load();
        let second = ctl.begin_load();
        assert!(second.ticket() > first.ticket());

        let stale = CompletedLoad {
            ticket: first.ticket(),
            result: Ok(QuizSet::empty()),
        };
        assert!(matches!(ctl.finish_load(stale), LoadOutcome::Stale));
        assert_eq!(ctl.phase(), QuizPhase::Loading);
        assert_eq!(ctl.view().empty, 0);

        let fresh = CompletedLoad {
            ticket: second.ticket(),
            result: Ok(one_question()),
        };
        assert!(matches!(
            ctl.finish_load(fresh),
            LoadOutcome::Started { total: 1 }
        ));
        assert_eq!(ctl.phase(), QuizPhase::Active);
        assert_eq!(ctl.view().questions, vec![(1, "Q".to_string())]);
    }

    #[test]
    fn stale_completion_cannot_replace_an_active_quiz() {
        let mut ctl = controller();
        let old = ctl.begin_load().ticket();
        let new = ctl.begin_load().ticket();
        ctl.finish_load(CompletedLoad {
            ticket: new,
            result: Ok(one_question()),
        });
        ctl.select_answer(AnswerSlot::new(1));

        let outcome = ctl.finish_load(CompletedLoad {
            ticket: old,
            result: Ok(QuizSet::empty()),
        });
        assert!(matches!(outcome, LoadOutcome::Stale));
        assert_eq!(ctl.phase(), QuizPhase::Active);
        assert_eq!(ctl.score(), Some(1));
    }

    #[test]
    fn wrong_choice_reveals_the_correct_slot() {
        let mut ctl = controller();
        let ticket = ctl.begin_load().ticket();
        ctl.finish_load(CompletedLoad {
            ticket,
            result: Ok(one_question()),
        });

        let verdict = ctl.select_answer(AnswerSlot::new(0)).unwrap();
        assert!(!verdict.is_correct);
        assert_eq!(verdict.correct_slot, AnswerSlot::new(1));
        assert_eq!(
            ctl.view().marks,
            vec![
                (AnswerSlot::new(0), AnswerMark::Incorrect),
                (AnswerSlot::new(1), AnswerMark::Correct),
            ]
        );
    }

    #[test]
    fn unknown_slot_does_not_lock_the_question() {
        let mut ctl = controller();
        let ticket = ctl.begin_load().ticket();
        ctl.finish_load(CompletedLoad {
            ticket,
            result: Ok(one_question()),
        });

        assert_eq!(ctl.select_answer(AnswerSlot::new(7)), None);
        assert!(!ctl.session().unwrap().is_answered());
        assert!(ctl.select_answer(AnswerSlot::new(1)).is_some());
    }
}
