/// Position of an answer control within the current question, in source order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnswerSlot(usize);

impl AnswerSlot {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// What the view needs to draw one answer button.
///
/// Carries no correctness; the controller keeps that and reports it through
/// [`QuizView::mark_answer`] once an answer is chosen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerControl {
    pub slot: AnswerSlot,
    pub text: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerMark {
    Correct,
    Incorrect,
}

/// State of the single advance/restart control.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AdvanceControl {
    #[default]
    Hidden,
    Next,
    PlayAgain,
}

/// Rendering surface driven by `QuizController`.
///
/// Implementations only draw; they never score. Clicks are forwarded back to the
/// controller as `select_answer(slot)` and `press_advance()`.
pub trait QuizView {
    fn show_loading(&mut self);

    /// `ordinal` is 1-based.
    fn show_question(&mut self, ordinal: usize, text: &str);

    fn clear_answers(&mut self);
    fn add_answer(&mut self, control: AnswerControl);
    fn mark_answer(&mut self, slot: AnswerSlot, mark: AnswerMark);
    fn disable_answers(&mut self);

    fn set_advance(&mut self, control: AdvanceControl);

    fn show_empty(&mut self);
    fn show_load_error(&mut self, detail: &str);
    fn show_score(&mut self, score: usize, total: usize);
}
