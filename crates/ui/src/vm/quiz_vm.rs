use services::{AdvanceControl, AnswerControl, AnswerMark, AnswerSlot, QuizView};

pub const LOADING_MESSAGE: &str = "Loading...";
pub const EMPTY_MESSAGE: &str = "No quiz questions found! Please upload a file first.";
pub const LOAD_ERROR_MESSAGE: &str = "Error loading quiz questions. Please try again later.";

/// What the question region currently shows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Heading {
    #[default]
    Blank,
    Loading,
    Question { ordinal: usize, text: String },
    Empty,
    LoadError { detail: String },
    Score { score: usize, total: usize },
}

impl Heading {
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::Blank => String::new(),
            Self::Loading => LOADING_MESSAGE.to_string(),
            Self::Question { ordinal, text } => format!("{ordinal}. {text}"),
            Self::Empty => EMPTY_MESSAGE.to_string(),
            Self::LoadError { .. } => LOAD_ERROR_MESSAGE.to_string(),
            Self::Score { score, total } => format!("You scored {score} out of {total}!"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerButtonVm {
    pub slot: AnswerSlot,
    pub text: String,
    pub mark: Option<AnswerMark>,
    pub disabled: bool,
}

impl AnswerButtonVm {
    #[must_use]
    pub fn class_name(&self) -> &'static str {
        match self.mark {
            None => "btn",
            Some(AnswerMark::Correct) => "btn correct",
            Some(AnswerMark::Incorrect) => "btn incorrect",
        }
    }
}

/// Snapshot of the quiz screen, written by the controller and read by `QuizPage`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuizScreen {
    heading: Heading,
    answers: Vec<AnswerButtonVm>,
    advance: AdvanceControl,
}

impl QuizScreen {
    #[must_use]
    pub fn heading(&self) -> &Heading {
        &self.heading
    }

    #[must_use]
    pub fn answers(&self) -> &[AnswerButtonVm] {
        &self.answers
    }

    #[must_use]
    pub fn advance(&self) -> AdvanceControl {
        self.advance
    }

    #[must_use]
    pub fn advance_label(&self) -> Option<&'static str> {
        match self.advance {
            AdvanceControl::Hidden => None,
            AdvanceControl::Next => Some("Next"),
            AdvanceControl::PlayAgain => Some("Play Again"),
        }
    }

    /// Failure detail shown under the load error message.
    #[must_use]
    pub fn error_detail(&self) -> Option<&str> {
        match &self.heading {
            Heading::LoadError { detail } => Some(detail),
            _ => None,
        }
    }

    /// `Empty` and `LoadError` have no advance control; the page offers a retry instead.
    #[must_use]
    pub fn offers_retry(&self) -> bool {
        matches!(self.heading, Heading::Empty | Heading::LoadError { .. })
    }
}

impl QuizView for QuizScreen {
    fn show_loading(&mut self) {
        self.heading = Heading::Loading;
    }

    fn show_question(&mut self, ordinal: usize, text: &str) {
        self.heading = Heading::Question {
            ordinal,
            text: text.to_owned(),
        };
    }

    fn clear_answers(&mut self) {
        self.answers.clear();
    }

    fn add_answer(&mut self, control: AnswerControl) {
        self.answers.push(AnswerButtonVm {
            slot: control.slot,
            text: control.text,
            mark: None,
            disabled: false,
        });
    }

    fn mark_answer(&mut self, slot: AnswerSlot, mark: AnswerMark) {
        if let Some(button) = self.answers.iter_mut().find(|b| b.slot == slot) {
            button.mark = Some(mark);
        }
    }

    fn disable_answers(&mut self) {
        for button in &mut self.answers {
            button.disabled = true;
        }
    }

    fn set_advance(&mut self, control: AdvanceControl) {
        self.advance = control;
    }

    fn show_empty(&mut self) {
        self.heading = Heading::Empty;
    }

    fn show_load_error(&mut self, detail: &str) {
        self.heading = Heading::LoadError {
            detail: detail.to_owned(),
        };
    }

    fn show_score(&mut self, score: usize, total: usize) {
        self.heading = Heading::Score { score, total };
    }
}
