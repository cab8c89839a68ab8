#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use quiz_core::model::{Answer, Question, QuizSet};
use services::{
    AdvanceControl, AnswerControl, AnswerMark, AnswerSlot, QuestionSource, QuizView, SourceError,
};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Answer button as the recording view last drew it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub slot: AnswerSlot,
    pub text: String,
    pub mark: Option<AnswerMark>,
    pub disabled: bool,
}

/// Headless view that keeps the latest screen in plain fields.
#[derive(Debug, Default)]
pub struct RecordingView {
    pub heading: String,
    pub buttons: Vec<Button>,
    pub advance: AdvanceControl,
    pub load_error_detail: Option<String>,
    pub loading_count: usize,
}

impl RecordingView {
    pub fn button(&self, text: &str) -> &Button {
        self.buttons
            .iter()
            .find(|b| b.text == text)
            .unwrap_or_else(|| panic!("no button labelled {text}"))
    }

    pub fn slot_of(&self, text: &str) -> AnswerSlot {
        self.button(text).slot
    }
}

impl QuizView for RecordingView {
    fn show_loading(&mut self) {
        self.loading_count += 1;
        self.heading = "Loading...".to_string();
        self.load_error_detail = None;
    }

    fn show_question(&mut self, ordinal: usize, text: &str) {
        self.heading = format!("{ordinal}. {text}");
    }

    fn clear_answers(&mut self) {
        self.buttons.clear();
    }

    fn add_answer(&mut self, control: AnswerControl) {
        self.buttons.push(Button {
            slot: control.slot,
            text: control.text,
            mark: None,
            disabled: false,
        });
    }

    fn mark_answer(&mut self, slot: AnswerSlot, mark: AnswerMark) {
        if let Some(button) = self.buttons.iter_mut().find(|b| b.slot == slot) {
            button.mark = Some(mark);
        }
    }

    fn disable_answers(&mut self) {
        for button in &mut self.buttons {
            button.disabled = true;
        }
    }

    fn set_advance(&mut self, control: AdvanceControl) {
        self.advance = control;
    }

    fn show_empty(&mut self) {
        self.heading = "No quiz questions found! Please upload a file first.".to_string();
    }

    fn show_load_error(&mut self, detail: &str) {
        self.heading = "Error loading quiz questions. Please try again later.".to_string();
        self.load_error_detail = Some(detail.to_string());
    }

    fn show_score(&mut self, score: usize, total: usize) {
        self.heading = format!("You scored {score} out of {total}!");
    }
}

pub fn nigeria_quiz() -> QuizSet {
    QuizSet::new(vec![
        Question::new(
            "Capital of Nigeria?",
            vec![
                Answer::incorrect("Lagos"),
                Answer::correct("Abuja"),
                Answer::incorrect("Kano"),
                Answer::incorrect("Port Harcourt"),
            ],
        )
        .unwrap(),
    ])
}

/// `n` two-answer questions where the correct answer is always "yes".
pub fn yes_no_quiz(n: usize) -> QuizSet {
    (0..n)
        .map(|i| {
            Question::new(
                format!("Question {}", i + 1),
                vec![Answer::incorrect("no"), Answer::correct("yes")],
            )
            .unwrap()
        })
        .collect()
}

/// Source that always fails.
pub struct FailingSource;

#[async_trait]
impl QuestionSource for FailingSource {
    async fn load(&self) -> Result<QuizSet, SourceError> {
        Err(SourceError::InvalidUrl("unreachable".into()))
    }

    fn describe(&self) -> String {
        "failing".into()
    }
}

/// Source that returns the given sets in turn, repeating the last one.
pub struct SequenceSource {
    sets: Vec<QuizSet>,
    calls: AtomicUsize,
}

impl SequenceSource {
    pub fn new(sets: Vec<QuizSet>) -> Arc<Self> {
        Arc::new(Self {
            sets,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuestionSource for SequenceSource {
    async fn load(&self) -> Result<QuizSet, SourceError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        let idx = n.min(self.sets.len().saturating_sub(1));
        Ok(self.sets.get(idx).cloned().unwrap_or_default())
    }

    fn describe(&self) -> String {
        "sequence".into()
    }
}
