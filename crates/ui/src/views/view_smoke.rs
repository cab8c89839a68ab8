use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use quiz_core::model::QuizSet;
use services::{AnswerSlot, QuestionSource, SourceError, StaticSource};

use super::QuizIntent;
use super::test_harness::setup_view_harness;

/// Serves each set in turn, repeating the last one, and counts loads.
struct SequenceSource {
    sets: Vec<QuizSet>,
    calls: AtomicUsize,
}

impl SequenceSource {
    fn new(sets: Vec<QuizSet>) -> Arc<Self> {
        Arc::new(Self {
            sets,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuestionSource for SequenceSource {
    async fn load(&self) -> Result<QuizSet, SourceError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let index = call.min(self.sets.len() - 1);
        Ok(self.sets[index].clone())
    }

    fn describe(&self) -> String {
        "sequence".into()
    }
}

fn sample_set() -> QuizSet {
    StaticSource::sample().unwrap().quiz().clone()
}

struct BrokenSource;

#[async_trait]
impl QuestionSource for BrokenSource {
    async fn load(&self) -> Result<QuizSet, SourceError> {
        Err(SourceError::InvalidUrl("not a url".into()))
    }

    fn describe(&self) -> String {
        "broken".into()
    }
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_page_renders_first_question() {
    let mut harness = setup_view_harness(Arc::new(StaticSource::sample().unwrap()));
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("1. Capital of Nigeria?"), "missing question in {html}");
    for answer in ["Lagos", "Abuja", "Kano", "Port Harcourt"] {
        assert!(html.contains(answer), "missing {answer} in {html}");
    }
    assert!(!html.contains("next-btn"), "advance shown before answering: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_page_renders_empty_message() {
    let mut harness = setup_view_harness(Arc::new(StaticSource::empty()));
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(
        html.contains("No quiz questions found! Please upload a file first."),
        "missing empty message in {html}"
    );
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_page_renders_load_error() {
    let mut harness = setup_view_harness(Arc::new(BrokenSource));
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(
        html.contains("Error loading quiz questions. Please try again later."),
        "missing error message in {html}"
    );
    assert!(
        html.contains("invalid question source url: not a url"),
        "missing failure detail in {html}"
    );
    assert!(!html.contains("answer-buttons\"><button"), "stale answers in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn retry_after_empty_loads_questions() {
    let source = SequenceSource::new(vec![QuizSet::empty(), sample_set()]);
    let mut harness = setup_view_harness(source.clone());
    harness.rebuild();
    harness.settle().await;
    assert!(harness.render().contains("No quiz questions found!"));
    assert_eq!(source.calls(), 1);

    harness.dispatch(QuizIntent::Retry);
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("1. Capital of Nigeria?"), "missing question in {html}");
    assert!(!html.contains("retry-btn"), "retry still offered: {html}");
    assert_eq!(source.calls(), 2);
}

#[tokio::test(flavor = "current_thread")]
async fn play_again_restarts_from_first_question() {
    let source = SequenceSource::new(vec![sample_set()]);
    let mut harness = setup_view_harness(source.clone());
    harness.rebuild();
    harness.settle().await;

    // Slot 1 is correct for the first and third sample questions only.
    for _ in 0..4 {
        harness.dispatch(QuizIntent::Answer(AnswerSlot::new(1)));
        harness.drive();
        harness.dispatch(QuizIntent::Advance);
        harness.drive();
    }
    let html = harness.render();
    assert!(html.contains("You scored 2 out of 4!"), "missing score in {html}");
    assert!(html.contains("Play Again"), "missing play again in {html}");
    assert_eq!(source.calls(), 1);

    harness.dispatch(QuizIntent::Advance);
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("1. Capital of Nigeria?"), "missing question in {html}");
    assert!(!html.contains("You scored"), "score still shown: {html}");
    assert_eq!(source.calls(), 2);
}
