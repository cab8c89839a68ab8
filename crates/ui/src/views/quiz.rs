use dioxus::prelude::*;
use services::{AnswerSlot, PendingLoad, QuizController};

use crate::context::AppContext;
use crate::vm::QuizScreen;

#[cfg(test)]
use std::{cell::RefCell, rc::Rc};

type QuizSignal = Signal<QuizController<QuizScreen>>;

/// User actions the page forwards to the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Answer(AnswerSlot),
    Advance,
    Retry,
}

/// Runs a requested load and hands the result back to the controller.
/// Superseded loads are dropped by `finish_load`.
fn drive_load(quiz: QuizSignal, pending: PendingLoad) {
    let mut quiz = quiz;
    spawn(async move {
        let done = pending.run().await;
        let outcome = quiz.write().finish_load(done);
        tracing::debug!(?outcome, "quiz load finished");
    });
}

#[component]
pub fn QuizPage() -> Element {
    let ctx = use_context::<AppContext>();
    let source_label = ctx.source_label().to_owned();
    let quiz: QuizSignal =
        use_signal(|| QuizController::new(ctx.question_source(), QuizScreen::default()));

    use_hook(move || {
        let mut quiz = quiz;
        spawn(async move {
            let pending = quiz.write().begin_load();
            let done = pending.run().await;
            let outcome = quiz.write().finish_load(done);
            tracing::debug!(?outcome, "initial quiz load finished");
        })
    });

    let dispatch_intent = use_callback(move |intent: QuizIntent| {
        let mut quiz = quiz;
        let pending = match intent {
            QuizIntent::Answer(slot) => {
                quiz.write().select_answer(slot);
                None
            }
            QuizIntent::Advance => quiz.write().press_advance(),
            QuizIntent::Retry => quiz.write().restart(),
        };
        if let Some(pending) = pending {
            drive_load(quiz, pending);
        }
    });

    #[cfg(test)]
    use_hook(move || {
        if let Some(handles) = try_consume_context::<QuizTestHandles>() {
            handles.register(dispatch_intent);
        }
    });

    let screen = quiz.read().view().clone();
    let heading = screen.heading().text();
    let error_detail = screen.error_detail().map(str::to_owned);
    let advance_label = screen.advance_label();
    let offers_retry = screen.offers_retry();

    let answer_buttons = screen.answers().iter().map(|button| {
        let slot = button.slot;
        let class = button.class_name();
        let text = button.text.clone();
        let disabled = button.disabled;
        rsx! {
            button {
                key: "{slot.index()}",
                class: "{class}",
                disabled: disabled,
                onclick: move |_| dispatch_intent.call(QuizIntent::Answer(slot)),
                "{text}"
            }
        }
    });

    rsx! {
        div { class: "page quiz-page",
            header { class: "view-header",
                h2 { class: "view-title", "Simple Quiz" }
                p { class: "view-subtitle", "{source_label}" }
            }
            div { class: "quiz",
                h3 { id: "question", class: "quiz-question", "{heading}" }
                if let Some(detail) = error_detail {
                    p { class: "quiz-error-detail", "{detail}" }
                }
                div { id: "answer-buttons", class: "quiz-answers",
                    {answer_buttons}
                }
                if let Some(label) = advance_label {
                    button {
                        id: "next-btn",
                        class: "btn btn-primary",
                        onclick: move |_| dispatch_intent.call(QuizIntent::Advance),
                        "{label}"
                    }
                }
                if offers_retry {
                    button {
                        id: "retry-btn",
                        class: "btn btn-secondary",
                        onclick: move |_| dispatch_intent.call(QuizIntent::Retry),
                        "Retry"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }
}
