use std::sync::Arc;

use services::QuestionSource;

pub trait UiApp: Send + Sync {
    fn question_source(&self) -> Arc<dyn QuestionSource>;
}

#[derive(Clone)]
pub struct AppContext {
    question_source: Arc<dyn QuestionSource>,
    source_label: String,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        let question_source = app.question_source();
        let source_label = question_source.describe();
        Self {
            question_source,
            source_label,
        }
    }

    #[must_use]
    pub fn question_source(&self) -> Arc<dyn QuestionSource> {
        Arc::clone(&self.question_source)
    }

    /// Where questions come from, for display.
    #[must_use]
    pub fn source_label(&self) -> &str {
        &self.source_label
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
