/// Progress through one quiz run.
///
/// `current_index` ranges over `0..=total`; reaching `total` is the finished state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    current_index: usize,
    score: usize,
    answered: bool,
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    /// Whether the current question has been locked by a choice.
    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.answered
    }

    #[must_use]
    pub fn is_finished(&self, total: usize) -> bool {
        self.current_index >= total
    }

    /// Lock the current question. Returns `false` if it was already locked.
    pub(crate) fn lock(&mut self, correct: bool) -> bool {
        if self.answered {
            return false;
        }
        self.answered = true;
        if correct {
            self.score += 1;
        }
        true
    }

    /// Move past the current question. Returns `false` if it has not been answered
    /// or the run is already finished.
    pub(crate) fn step(&mut self, total: usize) -> bool {
        if !self.answered || self.is_finished(total) {
            return false;
        }
        self.current_index += 1;
        self.answered = false;
        true
    }
}
