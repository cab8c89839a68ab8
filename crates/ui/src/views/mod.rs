mod quiz;

pub use quiz::{QuizIntent, QuizPage};

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
