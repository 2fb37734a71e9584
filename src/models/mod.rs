mod question;

pub use question::{
    CHOICE_TEXT_MAX_LENGTH, Choice, ChoiceId, DEFAULT_MAX_SELECTIONS, DEFAULT_POINTS, POINTS_MAX,
    POINTS_MIN, Question, QuestionId, TITLE_MAX_LENGTH,
};

/// Screen the terminal runner is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Welcome,
    Quiz,
    Result,
}
