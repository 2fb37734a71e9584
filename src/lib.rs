//! # quiz-model
//!
//! An in-memory model of quiz questions with validated attributes and
//! multiple-choice answers, plus a terminal runner for taking a bank of them.
//!
//! ## Usage
//!
//! ```rust
//! use quiz_model::{Question, ValidationError};
//!
//! fn main() -> Result<(), ValidationError> {
//!     let mut question = Question::with_scoring("Which are primes?", 2, 2)?;
//!     let three = question.add_choice("3", true)?.id();
//!     let four = question.add_choice("4", false)?.id();
//!     let five = question.add_choice("5", true)?.id();
//!
//!     assert_eq!(question.select_choices(&[four, five])?, vec![five]);
//!     assert_eq!(question.grade(&[three, five])?, 2);
//!     Ok(())
//! }
//! ```

mod app;
mod data;
mod error;
pub mod logging;
mod models;
pub mod terminal;
mod ui;

use std::path::Path;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};

pub use app::App;
pub use data::{load_questions_from_json, parse_questions};
pub use error::{LoadError, QuizError, ValidationError};
pub use models::{
    AppState, CHOICE_TEXT_MAX_LENGTH, Choice, ChoiceId, DEFAULT_MAX_SELECTIONS, DEFAULT_POINTS,
    POINTS_MAX, POINTS_MIN, Question, QuestionId, TITLE_MAX_LENGTH,
};

/// A quiz instance that can be run in the terminal.
pub struct Quiz {
    app: App,
}

impl Quiz {
    /// Create a new quiz from a vector of questions.
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            app: App::with_questions(questions),
        }
    }

    /// Load a quiz from a JSON question bank.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use quiz_model::Quiz;
    ///
    /// let quiz = Quiz::from_json("questions.json").expect("Failed to load quiz");
    /// ```
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self, QuizError> {
        let questions = load_questions_from_json(path)?;
        Ok(Self::new(questions))
    }

    pub fn questions(&self) -> &[Question] {
        self.app.questions()
    }

    /// Run the quiz in the terminal.
    ///
    /// This will take over the terminal, display the quiz UI, and return
    /// when the user quits.
    pub fn run(mut self) -> Result<(), QuizError> {
        let mut term = terminal::init()?;
        let result = run_event_loop(&mut term, &mut self.app);
        terminal::restore()?;
        result
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

fn run_event_loop(terminal: &mut terminal::AppTerminal, app: &mut App) -> Result<(), QuizError> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if handle_input(app, key.code) {
                break;
            }
        }
    }

    Ok(())
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyCode) -> bool {
    match app.state {
        AppState::Welcome => handle_welcome_input(app, key),
        AppState::Quiz => handle_quiz_input(app, key),
        AppState::Result => handle_result_input(app, key),
    }
}

fn handle_welcome_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Enter => {
            app.start_quiz();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_quiz_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_previous_option();
            false
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_next_option();
            false
        }
        KeyCode::Char(' ') => {
            app.toggle_option();
            false
        }
        KeyCode::Enter => {
            app.submit_answer();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_result_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Down | KeyCode::Char('j') => {
            app.scroll_results_down();
            false
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.scroll_results_up();
            false
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.restart();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_question_app() -> App {
        let mut question = Question::new("q1").unwrap();
        question.add_choice("a", true).unwrap();
        App::with_questions(vec![question])
    }

    #[test]
    fn test_keys_drive_a_full_run() {
        let mut app = one_question_app();
        assert!(!handle_input(&mut app, KeyCode::Enter));
        assert_eq!(app.state, AppState::Quiz);

        assert!(!handle_input(&mut app, KeyCode::Char(' ')));
        assert!(!handle_input(&mut app, KeyCode::Enter));
        assert_eq!(app.state, AppState::Result);
        assert_eq!(app.calculate_score(), 1);

        assert!(!handle_input(&mut app, KeyCode::Char('r')));
        assert_eq!(app.state, AppState::Welcome);
        assert!(handle_input(&mut app, KeyCode::Char('q')));
    }
}
