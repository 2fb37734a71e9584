//! Error types for question validation and question bank loading.

use std::io;

use thiserror::Error;

/// Errors raised when a question or choice would break one of its rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title must be between {min} and {max} characters, got {actual}")]
    TitleLength { min: usize, max: usize, actual: usize },

    #[error("Points must be between {min} and {max}, got {actual}")]
    PointsOutOfRange { min: u32, max: u32, actual: u32 },

    #[error("Max selections must be at least {min}, got {actual}")]
    MaxSelectionsOutOfRange { min: usize, actual: usize },

    #[error("Choice text must be between {min} and {max} characters, got {actual}")]
    ChoiceTextLength { min: usize, max: usize, actual: usize },

    #[error("Selected {requested} choices but at most {max} are allowed")]
    TooManySelections { requested: usize, max: usize },

    #[error("{correct} choices are marked correct but at most {max} can be selected")]
    TooManyCorrectChoices { correct: usize, max: usize },

    #[error("Question has run out of choice ids")]
    ChoiceIdsExhausted,
}

/// Errors that occur while loading a question bank.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Question bank must contain at least one question")]
    Empty,

    #[error("Question {index} is invalid: {source}")]
    InvalidQuestion {
        index: usize,
        #[source]
        source: ValidationError,
    },
}

/// Error type for quiz operations.
#[derive(Debug, Error)]
pub enum QuizError {
    /// Error loading questions from file.
    #[error("Failed to load questions: {0}")]
    Load(#[from] LoadError),

    /// IO error during quiz execution.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_displays_offending_value() {
        let err = ValidationError::PointsOutOfRange {
            min: 1,
            max: 100,
            actual: 101,
        };
        assert_eq!(err.to_string(), "Points must be between 1 and 100, got 101");

        let err = ValidationError::TooManySelections {
            requested: 2,
            max: 1,
        };
        assert_eq!(err.to_string(), "Selected 2 choices but at most 1 are allowed");
    }

    #[test]
    fn load_error_reports_question_index() {
        let err = LoadError::InvalidQuestion {
            index: 3,
            source: ValidationError::TitleLength {
                min: 1,
                max: 200,
                actual: 0,
            },
        };
        assert_eq!(
            err.to_string(),
            "Question 3 is invalid: Title must be between 1 and 200 characters, got 0"
        );
    }

    #[test]
    fn quiz_error_wraps_load_error() {
        let err: QuizError = LoadError::Empty.into();
        assert!(matches!(err, QuizError::Load(LoadError::Empty)));
        assert!(err.to_string().starts_with("Failed to load questions"));
    }
}
