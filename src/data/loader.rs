use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::{LoadError, ValidationError};
use crate::models::{DEFAULT_MAX_SELECTIONS, DEFAULT_POINTS, Question};

/// A question as written in a question bank file.
#[derive(Debug, Deserialize)]
struct QuestionDef {
    title: String,
    #[serde(default = "default_points")]
    points: u32,
    #[serde(default = "default_max_selections")]
    max_selections: usize,
    #[serde(default)]
    choices: Vec<ChoiceDef>,
}

#[derive(Debug, Deserialize)]
struct ChoiceDef {
    text: String,
    #[serde(default)]
    is_correct: bool,
}

fn default_points() -> u32 {
    DEFAULT_POINTS
}

fn default_max_selections() -> usize {
    DEFAULT_MAX_SELECTIONS
}

impl QuestionDef {
    fn into_question(self) -> Result<Question, ValidationError> {
        let mut question = Question::with_scoring(self.title, self.points, self.max_selections)?;
        for choice in self.choices {
            question.add_choice(choice.text, choice.is_correct)?;
        }

        // A bank question must be answerable within its own selection limit.
        let correct = question.correct_choice_ids().len();
        if correct > question.max_selections() {
            return Err(ValidationError::TooManyCorrectChoices {
                correct,
                max: question.max_selections(),
            });
        }
        Ok(question)
    }
}

/// Load and validate a question bank from a JSON file.
pub fn load_questions_from_json<P: AsRef<Path>>(path: P) -> Result<Vec<Question>, LoadError> {
    let path = path.as_ref();
    let json_content = fs::read_to_string(path)?;
    let questions = parse_questions(&json_content)?;
    info!(path = %path.display(), count = questions.len(), "loaded questions");
    Ok(questions)
}

/// Parse and validate a question bank from a JSON string.
pub fn parse_questions(json: &str) -> Result<Vec<Question>, LoadError> {
    let defs: Vec<QuestionDef> = serde_json::from_str(json)?;
    if defs.is_empty() {
        return Err(LoadError::Empty);
    }

    defs.into_iter()
        .enumerate()
        .map(|(index, def)| {
            def.into_question()
                .map_err(|source| LoadError::InvalidQuestion { index, source })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_parse_applies_defaults() {
        let questions = parse_questions(
            r#"[{ "title": "q1", "choices": [{ "text": "a" }, { "text": "b", "is_correct": true }] }]"#,
        )
        .unwrap();

        let question = &questions[0];
        assert_eq!(question.points(), 1);
        assert_eq!(question.max_selections(), 1);
        assert_eq!(question.choices().len(), 2);
        assert!(!question.choices()[0].is_correct());
        assert_eq!(question.correct_choice_ids(), vec![2]);
    }

    #[test]
    fn test_parse_rejects_empty_bank() {
        assert!(matches!(parse_questions("[]"), Err(LoadError::Empty)));
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        assert!(matches!(parse_questions("{"), Err(LoadError::Parse(_))));
    }

    #[test]
    fn test_parse_reports_invalid_question_index() {
        let err = parse_questions(
            r#"[{ "title": "ok" }, { "title": "bad", "choices": [{ "text": "" }] }]"#,
        )
        .unwrap_err();

        match err {
            LoadError::InvalidQuestion { index, source } => {
                assert_eq!(index, 1);
                assert!(matches!(source, ValidationError::ChoiceTextLength { .. }));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_parse_rejects_more_correct_choices_than_selections() {
        let err = parse_questions(
            r#"[{ "title": "q", "choices": [
                { "text": "a", "is_correct": true },
                { "text": "b", "is_correct": true },
                { "text": "c" }
            ] }]"#,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            LoadError::InvalidQuestion {
                index: 0,
                source: ValidationError::TooManyCorrectChoices { correct: 2, max: 1 }
            }
        ));

        let questions = parse_questions(
            r#"[{ "title": "q", "max_selections": 2, "choices": [
                { "text": "a", "is_correct": true },
                { "text": "b", "is_correct": true }
            ] }]"#,
        )
        .unwrap();
        assert_eq!(questions[0].grade(&[1, 2]).unwrap(), 1);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{ "title": "q1", "points": 3, "max_selections": 2 }}]"#
        )
        .unwrap();

        let questions = load_questions_from_json(file.path()).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].points(), 3);
        assert_eq!(questions[0].max_selections(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_questions_from_json(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
