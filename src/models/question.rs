use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ValidationError;

pub const TITLE_MAX_LENGTH: usize = 200;
pub const CHOICE_TEXT_MAX_LENGTH: usize = 100;
pub const POINTS_MIN: u32 = 1;
pub const POINTS_MAX: u32 = 100;
pub const DEFAULT_POINTS: u32 = 1;
pub const DEFAULT_MAX_SELECTIONS: usize = 1;

/// Last question id handed out in this process.
static LAST_QUESTION_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique identifier of a [`Question`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct QuestionId(u64);

impl QuestionId {
    fn next() -> Self {
        Self(LAST_QUESTION_ID.fetch_add(1, Ordering::Relaxed) + 1)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a [`Choice`], unique within its question.
pub type ChoiceId = u32;

/// A single answer option. Only its owning [`Question`] can create or change it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    id: ChoiceId,
    text: String,
    is_correct: bool,
}

impl Choice {
    pub fn id(&self) -> ChoiceId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_correct(&self) -> bool {
        self.is_correct
    }
}

/// A quiz prompt with a scoring weight and an ordered list of choices.
#[derive(Debug, Clone, Serialize)]
pub struct Question {
    id: QuestionId,
    title: String,
    points: u32,
    max_selections: usize,
    choices: Vec<Choice>,
    #[serde(skip)]
    last_choice_id: ChoiceId,
}

impl Question {
    /// Create a question worth one point that accepts a single selection.
    pub fn new(title: impl Into<String>) -> Result<Self, ValidationError> {
        Self::with_scoring(title, DEFAULT_POINTS, DEFAULT_MAX_SELECTIONS)
    }

    /// Create a question with explicit points and selection limit.
    ///
    /// Fails if the title is empty or longer than 200 characters, if
    /// `points` is outside 1..=100, or if `max_selections` is zero.
    pub fn with_scoring(
        title: impl Into<String>,
        points: u32,
        max_selections: usize,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        validate_title(&title)?;
        validate_points(points)?;
        validate_max_selections(max_selections)?;

        Ok(Self {
            id: QuestionId::next(),
            title,
            points,
            max_selections,
            choices: Vec::new(),
            last_choice_id: 0,
        })
    }

    pub fn id(&self) -> QuestionId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn max_selections(&self) -> usize {
        self.max_selections
    }

    /// Choices in the order they were added.
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    pub fn choice(&self, id: ChoiceId) -> Option<&Choice> {
        self.choices.iter().find(|choice| choice.id == id)
    }

    /// Ids of the choices currently flagged correct, in choice order.
    pub fn correct_choice_ids(&self) -> Vec<ChoiceId> {
        self.choices
            .iter()
            .filter(|choice| choice.is_correct)
            .map(|choice| choice.id)
            .collect()
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), ValidationError> {
        let title = title.into();
        validate_title(&title)?;
        self.title = title;
        Ok(())
    }

    pub fn set_points(&mut self, points: u32) -> Result<(), ValidationError> {
        validate_points(points)?;
        self.points = points;
        Ok(())
    }

    pub fn set_max_selections(&mut self, max_selections: usize) -> Result<(), ValidationError> {
        validate_max_selections(max_selections)?;
        self.max_selections = max_selections;
        Ok(())
    }

    /// Append a new choice and return it.
    ///
    /// Ids start at 1 and keep increasing for the lifetime of the question;
    /// ids of removed choices are never handed out again.
    pub fn add_choice(
        &mut self,
        text: impl Into<String>,
        is_correct: bool,
    ) -> Result<&Choice, ValidationError> {
        let text = text.into();
        validate_choice_text(&text)?;

        let id = self
            .last_choice_id
            .checked_add(1)
            .ok_or(ValidationError::ChoiceIdsExhausted)?;
        self.last_choice_id = id;
        debug!(question = %self.id, choice = id, is_correct, "added choice");

        self.choices.push(Choice {
            id,
            text,
            is_correct,
        });
        Ok(&self.choices[self.choices.len() - 1])
    }

    /// Remove the choice with the given id. Unknown ids are ignored.
    pub fn remove_choice_by_id(&mut self, id: ChoiceId) -> Option<Choice> {
        let position = self.choices.iter().position(|choice| choice.id == id)?;
        debug!(question = %self.id, choice = id, "removed choice");
        Some(self.choices.remove(position))
    }

    pub fn remove_all_choices(&mut self) {
        debug!(question = %self.id, count = self.choices.len(), "removed all choices");
        self.choices.clear();
    }

    /// Return the ids among `ids` whose choice is correct, keeping the
    /// order they were given in.
    ///
    /// Fails when more ids are given than `max_selections` allows. Ids that
    /// match no choice are treated as incorrect.
    pub fn select_choices(&self, ids: &[ChoiceId]) -> Result<Vec<ChoiceId>, ValidationError> {
        if ids.len() > self.max_selections {
            warn!(
                question = %self.id,
                requested = ids.len(),
                max = self.max_selections,
                "rejected selection"
            );
            return Err(ValidationError::TooManySelections {
                requested: ids.len(),
                max: self.max_selections,
            });
        }

        let selected: Vec<ChoiceId> = ids
            .iter()
            .copied()
            .filter(|id| self.choice(*id).is_some_and(Choice::is_correct))
            .collect();
        debug!(question = %self.id, ?ids, ?selected, "selected choices");
        Ok(selected)
    }

    /// Flag exactly the choices in `ids` as correct and every other choice
    /// as incorrect.
    pub fn set_correct_choices(&mut self, ids: &[ChoiceId]) {
        let correct: HashSet<ChoiceId> = ids.iter().copied().collect();
        for choice in &mut self.choices {
            choice.is_correct = correct.contains(&choice.id);
        }
    }

    /// Points earned for answering with `ids`.
    ///
    /// Full points only when the answer picks every correct choice and
    /// nothing else, otherwise zero.
    pub fn grade(&self, ids: &[ChoiceId]) -> Result<u32, ValidationError> {
        self.select_choices(ids)?;

        let picked: HashSet<ChoiceId> = ids.iter().copied().collect();
        let correct: HashSet<ChoiceId> = self.correct_choice_ids().into_iter().collect();
        Ok(if picked == correct { self.points } else { 0 })
    }
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    let actual = title.chars().count();
    if actual == 0 || actual > TITLE_MAX_LENGTH {
        return Err(ValidationError::TitleLength {
            min: 1,
            max: TITLE_MAX_LENGTH,
            actual,
        });
    }
    Ok(())
}

fn validate_points(points: u32) -> Result<(), ValidationError> {
    if !(POINTS_MIN..=POINTS_MAX).contains(&points) {
        return Err(ValidationError::PointsOutOfRange {
            min: POINTS_MIN,
            max: POINTS_MAX,
            actual: points,
        });
    }
    Ok(())
}

fn validate_max_selections(max_selections: usize) -> Result<(), ValidationError> {
    if max_selections < 1 {
        return Err(ValidationError::MaxSelectionsOutOfRange {
            min: 1,
            actual: max_selections,
        });
    }
    Ok(())
}

fn validate_choice_text(text: &str) -> Result<(), ValidationError> {
    let actual = text.chars().count();
    if actual == 0 || actual > CHOICE_TEXT_MAX_LENGTH {
        return Err(ValidationError::ChoiceTextLength {
            min: 1,
            max: CHOICE_TEXT_MAX_LENGTH,
            actual,
        });
    }
    Ok(())
}
