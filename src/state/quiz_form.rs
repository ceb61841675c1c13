//! Quiz configuration form and field validation.
//!
//! The question count stays raw text until submit. Parsing it there, rather
//! than on every keystroke, lets the form hold transient invalid input while
//! guaranteeing the generator only ever sees a validated [`QuizConfig`].

use crate::error::ErrorCode;
use crate::net::types::{Difficulty, MAX_QUESTION_COUNT, MIN_QUESTION_COUNT, QuizConfig, QuizType};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error(
        "number of questions must be a whole number between {min} and {max} (got '{input}')",
        min = MIN_QUESTION_COUNT,
        max = MAX_QUESTION_COUNT
    )]
    QuestionCountNotANumber { input: String },

    #[error(
        "number of questions must be between {min} and {max} (got {value})",
        min = MIN_QUESTION_COUNT,
        max = MAX_QUESTION_COUNT
    )]
    QuestionCountOutOfRange { value: i64 },

    #[error("question type must be one of mcq, saq, laq, mixed (got '{input}')")]
    UnknownQuizType { input: String },

    #[error("difficulty must be one of easy, medium, hard (got '{input}')")]
    UnknownDifficulty { input: String },

    #[error("question for the tutor must not be empty")]
    EmptyQuestion,
}

impl ErrorCode for ValidationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::QuestionCountNotANumber { .. } => "E_VALIDATION_COUNT_NAN",
            Self::QuestionCountOutOfRange { .. } => "E_VALIDATION_COUNT_RANGE",
            Self::UnknownQuizType { .. } => "E_VALIDATION_QUIZ_TYPE",
            Self::UnknownDifficulty { .. } => "E_VALIDATION_DIFFICULTY",
            Self::EmptyQuestion => "E_VALIDATION_EMPTY_QUESTION",
        }
    }
}

/// Editable quiz settings as the user sees them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizForm {
    pub quiz_type: QuizType,
    pub difficulty: Difficulty,
    /// Raw text of the question-count field.
    pub question_count: String,
}

impl Default for QuizForm {
    fn default() -> Self {
        let defaults = QuizConfig::default();
        Self {
            quiz_type: defaults.quiz_type,
            difficulty: defaults.difficulty,
            question_count: defaults.question_count.to_string(),
        }
    }
}

impl QuizForm {
    /// Set the question type from its option value.
    ///
    /// # Errors
    ///
    /// Returns an error and leaves the field unchanged if the value is unknown.
    pub fn set_quiz_type(&mut self, raw: &str) -> Result<(), ValidationError> {
        self.quiz_type = raw
            .parse()
            .map_err(|()| ValidationError::UnknownQuizType { input: raw.to_owned() })?;
        Ok(())
    }

    /// Set the difficulty from its option value.
    ///
    /// # Errors
    ///
    /// Returns an error and leaves the field unchanged if the value is unknown.
    pub fn set_difficulty(&mut self, raw: &str) -> Result<(), ValidationError> {
        self.difficulty = raw
            .parse()
            .map_err(|()| ValidationError::UnknownDifficulty { input: raw.to_owned() })?;
        Ok(())
    }

    /// Replace the raw question-count text. Validated on submit.
    pub fn set_question_count(&mut self, raw: impl Into<String>) {
        self.question_count = raw.into();
    }

    /// Produce a config the generator may receive.
    ///
    /// # Errors
    ///
    /// Returns an error if the question count is not a whole number in range.
    pub fn validate(&self) -> Result<QuizConfig, ValidationError> {
        Ok(QuizConfig {
            quiz_type: self.quiz_type,
            difficulty: self.difficulty,
            question_count: parse_question_count(&self.question_count)?,
        })
    }
}

/// Parse question-count text strictly: no fractions, no trailing junk.
///
/// # Errors
///
/// Returns [`ValidationError::QuestionCountNotANumber`] for non-integers and
/// [`ValidationError::QuestionCountOutOfRange`] outside the allowed range.
pub fn parse_question_count(raw: &str) -> Result<u32, ValidationError> {
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| ValidationError::QuestionCountNotANumber { input: raw.to_owned() })?;
    u32::try_from(value)
        .ok()
        .filter(|count| QuizConfig::question_count_in_range(*count))
        .ok_or(ValidationError::QuestionCountOutOfRange { value })
}

#[cfg(test)]
#[path = "quiz_form_test.rs"]
mod tests;
