//! Quiz question model.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Number of answer options every question carries.
pub const OPTION_COUNT: usize = 4;

/// Difficulty label of a catalog question.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

/// An immutable multiple-choice question.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    text: String,
    options: [String; OPTION_COUNT],
    correct: usize,
    difficulty: Difficulty,
}

impl Question {
    /// Build a question, rejecting empty text and out-of-range correct indices.
    pub fn new(
        text: impl Into<String>,
        options: [&str; OPTION_COUNT],
        correct: usize,
        difficulty: Difficulty,
    ) -> Result<Self, AppError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(AppError::Validation("Question text is required".to_string()));
        }
        if correct >= OPTION_COUNT {
            return Err(AppError::Validation(format!(
                "Correct option {} out of range for question '{}'",
                correct, text
            )));
        }

        Ok(Self {
            text,
            options: options.map(str::to_string),
            correct,
            difficulty,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn options(&self) -> &[String; OPTION_COUNT] {
        &self.options
    }

    pub fn correct(&self) -> usize {
        self.correct
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_out_of_range_correct_index() {
        let result = Question::new("Q?", ["a", "b", "c", "d"], 4, Difficulty::Beginner);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_rejects_blank_text() {
        let result = Question::new("  ", ["a", "b", "c", "d"], 0, Difficulty::Beginner);
        assert!(result.is_err());
    }

    #[test]
    fn test_is_correct() {
        let q = Question::new("Q?", ["a", "b", "c", "d"], 2, Difficulty::Advanced).unwrap();
        assert!(q.is_correct(2));
        assert!(!q.is_correct(1));
        assert_eq!(q.options()[3], "d");
    }
}
