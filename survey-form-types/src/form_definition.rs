use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{FormError, Question};

/// Hint line shown above the built-in form.
pub const DEFAULT_HINT: &str = "Use left and right arrow keys to select options. \
Use up and down arrow keys to move between questions. \
Press Enter to submit when the button is focused.";

/// The question list a session is built from, plus presentation text.
///
/// A definition is presentation-agnostic; the controller owns all state derived
/// from it (answers, focus, visited rows).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormDefinition {
    /// Optional title shown at the top of the form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Optional usage hint shown under the title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,

    /// All questions, in display order.
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl FormDefinition {
    /// Create a new definition with the given questions.
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            title: None,
            hint: None,
            questions,
        }
    }

    /// The built-in four-question form.
    pub fn builtin() -> Self {
        Self::new(vec![
            Question::radio(
                1,
                "What's your favorite color?",
                ["Red", "Blue", "Green", "Yellow"],
            ),
            Question::radio(
                2,
                "How often do you exercise?",
                ["Daily", "Weekly", "Monthly", "Rarely"],
            ),
            Question::slider(
                3,
                "On a scale of 1-10, how satisfied are you with our service?",
                1.0,
                10.0,
                1.0,
            ),
            Question::toggle(
                4,
                "How would you rate your experience?",
                ["Poor", "Average", "Excellent"],
            ),
        ])
        .with_hint(DEFAULT_HINT)
    }

    /// Set the hint line.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Check if the form has any questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Get the number of questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Check ids are unique and every question's parameters are usable.
    pub fn validate(&self) -> Result<(), FormError> {
        validate_questions(&self.questions)
    }
}

/// Check a question list on its own, e.g. one returned by the enhancement service.
pub(crate) fn validate_questions(questions: &[Question]) -> Result<(), FormError> {
    let mut seen = HashSet::new();
    for question in questions {
        if !seen.insert(question.id()) {
            return Err(FormError::invalid(format!(
                "duplicate question id {}",
                question.id()
            )));
        }
        question.validate()?;
    }
    Ok(())
}
