use std::collections::BTreeMap;

use serde::Serialize;

use crate::{AnswerValue, QuestionId};

/// Error type for answer access operations.
#[derive(Debug, thiserror::Error)]
pub enum AnswerError {
    #[error("No answer for question {0}")]
    Missing(QuestionId),

    #[error("Type mismatch for question {id}: expected {expected}, got {actual}")]
    TypeMismatch {
        id: QuestionId,
        expected: &'static str,
        actual: &'static str,
    },
}

/// The answer set of a form session.
///
/// Keyed by `QuestionId`; ordered so that submissions serialize deterministically.
/// A question without an entry is unanswered (toggles start out that way).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Answers {
    values: BTreeMap<QuestionId, AnswerValue>,
}

impl Answers {
    /// Create a new empty answer set.
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Set the answer for a question, replacing any previous one.
    pub fn insert(&mut self, id: QuestionId, value: impl Into<AnswerValue>) {
        self.values.insert(id, value.into());
    }

    /// Get the answer for a question.
    pub fn get(&self, id: QuestionId) -> Option<&AnswerValue> {
        self.values.get(&id)
    }

    /// Get the number of answers.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no answers.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Drop every answer.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Get a label answer.
    pub fn get_label(&self, id: QuestionId) -> Result<&str, AnswerError> {
        match self.get(id) {
            Some(AnswerValue::Label(s)) => Ok(s),
            Some(other) => Err(AnswerError::TypeMismatch {
                id,
                expected: "Label",
                actual: other.type_name(),
            }),
            None => Err(AnswerError::Missing(id)),
        }
    }

    /// Get a numeric answer.
    pub fn get_number(&self, id: QuestionId) -> Result<f64, AnswerError> {
        match self.get(id) {
            Some(AnswerValue::Number(n)) => Ok(*n),
            Some(other) => Err(AnswerError::TypeMismatch {
                id,
                expected: "Number",
                actual: other.type_name(),
            }),
            None => Err(AnswerError::Missing(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let mut answers = Answers::new();
        answers.insert(QuestionId::new(1), "Red");
        answers.insert(QuestionId::new(3), 7.0);

        assert_eq!(answers.get_label(QuestionId::new(1)).unwrap(), "Red");
        assert_eq!(answers.get_number(QuestionId::new(3)).unwrap(), 7.0);
        assert_eq!(answers.len(), 2);
    }

    #[test]
    fn type_mismatch_error() {
        let mut answers = Answers::new();
        answers.insert(QuestionId::new(3), 7.0);

        let result = answers.get_label(QuestionId::new(3));
        assert!(matches!(result, Err(AnswerError::TypeMismatch { .. })));
    }

    #[test]
    fn missing_error() {
        let answers = Answers::new();
        let result = answers.get_number(QuestionId::new(4));
        assert!(matches!(result, Err(AnswerError::Missing(id)) if id == QuestionId::new(4)));
    }

    #[test]
    fn serializes_as_map_in_id_order() {
        let mut answers = Answers::new();
        answers.insert(QuestionId::new(2), "Weekly");
        answers.insert(QuestionId::new(1), "Blue");

        let json = serde_json::to_string(&answers).unwrap();
        assert_eq!(json, r#"{"1":"Blue","2":"Weekly"}"#);
    }
}
