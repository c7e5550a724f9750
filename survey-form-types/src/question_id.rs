use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a question, e.g. `3`.
///
/// Used as keys in `Answers` and the visited set. Unique and stable within
/// one question list; a replaced list may reuse ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(u64);

impl QuestionId {
    /// Create a new id.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw numeric id.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for QuestionId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
