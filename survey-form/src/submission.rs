use chrono::{DateTime, Utc};
use serde::Serialize;
use survey_form_types::Answers;

/// What the submit action packages: the instruction and the full answer set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub system_instruction: String,
    pub answers: Answers,
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    pub fn new(system_instruction: impl Into<String>, answers: Answers) -> Self {
        Self {
            system_instruction: system_instruction.into(),
            answers,
            submitted_at: Utc::now(),
        }
    }
}
