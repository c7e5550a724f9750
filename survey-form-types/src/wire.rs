//! JSON bodies exchanged with the prompt enhancement service.

use serde::{Deserialize, Serialize};

use crate::{AnswerValue, FormError, Question, form_definition::validate_questions};

/// One question as the enhancement service sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireQuestion {
    pub question: String,
    #[serde(default)]
    pub choices: Vec<String>,
    /// The held answer as text; empty when unanswered.
    #[serde(default)]
    pub answer: String,
}

impl WireQuestion {
    /// Describe a question together with the answer currently held for it.
    pub fn from_question(question: &Question, answer: Option<&AnswerValue>) -> Self {
        Self {
            question: question.text().to_string(),
            choices: question.choices(),
            answer: answer.map(ToString::to_string).unwrap_or_default(),
        }
    }
}

/// Body of `POST /api/enhance-prompt-v1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancePromptRequest {
    pub current_sys_prompt: String,
    pub previous_sys_prompt: String,
    pub questions: Vec<WireQuestion>,
}

/// Response of `POST /api/enhance-prompt-v1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancePromptResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_sys_prompt: Option<String>,
    pub questions: Vec<WireQuestion>,
}

impl EnhancePromptResponse {
    /// The revised instruction, if the service sent a non-empty one.
    pub fn revised_instruction(&self) -> Option<&str> {
        self.new_sys_prompt
            .as_deref()
            .filter(|prompt| !prompt.trim().is_empty())
    }

    /// Turn the returned questions into radio questions with ids `1..=m`.
    pub fn to_questions(&self) -> Result<Vec<Question>, FormError> {
        let questions: Vec<Question> = self
            .questions
            .iter()
            .zip(1u64..)
            .map(|(wire, id)| Question::radio(id, wire.question.clone(), wire.choices.clone()))
            .collect();
        validate_questions(&questions)?;
        Ok(questions)
    }
}
