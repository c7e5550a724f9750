//! Scripted backend for driving form sessions without user interaction.
//!
//! `ScriptedBackend` replays a fixed list of inputs and answers every network
//! command from pre-configured responses. This is useful for testing the
//! controller end-to-end.
//!
//! # Example
//!
//! ```rust
//! use survey_form::{FormDefinition, FormSession, NavKey, QuestionId, ScriptedBackend, SessionConfig};
//!
//! let mut session = FormSession::new(SessionConfig::new(FormDefinition::builtin())).unwrap();
//! let backend = ScriptedBackend::new()
//!     .with_keys([NavKey::Right, NavKey::Down, NavKey::Down, NavKey::Down, NavKey::Down])
//!     .with_key(NavKey::Enter);
//!
//! let submission = session.run(&backend).unwrap().unwrap();
//! assert_eq!(submission.answers.get_label(QuestionId::new(1)).unwrap(), "Blue");
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;

use survey_form_types::{
    EnhancePromptResponse, HealthReport, InferenceReport, InferenceStatus, ServiceStatus,
};

use crate::{ClickTarget, Command, FormBackend, FormSession, Input, NavKey, Outcome, TextEdit};

/// Canned result for an enhancement request.
#[derive(Debug, Clone)]
enum EnhanceReply {
    Success(EnhancePromptResponse),
    Failure(String),
}

/// A backend that replays inputs and answers commands from canned replies.
///
/// Health probes without a queued report are answered as down/unhealthy.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    inputs: Vec<Input>,
    enhance_replies: Vec<EnhanceReply>,
    health_replies: Vec<HealthReport>,
    inference_replies: Vec<InferenceReport>,
    sent: RefCell<Vec<Command>>,
}

/// Error type for ScriptedBackend.
#[derive(Debug, thiserror::Error)]
pub enum ScriptedBackendError {
    #[error("No scripted reply left for enhancement request #{0}")]
    MissingEnhanceReply(usize),
}

impl ScriptedBackend {
    /// Create a new empty scripted backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an input event.
    pub fn with_input(mut self, input: Input) -> Self {
        self.inputs.push(input);
        self
    }

    /// Append a navigation key.
    pub fn with_key(self, key: NavKey) -> Self {
        self.with_input(Input::Key(key))
    }

    /// Append several navigation keys.
    pub fn with_keys(mut self, keys: impl IntoIterator<Item = NavKey>) -> Self {
        self.inputs.extend(keys.into_iter().map(Input::Key));
        self
    }

    /// Append a pointer press.
    pub fn with_click(self, target: ClickTarget) -> Self {
        self.with_input(Input::Click(target))
    }

    /// Focus the instruction field, type `text`, and leave it again.
    pub fn with_typed_instruction(mut self, text: &str) -> Self {
        self.inputs.push(Input::FocusInstruction);
        self.inputs.extend(text.chars().map(|c| {
            if c == '\n' {
                Input::Edit(TextEdit::Newline)
            } else {
                Input::Edit(TextEdit::Insert(c))
            }
        }));
        self.inputs.push(Input::LeaveInstruction);
        self
    }

    /// Queue a successful enhancement reply.
    pub fn with_enhancement(mut self, response: EnhancePromptResponse) -> Self {
        self.enhance_replies.push(EnhanceReply::Success(response));
        self
    }

    /// Queue a failed enhancement reply.
    pub fn with_enhancement_failure(mut self, message: impl Into<String>) -> Self {
        self.enhance_replies
            .push(EnhanceReply::Failure(message.into()));
        self
    }

    /// Queue a health probe report.
    pub fn with_health(mut self, report: HealthReport) -> Self {
        self.health_replies.push(report);
        self
    }

    /// Queue an inference probe report.
    pub fn with_inference_health(mut self, report: InferenceReport) -> Self {
        self.inference_replies.push(report);
        self
    }

    /// Every command the session issued during the last run, in order.
    pub fn sent_commands(&self) -> Vec<Command> {
        self.sent.borrow().clone()
    }
}

impl FormBackend for ScriptedBackend {
    type Error = ScriptedBackendError;

    fn run(&self, session: &mut FormSession) -> Result<(), Self::Error> {
        self.sent.borrow_mut().clear();

        let mut enhance = self.enhance_replies.iter();
        let mut enhance_count = 0;
        let mut health: VecDeque<_> = self.health_replies.iter().cloned().collect();
        let mut inference: VecDeque<_> = self.inference_replies.iter().cloned().collect();

        for input in &self.inputs {
            for command in session.handle(*input) {
                self.sent.borrow_mut().push(command.clone());

                let outcome = match command {
                    Command::Enhance(_) => {
                        enhance_count += 1;
                        let reply = enhance
                            .next()
                            .ok_or(ScriptedBackendError::MissingEnhanceReply(enhance_count))?;
                        Outcome::Enhanced(match reply {
                            EnhanceReply::Success(response) => Ok(response.clone()),
                            EnhanceReply::Failure(message) => Err(anyhow::anyhow!("{message}")),
                        })
                    }
                    Command::CheckHealth { seq } => Outcome::Health {
                        seq,
                        report: health.pop_front().unwrap_or_else(|| {
                            HealthReport::new(ServiceStatus::Down, "no scripted reply")
                        }),
                    },
                    Command::CheckInference { seq } => Outcome::Inference {
                        seq,
                        report: inference.pop_front().unwrap_or_else(|| {
                            InferenceReport::new(InferenceStatus::Unhealthy, "no scripted reply")
                        }),
                    },
                };
                session.apply(outcome);
            }
        }

        Ok(())
    }
}
