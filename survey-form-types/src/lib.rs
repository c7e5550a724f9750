//! Core types for the survey-form workspace.
//!
//! This crate provides the foundational types shared by the controller,
//! the HTTP client and the terminal frontend:
//! - `FormDefinition` - The question list a session is built from
//! - `Question` and `QuestionKind` - Individual questions and their input variants
//! - `Answers` and `AnswerValue` - The answer set, keyed by `QuestionId`
//! - `EnhancePromptRequest` / `EnhancePromptResponse` - Enhancement wire format
//! - `HealthReport` / `InferenceReport` - Health probe observations

mod question_id;
pub use question_id::QuestionId;

mod answer_value;
pub use answer_value::{AnswerValue, format_number};

mod answers;
pub use answers::{AnswerError, Answers};

mod question;
pub use question::{ChoiceQuestion, Direction, Question, QuestionKind, SliderQuestion};

mod form_definition;
pub use form_definition::{DEFAULT_HINT, FormDefinition};

mod wire;
pub use wire::{EnhancePromptRequest, EnhancePromptResponse, WireQuestion};

mod health;
pub use health::{
    HealthReport, InferenceBody, InferenceReport, InferenceStatus, ProbeReport, ServiceStatus,
};

mod error;
pub use error::FormError;
