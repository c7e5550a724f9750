//! # survey-form
//!
//! A keyboard-driven survey form session. Frontend-agnostic.
//!
//! `FormSession` owns the question list, the answer set, the visited rows and
//! the focus index. Frontends feed it `Input`s and run the `Command`s it hands
//! back (network calls), then report results with `FormSession::apply`.
//!
//! ## Usage
//!
//! ```rust
//! use survey_form::{FormDefinition, FormSession, Input, NavKey, SessionConfig};
//!
//! let mut session = FormSession::new(SessionConfig::new(FormDefinition::builtin())).unwrap();
//!
//! session.handle(Input::Key(NavKey::Right));
//! assert_eq!(
//!     session.answers().get_label(session.questions()[0].id()).unwrap(),
//!     "Blue"
//! );
//! ```
//!
//! ## Keys
//!
//! - `Up` / `Down` - Move between rows; `Down` on the last row focuses submit
//! - `Left` / `Right` - Step a slider or cycle through options
//! - `Enter` - Submit, when the submit control is focused
//!
//! ## Backends
//!
//! Backends implement `FormBackend`:
//! - `survey-form-ratatui` - Terminal form
//! - `ScriptedBackend` (this crate) - Replays a fixed input script, for tests

// Re-export all types from survey-form-types
pub use survey_form_types::*;

mod input;
pub use input::{ClickTarget, Input, NavKey, TextEdit};

mod command;
pub use command::{Command, Outcome};

mod instruction;
pub use instruction::InstructionField;

mod submission;
pub use submission::Submission;

mod session;
pub use session::{Focus, FormSession, Notice, NoticeLevel, SUBMIT_FLASH, SessionConfig};

mod backend;
pub use backend::FormBackend;

// Scripted backend for driving sessions without a terminal
mod scripted_backend;
pub use scripted_backend::{ScriptedBackend, ScriptedBackendError};
