//! # survey-form-ratatui
//!
//! Terminal frontend for survey-form.
//!
//! Renders every question of a `FormSession` on one screen, together with the
//! system instruction field, the enhance and submit buttons and a status bar
//! for the health probes. Keys and mouse presses are translated into session
//! inputs; network commands run on a tokio runtime and report back through a
//! channel that is drained on every tick, so the UI never waits on the network.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use survey_form::{FormDefinition, FormSession, SessionConfig};
//! use survey_form_client::{ClientConfig, SurveyClient};
//! use survey_form_ratatui::RatatuiFormBackend;
//!
//! fn main() -> anyhow::Result<()> {
//!     let runtime = tokio::runtime::Runtime::new()?;
//!     let client = SurveyClient::new(&ClientConfig::default())?;
//!     let backend = RatatuiFormBackend::new(runtime.handle().clone(), client);
//!
//!     let mut session = FormSession::new(SessionConfig::new(FormDefinition::builtin()))?;
//!     if let Some(submission) = session.run(&backend)? {
//!         println!("{submission:#?}");
//!     }
//!     Ok(())
//! }
//! ```

mod backend;
mod dispatch;
mod keymap;
mod render;
mod theme;

pub use backend::{RatatuiFormBackend, RatatuiFormError};
pub use dispatch::{Dispatcher, run_command};
pub use keymap::{Action, map_key};
pub use render::{FormView, HitMap, draw_form};
pub use theme::Theme;
