//! # survey-form-client
//!
//! Talks to the three external services a survey form depends on:
//!
//! - `POST /api/enhance-prompt-v1` - revise the instruction and generate questions
//! - `GET /api/healthcheck` - liveness of the main backend
//! - `GET /api/healthcheck-inference` - health of the inference backend
//!
//! Every call is a single attempt; nothing is retried.

mod client;
mod config;
mod error;

pub use client::{ENHANCE_PATH, HEALTH_PATH, INFERENCE_HEALTH_PATH, SurveyClient};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::ClientError;
