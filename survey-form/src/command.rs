use survey_form_types::{
    EnhancePromptRequest, EnhancePromptResponse, HealthReport, InferenceReport,
};

/// Side effects a session asks its frontend to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `POST /api/enhance-prompt-v1` with this body.
    Enhance(EnhancePromptRequest),
    /// `GET /api/healthcheck`; report back with the same `seq`.
    CheckHealth { seq: u64 },
    /// `GET /api/healthcheck-inference`; report back with the same `seq`.
    CheckInference { seq: u64 },
}

/// Results of commands, fed back through `FormSession::apply`.
#[derive(Debug)]
pub enum Outcome {
    Enhanced(Result<EnhancePromptResponse, anyhow::Error>),
    Health { seq: u64, report: HealthReport },
    Inference { seq: u64, report: InferenceReport },
}
