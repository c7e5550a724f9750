//! Observations made by the two health probes.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Liveness of the main backend (`GET /api/healthcheck`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceStatus {
    Alive,
    Down,
}

/// Health of the inference backend (`GET /api/healthcheck-inference`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InferenceStatus {
    Healthy,
    Unhealthy,
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Alive => "Alive",
            Self::Down => "Down",
        })
    }
}

impl fmt::Display for InferenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Healthy => "Healthy",
            Self::Unhealthy => "Unhealthy",
        })
    }
}

/// One probe result: the classified status, the response (or failure) text,
/// and when it was observed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeReport<S> {
    pub status: S,
    pub response: String,
    pub checked_at: DateTime<Utc>,
}

impl<S> ProbeReport<S> {
    /// Create a report stamped with the current time.
    pub fn new(status: S, response: impl Into<String>) -> Self {
        Self {
            status,
            response: response.into(),
            checked_at: Utc::now(),
        }
    }
}

pub type HealthReport = ProbeReport<ServiceStatus>;
pub type InferenceReport = ProbeReport<InferenceStatus>;

/// Body returned by the inference health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceBody {
    pub response: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_is_timestamped() {
        let before = Utc::now();
        let report = HealthReport::new(ServiceStatus::Down, "connection refused");
        assert!(report.checked_at >= before);
        assert_eq!(report.status.to_string(), "Down");
        assert_eq!(InferenceStatus::Healthy.to_string(), "Healthy");
    }
}
