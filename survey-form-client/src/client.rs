use serde::de::DeserializeOwned;
use survey_form_types::{
    EnhancePromptRequest, EnhancePromptResponse, HealthReport, InferenceBody, InferenceReport,
    InferenceStatus, ServiceStatus,
};

use crate::{ClientConfig, ClientError};

pub const ENHANCE_PATH: &str = "/api/enhance-prompt-v1";
pub const HEALTH_PATH: &str = "/api/healthcheck";
pub const INFERENCE_HEALTH_PATH: &str = "/api/healthcheck-inference";

/// Client for the enhancement and health probe endpoints.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct SurveyClient {
    client: reqwest::Client,
    base_url: String,
}

impl SurveyClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Ask the service to revise the instruction and produce a new question list.
    pub async fn enhance_prompt(
        &self,
        request: &EnhancePromptRequest,
    ) -> Result<EnhancePromptResponse, ClientError> {
        let url = self.url(ENHANCE_PATH);
        tracing::debug!(%url, questions = request.questions.len(), "requesting prompt enhancement");

        let response = self.client.post(&url).json(request).send().await?;
        read_json(&url, response).await
    }

    /// Probe the main backend. Any 2xx response with a JSON body counts as alive.
    pub async fn check_health(&self) -> HealthReport {
        let url = self.url(HEALTH_PATH);
        match self.get_json::<serde_json::Value>(&url).await {
            Ok(body) => HealthReport::new(ServiceStatus::Alive, body.to_string()),
            Err(err) => {
                tracing::warn!(%url, error = %err, "health check failed");
                HealthReport::new(ServiceStatus::Down, err.to_string())
            }
        }
    }

    /// Probe the inference backend, which answers with `{"response": "..."}`.
    pub async fn check_inference_health(&self) -> InferenceReport {
        let url = self.url(INFERENCE_HEALTH_PATH);
        match self.get_json::<InferenceBody>(&url).await {
            Ok(body) => InferenceReport::new(InferenceStatus::Healthy, body.response),
            Err(err) => {
                tracing::warn!(%url, error = %err, "inference health check failed");
                InferenceReport::new(InferenceStatus::Unhealthy, err.to_string())
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ClientError> {
        let response = self.client.get(url).send().await?;
        read_json(url, response).await
    }
}

async fn read_json<T: DeserializeOwned>(
    url: &str,
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ClientError::Status {
            status,
            url: url.to_string(),
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|source| ClientError::Decode {
        url: url.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = SurveyClient::new(&ClientConfig::new("http://localhost:5000/")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(
            client.url(HEALTH_PATH),
            "http://localhost:5000/api/healthcheck"
        );
    }
}
