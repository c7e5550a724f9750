use reqwest::StatusCode;

/// Failure classes of a service call.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a response (refused, timed out, TLS, ...).
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{url} returned HTTP {status}")]
    Status { status: StatusCode, url: String },

    #[error("Malformed response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}
