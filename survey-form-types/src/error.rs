/// Error type for form operations.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// The question list breaks a structural rule (duplicate ids, no options, ...).
    #[error("Invalid form definition: {0}")]
    InvalidDefinition(String),

    /// Backend-specific failure (I/O, terminal crash, etc.)
    #[error("Backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

impl FormError {
    /// Create an invalid-definition error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidDefinition(message.into())
    }

    /// Create a backend error from any error type.
    pub fn backend(err: impl Into<anyhow::Error>) -> Self {
        Self::Backend(err.into())
    }
}
