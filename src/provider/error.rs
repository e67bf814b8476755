//! Error types for translation provider calls

use thiserror::Error;

/// Errors returned by a [`TranslationProvider`](super::TranslationProvider)
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider answered with a non-success HTTP status
    #[error("provider returned HTTP {status}")]
    Status { status: u16, body: String },

    /// The provider answered successfully but the body lacks the expected fields
    #[error("unexpected provider response: {0}")]
    ResponseShape(String),

    /// The request could not be sent or the response could not be read
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The provider is misconfigured (e.g. empty API key)
    #[error("configuration error: {0}")]
    Config(String),

    /// Simulated failure from the mock provider
    #[error("{0}")]
    Other(String),
}

impl ProviderError {
    /// HTTP status reported by the provider, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw error body when the provider sent one, otherwise the error message
    pub fn details(&self) -> String {
        match self {
            ProviderError::Status { body, .. } if !body.is_empty() => body.clone(),
            other => other.to_string(),
        }
    }
}

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;
