//! Recommendation error types.

use thiserror::Error;

/// Errors that can occur while fetching a recommendation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecommendationError {
    /// The service call itself failed.
    #[error("recommendation service failed: {0}")]
    Service(String),

    /// The service returned no text.
    #[error("recommendation service returned an empty response")]
    EmptyResponse,

    /// The response text was not a valid recommendation.
    #[error("failed to decode recommendation: {0}")]
    Decode(String),

    /// The quiz has not been completed.
    #[error("no quiz answers to base a recommendation on")]
    NoAnswers,
}

impl RecommendationError {
    /// Returns true if retrying the request may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::NoAnswers)
    }
}

impl From<serde_json::Error> for RecommendationError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}
