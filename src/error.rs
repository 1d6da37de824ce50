use std::time::Duration;
use thiserror::Error;

/// Structured metadata could not be decoded into a recipe.
///
/// Never surfaced by the extraction pipeline: a decode failure demotes the
/// request to the visible-text fallback.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Payload is not valid JSON, or violates a required shape
    #[error("Malformed recipe data: {0}")]
    MalformedInput(#[from] serde_json::Error),
}

/// Errors from a single round trip to a remote recipe service
#[derive(Error, Debug)]
pub enum RemoteError {
    /// Request could not be sent or the connection failed
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Service answered with a non-success status
    #[error("Service responded with status {0}")]
    Status(u16),

    /// Response body was not a recognised payload
    #[error("Malformed service response: {0}")]
    MalformedResponse(#[from] DecodeError),

    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(String),
}

/// Terminal failure of one extraction request
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Neither structured metadata nor visible text was available
    #[error("No recipe data or page text available")]
    NoContentAvailable,

    /// The remote service answered but found no recipe
    #[error("No recipe found")]
    RemoteRejected,

    /// The remote service could not be reached or answered garbage
    #[error("Recipe service unavailable: {0}")]
    RemoteUnavailable(String),

    /// No terminal state was reached before the deadline
    #[error("Extraction timed out after {0:?}")]
    Timeout(Duration),
}

impl ExtractError {
    /// True for the two "not found" outcomes, as opposed to failures.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ExtractError::NoContentAvailable | ExtractError::RemoteRejected
        )
    }
}

impl From<RemoteError> for ExtractError {
    fn from(err: RemoteError) -> Self {
        ExtractError::RemoteUnavailable(err.to_string())
    }
}

/// Errors from the ingredient scaling transform
#[derive(Error, Debug)]
pub enum ScaleError {
    /// Scale factor is not a finite positive number
    #[error("Invalid scale factor: {0}")]
    InvalidFactor(f64),

    /// Scaling service call failed
    #[error("Scaling failed: {0}")]
    Remote(#[from] RemoteError),
}

/// Configuration error
#[derive(Error, Debug)]
#[error("Configuration error: {0}")]
pub struct ConfigError(#[from] pub config::ConfigError);
