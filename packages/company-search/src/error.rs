//! Typed errors for filter resolution.
//!
//! Every variant is recoverable: the resolver catches all of them and
//! answers from the heuristic matcher instead. They exist so callers and
//! tests can see *why* a fallback happened.

use thiserror::Error;

/// Errors raised by the model path of a resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// No model credential is configured
    #[error("language model not configured")]
    ModelUnavailable,

    /// Transport failure, non-success status, or deadline exceeded
    #[error("language model call failed: {0}")]
    ModelCallFailed(String),

    /// Success response that carried no usable text
    #[error("language model returned no text")]
    ModelEmptyResponse,

    /// Model text contained no balanced `{...}` span
    #[error("no JSON object found in model response")]
    NoJsonFound,

    /// The `{...}` span did not parse as a JSON object
    #[error("malformed JSON in model response: {0}")]
    MalformedJson(String),
}

impl ResolveError {
    /// Stable snake_case name, used in logs and API responses.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ModelUnavailable => "model_unavailable",
            Self::ModelCallFailed(_) => "model_call_failed",
            Self::ModelEmptyResponse => "model_empty_response",
            Self::NoJsonFound => "no_json_found",
            Self::MalformedJson(_) => "malformed_json",
        }
    }
}

/// Result type alias for resolution operations.
pub type Result<T> = std::result::Result<T, ResolveError>;
