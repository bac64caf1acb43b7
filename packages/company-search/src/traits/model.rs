//! Model trait for the external language-model call.
//!
//! The resolver needs exactly one capability from a language model: turn a
//! prompt into raw text. Everything else (prompting, validation, fallback)
//! stays on this side of the trait.

use async_trait::async_trait;

use crate::error::Result;

/// A language model reachable with one request/response.
///
/// Implementations wrap a specific provider and must not retry. The resolver
/// owns the deadline and the fallback decision.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Whether a credential is configured.
    ///
    /// When this is `false` the resolver goes straight to the heuristic
    /// matcher without calling [`invoke`](Self::invoke).
    fn is_configured(&self) -> bool {
        true
    }

    /// Send `prompt` and return the raw text of the first candidate.
    ///
    /// Errors:
    /// - `ModelUnavailable` if no credential is configured
    /// - `ModelCallFailed` on transport failure or non-success status
    /// - `ModelEmptyResponse` if the response carries no text
    async fn invoke(&self, prompt: &str) -> Result<String>;
}
