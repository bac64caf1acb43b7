//! Language-model implementations of the [`ModelClient`](crate::traits::model::ModelClient) trait.

#[cfg(feature = "gemini")]
mod gemini;

#[cfg(feature = "gemini")]
pub use gemini::GeminiModel;
