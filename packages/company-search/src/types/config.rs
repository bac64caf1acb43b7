//! Configuration types for resolution and model generation.

use std::time::Duration;

/// Default deadline for one model call.
pub const DEFAULT_MODEL_TIMEOUT: Duration = Duration::from_secs(15);

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Configuration for the resolver.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Deadline for the single model call of a resolution.
    ///
    /// When it expires the call counts as failed and the heuristic
    /// matcher answers instead. Default: 15 seconds.
    pub model_timeout: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            model_timeout: DEFAULT_MODEL_TIMEOUT,
        }
    }
}

impl ResolverConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model call deadline.
    pub fn with_model_timeout(mut self, timeout: Duration) -> Self {
        self.model_timeout = timeout;
        self
    }
}

/// Sampling parameters sent with every model request.
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    /// Model identifier. Default: `gemini-2.5-flash`.
    pub model: String,

    /// Sampling temperature. Kept low so answers are near-deterministic.
    ///
    /// Default: 0.1.
    pub temperature: f32,

    /// Ceiling on generated tokens. Default: 1000.
    pub max_output_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.1,
            max_output_tokens: 1000,
        }
    }
}

impl GenerationSettings {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }
}
