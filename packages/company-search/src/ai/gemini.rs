//! Gemini implementation of the ModelClient trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use company_search::ai::GeminiModel;
//! use company_search::{GenerationSettings, ModelCredentials, Resolver};
//!
//! let model = GeminiModel::new(ModelCredentials::new(key), GenerationSettings::default());
//! let resolver = Resolver::new(Arc::new(model));
//! ```

use async_trait::async_trait;
use gemini_client::{GeminiClient, GeminiError, GenerateContentRequest};
use tracing::debug;

use crate::error::{ResolveError, Result};
use crate::security::credentials::ModelCredentials;
use crate::traits::model::ModelClient;
use crate::types::config::GenerationSettings;

/// Gemini-backed model client.
///
/// One `generateContent` request per [`invoke`](ModelClient::invoke), with
/// the temperature and output ceiling from [`GenerationSettings`].
#[derive(Debug, Clone)]
pub struct GeminiModel {
    client: GeminiClient,
    configured: bool,
    settings: GenerationSettings,
}

impl GeminiModel {
    pub fn new(credentials: ModelCredentials, settings: GenerationSettings) -> Self {
        let configured = !credentials.api_key.is_blank();
        let mut client = GeminiClient::new(credentials.api_key.expose());
        if let Some(base_url) = credentials.base_url {
            client = client.with_base_url(base_url);
        }

        Self {
            client,
            configured,
            settings,
        }
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }
}

#[async_trait]
impl ModelClient for GeminiModel {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn invoke(&self, prompt: &str) -> Result<String> {
        if !self.configured {
            return Err(ResolveError::ModelUnavailable);
        }

        let request = GenerateContentRequest::prompt(prompt)
            .temperature(self.settings.temperature)
            .max_output_tokens(self.settings.max_output_tokens);

        let response = self
            .client
            .generate_content(&self.settings.model, &request)
            .await
            .map_err(map_gemini_error)?;

        let text = response
            .first_text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(ResolveError::ModelEmptyResponse)?;

        debug!(
            model = %self.settings.model,
            response_len = text.len(),
            "Gemini response received"
        );

        Ok(text.to_string())
    }
}

fn map_gemini_error(error: GeminiError) -> ResolveError {
    match error {
        GeminiError::Config(_) => ResolveError::ModelUnavailable,
        GeminiError::Api { status, .. } => {
            ResolveError::ModelCallFailed(format!("Gemini API returned status {}", status))
        }
        GeminiError::Network(e) | GeminiError::Parse(e) => ResolveError::ModelCallFailed(e),
    }
}
