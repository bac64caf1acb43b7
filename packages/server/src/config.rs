use anyhow::{Context, Result};
use company_search::types::config::{DEFAULT_MODEL, DEFAULT_MODEL_TIMEOUT};
use company_search::{GenerationSettings, ModelCredentials, ResolverConfig};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub companies_path: String,

    /// `None` selects the heuristic matcher for every query
    pub gemini: Option<ModelCredentials>,
    pub generation: GenerationSettings,
    pub model_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let gemini = ModelCredentials::from_optional_key(env::var("GEMINI_API_KEY").ok())
            .map(|creds| match env::var("GEMINI_BASE_URL") {
                Ok(url) if !url.trim().is_empty() => creds.with_base_url(url),
                _ => creds,
            });

        let generation = GenerationSettings::default()
            .with_model(env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()))
            .with_temperature(parse_or("MODEL_TEMPERATURE", 0.1)?)
            .with_max_output_tokens(parse_or("MODEL_MAX_OUTPUT_TOKENS", 1000)?);

        Ok(Self {
            port: parse_or("PORT", 8080)?,
            companies_path: env::var("COMPANIES_PATH")
                .unwrap_or_else(|_| "companies.json".to_string()),
            gemini,
            generation,
            model_timeout: Duration::from_secs(parse_or(
                "MODEL_TIMEOUT_SECS",
                DEFAULT_MODEL_TIMEOUT.as_secs(),
            )?),
        })
    }

    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig::new().with_model_timeout(self.model_timeout)
    }
}

/// Parse `name` if set, else `default`. A set but unparsable value is an error.
fn parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid number", name)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_falls_back_when_unset() {
        assert_eq!(parse_or("SERVER_CORE_TEST_UNSET_VAR", 42u16).unwrap(), 42);
    }

    #[test]
    fn test_parse_or_rejects_garbage() {
        env::set_var("SERVER_CORE_TEST_BAD_PORT", "eighty");
        let err = parse_or::<u16>("SERVER_CORE_TEST_BAD_PORT", 8080).unwrap_err();
        assert!(err.to_string().contains("SERVER_CORE_TEST_BAD_PORT"));

        env::set_var("SERVER_CORE_TEST_GOOD_TEMP", " 0.4 ");
        assert_eq!(parse_or::<f32>("SERVER_CORE_TEST_GOOD_TEMP", 0.1).unwrap(), 0.4);
    }
}
