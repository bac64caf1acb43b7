//! Model API key handling with secure memory.
//!
//! Uses the `secrecy` crate so the key never shows up in logs, debug output
//! or error messages.

use secrecy::{ExposeSecret, SecretBox};
use std::fmt;

/// A secret string that won't be logged or displayed.
pub struct SecretString(SecretBox<str>);

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(Box::from(value.into().as_str())))
    }

    /// Expose the secret value. Only call this when building the request.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    pub fn is_blank(&self) -> bool {
        self.expose().trim().is_empty()
    }
}

impl Clone for SecretString {
    fn clone(&self) -> Self {
        Self::new(self.expose())
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Credential for the language-model endpoint.
#[derive(Clone)]
pub struct ModelCredentials {
    pub api_key: SecretString,

    /// API root override (proxies, test servers)
    pub base_url: Option<String>,
}

impl ModelCredentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key),
            base_url: None,
        }
    }

    /// Credentials from an optional key; blank keys count as absent.
    pub fn from_optional_key(api_key: Option<String>) -> Option<Self> {
        api_key
            .filter(|k| !k.trim().is_empty())
            .map(Self::new)
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }
}

impl fmt::Debug for ModelCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelCredentials")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_not_in_debug_or_display() {
        let secret = SecretString::new("AIza-super-secret-key");
        assert!(!format!("{:?}", secret).contains("AIza"));
        assert_eq!(format!("{}", secret), "[REDACTED]");
        assert_eq!(secret.expose(), "AIza-super-secret-key");
    }

    #[test]
    fn test_blank_keys_are_absent() {
        assert!(ModelCredentials::from_optional_key(None).is_none());
        assert!(ModelCredentials::from_optional_key(Some("  ".into())).is_none());
        assert!(ModelCredentials::from_optional_key(Some("k".into())).is_some());
        assert!(SecretString::new(" ").is_blank());
    }

    #[test]
    fn test_credentials_debug() {
        let creds = ModelCredentials::new("AIza-secret").with_base_url("http://localhost:9999");
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("AIza-secret"));
        assert!(debug.contains("localhost:9999"));
    }
}
