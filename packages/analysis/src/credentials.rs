//! Credential handling with secure memory.
//!
//! Uses the `secrecy` crate to prevent accidental logging of the provider
//! API key.

use secrecy::{ExposeSecret, SecretBox};
use std::fmt;

use crate::error::{InferenceError, InferenceResult};

/// A secret string that won't be logged or displayed.
pub struct SecretString(SecretBox<str>);

impl SecretString {
    /// Create a new secret string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(Box::from(value.into().as_str())))
    }

    /// Expose the secret value for use.
    ///
    /// Only call this when actually using the secret (e.g., in the
    /// Authorization header of a provider request).
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// Whether the secret is empty (unset).
    pub fn is_empty(&self) -> bool {
        self.expose().is_empty()
    }
}

impl Clone for SecretString {
    fn clone(&self) -> Self {
        Self::new(self.expose().to_string())
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

/// Configuration for the inference provider, threaded by dependency
/// injection rather than ambient environment lookup at call sites.
#[derive(Clone)]
pub struct InferenceCredentials {
    /// API key (secret)
    pub api_key: SecretString,

    /// Model identifier used for both extraction and comparison calls
    pub model: String,

    /// Provider API base URL
    pub base_url: String,

    /// Sent as `HTTP-Referer` for provider-side attribution
    pub referer: String,

    /// Sent as `X-Title` for provider-side attribution
    pub title: String,
}

/// Default model used for both extraction and comparison calls.
pub const DEFAULT_MODEL: &str = "anthropic/claude-sonnet-4";

/// Default provider endpoint (OpenRouter).
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

impl InferenceCredentials {
    /// Create credentials with the default model and endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            referer: "https://devproposals.com".to_string(),
            title: "DevProposals".to_string(),
        }
    }

    /// Read credentials from the environment once at process startup.
    ///
    /// Reads `OPENROUTER_API_KEY` (required), `OPENROUTER_BASE_URL`,
    /// `OPENROUTER_MODEL`, `DEVPROPOSALS_SITE_URL`, `DEVPROPOSALS_APP_TITLE`.
    pub fn from_env() -> InferenceResult<Self> {
        let api_key =
            std::env::var("OPENROUTER_API_KEY").map_err(|_| InferenceError::MissingApiKey)?;

        let mut credentials = Self::new(api_key);
        if let Ok(base_url) = std::env::var("OPENROUTER_BASE_URL") {
            credentials.base_url = base_url;
        }
        if let Ok(model) = std::env::var("OPENROUTER_MODEL") {
            credentials.model = model;
        }
        if let Ok(referer) = std::env::var("DEVPROPOSALS_SITE_URL") {
            credentials.referer = referer;
        }
        if let Ok(title) = std::env::var("DEVPROPOSALS_APP_TITLE") {
            credentials.title = title;
        }
        Ok(credentials)
    }

    /// Set the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the provider base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

impl fmt::Debug for InferenceCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferenceCredentials")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("referer", &self.referer)
            .field("title", &self.title)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_not_in_debug() {
        let secret = SecretString::new("sk-or-super-secret");
        let debug = format!("{:?}", secret);
        assert!(!debug.contains("sk-or"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_secret_not_in_display() {
        let secret = SecretString::new("sk-or-super-secret");
        let display = format!("{}", secret);
        assert!(!display.contains("sk-or"));
        assert!(display.contains("[REDACTED]"));
    }

    #[test]
    fn test_credentials_debug_redacts_key() {
        let credentials = InferenceCredentials::new("sk-or-super-secret");
        let debug = format!("{:?}", credentials);
        assert!(!debug.contains("sk-or-super"));
        assert!(debug.contains(DEFAULT_MODEL));
    }

    #[test]
    fn test_empty_key_detected() {
        let credentials = InferenceCredentials::new("");
        assert!(credentials.api_key.is_empty());
    }
}
