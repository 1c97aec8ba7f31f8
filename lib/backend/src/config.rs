//! Backend connection configuration.

use serde::Deserialize;
use std::fmt;

/// Where the REST backend lives and how to talk to it.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct BackendConfig {
    /// Base URL, e.g. `https://portal.example.com`.
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Sent as `Authorization: Bearer <token>` when present.
    #[serde(default)]
    pub bearer_token: Option<String>,
}

fn default_timeout_seconds() -> u64 {
    30
}

impl BackendConfig {
    /// Creates a configuration with default timeout and no token.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_seconds: default_timeout_seconds(),
            bearer_token: None,
        }
    }

    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("base_url", &self.base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("bearer_token", &redact(self.bearer_token.as_deref()))
            .finish()
    }
}

/// Stands in for a secret in `Debug` output.
pub(crate) fn redact(secret: Option<&str>) -> Option<&'static str> {
    secret.map(|_| "[redacted]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_missing_fields() {
        let config: BackendConfig =
            serde_json::from_str(r#"{ "base_url": "http://localhost:8080" }"#).expect("parse");
        assert_eq!(config.timeout_seconds, 30);
        assert_eq!(config.bearer_token, None);
        assert_eq!(config, BackendConfig::new("http://localhost:8080"));
    }

    #[test]
    fn base_url_is_required() {
        assert!(serde_json::from_str::<BackendConfig>("{}").is_err());
    }

    #[test]
    fn debug_output_hides_bearer_token() {
        let config = BackendConfig::new("http://localhost:8080").with_bearer_token("s3cr3t");
        let debug = format!("{config:?}");
        assert!(!debug.contains("s3cr3t"));
        assert!(debug.contains("[redacted]"));
        assert!(debug.contains("http://localhost:8080"));
    }
}
