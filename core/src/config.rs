//! Client configuration and the fixed default request options.
//!
//! # Design
//! `ClientConfig` is read once (from code or the environment) and handed to
//! `ApiClient::new`, which derives its `RequestDefaults` from it. Neither is
//! mutated afterwards; a test that needs different defaults builds a new
//! client.

use crate::error::ApiError;
use crate::http::{CredentialsMode, HttpMethod, RedirectMode, RequestMode};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT_MS: u64 = 100_000;

pub const BASE_URL_ENV: &str = "TOOLS_API_BASE_URL";
pub const TIMEOUT_ENV: &str = "TOOLS_API_TIMEOUT_MS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    /// `0` is raised to 1 ms.
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms.max(1);
        self
    }

    /// Defaults overridden by `TOOLS_API_BASE_URL` and `TOOLS_API_TIMEOUT_MS`.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let mut config = Self::default();
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(base_url) = non_blank(BASE_URL_ENV) {
            config.base_url = base_url.trim().to_string();
        }
        if let Some(raw) = non_blank(TIMEOUT_ENV) {
            config.timeout_ms = match raw.trim().parse::<u64>() {
                Ok(0) => {
                    return Err(ApiError::Config(format!("{TIMEOUT_ENV} must be positive")));
                }
                Ok(ms) => ms,
                Err(e) => {
                    return Err(ApiError::Config(format!("{TIMEOUT_ENV}={raw:?}: {e}")));
                }
            };
        }
        Ok(config)
    }
}

/// The option set every request starts from before caller options are
/// applied on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDefaults {
    pub method: HttpMethod,
    pub mode: RequestMode,
    pub credentials: CredentialsMode,
    pub redirect: RedirectMode,
    pub headers: Vec<(String, String)>,
    pub timeout_ms: u64,
}

impl RequestDefaults {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            method: HttpMethod::Get,
            mode: RequestMode::Cors,
            credentials: CredentialsMode::Include,
            redirect: RedirectMode::Follow,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            timeout_ms: config.timeout_ms,
        }
    }
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self::from_config(&ClientConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_backend_contract() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:5000");
        assert_eq!(config.timeout_ms, 100_000);

        let defaults = RequestDefaults::from_config(&config);
        assert_eq!(defaults.method, HttpMethod::Get);
        assert_eq!(defaults.mode, RequestMode::Cors);
        assert_eq!(defaults.credentials, CredentialsMode::Include);
        assert_eq!(defaults.redirect, RedirectMode::Follow);
        assert_eq!(
            defaults.headers,
            vec![("Content-Type".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn env_overrides_apply() {
        let config = ClientConfig::from_lookup(lookup(&[
            (BASE_URL_ENV, "http://tools.internal:8080"),
            (TIMEOUT_ENV, "2500"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://tools.internal:8080");
        assert_eq!(config.timeout_ms, 2500);
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let config =
            ClientConfig::from_lookup(lookup(&[(BASE_URL_ENV, "  "), (TIMEOUT_ENV, "")])).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = ClientConfig::from_lookup(lookup(&[(TIMEOUT_ENV, "0")])).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn builder_timeout_is_at_least_one_ms() {
        assert_eq!(ClientConfig::default().with_timeout_ms(0).timeout_ms, 1);
    }

    #[test]
    fn garbage_timeout_is_rejected() {
        let err = ClientConfig::from_lookup(lookup(&[(TIMEOUT_ENV, "soon")])).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }
}
