//! Explicit client configuration.
//!
//! # Design
//! A `Config` is built once at program start and handed to
//! `IrisClient::from_config`. There is no process-wide instance; two clients
//! with different tokens can live side by side.

use std::env;
use std::time::Duration;

use secrecy::SecretString;

use crate::error::{ApiError, ApiResult};
use crate::transport::{TransportConfig, DEFAULT_TIMEOUT_SECS};

pub const ENV_BASE_URL: &str = "IRIS_BASE_URL";
pub const ENV_API_KEY: &str = "IRIS_API_KEY";
pub const ENV_TIMEOUT_SECS: &str = "IRIS_TIMEOUT_SECS";
pub const ENV_SKIP_TLS_VERIFY: &str = "IRIS_SKIP_TLS_VERIFY";

/// Connection settings for one IRIS instance.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub api_key: SecretString,
    pub timeout: Duration,
    pub skip_tls_verify: bool,
}

impl Config {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: SecretString::new(api_key.into()),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            skip_tls_verify: false,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_skip_tls_verify(mut self, skip: bool) -> Self {
        self.skip_tls_verify = skip;
        self
    }

    /// Reads `IRIS_BASE_URL` and `IRIS_API_KEY` (required) plus the optional
    /// `IRIS_TIMEOUT_SECS` and `IRIS_SKIP_TLS_VERIFY`.
    pub fn from_env() -> ApiResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ApiResult<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ApiError::Config(format!("{key} is not set")))
        };

        let mut config = Self::new(required(ENV_BASE_URL)?, required(ENV_API_KEY)?);

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ApiError::Config(format!("{ENV_TIMEOUT_SECS} must be whole seconds, got {raw:?}"))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup(ENV_SKIP_TLS_VERIFY) {
            config.skip_tls_verify = matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }

        Ok(config)
    }

    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig {
            timeout: self.timeout,
            skip_tls_verify: self.skip_tls_verify,
        }
    }
}
