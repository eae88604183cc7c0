//! Network execution of finalized requests.
//!
//! # Design
//! `Transport` is the seam between the client and the network. It never looks
//! at the status code: a 500 is a successful execution as far as the
//! transport is concerned. `UreqTransport` is the blocking default, built
//! once from a `TransportConfig` and safe to share between threads.

use std::sync::Arc;
use std::time::Duration;

use ureq::http::{Method, Request};
use ureq::tls::TlsConfig;
use ureq::Agent;

use crate::error::ApiResult;
use crate::http::HttpResponse;

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Largest response body read before giving up with a transport error.
/// ureq's own default of 10 MiB is too small for large customer lists.
pub const MAX_BODY_BYTES: u64 = 64 * 1024 * 1024;

/// Executes a native request and returns the raw response.
pub trait Transport: Send + Sync {
    fn execute(&self, request: Request<Vec<u8>>) -> ApiResult<HttpResponse>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn execute(&self, request: Request<Vec<u8>>) -> ApiResult<HttpResponse> {
        (**self).execute(request)
    }
}

/// Settings fixed at transport construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    pub timeout: Duration,
    /// Accept self-signed or otherwise unverifiable certificates. Meant for
    /// lab deployments.
    pub skip_tls_verify: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            skip_tls_verify: false,
        }
    }
}

/// Blocking transport backed by a `ureq::Agent`.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
    config: TransportConfig,
}

impl std::fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UreqTransport")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl UreqTransport {
    pub fn new(config: TransportConfig) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .http_status_as_error(false)
            .tls_config(
                TlsConfig::builder()
                    .disable_verification(config.skip_tls_verify)
                    .build(),
            )
            .build()
            .new_agent();

        Self { agent, config }
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(TransportConfig::default())
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: Request<Vec<u8>>) -> ApiResult<HttpResponse> {
        let (parts, body) = request.into_parts();

        // GET and HEAD go out bodiless; every other method sends its body,
        // so an empty POST carries `content-length: 0` rather than chunking.
        let bodiless = body.is_empty() && matches!(parts.method, Method::GET | Method::HEAD);
        let mut response = if bodiless {
            self.agent.run(Request::from_parts(parts, ()))?
        } else {
            self.agent.run(Request::from_parts(parts, body))?
        };

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response
            .body_mut()
            .with_config()
            .limit(MAX_BODY_BYTES)
            .read_to_vec()?;

        tracing::debug!(status, bytes = body.len(), "received response");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
