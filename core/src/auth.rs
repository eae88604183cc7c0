//! Pluggable authentication for outgoing requests.
//!
//! # Design
//! An `AuthStrategy` mutates a native request in place and cannot fail from
//! the caller's point of view. The client applies it after the explicit
//! headers from the `RequestSpec`, so a strategy always owns its header(s).

use secrecy::{ExposeSecret, SecretString};
use ureq::http::header::AUTHORIZATION;
use ureq::http::{HeaderValue, Request};

/// Attaches credential material to a request.
pub trait AuthStrategy: Send + Sync {
    fn authenticate(&self, request: &mut Request<Vec<u8>>);
}

/// Bearer-token authentication using an IRIS API key.
#[derive(Debug, Clone)]
pub struct ApiKeyAuth {
    api_key: SecretString,
}

impl ApiKeyAuth {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
        }
    }

    pub fn from_secret(api_key: SecretString) -> Self {
        Self { api_key }
    }
}

impl AuthStrategy for ApiKeyAuth {
    fn authenticate(&self, request: &mut Request<Vec<u8>>) {
        let headers = request.headers_mut();
        match HeaderValue::from_str(&format!("Bearer {}", self.api_key.expose_secret())) {
            Ok(mut value) => {
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
            Err(_) => {
                // Never forward a caller-supplied Authorization in place of ours.
                tracing::warn!("API key is not a valid header value; sending request without Authorization");
                headers.remove(AUTHORIZATION);
            }
        }
    }
}
