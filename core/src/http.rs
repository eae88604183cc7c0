//! Request specification and raw response types.
//!
//! # Design
//! `RequestSpec` describes one HTTP call as plain data: method, relative
//! path, headers and an optional pre-serialized body. It is produced by
//! `RequestBuilder` and consumed once by `IrisClient::do_request`, which turns
//! it into a native request. `HttpResponse` is what a `Transport` hands back;
//! the client never inspects it, endpoint methods do.

use std::collections::HashMap;

/// Immutable description of one HTTP call before it becomes a native request.
///
/// `headers` is always present, possibly empty. Header names are stored
/// lowercased so that names differing only in case overwrite each other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestSpec {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: Option<Vec<u8>>,
}

/// Chaining builder for `RequestSpec`.
///
/// Performs no validation: an empty method or path is passed through and
/// rejected, if at all, when the client builds the native request.
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    spec: RequestSpec,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.spec.method = method.into();
        self
    }

    /// Path relative to the client's base URL, e.g. `/api/ping`.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.spec.path = path.into();
        self
    }

    /// Adds a header. Re-adding the same name replaces the earlier value.
    pub fn header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.spec
            .headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    /// Sets an already-serialized body. The builder never serializes.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.spec.body = Some(body.into());
        self
    }

    pub fn build(self) -> RequestSpec {
        self.spec
    }
}

/// A raw HTTP response as returned by a `Transport`.
#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// First header value matching `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
