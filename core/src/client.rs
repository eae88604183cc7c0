//! Request orchestration for the IRIS API.
//!
//! # Design
//! `IrisClient` owns a base URL, one `AuthStrategy` and one `Transport`, and
//! never changes after construction, so a single instance can be shared
//! across threads. `do_request` does exactly five things in a fixed order:
//! join the URL, build the native request, apply the spec's headers, apply
//! auth, execute. It does not look at the status code or the body.
//!
//! Endpoint methods then follow one convention: anything but 200 is
//! `ApiError::Status` and nothing is decoded; a 200 body is decoded as JSON
//! and a decode failure is `ApiError::Decode`.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use ureq::http::{HeaderName, HeaderValue, Method, Request};
use url::Url;

use crate::auth::{ApiKeyAuth, AuthStrategy};
use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use crate::http::{HttpResponse, RequestSpec};
use crate::transport::{Transport, UreqTransport};

/// Client for one IRIS instance.
#[derive(Clone)]
pub struct IrisClient {
    base_url: String,
    auth: Arc<dyn AuthStrategy>,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for IrisClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IrisClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl IrisClient {
    pub fn new(
        base_url: impl Into<String>,
        auth: impl AuthStrategy + 'static,
        transport: impl Transport + 'static,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            auth: Arc::new(auth),
            transport: Arc::new(transport),
        }
    }

    /// Bearer-token client over a `UreqTransport` built from `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.base_url.clone(),
            ApiKeyAuth::from_secret(config.api_key.clone()),
            UreqTransport::new(config.transport_config()),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Turns `spec` into a native request, authenticates it and executes it.
    ///
    /// The response is returned whatever its status; interpreting it is the
    /// caller's job.
    pub fn do_request(&self, spec: RequestSpec) -> ApiResult<HttpResponse> {
        let url = join_url(&self.base_url, &spec.path)?;

        let method = Method::from_bytes(spec.method.as_bytes())
            .map_err(|_| ApiError::InvalidRequest(format!("invalid method {:?}", spec.method)))?;

        let mut request = Request::builder()
            .method(method)
            .uri(url.as_str())
            .body(spec.body.unwrap_or_default())
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;

        for (name, value) in &spec.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ApiError::InvalidRequest(format!("invalid header name {name:?}")))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|_| ApiError::InvalidRequest(format!("invalid value for header {name:?}")))?;
            request.headers_mut().insert(header_name, header_value);
        }

        // Auth goes last so it always owns its own headers.
        self.auth.authenticate(&mut request);

        tracing::debug!(method = %request.method(), %url, "sending request");
        self.transport.execute(request)
    }

    /// Executes `spec` and decodes a 200 response into `T`.
    pub(crate) fn send<T: DeserializeOwned>(&self, spec: RequestSpec) -> ApiResult<T> {
        decode(self.do_request(spec)?)
    }

    /// Executes `spec` and only checks for a 200 response.
    pub(crate) fn send_expecting_ok(&self, spec: RequestSpec) -> ApiResult<()> {
        let response = self.do_request(spec)?;
        check_status(&response)
    }
}

/// Fails with `ApiError::Status` unless the response status is 200.
pub fn check_status(response: &HttpResponse) -> ApiResult<()> {
    if response.status == 200 {
        return Ok(());
    }
    tracing::warn!(status = response.status, "unexpected status code");
    Err(ApiError::Status {
        status: response.status,
    })
}

/// Status-checks `response`, then decodes its body as JSON.
///
/// The body is never touched when the status check fails.
pub fn decode<T: DeserializeOwned>(response: HttpResponse) -> ApiResult<T> {
    check_status(&response)?;
    serde_json::from_slice(&response.body).map_err(ApiError::Decode)
}

pub(crate) fn to_json_body<T: Serialize + ?Sized>(value: &T) -> ApiResult<Vec<u8>> {
    serde_json::to_vec(value).map_err(ApiError::Serialization)
}

/// Joins `path` onto `base`, tolerating a trailing separator on the base and
/// a leading one on the path. `path` is always treated as a path, even when
/// its first segment contains `:`. The result must stay under `base`, and a
/// base carrying a query or fragment is rejected rather than silently dropped.
pub fn join_url(base: &str, path: &str) -> ApiResult<Url> {
    let mut base_url = Url::parse(base).map_err(|e| ApiError::url(base, e))?;
    if base_url.cannot_be_a_base() {
        return Err(ApiError::url(base, "cannot be used as a base URL"));
    }
    if base_url.query().is_some() || base_url.fragment().is_some() {
        return Err(ApiError::url(base, "base URL must not have a query or fragment"));
    }
    if !base_url.path().ends_with('/') {
        let dir = format!("{}/", base_url.path());
        base_url.set_path(&dir);
    }

    let joined = base_url
        .join(&format!("./{}", path.trim_start_matches('/')))
        .map_err(|e| ApiError::url(path, e))?;

    if joined.origin() != base_url.origin() || !joined.path().starts_with(base_url.path()) {
        return Err(ApiError::url(path, "escapes the base URL"));
    }
    Ok(joined)
}
