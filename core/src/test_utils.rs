//! In-memory transport for unit tests.

use std::io;
use std::sync::{Arc, Mutex};

use ureq::http::Request;

use crate::error::{ApiError, ApiResult};
use crate::http::HttpResponse;
use crate::transport::Transport;

/// Records every request it is asked to execute and answers with a canned
/// response, or with a connection-refused error when built by `failing`.
pub struct RecordingTransport {
    requests: Mutex<Vec<Request<Vec<u8>>>>,
    response: Option<HttpResponse>,
}

impl RecordingTransport {
    pub fn new(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            response: Some(HttpResponse {
                status,
                headers: vec![("content-type".to_string(), "application/json".to_string())],
                body: body.as_bytes().to_vec(),
            }),
        })
    }

    pub fn ok(body: &str) -> Arc<Self> {
        Self::new(200, body)
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            response: None,
        })
    }

    /// Drains the recorded requests.
    pub fn take(&self) -> Vec<Request<Vec<u8>>> {
        std::mem::take(&mut *self.requests.lock().unwrap())
    }
}

impl Transport for RecordingTransport {
    fn execute(&self, request: Request<Vec<u8>>) -> ApiResult<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        match &self.response {
            Some(response) => Ok(response.clone()),
            None => Err(ApiError::Transport(Box::new(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "connection refused",
            )))),
        }
    }
}
