//! HTTP response message.
//!
//! The body is a raw byte sequence. Its length on the wire is implied either
//! by a `Content-Length` header, which the producer of the response is
//! responsible for setting, or by the connection being closed after it.

use bytes::Bytes;

use crate::protocol::{HTTP_10, HeaderSet};

/// Represents a decoded or to-be-encoded HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseMessage {
    version: String,
    status_code: String,
    headers: HeaderSet,
    body: Bytes,
}

impl ResponseMessage {
    pub fn new(version: impl Into<String>, status_code: impl Into<String>) -> Self {
        Self { version: version.into(), status_code: status_code.into(), headers: HeaderSet::new(), body: Bytes::new() }
    }

    /// Builds an `HTTP/1.0` response with the given status and no headers.
    pub fn with_status(status_code: impl Into<String>) -> Self {
        Self::new(HTTP_10, status_code)
    }

    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.add(name, value);
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_header(name, value);
        self
    }

    /// Replaces the body. `Content-Length` is left untouched.
    pub fn set_body(&mut self, body: impl Into<Bytes>) {
        self.body = body.into();
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.set_body(body);
        self
    }

    /// Sets `Content-Length` to the length of the current body.
    pub fn set_content_length(&mut self) {
        let length = self.body.len().to_string();
        self.headers.add("Content-Length", length);
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn status_code(&self) -> &str {
        &self.status_code
    }

    /// True only for the literal status `200`.
    pub fn is_ok(&self) -> bool {
        self.status_code == "200"
    }

    /// Parsed `Content-Length` header, `None` when absent or not a number.
    pub fn content_length(&self) -> Option<usize> {
        self.headers.get_opt("Content-Length").and_then(|value| value.trim().parse().ok())
    }

    pub fn headers(&self) -> &HeaderSet {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub(crate) fn from_parts(version: String, status_code: String, headers: HeaderSet, body: Bytes) -> Self {
        Self { version, status_code, headers, body }
    }
}
