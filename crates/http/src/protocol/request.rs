//! HTTP request message.
//!
//! A request is a value object: it is built once by the decoder (server side)
//! or by the client, encoded once, and then dropped. Requests in this protocol
//! subset carry no body.

use crate::protocol::HeaderSet;

/// HTTP/1.0 version token used by every message this crate produces.
pub const HTTP_10: &str = "HTTP/1.0";

/// Represents a decoded or to-be-encoded HTTP request.
///
/// Method, path and version are kept as the raw tokens of the request line,
/// no normalisation or validation is applied to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestMessage {
    method: String,
    path: String,
    version: String,
    headers: HeaderSet,
}

impl RequestMessage {
    pub fn new(method: impl Into<String>, path: impl Into<String>, version: impl Into<String>) -> Self {
        Self { method: method.into(), path: path.into(), version: version.into(), headers: HeaderSet::new() }
    }

    /// Builds a `GET {path} HTTP/1.0` request carrying the `Host` header.
    pub fn get(path: impl Into<String>, host: impl Into<String>) -> Self {
        let mut request = Self::new("GET", path, HTTP_10);
        request.add_header("Host", host);
        request
    }

    /// Adds a header, see [`HeaderSet::add`].
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.add(name, value);
    }

    /// Builder flavoured variant of [`RequestMessage::add_header`].
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_header(name, value);
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the `Host` header, empty when the request has none.
    pub fn host(&self) -> &str {
        self.headers.get("Host")
    }

    pub fn headers(&self) -> &HeaderSet {
        &self.headers
    }

    pub(crate) fn from_parts(method: String, path: String, version: String, headers: HeaderSet) -> Self {
        Self { method, path, version, headers }
    }
}
