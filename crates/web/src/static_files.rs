//! Serves files below the configured root directory.
//!
//! Every response is `HTTP/1.0` and carries `Connection: close`:
//!
//! | condition                                  | status |
//! |--------------------------------------------|--------|
//! | `Host` is neither `hostname` nor `hostname:port` | `400`  |
//! | method other than `GET` or `HEAD`          | `501`  |
//! | file missing, unreadable or path has `..`  | `404`  |
//! | otherwise                                  | `200`  |

use std::convert::Infallible;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use mime::Mime;
use plain_http::handler::Handler;
use plain_http::protocol::{RequestMessage, ResponseMessage};
use tracing::{debug, warn};

use crate::config::ServerConfig;

const DIRECTORY_INDEX: &str = "index.html";

#[derive(Debug, Clone)]
pub struct StaticFiles {
    config: Arc<ServerConfig>,
}

impl StaticFiles {
    pub fn new(config: Arc<ServerConfig>) -> Self {
        Self { config }
    }

    pub async fn respond(&self, request: &RequestMessage) -> ResponseMessage {
        if !self.config.accepts_host(request.host()) {
            warn!(host = request.host(), expected = self.config.hostname(), "host mismatch");
            return closing("400");
        }

        let head_only = match request.method() {
            "GET" => false,
            "HEAD" => true,
            method => {
                debug!(method, "method not implemented");
                return closing("501");
            }
        };

        let Some(file) = self.locate(request.path()).await else {
            return closing("404");
        };

        match tokio::fs::read(&file).await {
            Ok(contents) => {
                let mut response = ResponseMessage::with_status("200");
                if !head_only {
                    response.set_body(contents);
                }
                response.set_content_length();
                response.add_header("Content-Type", content_type(&file).to_string());
                response.add_header("Connection", "close");
                response
            }
            Err(e) => {
                debug!(file = %file.display(), cause = %e, "can't read file");
                closing("404")
            }
        }
    }

    /// Maps a request path to a file below the root, `None` for paths that
    /// try to leave it.
    async fn locate(&self, path: &str) -> Option<PathBuf> {
        let path = path.split_once('?').map_or(path, |(path, _query)| path);
        if path.split('/').any(|segment| segment == "..") {
            debug!(path, "path leaves the root directory");
            return None;
        }

        let file = self.config.root().join(path.trim_start_matches('/'));
        match tokio::fs::metadata(&file).await {
            Ok(metadata) if metadata.is_dir() => Some(file.join(DIRECTORY_INDEX)),
            _ => Some(file),
        }
    }
}

impl Handler for StaticFiles {
    type Error = Infallible;

    async fn call(&self, req: RequestMessage) -> Result<ResponseMessage, Self::Error> {
        Ok(self.respond(&req).await)
    }
}

fn closing(status_code: &str) -> ResponseMessage {
    ResponseMessage::with_status(status_code).with_header("Connection", "close")
}

fn content_type(file: &Path) -> Mime {
    let extension = file.extension().and_then(|extension| extension.to_str()).map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("html" | "htm") => mime::TEXT_HTML_UTF_8,
        Some("css") => mime::TEXT_CSS_UTF_8,
        Some("js") => mime::APPLICATION_JAVASCRIPT_UTF_8,
        Some("json") => mime::APPLICATION_JSON,
        Some("txt") => mime::TEXT_PLAIN_UTF_8,
        Some("png") => mime::IMAGE_PNG,
        Some("jpg" | "jpeg") => mime::IMAGE_JPEG,
        Some("gif") => mime::IMAGE_GIF,
        Some("svg") => mime::IMAGE_SVG,
        Some("pdf") => mime::APPLICATION_PDF,
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}
