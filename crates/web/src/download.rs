use std::io;
use std::path::{Path, PathBuf};

use plain_http::client::fetch;
use plain_http::protocol::{HttpError, RequestMessage};
use thiserror::Error;
use tracing::info;

use crate::target::{Target, TargetError};

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error(transparent)]
    Target(#[from] TargetError),

    #[error("request to {target} failed: {source}")]
    Http { target: String, source: HttpError },

    #[error("request to {target} unsuccessful, status code {status}")]
    Status { target: String, status: String },

    #[error("can't write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Builds the request sent for `target`.
pub fn request_for(target: &Target) -> RequestMessage {
    RequestMessage::get(target.path(), target.host()).with_header("Connection", "close")
}

/// Downloads `url` over a fresh connection and stores the body in
/// `output_dir`. Only a `200` response is written.
///
/// # Errors
///
/// Returns [`DownloadError`] for an invalid url, a failed exchange, a non
/// `200` status or a failed write.
pub async fn download(url: &str, output_dir: &Path) -> Result<PathBuf, DownloadError> {
    let target: Target = url.parse()?;

    info!(path = target.path(), host = %target.host(), port = target.port(), "sending request");
    let download = fetch((target.connect_host(), target.port()), request_for(&target))
        .await
        .map_err(|source| DownloadError::Http { target: target.to_string(), source })?;

    if !download.is_success() {
        let status = download.response().status_code().to_string();
        return Err(DownloadError::Status { target: target.to_string(), status });
    }

    let path = output_dir.join(target.filename());
    tokio::fs::write(&path, download.response().body())
        .await
        .map_err(|source| DownloadError::Write { path: path.clone(), source })?;

    info!(file = %path.display(), bytes = download.response().body().len(), "download finished");
    Ok(path)
}
