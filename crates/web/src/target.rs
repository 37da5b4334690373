use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use url::{Host, Url};

const DEFAULT_SCHEME: &str = "http";
const DEFAULT_FILENAME: &str = "index.html";

#[derive(Error, Debug)]
pub enum TargetError {
    #[error("invalid url {url}: {source}")]
    Invalid { url: String, source: url::ParseError },

    #[error("unsupported scheme {scheme}, only http is supported")]
    UnsupportedScheme { scheme: String },

    #[error("url {url} has no host")]
    MissingHost { url: String },
}

/// Where a download goes: host, port and the request path.
///
/// Accepts `http://host[:port][/path][?query][#fragment]` with the scheme
/// optional. The port defaults to 80 and the path to `/`; the query is kept
/// in the request path and the fragment is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    host: Host,
    port: u16,
    path: String,
    filename: String,
}

impl Target {
    /// Host as it appears in the url, brackets included for IPv6.
    pub fn host(&self) -> String {
        self.host.to_string()
    }

    /// Host in the form a resolver accepts, without IPv6 brackets.
    pub fn connect_host(&self) -> String {
        match &self.host {
            Host::Ipv6(addr) => addr.to_string(),
            host => host.to_string(),
        }
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Path plus query, always starting with `/`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Name the downloaded file is stored under: the last path segment, or
    /// `index.html` when it is empty.
    pub fn filename(&self) -> &str {
        &self.filename
    }
}

impl FromStr for Target {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = if s.contains("://") { s.to_string() } else { format!("{DEFAULT_SCHEME}://{s}") };
        let url = Url::parse(&input).map_err(|source| TargetError::Invalid { url: s.to_string(), source })?;

        if url.scheme() != DEFAULT_SCHEME {
            return Err(TargetError::UnsupportedScheme { scheme: url.scheme().to_string() });
        }

        let host = url.host().ok_or_else(|| TargetError::MissingHost { url: s.to_string() })?.to_owned();
        let port = url.port_or_known_default().unwrap_or(80);

        let mut path = url.path().to_string();
        if let Some(query) = url.query() {
            path.push('?');
            path.push_str(query);
        }

        let filename = url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .filter(|segment| !segment.is_empty())
            .unwrap_or(DEFAULT_FILENAME)
            .to_string();

        Ok(Self { host, port, path, filename })
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "http://{}:{}{}", self.host, self.port, self.path)
    }
}
