use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Read-only settings of the static file server, fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    hostname: String,
    port: u16,
    root: PathBuf,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("root directory {} does not exist: {source}", root.display())]
    RootMissing { root: PathBuf, source: io::Error },

    #[error("root {} is not a directory", root.display())]
    RootNotDirectory { root: PathBuf },
}

impl ServerConfig {
    /// Validates `root` and builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `root` is missing or not a directory.
    pub fn new(hostname: impl Into<String>, port: u16, root: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let root = root.into();
        let metadata = std::fs::metadata(&root).map_err(|source| ConfigError::RootMissing { root: root.clone(), source })?;
        if !metadata.is_dir() {
            return Err(ConfigError::RootNotDirectory { root });
        }

        Ok(Self { hostname: hostname.into(), port, root })
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// True if a `Host` header value names this server, with or without the
    /// port.
    pub fn accepts_host(&self, host: &str) -> bool {
        match host.strip_prefix(self.hostname.as_str()) {
            Some("") => true,
            Some(rest) => rest.strip_prefix(':').is_some_and(|port| port == self.port.to_string()),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_must_be_an_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ServerConfig::new("localhost", 8080, dir.path()).is_ok());

        let missing = dir.path().join("missing");
        assert!(matches!(ServerConfig::new("localhost", 8080, missing), Err(ConfigError::RootMissing { .. })));

        let file = dir.path().join("file.txt");
        std::fs::write(&file, b"x").unwrap();
        assert!(matches!(ServerConfig::new("localhost", 8080, file), Err(ConfigError::RootNotDirectory { .. })));
    }

    #[test]
    fn host_matches_with_or_without_port() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig::new("localhost", 8080, dir.path()).unwrap();

        assert!(config.accepts_host("localhost"));
        assert!(config.accepts_host("localhost:8080"));
        assert!(!config.accepts_host("localhost:8081"));
        assert!(!config.accepts_host("localhost:"));
        assert!(!config.accepts_host("localhostx"));
        assert!(!config.accepts_host("example.com"));
        assert!(!config.accepts_host(""));
    }
}
