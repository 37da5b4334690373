//! A static file server and a downloading client built on [`plain_http`].
//!
//! - [`StaticFiles`]: the request handler of `web-server`
//! - [`ServerConfig`]: hostname, port and root directory, validated at startup
//! - [`Target`] and [`download`]: url parsing and the per-url work of `web-client`
//! - [`logging`]: subscriber setup shared by both binaries

mod config;
mod download;
mod static_files;
mod target;

pub mod logging;

pub use config::ConfigError;
pub use config::ServerConfig;
pub use download::DownloadError;
pub use download::download;
pub use download::request_for;
pub use static_files::StaticFiles;
pub use target::Target;
pub use target::TargetError;
