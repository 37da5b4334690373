//! A minimal asynchronous HTTP/1.0 implementation
//!
//! This crate implements the small HTTP/1.0 subset used by a static file
//! server and a downloading client: one request and one response per TCP
//! connection, no keep-alive, no chunked transfer encoding. It is built on
//! tokio and `tokio_util::codec`.
//!
//! # Example
//!
//! ```no_run
//! use std::error::Error;
//! use std::sync::Arc;
//! use tracing::{Level, info};
//! use tracing_subscriber::FmtSubscriber;
//! use plain_http::handler::make_handler;
//! use plain_http::protocol::{RequestMessage, ResponseMessage};
//! use plain_http::server::{Dispatcher, DispatcherConfig, resolve};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn Error>> {
//!     let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
//!     tracing::subscriber::set_global_default(subscriber)?;
//!
//!     let addrs = resolve("localhost", 8080).await?;
//!     let dispatcher = Dispatcher::bind(&addrs, DispatcherConfig::default())?;
//!     dispatcher.run(Arc::new(make_handler(hello_world))).await;
//!     Ok(())
//! }
//!
//! async fn hello_world(request: RequestMessage) -> Result<ResponseMessage, Box<dyn Error + Send + Sync>> {
//!     info!(path = request.path(), "request path");
//!
//!     let mut response = ResponseMessage::with_status("200")
//!         .with_header("Connection", "close")
//!         .with_body("Hello World!\r\n");
//!     response.set_content_length();
//!     Ok(response)
//! }
//! ```
//!
//! # Architecture
//!
//! - [`protocol`]: messages, the ordered [`protocol::HeaderSet`] and error types
//! - [`codec`]: wire encoding and decoding, as plain functions and as
//!   `tokio_util` codecs
//! - [`connection`]: the server worker running one exchange per connection
//! - [`server`]: address resolution and the multi-address dispatch loop
//! - [`client`]: the response receiver with `Content-Length` early completion
//! - [`handler`]: the request handler trait
//!
//! # Wire format
//!
//! ```text
//! GET /index.html HTTP/1.0\r\n        HTTP/1.0 200\r\n
//! Host: localhost:8080\r\n            Content-Length: 5\r\n
//! \r\n                                \r\n
//!                                     hello
//! ```
//!
//! Header names are case sensitive and a repeated name replaces the earlier
//! value in place. A request needs at least one header line.
//!
//! # Limitations
//!
//! - HTTP/1.0 only, without keep-alive or pipelining
//! - No read timeout: a peer that never completes its head holds its worker
//! - Request bodies are ignored

pub mod client;
pub mod codec;
pub mod connection;
pub mod handler;
pub mod protocol;
pub mod server;

mod utils;
pub(crate) use utils::ensure;
