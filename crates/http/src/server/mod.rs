//! Listening side of the server.
//!
//! [`resolve`] turns a hostname and port into local addresses, and
//! [`Dispatcher`] listens on all of them, spawning one
//! [`HttpConnection`](crate::connection::HttpConnection) worker per accepted
//! connection.
//!
//! ```no_run
//! use std::convert::Infallible;
//! use std::sync::Arc;
//! use plain_http::handler::make_handler;
//! use plain_http::protocol::{RequestMessage, ResponseMessage};
//! use plain_http::server::{Dispatcher, DispatcherConfig, resolve};
//!
//! async fn hello(_request: RequestMessage) -> Result<ResponseMessage, Infallible> {
//!     Ok(ResponseMessage::with_status("200").with_body("hello"))
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let addrs = resolve("localhost", 8080).await?;
//!     let dispatcher = Dispatcher::bind(&addrs, DispatcherConfig::default())?;
//!     dispatcher.run(Arc::new(make_handler(hello))).await;
//!     Ok(())
//! }
//! ```

mod dispatcher;
mod error;

pub use dispatcher::Dispatcher;
pub use dispatcher::DispatcherConfig;
pub use dispatcher::resolve;
pub use error::ServerError;
