//! Server side connection handling
//!
//! This module provides the per-connection worker of the server. Each
//! accepted socket is driven by one [`HttpConnection`], which performs exactly
//! one request/response exchange and then closes the connection.
//!
//! # Components
//!
//! - [`HttpConnection`]: connection worker that:
//!   - accumulates reads of [`READ_CHUNK_SIZE`] bytes until the head is complete
//!   - answers malformed requests with `400`
//!   - delegates valid requests to a [`Handler`](crate::handler::Handler)
//!   - writes the response and shuts the socket down

mod http_connection;

pub use http_connection::HttpConnection;
pub use http_connection::READ_CHUNK_SIZE;
