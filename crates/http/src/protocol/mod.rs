//! Protocol types shared by the codec, the server and the client.
//!
//! - [`HeaderSet`] / [`HeaderField`]: ordered, name-unique headers
//! - [`RequestMessage`]: request line plus headers, no body
//! - [`ResponseMessage`]: status line, headers and a raw body
//! - [`ParseError`], [`SendError`], [`HttpError`]: error taxonomy
//!
//! All messages are plain values: they hold owned strings and a [`bytes::Bytes`]
//! body and are never shared between connections.

mod header;
pub use header::HeaderField;
pub use header::HeaderSet;

mod request;
pub use request::HTTP_10;
pub use request::RequestMessage;

mod response;
pub use response::ResponseMessage;

mod error;
pub use error::HttpError;
pub use error::ParseError;
pub use error::SendError;
