//! HTTP/1.0 codec for encoding and decoding messages
//!
//! # Wire format
//!
//! ```text
//! request:  {METHOD} {PATH} {VERSION}\r\n ({Name}: {Value}\r\n)+ \r\n
//! response: {VERSION} {STATUS}\r\n ({Name}: {Value}\r\n)* \r\n {body}
//! ```
//!
//! The head of a message ends at the first empty line (the header terminator).
//! Requests have no body. A response body is everything after the terminator,
//! its length is given by `Content-Length` when present, otherwise by the
//! connection closing.
//!
//! # Components
//!
//! - [`decode_request`] / [`RequestDecoder`]: request decoding, one shot or streaming
//! - [`decode_response`] / [`ResponseDecoder`]: response decoding with
//!   `Content-Length` aware completion
//! - [`RequestEncoder`] / [`ResponseEncoder`]: `tokio_util` encoders, with
//!   [`encode_request`] and [`encode_response`] as one shot helpers
//! - [`decode_header_line`]: a single `name: value` line
//!
//! # Example
//!
//! ```
//! use plain_http::codec::{decode_response, encode_response};
//! use plain_http::protocol::ResponseMessage;
//!
//! let mut response = ResponseMessage::with_status("200").with_body("hello");
//! response.set_content_length();
//!
//! let wire = encode_response(&response);
//! assert_eq!(&wire[..], b"HTTP/1.0 200\r\nContent-Length: 5\r\n\r\nhello");
//! assert_eq!(decode_response(&wire).unwrap(), response);
//! ```

mod head;
mod header;
mod request_decoder;
mod request_encoder;
mod response_decoder;
mod response_encoder;

pub use head::head_length;
pub use header::decode_header_line;
pub use request_decoder::{RequestDecoder, decode_request};
pub use request_encoder::{RequestEncoder, encode_request};
pub use response_decoder::{ResponseDecoder, decode_response};
pub use response_encoder::{ResponseEncoder, encode_response};
