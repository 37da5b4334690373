//! Header line decoding and header block encoding.
//!
//! - [`decode_header_line`]: parses one `name: value` line
//! - header block encoding used by the request and response encoders

mod header_decoder;
mod header_encoder;

pub use header_decoder::decode_header_line;
pub(crate) use header_encoder::{encode_headers, encode_start_line, head_size_hint};
