//! Encoding of the header block shared by requests and responses.

use bytes::{BufMut, BytesMut};

use crate::protocol::HeaderSet;

/// Writes every header as `name: value\r\n` in set order, followed by the
/// terminating empty line.
pub(crate) fn encode_headers(headers: &HeaderSet, dst: &mut BytesMut) {
    for field in headers {
        dst.put_slice(field.name().as_bytes());
        dst.put_slice(b": ");
        dst.put_slice(field.value().as_bytes());
        dst.put_slice(b"\r\n");
    }
    dst.put_slice(b"\r\n");
}

/// Writes a start line made of space separated tokens followed by CRLF.
pub(crate) fn encode_start_line(tokens: &[&str], dst: &mut BytesMut) {
    for (index, token) in tokens.iter().enumerate() {
        if index > 0 {
            dst.put_u8(b' ');
        }
        dst.put_slice(token.as_bytes());
    }
    dst.put_slice(b"\r\n");
}

/// Rough size of the encoded head, used to reserve buffer space up front.
pub(crate) fn head_size_hint(start_line: &[&str], headers: &HeaderSet) -> usize {
    let start: usize = start_line.iter().map(|token| token.len() + 1).sum();
    let fields: usize = headers.iter().map(|field| field.name().len() + field.value().len() + 4).sum();
    start + 2 + fields + 2
}
