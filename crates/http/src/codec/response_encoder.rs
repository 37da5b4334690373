use bytes::{BufMut, Bytes, BytesMut};
use tokio_util::codec::Encoder;

use crate::codec::header::{encode_headers, encode_start_line, head_size_hint};
use crate::protocol::{ResponseMessage, SendError};

/// Encodes a response as `{version} {status}\r\n`, its headers, the empty line
/// and the raw body.
///
/// The encoder writes the headers exactly as they are: it neither computes nor
/// checks `Content-Length`. Producers that want length framing must set it
/// before encoding, see [`ResponseMessage::set_content_length`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ResponseEncoder;

impl ResponseEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl Encoder<ResponseMessage> for ResponseEncoder {
    type Error = SendError;

    fn encode(&mut self, item: ResponseMessage, dst: &mut BytesMut) -> Result<(), Self::Error> {
        write_response(&item, dst);
        Ok(())
    }
}

/// Encodes `response` into a fresh buffer.
pub fn encode_response(response: &ResponseMessage) -> Bytes {
    let mut dst = BytesMut::new();
    write_response(response, &mut dst);
    dst.freeze()
}

fn write_response(response: &ResponseMessage, dst: &mut BytesMut) {
    let start_line = [response.version(), response.status_code()];
    dst.reserve(head_size_hint(&start_line, response.headers()) + response.body().len());
    encode_start_line(&start_line, dst);
    encode_headers(response.headers(), dst);
    dst.put_slice(response.body());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode_response;

    #[test]
    fn encode_bare_status() {
        let bytes = encode_response(&ResponseMessage::with_status("400"));
        assert_eq!(&bytes[..], b"HTTP/1.0 400\r\n\r\n");
    }

    #[test]
    fn encode_with_body() {
        let mut response = ResponseMessage::with_status("200").with_body(&b"hello"[..]);
        response.set_content_length();
        response.add_header("Connection", "close");

        let bytes = encode_response(&response);
        assert_eq!(&bytes[..], b"HTTP/1.0 200\r\nContent-Length: 5\r\nConnection: close\r\n\r\nhello");
    }

    #[test]
    fn content_length_is_not_enforced() {
        let response = ResponseMessage::with_status("200").with_header("Content-Length", "99").with_body(&b"abc"[..]);
        let bytes = encode_response(&response);
        assert_eq!(&bytes[..], b"HTTP/1.0 200\r\nContent-Length: 99\r\n\r\nabc");
    }

    #[test]
    fn decode_reverses_encode() {
        let mut response = ResponseMessage::new("HTTP/1.0", "404")
            .with_header("Connection", "close")
            .with_body(Bytes::from_static(b"\x00\x01binary\xfe\xff"));
        response.set_content_length();

        let decoded = decode_response(&encode_response(&response)).unwrap();
        assert_eq!(decoded, response);
    }
}
