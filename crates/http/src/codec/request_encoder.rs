use bytes::{Bytes, BytesMut};
use tokio_util::codec::Encoder;

use crate::codec::header::{encode_headers, encode_start_line, head_size_hint};
use crate::protocol::{RequestMessage, SendError};

/// Encodes a request as `{method} {path} {version}\r\n`, its headers in set
/// order and the terminating empty line. Requests have no body.
#[derive(Debug, Default, Clone, Copy)]
pub struct RequestEncoder;

impl RequestEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl Encoder<RequestMessage> for RequestEncoder {
    type Error = SendError;

    fn encode(&mut self, item: RequestMessage, dst: &mut BytesMut) -> Result<(), Self::Error> {
        write_request(&item, dst);
        Ok(())
    }
}

/// Encodes `request` into a fresh buffer.
pub fn encode_request(request: &RequestMessage) -> Bytes {
    let mut dst = BytesMut::new();
    write_request(request, &mut dst);
    dst.freeze()
}

fn write_request(request: &RequestMessage, dst: &mut BytesMut) {
    let start_line = [request.method(), request.path(), request.version()];
    dst.reserve(head_size_hint(&start_line, request.headers()));
    encode_start_line(&start_line, dst);
    encode_headers(request.headers(), dst);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode_request;

    #[test]
    fn encode_get() {
        let request = RequestMessage::get("/a.html", "x").with_header("Connection", "close");
        let bytes = encode_request(&request);

        assert_eq!(&bytes[..], b"GET /a.html HTTP/1.0\r\nHost: x\r\nConnection: close\r\n\r\n");
    }

    #[test]
    fn encode_through_encoder_trait() {
        let mut encoder = RequestEncoder::new();
        let mut dst = BytesMut::from(&b"prefix"[..]);

        encoder.encode(RequestMessage::get("/", "example.com"), &mut dst).unwrap();

        assert_eq!(&dst[..], b"prefixGET / HTTP/1.0\r\nHost: example.com\r\n\r\n");
    }

    #[test]
    fn decode_reverses_encode() {
        let request = RequestMessage::new("HEAD", "/dir/file.txt?x=1", "HTTP/1.0")
            .with_header("Host", "localhost:8080")
            .with_header("User-Agent", "plain-http")
            .with_header("Accept", "*/*");

        let decoded = decode_request(&encode_request(&request)).unwrap();
        assert_eq!(decoded, request);
    }
}
