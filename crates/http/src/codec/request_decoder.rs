//! HTTP request decoder
//!
//! Requests are decoded in one step once the whole head is available: the
//! request line is split into method, path and version, and every following
//! line up to the header terminator is parsed as a header. Requests carry no
//! body, bytes after the terminator are left in the buffer untouched.
//!
//! # Example
//!
//! ```
//! use plain_http::codec::RequestDecoder;
//! use tokio_util::codec::Decoder;
//! use bytes::BytesMut;
//!
//! let mut decoder = RequestDecoder::new();
//! let mut buffer = BytesMut::from(&b"GET /a.html HTTP/1.0\r\nHost: x\r\n"[..]);
//! assert!(decoder.decode(&mut buffer).unwrap().is_none());
//!
//! buffer.extend_from_slice(b"\r\n");
//! let request = decoder.decode(&mut buffer).unwrap().unwrap();
//! assert_eq!(request.path(), "/a.html");
//! ```

use bytes::{Buf, BytesMut};
use tokio_util::codec::Decoder;
use tracing::trace;

use crate::codec::head::Head;
use crate::codec::header::decode_header_line;
use crate::ensure;
use crate::protocol::{HeaderSet, ParseError, RequestMessage};

/// Request line plus at least one header line.
const MIN_REQUEST_LINES: usize = 2;

const REQUEST_LINE_TOKENS: usize = 3;

/// Decodes a complete request from `buf`.
///
/// # Errors
///
/// Returns [`ParseError`] if:
/// - no header terminator is present
/// - fewer than two lines precede the terminator
/// - the request line does not split into exactly three tokens
/// - a header line has no `:` or the head is not utf-8
pub fn decode_request(buf: &[u8]) -> Result<RequestMessage, ParseError> {
    let head = Head::scan(buf).ok_or(ParseError::MissingTerminator)?;
    parse_head(&head)
}

fn parse_head(head: &Head<'_>) -> Result<RequestMessage, ParseError> {
    ensure!(head.line_count() >= MIN_REQUEST_LINES, ParseError::too_few_lines(MIN_REQUEST_LINES, head.line_count()));

    let lines = head.text_lines()?;
    let tokens: Vec<&str> = lines[0].split(' ').collect();
    ensure!(tokens.len() == REQUEST_LINE_TOKENS, ParseError::InvalidRequestLine { found: tokens.len() });

    let mut headers = HeaderSet::new();
    for line in &lines[1..] {
        headers.insert(decode_header_line(line)?);
    }

    trace!(head_size = head.len(), header_count = headers.len(), "decoded request head");
    Ok(RequestMessage::from_parts(tokens[0].to_string(), tokens[1].to_string(), tokens[2].to_string(), headers))
}

/// A streaming decoder for HTTP requests.
///
/// `decode` returns `Ok(None)` until the header terminator has arrived, looking
/// at the whole accumulated buffer each time so a terminator split across two
/// reads is still found. On success the head is consumed from the buffer.
#[derive(Debug, Default, Clone, Copy)]
pub struct RequestDecoder;

impl RequestDecoder {
    /// Creates a new `RequestDecoder` instance
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for RequestDecoder {
    type Item = RequestMessage;
    type Error = ParseError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let (request, head_len) = match Head::scan(src) {
            Some(head) => (parse_head(&head)?, head.len()),
            None => return Ok(None),
        };

        src.advance(head_len);
        Ok(Some(request))
    }

    /// Called once the peer has closed its side. Whatever has accumulated is
    /// all there will ever be, so a missing terminator is an error, even for an
    /// empty buffer.
    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(src)? {
            Some(request) => Ok(Some(request)),
            None => Err(ParseError::MissingTerminator),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn crlf(text: &str) -> String {
        text.replace('\n', "\r\n")
    }

    #[test]
    fn decode_simple_get() {
        let request = decode_request(b"GET /a.html HTTP/1.0\r\nHost: x\r\n\r\n").unwrap();

        assert_eq!(request.method(), "GET");
        assert_eq!(request.path(), "/a.html");
        assert_eq!(request.version(), "HTTP/1.0");
        assert_eq!(request.headers().len(), 1);
        assert_eq!(request.headers().get("Host"), "x");
    }

    #[test]
    fn from_curl() {
        let wire = crlf(indoc! {r##"
        GET /index.html HTTP/1.0
        Host: 127.0.0.1:8080
        User-Agent: curl/7.79.1
        Accept: */*

        "##});

        let request = decode_request(wire.as_bytes()).unwrap();

        assert_eq!(request.method(), "GET");
        assert_eq!(request.path(), "/index.html");
        assert_eq!(request.host(), "127.0.0.1:8080");

        let lines: Vec<String> = request.headers().lines().collect();
        assert_eq!(lines, vec!["Host: 127.0.0.1:8080", "User-Agent: curl/7.79.1", "Accept: */*"]);
    }

    #[test]
    fn repeated_header_keeps_last_value_at_first_position() {
        let request = decode_request(b"GET / HTTP/1.0\r\nA: 1\r\nB: 2\r\nA: 3\r\n\r\n").unwrap();

        let lines: Vec<String> = request.headers().lines().collect();
        assert_eq!(lines, vec!["A: 3", "B: 2"]);
    }

    #[test]
    fn bytes_after_terminator_are_ignored() {
        let request = decode_request(b"POST /form HTTP/1.0\r\nHost: x\r\n\r\nname=value").unwrap();
        assert_eq!(request.method(), "POST");
        assert_eq!(request.headers().len(), 1);
    }

    #[test]
    fn rejects_missing_terminator() {
        let result = decode_request(b"GET / HTTP/1.0\r\nHost: x\r\n");
        assert!(matches!(result, Err(ParseError::MissingTerminator)));
    }

    #[test]
    fn rejects_wrong_token_count() {
        let two = decode_request(b"GET /\r\nHost: x\r\n\r\n");
        assert!(matches!(two, Err(ParseError::InvalidRequestLine { found: 2 })));

        let four = decode_request(b"GET / HTTP/1.0 extra\r\nHost: x\r\n\r\n");
        assert!(matches!(four, Err(ParseError::InvalidRequestLine { found: 4 })));

        // a double space produces an empty token
        let doubled = decode_request(b"GET  / HTTP/1.0\r\nHost: x\r\n\r\n");
        assert!(matches!(doubled, Err(ParseError::InvalidRequestLine { found: 4 })));
    }

    #[test]
    fn rejects_request_without_headers() {
        let result = decode_request(b"GET / HTTP/1.0\r\n\r\n");
        assert!(matches!(result, Err(ParseError::TooFewLines { expected: 2, found: 1 })));
    }

    #[test]
    fn rejects_header_without_colon() {
        let result = decode_request(b"GET / HTTP/1.0\r\nHost x\r\n\r\n");
        assert!(matches!(result, Err(ParseError::InvalidHeader { .. })));
    }

    #[test]
    fn streaming_decode_waits_for_terminator_across_reads() {
        let mut decoder = RequestDecoder::new();
        let mut buf = BytesMut::from(&b"GET / HTTP/1.0\r\nHost: x\r\n\r"[..]);

        assert!(decoder.decode(&mut buf).unwrap().is_none());
        assert_eq!(buf.len(), 26);

        buf.extend_from_slice(b"\nleftover");
        let request = decoder.decode(&mut buf).unwrap().unwrap();

        assert_eq!(request.path(), "/");
        assert_eq!(&buf[..], b"leftover");
    }

    #[test]
    fn decode_eof_without_terminator_is_malformed() {
        let mut decoder = RequestDecoder::new();

        let mut empty = BytesMut::new();
        assert!(matches!(decoder.decode_eof(&mut empty), Err(ParseError::MissingTerminator)));

        let mut partial = BytesMut::from(&b"GET / HTTP/1.0\r\n"[..]);
        assert!(matches!(decoder.decode_eof(&mut partial), Err(ParseError::MissingTerminator)));
    }
}
