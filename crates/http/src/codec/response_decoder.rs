//! HTTP response decoder
//!
//! A response body runs either for `Content-Length` bytes or until the
//! connection closes. [`ResponseDecoder`] tracks both cases on an accumulating
//! buffer:
//!
//! 1. While the head is incomplete the whole buffer is rescanned for the
//!    header terminator on every call.
//! 2. Once the terminator is found the head is decoded a first time, only to
//!    learn the `Content-Length`. A failure at this point is logged and the
//!    decoder keeps collecting data.
//! 3. With a known length the response completes as soon as the buffer holds
//!    `head length + body length` bytes. Without one it completes at EOF.
//!
//! The final decode always runs over the whole buffer, so the body is every
//! byte after the terminator.

use bytes::{Bytes, BytesMut};
use tokio_util::codec::Decoder;
use tracing::{debug, warn};

use crate::codec::head::Head;
use crate::codec::header::decode_header_line;
use crate::ensure;
use crate::protocol::{HeaderSet, ParseError, ResponseMessage};

const MIN_STATUS_LINE_TOKENS: usize = 2;

/// Decodes a complete response from `buf`, the body being everything after
/// the header terminator.
///
/// # Errors
///
/// Returns [`ParseError`] if:
/// - no header terminator is present
/// - no line precedes the terminator
/// - the status line has fewer than two tokens
/// - a header line has no `:` or the head is not utf-8
pub fn decode_response(buf: &[u8]) -> Result<ResponseMessage, ParseError> {
    let head = Head::scan(buf).ok_or(ParseError::MissingTerminator)?;
    ensure!(head.line_count() >= 1, ParseError::too_few_lines(1, 0));

    let lines = head.text_lines()?;
    let tokens: Vec<&str> = lines[0].split(' ').collect();
    ensure!(tokens.len() >= MIN_STATUS_LINE_TOKENS, ParseError::InvalidStatusLine { found: tokens.len() });

    let mut headers = HeaderSet::new();
    for line in &lines[1..] {
        headers.insert(decode_header_line(line)?);
    }

    let body = Bytes::copy_from_slice(&buf[head.len()..]);
    Ok(ResponseMessage::from_parts(tokens[0].to_string(), tokens[1].to_string(), headers, body))
}

/// A streaming decoder for HTTP responses with early completion through
/// `Content-Length`.
#[derive(Debug, Default, Clone)]
pub struct ResponseDecoder {
    head_len: Option<usize>,
    body_len: Option<usize>,
}

impl ResponseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Length of the head once the terminator has been seen.
    pub fn head_len(&self) -> Option<usize> {
        self.head_len
    }

    /// Body length announced by `Content-Length`, if any.
    pub fn body_len(&self) -> Option<usize> {
        self.body_len
    }

    /// Total number of bytes the response is expected to span, `None` while
    /// unknown.
    pub fn expected_len(&self) -> Option<usize> {
        self.head_len?.checked_add(self.body_len?)
    }

    fn locate_head(&mut self, src: &[u8]) {
        if self.head_len.is_some() {
            return;
        }

        let Some(head) = Head::scan(src) else {
            return;
        };
        self.head_len = Some(head.len());

        match decode_response(src) {
            Ok(partial) => {
                if let Some(value) = partial.headers().get_opt("Content-Length") {
                    match value.parse::<usize>() {
                        Ok(length) if head.len().checked_add(length).is_some() => self.body_len = Some(length),
                        Ok(length) => warn!(length, "Content-Length out of range, reading until close"),
                        Err(e) => warn!(value, cause = %e, "can't parse Content-Length, reading until close"),
                    }
                }
            }
            Err(e) => warn!(cause = %e, "can't decode response head, reading until close"),
        }

        debug!(head_len = ?self.head_len, body_len = ?self.body_len, "located response head");
    }
}

impl Decoder for ResponseDecoder {
    type Item = ResponseMessage;
    type Error = ParseError;

    /// Returns the response once `Content-Length` framing says it is complete,
    /// `Ok(None)` otherwise.
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        self.locate_head(src);

        match self.expected_len() {
            Some(expected) if src.len() >= expected => {
                let wire = src.split();
                decode_response(&wire).map(Some)
            }
            _ => Ok(None),
        }
    }

    /// The connection is closed: decode whatever has been received.
    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(response) = self.decode(src)? {
            return Ok(Some(response));
        }

        if let Some(expected) = self.expected_len() {
            warn!(received = src.len(), expected, "connection closed before the full message was received");
        }

        let wire = src.split();
        decode_response(&wire).map(Some)
    }
}
