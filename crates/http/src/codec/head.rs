//! Scanning of the message head.
//!
//! The head is read as a sequence of CRLF-delimited lines starting at offset
//! zero. The first empty line is the header terminator; everything before it
//! belongs to the head and everything after it to the body. A lone `\r` or
//! `\n` inside a line is kept as part of that line.

use crate::protocol::ParseError;

const CRLF: &[u8] = b"\r\n";

/// The non-empty lines preceding the header terminator.
#[derive(Debug)]
pub(crate) struct Head<'a> {
    lines: Vec<&'a [u8]>,
    len: usize,
}

impl<'a> Head<'a> {
    /// Scans `buf` for a complete head. Returns `None` while the terminator is missing.
    pub(crate) fn scan(buf: &'a [u8]) -> Option<Self> {
        let mut lines = Vec::new();
        let mut line_start = 0;

        while let Some(offset) = find_crlf(&buf[line_start..]) {
            let line = &buf[line_start..line_start + offset];
            let next = line_start + offset + CRLF.len();
            if line.is_empty() {
                return Some(Self { lines, len: next });
            }
            lines.push(line);
            line_start = next;
        }

        None
    }

    /// Byte length of the head, terminator included.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Decodes the lines as utf-8 text.
    pub(crate) fn text_lines(&self) -> Result<Vec<&'a str>, ParseError> {
        self.lines.iter().map(|line| std::str::from_utf8(line).map_err(|_e| ParseError::InvalidEncoding)).collect()
    }
}

/// Length of the head if `buf` already contains the header terminator.
pub fn head_length(buf: &[u8]) -> Option<usize> {
    Head::scan(buf).map(|head| head.len())
}

fn find_crlf(buf: &[u8]) -> Option<usize> {
    buf.windows(CRLF.len()).position(|window| window == CRLF)
}
