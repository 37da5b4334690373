//! Decoding of a single header line.
//!
//! A header line is split on its first `:`. The name is the text before it and
//! the value the text after it, both trimmed of surrounding whitespace. Since
//! only the first `:` splits, values such as `Host: example.com:8080` keep their
//! own colons.
//!
//! A line without any `:` is rejected: it has no name/value boundary and is
//! treated as a malformed message rather than guessed into a header.

use crate::protocol::{HeaderField, ParseError};

/// Parses `name: value` into a [`HeaderField`].
///
/// # Errors
///
/// Returns [`ParseError::InvalidHeader`] if the line contains no `:`.
pub fn decode_header_line(line: &str) -> Result<HeaderField, ParseError> {
    let (name, value) =
        line.split_once(':').ok_or_else(|| ParseError::invalid_header(format!("missing ':' in header line {line:?}")))?;

    Ok(HeaderField::new(name.trim(), value.trim()))
}
