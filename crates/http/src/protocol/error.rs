use std::io;
use thiserror::Error;

/// Failure of a single connection, either on the server worker or on the
/// client receiver.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("malformed message: {source}")]
    Malformed {
        #[from]
        source: ParseError,
    },

    #[error("send error: {source}")]
    Send {
        #[from]
        source: SendError,
    },

    #[error("connection fault: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl HttpError {
    /// Returns true if the failure comes from bytes violating the wire format.
    pub fn is_malformed(&self) -> bool {
        matches!(self, HttpError::Malformed { source } if !source.is_io())
    }
}

/// Wire bytes violate the terminator, line count or token count contracts.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("no empty line terminates the header block")]
    MissingTerminator,

    #[error("header block has {found} line(s), at least {expected} required")]
    TooFewLines { expected: usize, found: usize },

    #[error("request line must have 3 tokens, found {found}")]
    InvalidRequestLine { found: usize },

    #[error("status line must have at least 2 tokens, found {found}")]
    InvalidStatusLine { found: usize },

    #[error("invalid header: {reason}")]
    InvalidHeader { reason: String },

    #[error("header block is not valid utf-8")]
    InvalidEncoding,

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl ParseError {
    pub fn too_few_lines(expected: usize, found: usize) -> Self {
        Self::TooFewLines { expected, found }
    }

    pub fn invalid_header<S: ToString>(str: S) -> Self {
        Self::InvalidHeader { reason: str.to_string() }
    }

    pub fn is_io(&self) -> bool {
        matches!(self, ParseError::Io { .. })
    }
}

#[derive(Error, Debug)]
pub enum SendError {
    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}
