//! Error types for decoding and encoding.
//!
//! ## Error Categories
//!
//! - **I/O Errors**: the wrapped source or sink failed. Fatal: the decoder or
//!   encoder that observed it returns the same error on every later call.
//! - **Short Writes**: the sink accepted fewer bytes than it was given. Fatal
//!   for the encoder.
//! - **Unexpected End**: a document ended inside a section header or right
//!   after a backslash. The streaming [`Decoder`](crate::Decoder) reports
//!   this as [`EndOfStream::Incomplete`](crate::EndOfStream::Incomplete); the
//!   collecting helpers such as [`from_str`](crate::from_str) turn it into an
//!   error.
//!
//! Reaching the end of a well-formed document is never an error.
//!
//! ## Examples
//!
//! ```rust
//! use keyval::{from_str, Error};
//!
//! let result = from_str("[server");
//! assert!(matches!(result, Err(Error::UnexpectedEof { .. })));
//! ```

use std::io;
use std::sync::Arc;
use thiserror::Error;

/// Represents all possible errors of the codec.
///
/// Errors are `Clone` so that a poisoned decoder or encoder can hand out the
/// stored failure again on every call.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The source or sink failed
    #[error("IO error: {0}")]
    Io(Arc<io::Error>),

    /// The sink accepted fewer bytes than requested
    #[error("Write failed: sink accepted {written} of {expected} bytes")]
    ShortWrite { written: usize, expected: usize },

    /// The input ended inside a section header or an escape sequence
    #[error("Unexpected end of input at line {line}, column {col}\nExpected: {expected}")]
    UnexpectedEof {
        line: usize,
        col: usize,
        expected: String,
    },
}

impl Error {
    /// Creates a short write error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keyval::Error;
    ///
    /// let err = Error::short_write(3, 8);
    /// assert!(err.to_string().contains("3 of 8"));
    /// ```
    pub fn short_write(written: usize, expected: usize) -> Self {
        Error::ShortWrite { written, expected }
    }

    /// Creates an unexpected end-of-input error.
    pub fn unexpected_eof(line: usize, col: usize, expected: &str) -> Self {
        Error::UnexpectedEof {
            line,
            col,
            expected: expected.to_string(),
        }
    }

    /// Returns the underlying I/O error kind, if this is an I/O error.
    #[must_use]
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Error::Io(err) => Some(err.kind()),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(Arc::new(err))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
