//! Streaming decoding.
//!
//! This module provides the [`Decoder`], which pulls bytes from any
//! [`io::Read`] in fixed-size chunks and hands out one [`Entry`] per call.
//!
//! ## Overview
//!
//! - **Chunk independence**: tokens, escapes and lines may straddle reads
//! - **Sticky headers**: comments and sections apply to every following entry
//! - **Explicit termination**: the end of input is an ordinary return value
//!   that tells a clean end apart from a truncated document
//!
//! ## Usage
//!
//! ```rust
//! use keyval::{Decoder, EndOfStream, Step};
//!
//! let input = b"# title\n\n[server.http]\nhost = example.com\nport = 8080\n";
//! let mut decoder = Decoder::new(&input[..]);
//! let mut keys = Vec::new();
//!
//! loop {
//!     match decoder.next_entry().unwrap() {
//!         Step::Entry(entry) => keys.push(entry.path()),
//!         Step::End { last, end } => {
//!             keys.extend(last.map(|e| e.path()));
//!             assert_eq!(end, EndOfStream::Clean);
//!             break;
//!         }
//!         Step::Pending => continue,
//!     }
//! }
//!
//! assert_eq!(keys, ["server.http.host", "server.http.port"]);
//! ```
//!
//! For input that is already in memory, [`from_str`](crate::from_str) and
//! [`from_slice`](crate::from_slice) collect every entry in one call.

pub mod builder;

use std::io;

use tracing::{debug, warn};

use crate::options::{DecoderOptions, MAX_BUFFER_SIZE};
use crate::{Entry, Error, Result};

pub use builder::{EntryBuilder, Position};

/// How the input ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndOfStream {
    /// All headers and escapes were terminated.
    Clean,
    /// The input stopped inside a `[` section header or right after a `\`.
    Incomplete,
}

/// The outcome of one [`Decoder::next_entry`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// A completed record; more may follow.
    Entry(Entry),
    /// The source is exhausted. `last` holds the record that was still open
    /// when the input ended, and must not be dropped.
    End {
        last: Option<Entry>,
        end: EndOfStream,
    },
    /// The source has no data right now (`WouldBlock`). Call again later.
    Pending,
}

#[derive(Debug)]
enum Status {
    Open,
    Ended,
    Failed(Error),
}

/// Pull-based decoder over a byte source.
///
/// Reads `buffer_size` bytes at a time (256 KiB by default). Queued records
/// are always handed out before more input is read. The decoder is bound to
/// one source for its lifetime; after a source error it returns that same
/// error from every call.
pub struct Decoder<R> {
    reader: R,
    buffer: Vec<u8>,
    buffer_size: usize,
    builder: EntryBuilder,
    status: Status,
}

impl<R: io::Read> Decoder<R> {
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, DecoderOptions::default())
    }

    pub fn with_options(reader: R, options: DecoderOptions) -> Self {
        Decoder {
            reader,
            buffer: Vec::new(),
            buffer_size: options.buffer_size,
            builder: EntryBuilder::new(),
            status: Status::Open,
        }
    }

    /// Changes the read size. Takes effect on the next read, clamped to
    /// `1..=MAX_BUFFER_SIZE`.
    pub fn set_buffer_size(&mut self, buffer_size: usize) {
        self.buffer_size = buffer_size;
    }

    #[must_use]
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Position of the next unread byte in the source.
    #[must_use]
    pub fn position(&self) -> Position {
        self.builder.position()
    }

    /// What the input was missing when it ended, if it was incomplete.
    #[must_use]
    pub fn expecting(&self) -> Option<&'static str> {
        self.builder.expecting()
    }

    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Returns the next record or the end of input.
    ///
    /// `ErrorKind::Interrupted` reads are retried, `ErrorKind::WouldBlock`
    /// yields [`Step::Pending`]. Any other read error is fatal.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when the source fails, now or on an earlier call.
    pub fn next_entry(&mut self) -> Result<Step> {
        if let Some(entry) = self.builder.pop() {
            return Ok(Step::Entry(entry));
        }

        match &self.status {
            Status::Failed(err) => return Err(err.clone()),
            Status::Ended => return Ok(self.end()),
            Status::Open => {}
        }

        self.ensure_buffer();

        loop {
            let n = match self.reader.read(&mut self.buffer) {
                Ok(0) => {
                    self.status = Status::Ended;
                    return Ok(self.end());
                }
                Ok(n) => n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == io::ErrorKind::WouldBlock => return Ok(Step::Pending),
                Err(err) => {
                    let err = Error::from(err);
                    warn!(error = %err, "decoder source failed");
                    self.status = Status::Failed(err.clone());
                    return Err(err);
                }
            };

            self.builder.feed(&self.buffer[..n]);

            if let Some(entry) = self.builder.pop() {
                return Ok(Step::Entry(entry));
            }
        }
    }

    fn ensure_buffer(&mut self) {
        let size = self.buffer_size.clamp(1, MAX_BUFFER_SIZE);
        if self.buffer.len() != size {
            debug!(size, "allocating read buffer");
            self.buffer = vec![0; size];
        }
    }

    fn end(&mut self) -> Step {
        let end = self.builder.finish();
        let last = self.builder.pop();
        let position = self.builder.position();
        debug!(
            ?end,
            line = position.line,
            col = position.col,
            last = last.is_some(),
            "end of input"
        );
        Step::End { last, end }
    }
}
