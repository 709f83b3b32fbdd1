//! Canonical encoding.
//!
//! This module provides the [`Encoder`], which writes a sequence of
//! [`Entry`] records as text that decodes back to the same records.
//!
//! ## Overview
//!
//! - **Minimal headers**: a comment block or section header is written only
//!   when it differs from the one already in effect
//! - **Policy-driven sections**: [`SectionPolicy`](crate::SectionPolicy)
//!   decides how much of each key becomes the section
//! - **Escaping**: structural bytes are escaped per context, and whitespace
//!   at either end of a token is escaped so the decoder does not trim it
//!
//! ## Usage
//!
//! ```rust
//! use keyval::{Encoder, EncoderOptions, Entry};
//!
//! let mut out = Vec::new();
//! let mut encoder = Encoder::with_options(&mut out, EncoderOptions::new().with_max_section_depth(2));
//!
//! for (key, val) in [("host", "example.com"), ("port", "8080")] {
//!     let entry = Entry::new(["server", "http", key], val).with_comment("title");
//!     encoder.write_entry(&entry).unwrap();
//! }
//!
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "# title\n[server.http]\nhost = example.com\nport = 8080\n"
//! );
//! ```

use std::io;

use tracing::{trace, warn};

use crate::chars::{
    CLOSE_SECTION, COMMENT, ESCAPE, KEY_SEPARATOR, NEWLINE, OPEN_SECTION, SPACE, START_VALUE, TAB,
};
use crate::options::EncoderOptions;
use crate::{Entry, Error, Result};

const COMMENT_ESCAPES: &[u8] = &[ESCAPE];
const SECTION_ESCAPES: &[u8] = &[
    ESCAPE,
    KEY_SEPARATOR,
    OPEN_SECTION,
    CLOSE_SECTION,
    COMMENT,
    START_VALUE,
    NEWLINE,
];
const KEY_ESCAPES: &[u8] = SECTION_ESCAPES;
const VALUE_ESCAPES: &[u8] = &[ESCAPE, COMMENT, NEWLINE];
const BOUNDARY_ESCAPES: &[u8] = &[SPACE, TAB];

/// Writes entries to a byte sink.
///
/// The encoder remembers the last comment block and section header it
/// wrote, so a run of entries sharing them produces each header once. The
/// text for one entry is handed to the sink in a single `write` call; if the
/// sink fails or accepts only part of it the encoder keeps the error and
/// returns it from every later call.
pub struct Encoder<W> {
    writer: W,
    options: EncoderOptions,
    started: bool,
    comment: String,
    in_comment: bool,
    section: Vec<String>,
    scratch: Vec<u8>,
    err: Option<Error>,
}

impl<W: io::Write> Encoder<W> {
    pub fn new(writer: W) -> Self {
        Self::with_options(writer, EncoderOptions::default())
    }

    pub fn with_options(writer: W, options: EncoderOptions) -> Self {
        Encoder {
            writer,
            options,
            started: false,
            comment: String::new(),
            in_comment: false,
            section: Vec::new(),
            // Pre-allocate for a typical line
            scratch: Vec::with_capacity(256),
            err: None,
        }
    }

    pub fn options(&self) -> &EncoderOptions {
        &self.options
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Writes one entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] or [`Error::ShortWrite`] when the sink fails,
    /// now or on an earlier call.
    pub fn write_entry(&mut self, entry: &Entry) -> Result<()> {
        if let Some(err) = &self.err {
            return Err(err.clone());
        }

        self.scratch.clear();

        let mut comment_written = false;
        if entry.comment != self.comment {
            if self.started {
                self.scratch.push(NEWLINE);
            }
            write_comment(&mut self.scratch, &entry.comment);
            self.comment.clone_from(&entry.comment);
            self.in_comment = true;
            comment_written = true;
        }

        let (section, key) = self.options.policy.split(&entry.key);

        // A section change with nothing under it would leave an empty header.
        let mut section_written = false;
        if section != self.section.as_slice() && (!key.is_empty() || !entry.val.is_empty()) {
            if self.started && !self.in_comment {
                self.scratch.push(NEWLINE);
            }
            trace!(section = %section.join("."), "writing section header");
            write_section(&mut self.scratch, section);
            self.section = section.to_vec();
            section_written = true;
        }

        let key_written = !key.is_empty();
        if key_written {
            write_path(&mut self.scratch, key, KEY_ESCAPES);
        }

        let val_written = !entry.val.is_empty();
        if val_written {
            if key_written {
                self.scratch.push(SPACE);
            }
            self.scratch.extend_from_slice(&[START_VALUE, SPACE]);
            write_escaped(&mut self.scratch, &entry.val, VALUE_ESCAPES);
        }

        if key_written || val_written {
            self.scratch.push(NEWLINE);
        }

        self.started = self.started || comment_written || section_written || key_written || val_written;
        self.in_comment = self.in_comment && !section_written && !key_written && !val_written;

        self.commit()
    }

    /// Flushes the sink.
    ///
    /// # Errors
    ///
    /// Returns the stored error of a poisoned encoder, or the sink's flush
    /// error, which poisons it.
    pub fn flush(&mut self) -> Result<()> {
        if let Some(err) = &self.err {
            return Err(err.clone());
        }

        self.writer.flush().map_err(|err| self.poison(err.into()))
    }

    fn commit(&mut self) -> Result<()> {
        if self.scratch.is_empty() {
            return Ok(());
        }

        let expected = self.scratch.len();
        loop {
            match self.writer.write(&self.scratch) {
                Ok(n) if n == expected => return Ok(()),
                Ok(n) => return Err(self.poison(Error::short_write(n, expected))),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(self.poison(err.into())),
            }
        }
    }

    fn poison(&mut self, err: Error) -> Error {
        warn!(error = %err, "encoder sink failed");
        self.err = Some(err.clone());
        err
    }
}

fn write_comment(out: &mut Vec<u8>, comment: &str) {
    for line in comment.split('\n') {
        out.push(COMMENT);
        if !line.is_empty() {
            out.push(SPACE);
            write_escaped(out, line, COMMENT_ESCAPES);
        }
        out.push(NEWLINE);
    }
}

fn write_section(out: &mut Vec<u8>, section: &[String]) {
    out.push(OPEN_SECTION);
    write_path(out, section, SECTION_ESCAPES);
    out.push(CLOSE_SECTION);
    out.push(NEWLINE);
}

fn write_path(out: &mut Vec<u8>, path: &[String], escapes: &[u8]) {
    for (i, part) in path.iter().enumerate() {
        if i > 0 {
            out.push(KEY_SEPARATOR);
        }
        write_escaped(out, part, escapes);
    }
}

/// Appends `token`, escaping every byte in `escapes` and any whitespace at
/// either end of the token.
fn write_escaped(out: &mut Vec<u8>, token: &str, escapes: &[u8]) {
    let bytes = token.as_bytes();
    let last = bytes.len().saturating_sub(1);
    for (i, &b) in bytes.iter().enumerate() {
        let boundary = i == 0 || i == last;
        if escapes.contains(&b) || (boundary && BOUNDARY_ESCAPES.contains(&b)) {
            out.push(ESCAPE);
        }
        out.push(b);
    }
}
