//! # keyval
//!
//! A streaming codec for a sectioned key/value text format.
//!
//! ## The Format
//!
//! An INI-like language with dotted sections, dotted keys and comments that
//! stay in effect until replaced:
//!
//! ```text
//! # title
//!
//! [server.http]
//! host = example.com
//! port = 8080
//! ```
//!
//! Every key line becomes one [`Entry`] whose key is the active section path
//! followed by the line's own key path, and whose comment is the comment
//! block in effect. The document above decodes to
//! `server.http.host = example.com` and `server.http.port = 8080`, both
//! carrying the comment `title`. See [`format`] for the full grammar.
//!
//! ## Key Features
//!
//! - **Streaming**: [`Decoder`] reads any [`io::Read`] in chunks of a chosen
//!   size; tokens and escapes may be split across reads at any byte
//! - **Lossless**: [`Encoder`] escapes structural bytes and token-edge
//!   whitespace, so `decode(encode(entries)) == entries`
//! - **Minimal output**: comment blocks and section headers are written only
//!   when they change
//! - **Explicit termination**: a truncated document (open `[` or trailing
//!   `\`) is reported as [`EndOfStream::Incomplete`], separately from a clean
//!   end, and the last record is delivered either way
//!
//! ## Quick Start
//!
//! ```rust
//! use keyval::{from_str, to_string, Entry};
//!
//! let entries = from_str("# title\n\n[server.http]\nhost = example.com\nport = 8080\n").unwrap();
//! assert_eq!(
//!     entries[0],
//!     Entry::new(["server", "http", "host"], "example.com").with_comment("title")
//! );
//!
//! let text = to_string(&entries).unwrap();
//! assert_eq!(from_str(&text).unwrap(), entries);
//! ```
//!
//! ### Streaming
//!
//! ```rust
//! use keyval::{Decoder, DecoderOptions, Step};
//!
//! let input = b"a = 1\nb = 2\n";
//! let mut decoder = Decoder::with_options(&input[..], DecoderOptions::new().with_buffer_size(3));
//!
//! assert!(matches!(decoder.next_entry().unwrap(), Step::Entry(e) if e.val == "1"));
//! assert!(matches!(decoder.next_entry().unwrap(), Step::Entry(e) if e.val == "2"));
//! assert!(matches!(decoder.next_entry().unwrap(), Step::End { last: None, .. }));
//! ```
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - No global state: every decoder and encoder owns its state
//! - No panics in the public API

pub mod chars;
pub mod de;
pub mod entry;
pub mod error;
pub mod escape;
pub mod format;
pub mod macros;
pub mod options;
pub mod ser;
pub mod split;

pub use de::{Decoder, EndOfStream, EntryBuilder, Position, Step};
pub use entry::Entry;
pub use error::{Error, Result};
pub use options::{DecoderOptions, EncoderOptions, DEFAULT_BUFFER_SIZE, MAX_BUFFER_SIZE};
pub use ser::Encoder;
pub use split::SectionPolicy;

use std::io;

/// Decode every entry of a document held in a string.
///
/// # Examples
///
/// ```rust
/// use keyval::{from_str, Entry};
///
/// let entries = from_str("[db]\nuser = admin\n").unwrap();
/// assert_eq!(entries, vec![Entry::new(["db", "user"], "admin")]);
/// ```
///
/// # Errors
///
/// Returns [`Error::UnexpectedEof`] if the document ends inside a section
/// header or after a trailing backslash.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(s: &str) -> Result<Vec<Entry>> {
    from_slice(s.as_bytes())
}

/// Decode every entry of a document held in memory.
///
/// # Examples
///
/// ```rust
/// use keyval::from_slice;
///
/// let entries = from_slice(b"k = a\\#b\n").unwrap();
/// assert_eq!(entries[0].val, "a#b");
/// ```
///
/// # Errors
///
/// Returns [`Error::UnexpectedEof`] if the document is truncated.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(v: &[u8]) -> Result<Vec<Entry>> {
    let mut builder = EntryBuilder::new();
    builder.feed(v);
    let end = builder.finish();

    let entries: Vec<Entry> = std::iter::from_fn(|| builder.pop()).collect();
    match end {
        EndOfStream::Clean => Ok(entries),
        EndOfStream::Incomplete => Err(incomplete(&builder)),
    }
}

/// Decode every entry from an I/O stream.
///
/// # Examples
///
/// ```rust
/// use keyval::from_reader;
/// use std::io::Cursor;
///
/// let entries = from_reader(Cursor::new("a = 1\nb = 2\n")).unwrap();
/// assert_eq!(entries.len(), 2);
/// ```
///
/// # Errors
///
/// Returns an error if reading fails, if the reader reports `WouldBlock`, or
/// if the document is truncated.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(reader: R) -> Result<Vec<Entry>>
where
    R: io::Read,
{
    from_reader_with_options(reader, DecoderOptions::default())
}

/// Decode every entry from an I/O stream with custom options.
///
/// # Errors
///
/// Returns an error if reading fails, if the reader reports `WouldBlock`, or
/// if the document is truncated.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader_with_options<R>(reader: R, options: DecoderOptions) -> Result<Vec<Entry>>
where
    R: io::Read,
{
    let mut decoder = Decoder::with_options(reader, options);
    let mut entries = Vec::new();

    loop {
        match decoder.next_entry()? {
            Step::Entry(entry) => entries.push(entry),
            Step::End { last, end } => {
                entries.extend(last);
                return match end {
                    EndOfStream::Clean => Ok(entries),
                    EndOfStream::Incomplete => {
                        let position = decoder.position();
                        Err(Error::unexpected_eof(
                            position.line,
                            position.col,
                            decoder.expecting().unwrap_or("more input"),
                        ))
                    }
                };
            }
            Step::Pending => return Err(io::Error::from(io::ErrorKind::WouldBlock).into()),
        }
    }
}

/// Encode entries to a string.
///
/// # Examples
///
/// ```rust
/// use keyval::{to_string, Entry};
///
/// let text = to_string(&[
///     Entry::new(["db", "user"], "admin"),
///     Entry::new(["db", "pass word"], " secret "),
/// ])
/// .unwrap();
/// assert_eq!(text, "[db]\nuser = admin\npass word = \\ secret\\ \n");
/// ```
///
/// # Errors
///
/// Never fails for in-memory output; the `Result` mirrors [`to_writer`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<'a, I>(entries: I) -> Result<String>
where
    I: IntoIterator<Item = &'a Entry>,
{
    to_string_with_options(entries, EncoderOptions::default())
}

/// Encode entries to a string with custom options.
///
/// # Examples
///
/// ```rust
/// use keyval::{to_string_with_options, EncoderOptions, Entry};
///
/// let options = EncoderOptions::new().with_known_section(["server", "http"]);
/// let text = to_string_with_options(&[Entry::new(["server", "http", "port"], "80")], options).unwrap();
/// assert_eq!(text, "[server.http]\nport = 80\n");
/// ```
///
/// # Errors
///
/// Never fails for in-memory output.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<'a, I>(entries: I, options: EncoderOptions) -> Result<String>
where
    I: IntoIterator<Item = &'a Entry>,
{
    let mut buf = Vec::with_capacity(256);
    to_writer_with_options(&mut buf, entries, options)?;
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
}

/// Encode entries to a writer.
///
/// # Examples
///
/// ```rust
/// use keyval::{to_writer, Entry};
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &[Entry::new(["k"], "v")]).unwrap();
/// assert_eq!(buffer, b"k = v\n");
/// ```
///
/// # Errors
///
/// Returns an error if the writer fails or accepts only part of a line.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<'a, W, I>(writer: W, entries: I) -> Result<()>
where
    W: io::Write,
    I: IntoIterator<Item = &'a Entry>,
{
    to_writer_with_options(writer, entries, EncoderOptions::default())
}

/// Encode entries to a writer with custom options.
///
/// # Errors
///
/// Returns an error if the writer fails or accepts only part of a line.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<'a, W, I>(writer: W, entries: I, options: EncoderOptions) -> Result<()>
where
    W: io::Write,
    I: IntoIterator<Item = &'a Entry>,
{
    let mut encoder = Encoder::with_options(writer, options);
    for entry in entries {
        encoder.write_entry(entry)?;
    }
    encoder.flush()
}

fn incomplete(builder: &EntryBuilder) -> Error {
    let position = builder.position();
    Error::unexpected_eof(
        position.line,
        position.col,
        builder.expecting().unwrap_or("more input"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_example_document() {
        let entries = from_str("# title\n\n[server.http]\nhost = example.com\nport = 8080\n").unwrap();
        assert_eq!(
            entries,
            vec![
                entry!(["server", "http", "host"] => "example.com", comment = "title"),
                entry!(["server", "http", "port"] => "8080", comment = "title"),
            ]
        );
    }

    #[test]
    fn test_from_reader_matches_from_str() {
        let input = "[a]\nx = 1\n# note\ny = 2\n[b.c]\n";
        let from_reader = from_reader_with_options(input.as_bytes(), DecoderOptions::new().with_buffer_size(5)).unwrap();
        assert_eq!(from_reader, from_str(input).unwrap());
    }

    #[test]
    fn test_truncated_document_is_an_error() {
        match from_str("a = 1\n[server") {
            Err(Error::UnexpectedEof { line, col, expected }) => {
                assert_eq!((line, col), (2, 8));
                assert!(expected.contains("']'"));
            }
            other => panic!("Expected UnexpectedEof, got {:?}", other),
        }

        assert!(matches!(from_reader(&b"k = v\\"[..]), Err(Error::UnexpectedEof { .. })));
    }

    #[test]
    fn test_escaped_value_roundtrip() {
        let entries = vec![entry!(["k"] => "a#b")];
        let text = to_string(&entries).unwrap();
        assert_eq!(text, "k = a\\#b\n");
        assert_eq!(from_str(&text).unwrap(), entries);
    }

    #[test]
    fn test_custom_options_roundtrip() {
        let entries = vec![
            entry!(["server", "http", "host"] => "example.com", comment = "title"),
            entry!(["server", "http", "port"] => "8080", comment = "title"),
        ];
        let options = EncoderOptions::new().with_max_section_depth(2);
        let text = to_string_with_options(&entries, options).unwrap();
        assert_eq!(text, "# title\n[server.http]\nhost = example.com\nport = 8080\n");
        assert_eq!(from_str(&text).unwrap(), entries);
    }
}
