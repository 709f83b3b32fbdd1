//! Format Reference
//!
//! This module documents the text format read by [`Decoder`](crate::Decoder)
//! and written by [`Encoder`](crate::Encoder).
//!
//! # Overview
//!
//! A document is a sequence of newline-terminated lines. Each line is a
//! comment, a section header, a key line or blank:
//!
//! ```text
//! document   := block*
//! block      := comment? section? line*
//! comment    := ("#" " "? text "\n")+
//! section    := "[" path "]" "\n"
//! line       := path ("=" value)? "\n"
//! path       := component ("." component)*
//! ```
//!
//! ## Structural Bytes
//!
//! | Byte | Meaning |
//! |------|---------|
//! | `\` | the next byte is literal |
//! | `#` | starts a comment line |
//! | `[` `]` | bound a section header |
//! | `=` | starts the value |
//! | `.` | separates path components |
//! | space, tab | whitespace, trimmed at token edges |
//! | `\n` | ends the line |
//!
//! A structural byte that has no meaning where it appears is ordinary
//! content: `#` inside a key or value, `=` or `.` inside a value.
//!
//! # Comments
//!
//! Consecutive `#` lines form one block. Their text, trimmed at both ends,
//! is joined with newlines; a bare `#` adds an empty line. The block stays
//! attached to every following entry until the next block, and a blank line
//! or any other line ends it.
//!
//! ```rust
//! let entries = keyval::from_str("# first\n#\n# second\na\nb\n").unwrap();
//! assert_eq!(entries[0].comment, "first\n\nsecond");
//! assert_eq!(entries[1].comment, "first\n\nsecond");
//! ```
//!
//! # Sections
//!
//! A header replaces the active section path, which prefixes every following
//! key. `[]` returns to the root. A header with no key line before the next
//! header or the end of input still produces one entry with an empty value.
//!
//! ```rust
//! use keyval::Entry;
//!
//! let entries = keyval::from_str("[a.b]\nx = 1\n[c]\n").unwrap();
//! assert_eq!(entries, vec![Entry::new(["a", "b", "x"], "1"), Entry::new(["c"], "")]);
//! ```
//!
//! # Whitespace
//!
//! Whitespace next to a delimiter or a line edge is dropped; whitespace
//! between two content bytes of the same token is kept.
//!
//! ```rust
//! let entries = keyval::from_str("  my key . sub  =   two  words  \n").unwrap();
//! assert_eq!(entries[0].key, ["my key", "sub"]);
//! assert_eq!(entries[0].val, "two  words");
//! ```
//!
//! # Escaping
//!
//! A backslash makes the next byte literal, whatever it is, including a
//! newline. To keep edge whitespace, escape it.
//!
//! ```rust
//! let entries = keyval::from_str("a\\.b = \\ x\\#y\\ \n").unwrap();
//! assert_eq!(entries[0].key, ["a.b"]);
//! assert_eq!(entries[0].val, " x#y ");
//! ```
//!
//! The encoder escapes, per context:
//!
//! | Context | Escaped bytes |
//! |---------|---------------|
//! | comment line | `\` |
//! | section component | `\` `.` `[` `]` `#` `=` newline |
//! | key component | `\` `.` `[` `]` `#` `=` newline |
//! | value | `\` `#` newline |
//!
//! plus a space or tab in the first or last position of any token.
//!
//! # Truncation
//!
//! Input that ends inside a `[` header or right after a `\` is incomplete.
//! The streaming decoder reports [`EndOfStream::Incomplete`](crate::EndOfStream::Incomplete)
//! together with the last entry; [`from_str`](crate::from_str) returns an
//! error.
//!
//! ```rust
//! assert!(keyval::from_str("[server").is_err());
//! assert!(keyval::from_str("port = 8080\n").is_ok());
//! ```
