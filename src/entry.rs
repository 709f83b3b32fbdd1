//! The record exchanged at the API boundary.
//!
//! An [`Entry`] is one key line of a document, already resolved against the
//! section and comment that were active when it was read:
//!
//! ```text
//! # connection settings
//! [server.http]
//! host = example.com
//! ```
//!
//! decodes to `Entry { key: ["server", "http", "host"], val: "example.com",
//! comment: "connection settings" }`.
//!
//! ## Examples
//!
//! ```rust
//! use keyval::Entry;
//!
//! let entry = Entry::new(["server", "http", "host"], "example.com")
//!     .with_comment("connection settings");
//!
//! assert_eq!(entry.path(), "server.http.host");
//! assert_eq!(entry.to_string(), "server.http.host = example.com");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// One decoded or to-be-encoded record.
///
/// * `key` holds the section components followed by the key components. It
///   has no empty components; it is empty for a value line at the root and
///   for a record that carries nothing but a comment.
/// * `val` is empty when the line had no value.
/// * `comment` is the comment block active for this record. Comments are
///   sticky, so consecutive records usually share the same text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry {
    pub key: Vec<String>,
    pub val: String,
    pub comment: String,
}

impl Entry {
    /// Creates an entry without a comment.
    pub fn new<K, S, V>(key: K, val: V) -> Self
    where
        K: IntoIterator<Item = S>,
        S: Into<String>,
        V: Into<String>,
    {
        Entry {
            key: key.into_iter().map(Into::into).collect(),
            val: val.into(),
            comment: String::new(),
        }
    }

    /// Sets the comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// The key components joined with `.`, without escaping.
    #[must_use]
    pub fn path(&self) -> String {
        self.key.join(".")
    }

    /// True when the record has neither a key nor a value.
    #[must_use]
    pub fn is_bare(&self) -> bool {
        self.key.is_empty() && self.val.is_empty()
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())?;
        if !self.val.is_empty() {
            write!(f, " = {}", self.val)?;
        }
        Ok(())
    }
}
