//! Configuration options for decoding and encoding.
//!
//! - [`DecoderOptions`]: read chunk size
//! - [`EncoderOptions`]: how key paths are split into sections
//!
//! ## Examples
//!
//! ```rust
//! use keyval::{DecoderOptions, EncoderOptions};
//!
//! let decode = DecoderOptions::new().with_buffer_size(4096);
//! assert_eq!(decode.buffer_size, 4096);
//!
//! let encode = EncoderOptions::new()
//!     .with_max_section_depth(2)
//!     .with_known_section(["server", "http"]);
//! assert_eq!(encode.policy.known_sections.len(), 1);
//! ```

use crate::split::SectionPolicy;

/// Default number of bytes requested from the source per read (256 KiB).
pub const DEFAULT_BUFFER_SIZE: usize = 1 << 18;

/// Largest read buffer the decoder allocates (64 MiB). Larger sizes are
/// clamped to it.
pub const MAX_BUFFER_SIZE: usize = 1 << 26;

/// Configuration for [`Decoder`](crate::Decoder).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecoderOptions {
    /// Bytes per read. Zero is treated as one, anything above
    /// [`MAX_BUFFER_SIZE`] as [`MAX_BUFFER_SIZE`].
    pub buffer_size: usize,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        DecoderOptions {
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl DecoderOptions {
    /// Creates default options (256 KiB reads).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keyval::{DecoderOptions, DEFAULT_BUFFER_SIZE};
    ///
    /// assert_eq!(DecoderOptions::new().buffer_size, DEFAULT_BUFFER_SIZE);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of bytes requested per read.
    #[must_use]
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }
}

/// Configuration for [`Encoder`](crate::Encoder).
///
/// Set before the first entry is written; the encoder does not re-split keys
/// it has already emitted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EncoderOptions {
    pub policy: SectionPolicy,
}

impl EncoderOptions {
    /// Creates default options: section depth 1, key depth 1, no known
    /// sections.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keyval::EncoderOptions;
    ///
    /// let options = EncoderOptions::new();
    /// assert_eq!(options.policy.max_section_depth, 1);
    /// assert_eq!(options.policy.min_key_depth, 1);
    /// assert!(options.policy.known_sections.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of components written as a section.
    #[must_use]
    pub fn with_max_section_depth(mut self, depth: usize) -> Self {
        self.policy.max_section_depth = depth;
        self
    }

    /// Sets the minimum number of components kept on the key line.
    #[must_use]
    pub fn with_min_key_depth(mut self, depth: usize) -> Self {
        self.policy.min_key_depth = depth;
        self
    }

    /// Declares a prefix that is always written as a section.
    ///
    /// Known sections are tried in the order they were added.
    #[must_use]
    pub fn with_known_section<I, S>(mut self, section: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.policy = self.policy.with_known_section(section);
        self
    }

    /// Replaces the whole split policy.
    #[must_use]
    pub fn with_policy(mut self, policy: SectionPolicy) -> Self {
        self.policy = policy;
        self
    }
}
