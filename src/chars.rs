//! Byte roles of the key/value format.
//!
//! Every structural decision in the decoder and every escaping decision in
//! the encoder starts from [`classify`]. The table is fixed: a byte has
//! exactly one role regardless of where it appears, and it is the decoder's
//! state that decides whether that role matters.

pub const ESCAPE: u8 = b'\\';
pub const COMMENT: u8 = b'#';
pub const OPEN_SECTION: u8 = b'[';
pub const CLOSE_SECTION: u8 = b']';
pub const START_VALUE: u8 = b'=';
pub const KEY_SEPARATOR: u8 = b'.';
pub const SPACE: u8 = b' ';
pub const TAB: u8 = b'\t';
pub const NEWLINE: u8 = b'\n';

/// The structural role of a single byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Escape,
    CommentStart,
    SectionOpen,
    SectionClose,
    ValueStart,
    KeySeparator,
    Space,
    Tab,
    Newline,
    Plain,
}

impl Role {
    /// Space or tab.
    #[inline]
    #[must_use]
    pub const fn is_whitespace(self) -> bool {
        matches!(self, Role::Space | Role::Tab)
    }
}

/// Classifies a byte.
///
/// # Examples
///
/// ```rust
/// use keyval::chars::{classify, Role};
///
/// assert_eq!(classify(b'['), Role::SectionOpen);
/// assert_eq!(classify(b'x'), Role::Plain);
/// assert!(classify(b'\t').is_whitespace());
/// ```
#[inline]
#[must_use]
pub const fn classify(b: u8) -> Role {
    match b {
        ESCAPE => Role::Escape,
        COMMENT => Role::CommentStart,
        OPEN_SECTION => Role::SectionOpen,
        CLOSE_SECTION => Role::SectionClose,
        START_VALUE => Role::ValueStart,
        KEY_SEPARATOR => Role::KeySeparator,
        SPACE => Role::Space,
        TAB => Role::Tab,
        NEWLINE => Role::Newline,
        _ => Role::Plain,
    }
}
