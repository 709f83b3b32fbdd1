//! Escape tracking across byte boundaries.

use crate::chars::{classify, Role};

/// Two-flag machine deciding whether a byte is read structurally.
///
/// `pending` is set by an unescaped backslash and survives between calls, so
/// a backslash that ends one read still escapes the first byte of the next.
/// `active` is true only while the escaped byte itself is being processed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EscapeTracker {
    pending: bool,
    active: bool,
}

impl EscapeTracker {
    pub const fn new() -> Self {
        EscapeTracker {
            pending: false,
            active: false,
        }
    }

    /// Feeds one byte. Returns `false` when the byte was consumed as an
    /// escape; otherwise the byte is to be interpreted, as `Plain` if
    /// [`EscapeTracker::is_active`] and by its own role if not.
    #[inline]
    pub fn feed(&mut self, b: u8) -> bool {
        self.active = false;
        if self.pending {
            self.pending = false;
            self.active = true;
            return true;
        }

        if classify(b) == Role::Escape {
            self.pending = true;
            return false;
        }
        true
    }

    /// A backslash was seen and the byte it escapes has not arrived yet.
    #[inline]
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    /// The byte last fed was escaped.
    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescaped_bytes_are_not_active() {
        let mut t = EscapeTracker::new();
        assert!(t.feed(b'#'));
        assert!(!t.is_active());
        assert!(t.feed(b'a'));
        assert!(!t.is_active());
    }

    #[test]
    fn test_escaped_byte_is_active() {
        let mut t = EscapeTracker::new();
        assert!(!t.feed(b'\\'));
        assert!(t.is_pending());
        assert!(t.feed(b'\n'));
        assert!(t.is_active());
        assert!(!t.is_pending());
        assert!(t.feed(b'\n'));
        assert!(!t.is_active());
    }

    #[test]
    fn test_double_backslash_is_literal_backslash() {
        let mut t = EscapeTracker::new();
        assert!(!t.feed(b'\\'));
        assert!(t.feed(b'\\'));
        assert!(t.is_active());
        assert!(t.feed(b'.'));
        assert!(!t.is_active());
    }

    #[test]
    fn test_pending_survives_between_chunks() {
        let mut t = EscapeTracker::new();
        for b in b"ab\\" {
            t.feed(*b);
        }
        assert!(t.is_pending());
        assert!(t.feed(b'='));
        assert!(t.is_active());
    }
}
