/// Builds an [`Entry`](crate::Entry) from a key path, an optional value and
/// an optional comment.
///
/// # Examples
///
/// ```rust
/// use keyval::{entry, Entry};
///
/// assert_eq!(entry!(["a", "b"]), Entry::new(["a", "b"], ""));
/// assert_eq!(entry!(["a", "b"] => "1"), Entry::new(["a", "b"], "1"));
/// assert_eq!(
///     entry!(["a"] => "1", comment = "note"),
///     Entry::new(["a"], "1").with_comment("note"),
/// );
/// ```
#[macro_export]
macro_rules! entry {
    // Key only
    ([ $($key:expr),* $(,)? ]) => {
        $crate::Entry {
            key: vec![$($key.to_string()),*],
            val: String::new(),
            comment: String::new(),
        }
    };

    // Key and value
    ([ $($key:expr),* $(,)? ] => $val:expr) => {
        $crate::Entry {
            key: vec![$($key.to_string()),*],
            val: $val.to_string(),
            comment: String::new(),
        }
    };

    // Key, value and comment
    ([ $($key:expr),* $(,)? ] => $val:expr, comment = $comment:expr) => {
        $crate::Entry {
            key: vec![$($key.to_string()),*],
            val: $val.to_string(),
            comment: $comment.to_string(),
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::Entry;

    #[test]
    fn test_entry_macro_forms() {
        assert_eq!(entry!([]), Entry::default());
        assert_eq!(entry!(["x"]).key, vec!["x"]);
        assert_eq!(entry!(["x", "y"] => 42).val, "42");

        let e = entry!(["x"] => "v", comment = "c");
        assert_eq!(e.comment, "c");
        assert_eq!(e.val, "v");
    }
}
