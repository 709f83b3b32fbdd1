//! Choosing where a flat key path is cut into a section and a key.
//!
//! The encoder writes `Entry { key: ["server", "http", "port"], .. }` as
//! either
//!
//! ```text
//! [server]
//! http.port = 8080
//! ```
//!
//! or
//!
//! ```text
//! [server.http]
//! port = 8080
//! ```
//!
//! depending on the [`SectionPolicy`]. Both decode to the same record.

/// Policy for splitting a key path into `(section, key)`.
///
/// # Examples
///
/// ```rust
/// use keyval::SectionPolicy;
///
/// let key: Vec<String> = ["server", "http", "port"].iter().map(|s| s.to_string()).collect();
///
/// let (section, rest) = SectionPolicy::new().split(&key);
/// assert_eq!(section, ["server"]);
/// assert_eq!(rest, ["http", "port"]);
///
/// let (section, rest) = SectionPolicy::new().with_max_section_depth(2).split(&key);
/// assert_eq!(section, ["server", "http"]);
/// assert_eq!(rest, ["port"]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionPolicy {
    /// Prefixes always written as sections, tried in order.
    pub known_sections: Vec<Vec<String>>,
    /// Upper bound on section components when no known section matches.
    pub max_section_depth: usize,
    /// Minimum number of components left for the key.
    pub min_key_depth: usize,
}

impl Default for SectionPolicy {
    fn default() -> Self {
        SectionPolicy {
            known_sections: Vec::new(),
            max_section_depth: 1,
            min_key_depth: 1,
        }
    }
}

impl SectionPolicy {
    /// Creates the default policy: one section component, at least one key
    /// component, no known sections.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_section_depth(mut self, depth: usize) -> Self {
        self.max_section_depth = depth;
        self
    }

    #[must_use]
    pub fn with_min_key_depth(mut self, depth: usize) -> Self {
        self.min_key_depth = depth;
        self
    }

    /// Appends a known section. Earlier sections take precedence, even over
    /// longer matches added later.
    #[must_use]
    pub fn with_known_section<I, S>(mut self, section: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known_sections
            .push(section.into_iter().map(Into::into).collect());
        self
    }

    /// Splits `key` into its section and residual key.
    pub fn split<'a>(&self, key: &'a [String]) -> (&'a [String], &'a [String]) {
        if key.is_empty() {
            return (&[], &[]);
        }

        for known in &self.known_sections {
            if known.len() <= key.len() && key.starts_with(known) {
                return key.split_at(known.len());
            }
        }

        if key.len() < self.min_key_depth {
            return (&[], key);
        }

        let depth = self.max_section_depth.min(key.len() - self.min_key_depth);
        key.split_at(depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_policy() {
        let policy = SectionPolicy::new();

        let key = path(&["a", "b", "c"]);
        assert_eq!(policy.split(&key), (&key[..1], &key[1..]));

        let key = path(&["a"]);
        let (section, rest) = policy.split(&key);
        assert!(section.is_empty());
        assert_eq!(rest, ["a"]);
    }

    #[test]
    fn test_empty_key() {
        let (section, rest) = SectionPolicy::new().split(&[]);
        assert!(section.is_empty());
        assert!(rest.is_empty());
    }

    #[test]
    fn test_first_known_section_wins() {
        let policy = SectionPolicy::new()
            .with_known_section(["a"])
            .with_known_section(["a", "b"]);
        let key = path(&["a", "b", "c"]);

        let (section, rest) = policy.split(&key);
        assert_eq!(section, ["a"]);
        assert_eq!(rest, ["b", "c"]);
    }

    #[test]
    fn test_longer_known_section_listed_first() {
        let policy = SectionPolicy::new()
            .with_known_section(["a", "b"])
            .with_known_section(["a"]);
        let key = path(&["a", "b", "c"]);

        let (section, rest) = policy.split(&key);
        assert_eq!(section, ["a", "b"]);
        assert_eq!(rest, ["c"]);
    }

    #[test]
    fn test_known_section_longer_than_key_is_skipped() {
        let policy = SectionPolicy::new().with_known_section(["a", "b", "c", "d"]);
        let key = path(&["a", "b", "c"]);

        let (section, rest) = policy.split(&key);
        assert_eq!(section, ["a"]);
        assert_eq!(rest, ["b", "c"]);
    }

    #[test]
    fn test_known_section_can_consume_whole_key() {
        let policy = SectionPolicy::new().with_known_section(["a", "b"]);
        let key = path(&["a", "b"]);

        let (section, rest) = policy.split(&key);
        assert_eq!(section, ["a", "b"]);
        assert!(rest.is_empty());
    }

    #[test]
    fn test_depth_reduced_to_keep_min_key_depth() {
        let policy = SectionPolicy::new()
            .with_max_section_depth(3)
            .with_min_key_depth(2);
        let key = path(&["a", "b", "c", "d"]);

        let (section, rest) = policy.split(&key);
        assert_eq!(section, ["a", "b"]);
        assert_eq!(rest, ["c", "d"]);
    }

    #[test]
    fn test_key_shorter_than_min_key_depth_has_no_section() {
        let policy = SectionPolicy::new().with_min_key_depth(3);
        let key = path(&["a", "b"]);

        let (section, rest) = policy.split(&key);
        assert!(section.is_empty());
        assert_eq!(rest, ["a", "b"]);
    }

    #[test]
    fn test_zero_min_key_depth_allows_section_only() {
        let policy = SectionPolicy::new()
            .with_max_section_depth(5)
            .with_min_key_depth(0);
        let key = path(&["a", "b"]);

        let (section, rest) = policy.split(&key);
        assert_eq!(section, ["a", "b"]);
        assert!(rest.is_empty());
    }
}
