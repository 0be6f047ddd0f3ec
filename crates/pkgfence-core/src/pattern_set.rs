//! Ordered, deduplicated collections of patterns.

use std::fmt;

use crate::pattern::{Pattern, PatternError};

/// Rendering of a set without patterns.
pub const EMPTY_SET: &str = "...";

/// Insertion-ordered set of [`Pattern`]s, unique by source string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

impl PatternSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles `source` and appends it unless it is already present.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::InvalidPattern`] if `source` does not compile.
    pub fn add(&mut self, source: &str) -> Result<(), PatternError> {
        if self.contains(source) {
            return Ok(());
        }
        self.patterns.push(Pattern::new(source)?);
        Ok(())
    }

    /// Appends an already compiled pattern unless it is already present.
    pub fn insert(&mut self, pattern: Pattern) {
        if !self.contains(pattern.as_str()) {
            self.patterns.push(pattern);
        }
    }

    /// Adds every pattern of `other`, keeping this set's order first.
    pub fn merge(&mut self, other: &Self) {
        for p in &other.patterns {
            self.insert(p.clone());
        }
    }

    /// True iff `candidate` fully matches at least one member.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(candidate))
    }

    /// True iff a member has exactly this source string.
    #[must_use]
    pub fn contains(&self, source: &str) -> bool {
        self.patterns.iter().any(|p| p.as_str() == source)
    }

    /// Number of patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// True if the set holds no patterns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Renders the set in insertion order, e.g. `` `a`, `b` ``.
    ///
    /// An empty set renders as [`EMPTY_SET`].
    #[must_use]
    pub fn render(&self) -> String {
        render_sources(self.patterns.iter().map(Pattern::as_str))
    }

    /// Renders the set with sources sorted, independent of insertion order.
    #[must_use]
    pub fn render_sorted(&self) -> String {
        let mut sources: Vec<&str> = self.patterns.iter().map(Pattern::as_str).collect();
        sources.sort_unstable();
        render_sources(sources.into_iter())
    }
}

fn render_sources<'a>(sources: impl Iterator<Item = &'a str>) -> String {
    let rendered: Vec<String> = sources.map(|s| format!("`{s}`")).collect();
    if rendered.is_empty() {
        EMPTY_SET.to_string()
    } else {
        rendered.join(", ")
    }
}

impl fmt::Display for PatternSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_of(sources: &[&str]) -> PatternSet {
        let mut set = PatternSet::new();
        for s in sources {
            set.add(s).unwrap();
        }
        set
    }

    #[test]
    fn empty_set_renders_sentinel() {
        let set = PatternSet::new();
        assert_eq!(set.render(), "...");
        assert!(!set.matches(""));
        assert!(!set.matches("a"));
    }

    #[test]
    fn one_simple() {
        let set = set_of(&["a"]);
        assert!(set.matches("a"));
        assert!(!set.matches("b"));
        assert!(!set.matches("aa"));
        assert_eq!(set.render(), "`a`");
    }

    #[test]
    fn many_simple() {
        let set = set_of(&["a", "be", "do", "ra"]);
        for s in ["a", "be", "do", "ra"] {
            assert!(set.matches(s), "{s} should match");
        }
        for s in ["aa", "b", "bd", "od", "ra*"] {
            assert!(!set.matches(s), "{s} should not match");
        }
        assert_eq!(set.render(), "`a`, `be`, `do`, `ra`");
    }

    #[test]
    fn add_is_idempotent() {
        let once = set_of(&["pkg/*/db"]);
        let twice = set_of(&["pkg/*/db", "pkg/*/db"]);
        assert_eq!(once.len(), 1);
        assert_eq!(twice.len(), 1);
        assert_eq!(once, twice);
        assert_eq!(once.render(), twice.render());
    }

    #[test]
    fn add_propagates_invalid_pattern() {
        let mut set = PatternSet::new();
        assert!(set.add("a/**b").is_err());
        assert!(set.is_empty());
    }

    #[test]
    fn render_sorted_ignores_insertion_order() {
        let a = set_of(&["z", "a/**", "m/*"]);
        let b = set_of(&["m/*", "z", "a/**"]);
        assert_ne!(a.render(), b.render());
        assert_eq!(a.render_sorted(), b.render_sorted());
        assert_eq!(a.render_sorted(), "`a/**`, `m/*`, `z`");
    }

    #[test]
    fn merge_deduplicates() {
        let mut a = set_of(&["x", "y"]);
        let b = set_of(&["y", "z"]);
        a.merge(&b);
        assert_eq!(a.render(), "`x`, `y`, `z`");
    }
}
