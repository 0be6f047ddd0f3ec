//! Allow rules: importer patterns mapped to the importee patterns they may use.

use std::collections::HashMap;
use std::fmt;

use crate::pattern::{Pattern, PatternError};
use crate::pattern_set::PatternSet;

/// Rendering of a map without groups.
pub const EMPTY_MAP: &str = ".....";

/// One left (importer) pattern with the right (importee) patterns it may use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternGroup {
    left: Pattern,
    right: PatternSet,
}

impl PatternGroup {
    /// Returns the importer pattern.
    #[must_use]
    pub fn left(&self) -> &Pattern {
        &self.left
    }

    /// Returns the allowed importee patterns.
    #[must_use]
    pub fn right(&self) -> &PatternSet {
        &self.right
    }
}

/// Pattern groups keyed by their left pattern source.
///
/// Groups keep their insertion order, so [`PatternGroupMap::matching_set`]
/// is deterministic.
#[derive(Debug, Clone, Default)]
pub struct PatternGroupMap {
    groups: Vec<PatternGroup>,
    index: HashMap<String, usize>,
}

impl PatternGroupMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a `"left right"` entry.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::MalformedGroup`] unless `entry` has exactly two
    /// whitespace separated tokens, or [`PatternError::InvalidPattern`] if
    /// either token does not compile.
    pub fn add(&mut self, entry: &str) -> Result<(), PatternError> {
        let tokens: Vec<&str> = entry.split_whitespace().collect();
        match tokens.as_slice() {
            [left, right] => self.add_pair(left, right),
            _ => Err(PatternError::MalformedGroup {
                entry: entry.to_string(),
                found: tokens.len(),
            }),
        }
    }

    /// Adds `right` to the group of `left`, creating the group if needed.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::InvalidPattern`] if either pattern does not compile.
    pub fn add_pair(&mut self, left: &str, right: &str) -> Result<(), PatternError> {
        if let Some(&i) = self.index.get(left) {
            return self.groups[i].right.add(right);
        }

        // A group never exists without at least one right pattern.
        let left_pattern = Pattern::new(left)?;
        let mut right_set = PatternSet::new();
        right_set.add(right)?;

        self.index.insert(left.to_string(), self.groups.len());
        self.groups.push(PatternGroup {
            left: left_pattern,
            right: right_set,
        });
        Ok(())
    }

    /// Union of the right sets of every group whose left pattern matches `importer`.
    ///
    /// Returns `None` if no left pattern matches.
    #[must_use]
    pub fn matching_set(&self, importer: &str) -> Option<PatternSet> {
        let mut matched: Option<PatternSet> = None;
        for group in self.groups.iter().filter(|g| g.left.matches(importer)) {
            matched
                .get_or_insert_with(PatternSet::new)
                .merge(&group.right);
        }
        matched
    }

    /// Looks up a group by its left pattern source.
    #[must_use]
    pub fn get(&self, left: &str) -> Option<&PatternGroup> {
        self.index.get(left).map(|&i| &self.groups[i])
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True if the map holds no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Renders all groups, e.g. ``a: `b` ; c: `d`, `e` ``.
    ///
    /// An empty map renders as [`EMPTY_MAP`].
    #[must_use]
    pub fn render(&self) -> String {
        if self.groups.is_empty() {
            return EMPTY_MAP.to_string();
        }
        self.groups
            .iter()
            .map(|g| format!("{}: {}", g.left, g.right.render()))
            .collect::<Vec<_>>()
            .join(" ; ")
    }
}

impl fmt::Display for PatternGroupMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
