//! Package path patterns.
//!
//! A pattern is a restricted glob over `/` separated package paths:
//!
//! - `*` matches any run of characters except `/` (one path segment, possibly empty)
//! - `**` is only legal as the final two characters and matches the rest of the path
//! - everything else matches literally

use regex::Regex;
use std::fmt;

/// Expression used for a single `*`.
const SEGMENT_WILDCARD: &str = "[^/]*";

/// Expression used for a trailing `**`.
const REST_WILDCARD: &str = ".*";

/// A pattern compiled into an anchored matcher.
///
/// Equality is by source string only.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    compiled: Regex,
}

impl Pattern {
    /// Compiles a pattern.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::InvalidPattern`] if `**` appears anywhere but at the
    /// end, or if the resulting expression does not compile.
    pub fn new(source: &str) -> Result<Self, PatternError> {
        let (body, rest) = match source.find("**") {
            Some(i) if i + 2 == source.len() => (&source[..i], REST_WILDCARD),
            Some(_) => {
                return Err(PatternError::InvalidPattern {
                    pattern: source.to_string(),
                    reason: "`**` is only allowed at the end".to_string(),
                })
            }
            None => (source, ""),
        };

        let mut expr = String::with_capacity(body.len() + 16);
        expr.push('^');
        for (i, literal) in body.split('*').enumerate() {
            if i > 0 {
                expr.push_str(SEGMENT_WILDCARD);
            }
            expr.push_str(&regex::escape(literal));
        }
        expr.push_str(rest);
        expr.push('$');

        let compiled = Regex::new(&expr).map_err(|e| PatternError::InvalidPattern {
            pattern: source.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            source: source.to_string(),
            compiled,
        })
    }

    /// Tests whether `candidate` matches the whole pattern.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        self.compiled.is_match(candidate)
    }

    /// Returns the pattern source.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Pattern {}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}`", self.source)
    }
}

/// Errors raised while building patterns and pattern groups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum PatternError {
    /// The pattern cannot be compiled.
    #[error("illegal pattern `{pattern}`: {reason}")]
    #[diagnostic(
        code(pkgfence::invalid_pattern),
        help("`*` matches within one path segment, `**` may only end a pattern")
    )]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Why it was rejected.
        reason: String,
    },

    /// An allow entry is not a `left right` pair.
    #[error("unable to split allow entry `{entry}` into left and right patterns (found {found} token(s))")]
    #[diagnostic(
        code(pkgfence::malformed_group),
        help("write allow entries as two patterns separated by whitespace, e.g. `pkg/a/uses pkg/x/util`")
    )]
    MalformedGroup {
        /// The raw entry.
        entry: String,
        /// How many whitespace separated tokens it had.
        found: usize,
    },
}
