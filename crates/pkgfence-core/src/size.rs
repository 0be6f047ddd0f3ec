//! Package size budget.

use crate::types::SizeExceeded;

/// Default maximum size of a package.
pub const DEFAULT_SIZE: u64 = 4096;

/// Compares a package's precomputed size with a ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeChecker {
    ceiling: u64,
}

impl SizeChecker {
    /// Creates a checker with the given ceiling.
    #[must_use]
    pub fn new(ceiling: u64) -> Self {
        Self { ceiling }
    }

    /// The configured ceiling.
    #[must_use]
    pub fn ceiling(&self) -> u64 {
        self.ceiling
    }

    /// Reports `package` if `actual` is above the ceiling.
    #[must_use]
    pub fn check(&self, package: &str, actual: u64) -> Option<SizeExceeded> {
        (actual > self.ceiling).then(|| SizeExceeded {
            package: package.to_string(),
            ceiling: self.ceiling,
            actual,
        })
    }
}

impl Default for SizeChecker {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE)
    }
}
