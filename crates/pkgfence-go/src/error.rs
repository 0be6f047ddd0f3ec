//! Errors raised while building a package graph.

use std::path::PathBuf;

use crate::extractor::ExtractError;

/// Graph extraction errors.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// No `go.mod` above the start directory.
    #[error("no go.mod found in {start} or any parent directory")]
    RootNotFound {
        /// Directory the search started from.
        start: PathBuf,
    },

    /// Filesystem error.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// `go.mod` is unusable.
    #[error("invalid module file {path}: {message}")]
    Module {
        /// Path of `go.mod`.
        path: PathBuf,
        /// What is wrong with it.
        message: String,
    },

    /// A top-level `main` directory would share the root package's id.
    #[error("directory {dir} clashes with the module root package, both would be package `main`")]
    EntryPointClash {
        /// The clashing directory.
        dir: PathBuf,
    },

    /// Directory walk failed.
    #[error("failed to walk the module: {0}")]
    Walk(#[from] ignore::Error),

    /// An exclude glob doesn't compile.
    #[error("invalid exclude pattern `{pattern}`: {source}")]
    Exclude {
        /// The offending glob.
        pattern: String,
        /// Underlying error.
        #[source]
        source: glob::PatternError,
    },

    /// A source file couldn't be parsed.
    #[error("failed to analyze {path}: {source}")]
    Parse {
        /// Path of the source file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: ExtractError,
    },
}
