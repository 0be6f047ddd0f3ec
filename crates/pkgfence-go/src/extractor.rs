//! Language-agnostic extraction types and trait.
//!
//! `LanguageExtractor` is the extension point for adding new languages.
//! Implement it to teach pkgfence how to extract the package clause, imports
//! and size of a single source file.

use std::path::PathBuf;

/// Package clause extracted from source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInfo {
    /// Line number (1-indexed).
    pub line: usize,
    /// Declared package name (e.g., `db`).
    pub name: String,
}

/// A single import extracted from source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportInfo {
    /// Line number (1-indexed).
    pub line: usize,
    /// Unquoted import path (e.g., `example.com/app/pkg/x/util`).
    pub path: String,
}

/// Result of analyzing a single source file.
#[derive(Debug, Clone, Default)]
pub struct FileAnalysis {
    /// Path relative to project root.
    pub file_path: PathBuf,
    /// Package clause, if present.
    pub package: Option<PackageInfo>,
    /// All imports found.
    pub imports: Vec<ImportInfo>,
    /// Size contribution of this file.
    pub size: u64,
    /// True if the parser had to recover from syntax errors.
    pub has_errors: bool,
}

/// Errors raised by an extractor.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The grammar could not be loaded into the parser.
    #[error("failed to load {language} grammar: {message}")]
    Language {
        /// Language identifier.
        language: &'static str,
        /// Loader message.
        message: String,
    },
    /// The parser produced no tree.
    #[error("failed to parse {language} source")]
    Parse {
        /// Language identifier.
        language: &'static str,
    },
}

/// Trait for language-specific Tree-sitter extraction.
///
/// The extractor receives raw source text and returns a [`FileAnalysis`].
pub trait LanguageExtractor: Send + Sync {
    /// Language identifier (e.g., `"go"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this extractor handles (e.g., `&[".go"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Whether a file with this name takes part in the package graph.
    fn accepts(&self, file_name: &str) -> bool {
        self.extensions().iter().any(|ext| file_name.ends_with(ext))
    }

    /// Extract the package clause, imports and size from source code.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar cannot be loaded or parsing fails.
    fn analyze(&self, source: &str) -> Result<FileAnalysis, ExtractError>;
}
