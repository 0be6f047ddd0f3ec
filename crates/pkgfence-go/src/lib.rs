//! # pkgfence-go
//!
//! Tree-sitter based Go frontend for pkgfence.
//!
//! This crate turns a Go module on disk into the language-agnostic
//! `pkgfence_core::PackageGraph`. It provides:
//!
//! - [`find_root`] for locating the module root and its module path
//! - [`LanguageExtractor`] trait for pluggable language support
//! - [`GoExtractor`] for package clause, import and size extraction
//! - [`GraphLoader`] and [`load_graph`] for assembling the package graph

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod extractor;
pub mod golang;
pub mod loader;
pub mod module;

pub use error::GraphError;
pub use extractor::{ExtractError, FileAnalysis, ImportInfo, LanguageExtractor, PackageInfo};
pub use golang::GoExtractor;
pub use loader::{load_graph, GraphLoader};
pub use module::{find_root, ModuleRoot};
