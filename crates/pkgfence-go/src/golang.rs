//! Go language extractor using Tree-sitter.

use std::path::PathBuf;
use tree_sitter::{Language, Node, Parser};

use crate::extractor::{ExtractError, FileAnalysis, ImportInfo, LanguageExtractor, PackageInfo};

const LANGUAGE_ID: &str = "go";

/// Nodes below a top-level declaration that add to the package size.
const SIZED_KINDS: &[&str] = &[
    "short_var_declaration",
    "const_spec",
    "var_spec",
    "type_spec",
    "type_alias",
    "field_declaration",
    "method_elem",
    "method_spec",
];

/// Extracts the package clause, imports and size from Go source.
///
/// Size is the number of top-level declarations plus every statement, spec,
/// struct field and interface method nested in them. Imports don't count.
pub struct GoExtractor {
    language: Language,
}

impl GoExtractor {
    /// Creates a new Go extractor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_go::LANGUAGE.into(),
        }
    }

    fn text<'a>(node: &Node<'_>, src: &'a [u8]) -> &'a str {
        node.utf8_text(src).unwrap_or("")
    }

    fn extract_package(node: &Node<'_>, src: &[u8]) -> Option<PackageInfo> {
        let mut cursor = node.walk();
        let ident = node
            .named_children(&mut cursor)
            .find(|child| child.kind() == "package_identifier")?;
        Some(PackageInfo {
            line: node.start_position().row + 1,
            name: Self::text(&ident, src).to_owned(),
        })
    }

    /// Collects `import_spec` nodes from an `import_declaration`, single or grouped.
    fn extract_imports(node: &Node<'_>, src: &[u8], out: &mut Vec<ImportInfo>) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "import_spec" => {
                    if let Some(path) = child.child_by_field_name("path") {
                        out.push(ImportInfo {
                            line: child.start_position().row + 1,
                            path: Self::text(&path, src)
                                .trim_matches(|c| c == '"' || c == '`')
                                .to_owned(),
                        });
                    }
                }
                "import_spec_list" => Self::extract_imports(&child, src, out),
                _ => {}
            }
        }
    }

    fn is_sized(kind: &str) -> bool {
        kind.ends_with("_statement") || SIZED_KINDS.contains(&kind)
    }

    fn nested_size(node: &Node<'_>) -> u64 {
        let mut size = 0;
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if Self::is_sized(child.kind()) {
                size += 1;
            }
            size += Self::nested_size(&child);
        }
        size
    }
}

impl Default for GoExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageExtractor for GoExtractor {
    fn language_id(&self) -> &'static str {
        LANGUAGE_ID
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".go"]
    }

    fn accepts(&self, file_name: &str) -> bool {
        self.extensions().iter().any(|ext| file_name.ends_with(ext))
            && !file_name.ends_with("_test.go")
    }

    fn analyze(&self, source: &str) -> Result<FileAnalysis, ExtractError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ExtractError::Language {
                language: LANGUAGE_ID,
                message: e.to_string(),
            })?;

        let src = source.as_bytes();
        let tree = parser.parse(src, None).ok_or(ExtractError::Parse {
            language: LANGUAGE_ID,
        })?;
        let root = tree.root_node();

        let mut result = FileAnalysis {
            file_path: PathBuf::new(),
            has_errors: root.has_error(),
            ..FileAnalysis::default()
        };

        let mut cursor = root.walk();
        for node in root.named_children(&mut cursor) {
            match node.kind() {
                "package_clause" => {
                    result.package = Self::extract_package(&node, src);
                }
                "import_declaration" => {
                    Self::extract_imports(&node, src, &mut result.imports);
                }
                "comment" => {}
                _ => {
                    result.size += 1 + Self::nested_size(&node);
                }
            }
        }

        Ok(result)
    }
}
