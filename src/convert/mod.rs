//! Converters that turn raw source files into markdown bodies.
//!
//! Every content file ends up as markdown: notebooks are flattened cell by
//! cell, code listings are wrapped in a fenced block, and markdown passes
//! through (optionally without its front matter).

pub mod markdown;
pub mod notebook;
pub mod source;

pub use markdown::{HeadingAnchor, headings, strip_frontmatter};
pub use notebook::notebook_to_markdown;
pub use source::{language_for_extension, wrap_source};

use serde::Serialize;
use std::path::Path;
use thiserror::Error;

/// Errors raised by converters that parse structured input.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("{0}")]
    Notebook(#[from] serde_json::Error),
}

/// Knobs shared by all converters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Fence tag for notebook code cells when no language is declared
    pub default_language: String,
    /// Drop a leading YAML front matter block from markdown files
    pub strip_frontmatter: bool,
    /// Render notebook cell outputs after their code block
    pub render_outputs: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            default_language: "python".to_string(),
            strip_frontmatter: false,
            render_outputs: true,
        }
    }
}

/// Something a converter chose not to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "item", rename_all = "lowercase")]
pub enum Skipped {
    /// A notebook cell of an unrecognized type, or one that is malformed
    Cell { index: usize, kind: String },
    /// A code-cell output with no text representation
    Output { cell: usize, kind: String },
}

/// Markdown produced for one source, plus the items that were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversion {
    pub markdown: String,
    pub skipped: Vec<Skipped>,
}

impl Conversion {
    pub fn text(markdown: impl Into<String>) -> Self {
        Self {
            markdown: markdown.into(),
            skipped: Vec::new(),
        }
    }
}

/// How a source file is turned into markdown, decided by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Notebook,
    /// Source listing with its fence language
    Code(&'static str),
    /// Anything else, taken as already-formatted markdown
    Markdown,
}

impl SourceKind {
    pub fn from_path(path: &Path) -> Self {
        let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
            return SourceKind::Markdown;
        };
        if ext.eq_ignore_ascii_case("ipynb") {
            return SourceKind::Notebook;
        }
        match language_for_extension(ext) {
            Some(language) => SourceKind::Code(language),
            None => SourceKind::Markdown,
        }
    }
}

/// Convert raw file text according to its kind.
///
/// # Errors
///
/// Only notebooks can fail, when the text is not a valid notebook document.
pub fn convert(
    kind: SourceKind,
    raw: &str,
    options: &ConvertOptions,
) -> Result<Conversion, ConvertError> {
    match kind {
        SourceKind::Notebook => {
            let parsed = notebook::parse(raw)?;
            Ok(notebook::render(&parsed, options))
        }
        SourceKind::Code(language) => Ok(Conversion::text(source::fence(raw, language))),
        SourceKind::Markdown if options.strip_frontmatter => {
            Ok(Conversion::text(strip_frontmatter(raw)))
        }
        SourceKind::Markdown => Ok(Conversion::text(raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_kind_dispatch() {
        assert_eq!(
            SourceKind::from_path(Path::new("infra/db.ipynb")),
            SourceKind::Notebook
        );
        assert_eq!(
            SourceKind::from_path(Path::new("guide.py")),
            SourceKind::Code("python")
        );
        assert_eq!(
            SourceKind::from_path(Path::new("guide.ts")),
            SourceKind::Code("typescript")
        );
        assert_eq!(
            SourceKind::from_path(Path::new("guide.js")),
            SourceKind::Code("javascript")
        );
        assert_eq!(
            SourceKind::from_path(Path::new("README.md")),
            SourceKind::Markdown
        );
        assert_eq!(
            SourceKind::from_path(Path::new("LICENSE")),
            SourceKind::Markdown
        );
        assert_eq!(
            SourceKind::from_path(Path::new("notes.txt")),
            SourceKind::Markdown
        );
    }

    #[test]
    fn test_markdown_passes_through_verbatim() {
        let raw = "---\ntitle: x\n---\n# Body\n";
        let out = convert(SourceKind::Markdown, raw, &ConvertOptions::default()).unwrap();
        assert_eq!(out.markdown, raw);
        assert!(out.skipped.is_empty());
    }

    #[test]
    fn test_markdown_frontmatter_stripped_when_enabled() {
        let options = ConvertOptions {
            strip_frontmatter: true,
            ..ConvertOptions::default()
        };
        let out = convert(SourceKind::Markdown, "---\ntitle: x\n---\n# Body\n", &options).unwrap();
        assert_eq!(out.markdown, "# Body\n");
    }

    #[test]
    fn test_code_is_fenced() {
        let out = convert(
            SourceKind::Code("python"),
            "print(1)",
            &ConvertOptions::default(),
        )
        .unwrap();
        assert!(out.markdown.contains("```python\nprint(1)\n```"));
    }

    #[test]
    fn test_bad_notebook_is_an_error() {
        let result = convert(SourceKind::Notebook, "{not json", &ConvertOptions::default());
        assert!(matches!(result, Err(ConvertError::Notebook(_))));
    }

    #[test]
    fn test_skipped_serializes_with_tag() {
        let skipped = Skipped::Cell {
            index: 2,
            kind: "raw".to_string(),
        };
        let json = serde_json::to_value(&skipped).unwrap();
        assert_eq!(json["item"], "cell");
        assert_eq!(json["index"], 2);
        assert_eq!(json["kind"], "raw");
    }
}
