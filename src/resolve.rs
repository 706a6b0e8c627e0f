//! Turn a catalog id into a fully populated [`Document`].
//!
//! Resolution reads the leaf's source file from the content root and
//! dispatches on its extension. A missing or unreadable file never fails
//! the call: the document carries a placeholder body instead and records
//! the condition in [`Document::issue`]. The only error is an unknown id.

use crate::catalog::{Catalog, Leaf, Node};
use crate::convert::{self, Conversion, ConvertOptions, Skipped, SourceKind, notebook};
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Content '{0}' not found")]
    NotFound(String),
}

/// A recovered failure while reading or converting a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceIssue {
    /// The file does not exist under the content root
    Missing,
    /// The file exists but could not be read
    Unreadable(String),
    /// The file was read but could not be parsed
    Malformed(String),
}

/// A catalog entry with its body resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_time: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    /// Markdown body; `None` for groups
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<Skipped>,
    #[serde(skip)]
    pub issue: Option<SourceIssue>,
}

impl Document {
    fn group(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            path: None,
            category: None,
            read_time: None,
            badge: None,
            content: None,
            skipped: Vec::new(),
            issue: None,
        }
    }

    fn leaf(leaf: &Leaf, body: Conversion, issue: Option<SourceIssue>) -> Self {
        Self {
            id: leaf.id.clone(),
            title: leaf.title.clone(),
            description: leaf.meta.description.clone(),
            path: Some(leaf.source_ref.clone()),
            category: leaf.meta.category.clone(),
            read_time: leaf.meta.read_time,
            badge: leaf.meta.badge.clone(),
            content: Some(body.markdown),
            skipped: body.skipped,
            issue,
        }
    }

    pub fn is_group(&self) -> bool {
        self.content.is_none()
    }
}

/// Resolves catalog ids against a content root directory.
#[derive(Debug, Clone)]
pub struct Resolver {
    root: PathBuf,
    options: ConvertOptions,
}

impl Resolver {
    pub fn new(root: impl Into<PathBuf>, options: ConvertOptions) -> Self {
        Self {
            root: root.into(),
            options,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Look up `id` and load its content.
    ///
    /// Every call re-reads the source file; nothing is cached.
    ///
    /// # Errors
    ///
    /// [`ResolveError::NotFound`] when no node in the catalog has this id.
    pub fn resolve(&self, catalog: &Catalog, id: &str) -> Result<Document, ResolveError> {
        match catalog.find(id) {
            Some(Node::Group(group)) => Ok(Document::group(&group.id, &group.title)),
            Some(Node::Leaf(leaf)) => Ok(self.load_leaf(leaf)),
            None => Err(ResolveError::NotFound(id.to_string())),
        }
    }

    fn load_leaf(&self, leaf: &Leaf) -> Document {
        let full = self.root.join(&leaf.source_ref);
        let shown = leaf.source_ref.display();

        let raw = match std::fs::read_to_string(&full) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                warn!(id = %leaf.id, path = %full.display(), "content file not found");
                let body = format!(
                    "# Content Not Found\n\nThe file at `{shown}` could not be found.\n\nPath: {}",
                    full.display()
                );
                return Document::leaf(leaf, Conversion::text(body), Some(SourceIssue::Missing));
            }
            Err(err) => {
                warn!(id = %leaf.id, path = %full.display(), error = %err, "failed to read content file");
                let body = format!(
                    "# Error Loading Content\n\nThere was an error loading the content: {err}\n\nPath: {shown}"
                );
                return Document::leaf(
                    leaf,
                    Conversion::text(body),
                    Some(SourceIssue::Unreadable(err.to_string())),
                );
            }
        };

        let kind = SourceKind::from_path(&leaf.source_ref);
        debug!(id = %leaf.id, ?kind, "converting content");

        match convert::convert(kind, &raw, &self.options) {
            Ok(body) => {
                for item in &body.skipped {
                    debug!(id = %leaf.id, ?item, "skipped while converting");
                }
                Document::leaf(leaf, body, None)
            }
            Err(err) => {
                warn!(id = %leaf.id, path = %full.display(), error = %err, "malformed source");
                let body = notebook::parse_failure_body(&err);
                Document::leaf(
                    leaf,
                    Conversion::text(body),
                    Some(SourceIssue::Malformed(err.to_string())),
                )
            }
        }
    }
}
