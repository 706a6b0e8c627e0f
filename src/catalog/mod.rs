//! Navigation catalog: the tree of guide groups and content leaves.
//!
//! The catalog is an immutable value. The compiled-in tree is built once
//! behind [`Catalog::builtin`]; custom trees come from [`Catalog::new`] or
//! from a TOML file via [`Catalog::load`]. Both paths validate that every
//! id is unique across the whole tree.

mod builtin;
pub mod nav;
pub mod search;

pub use nav::{Neighbors, flatten, neighbors};
pub use search::filter;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

/// Errors raised while building or loading a catalog.
///
/// These all indicate an authoring mistake in the catalog itself, so they
/// are reported loudly rather than recovered.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("duplicate catalog id `{0}`")]
    DuplicateId(String),

    #[error("catalog node `{0}` has both children and a path")]
    AmbiguousNode(String),

    #[error("catalog group `{0}` carries leaf metadata")]
    GroupMetadata(String),

    #[error("failed to read catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A catalog entry: either a navigation group or a piece of content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNode", into = "RawNode")]
pub enum Node {
    Group(Group),
    Leaf(Leaf),
}

/// A navigation grouping node. Has no renderable body of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub id: String,
    pub title: String,
    /// Children in display order
    pub children: Vec<Node>,
}

/// A content node referencing exactly one source file.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    pub id: String,
    pub title: String,
    /// Path relative to the content root
    pub source_ref: PathBuf,
    pub meta: Meta,
}

/// Display-only metadata carried by leaves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Meta {
    pub description: Option<String>,
    pub category: Option<String>,
    pub badge: Option<String>,
    /// Estimated reading time in minutes
    pub read_time: Option<u32>,
}

impl Node {
    pub fn id(&self) -> &str {
        match self {
            Node::Group(group) => &group.id,
            Node::Leaf(leaf) => &leaf.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Node::Group(group) => &group.title,
            Node::Leaf(leaf) => &leaf.title,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Node::Group(_))
    }
}

impl Group {
    pub fn new(id: impl Into<String>, title: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            children,
        }
    }
}

impl Leaf {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        source_ref: impl Into<PathBuf>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            source_ref: source_ref.into(),
            meta: Meta::default(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.meta.description = Some(description.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.meta.category = Some(category.into());
        self
    }

    pub fn badge(mut self, badge: impl Into<String>) -> Self {
        self.meta.badge = Some(badge.into());
        self
    }

    pub fn read_time(mut self, minutes: u32) -> Self {
        self.meta.read_time = Some(minutes);
        self
    }
}

impl From<Group> for Node {
    fn from(group: Group) -> Self {
        Node::Group(group)
    }
}

impl From<Leaf> for Node {
    fn from(leaf: Leaf) -> Self {
        Node::Leaf(leaf)
    }
}

/// Flat wire shape shared by the JSON listing and TOML catalog files.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNode {
    id: String,
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    read_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    badge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    children: Option<Vec<Node>>,
}

impl TryFrom<RawNode> for Node {
    type Error = CatalogError;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        match (raw.path, raw.children) {
            (Some(_), Some(_)) => Err(CatalogError::AmbiguousNode(raw.id)),
            (Some(source_ref), None) => Ok(Node::Leaf(Leaf {
                id: raw.id,
                title: raw.title,
                source_ref,
                meta: Meta {
                    description: raw.description,
                    category: raw.category,
                    badge: raw.badge,
                    read_time: raw.read_time,
                },
            })),
            (None, children) => {
                let has_meta = raw.description.is_some()
                    || raw.category.is_some()
                    || raw.badge.is_some()
                    || raw.read_time.is_some();
                if has_meta {
                    return Err(CatalogError::GroupMetadata(raw.id));
                }
                Ok(Node::Group(Group {
                    id: raw.id,
                    title: raw.title,
                    children: children.unwrap_or_default(),
                }))
            }
        }
    }
}

impl From<Node> for RawNode {
    fn from(node: Node) -> Self {
        match node {
            Node::Group(group) => RawNode {
                id: group.id,
                title: group.title,
                description: None,
                path: None,
                category: None,
                read_time: None,
                badge: None,
                children: Some(group.children),
            },
            Node::Leaf(leaf) => RawNode {
                id: leaf.id,
                title: leaf.title,
                description: leaf.meta.description,
                path: Some(leaf.source_ref),
                category: leaf.meta.category,
                read_time: leaf.meta.read_time,
                badge: leaf.meta.badge,
                children: None,
            },
        }
    }
}

/// On-disk catalog layout: a list of `[[items]]` tables.
#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    items: Vec<Node>,
}

/// The validated navigation tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    nodes: Vec<Node>,
}

static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| {
    Catalog::new(builtin::nodes()).expect("compiled-in catalog must have unique ids")
});

impl Catalog {
    /// Build a catalog from top-level nodes, rejecting duplicate ids.
    pub fn new(nodes: Vec<Node>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        check_unique(&nodes, &mut seen)?;
        Ok(Self { nodes })
    }

    /// The compiled-in guide catalog.
    ///
    /// Built on first access and shared for the life of the process. The
    /// tree is a pure literal, so construction performs no I/O.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Parse a catalog from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] for malformed TOML or invalid nodes,
    /// and [`CatalogError::DuplicateId`] when an id repeats.
    pub fn from_toml_str(text: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(text)?;
        Self::new(file.items)
    }

    /// Read and parse a catalog file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Top-level nodes in display order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Depth-first lookup by id; the first match wins.
    pub fn find(&self, id: &str) -> Option<&Node> {
        find_in(&self.nodes, id)
    }

    /// All leaves in traversal order.
    pub fn leaves(&self) -> Vec<&Leaf> {
        flatten(&self.nodes)
    }
}

fn find_in<'a>(nodes: &'a [Node], id: &str) -> Option<&'a Node> {
    for node in nodes {
        if node.id() == id {
            return Some(node);
        }
        if let Node::Group(group) = node
            && let Some(found) = find_in(&group.children, id)
        {
            return Some(found);
        }
    }
    None
}

fn check_unique<'a>(nodes: &'a [Node], seen: &mut HashSet<&'a str>) -> Result<(), CatalogError> {
    for node in nodes {
        if !seen.insert(node.id()) {
            return Err(CatalogError::DuplicateId(node.id().to_string()));
        }
        if let Node::Group(group) = node {
            check_unique(&group.children, seen)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Node> {
        vec![
            Leaf::new("intro", "Intro", "README.md").into(),
            Group::new(
                "devops",
                "DevOps",
                vec![
                    Leaf::new("docker", "Docker Guide", "guides/docker.md").into(),
                    Leaf::new("k8s", "Kubernetes Guide", "guides/k8s.md")
                        .category("devops")
                        .read_time(120)
                        .into(),
                ],
            )
            .into(),
        ]
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = Catalog::builtin();
        assert!(!catalog.nodes().is_empty());
        assert!(catalog.find("readme").is_some());
        assert!(catalog.find("kubernetes-guide").is_some());
    }

    #[test]
    fn test_builtin_is_memoized() {
        assert!(std::ptr::eq(Catalog::builtin(), Catalog::builtin()));
    }

    #[test]
    fn test_find_nested() {
        let catalog = Catalog::new(sample()).unwrap();
        let node = catalog.find("k8s").unwrap();
        assert_eq!(node.title(), "Kubernetes Guide");
        assert!(catalog.find("devops").unwrap().is_group());
        assert!(catalog.find("missing").is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut nodes = sample();
        nodes.push(Leaf::new("docker", "Another Docker", "x.md").into());
        let err = Catalog::new(nodes).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(ref id) if id == "docker"));
    }

    #[test]
    fn test_duplicate_between_group_and_leaf() {
        let nodes = vec![
            Group::new("dup", "Group", vec![]).into(),
            Leaf::new("dup", "Leaf", "a.md").into(),
        ];
        assert!(Catalog::new(nodes).is_err());
    }

    #[test]
    fn test_from_toml() {
        let text = r#"
[[items]]
id = "readme"
title = "Welcome"
path = "README.md"
badge = "Start Here"

[[items]]
id = "devops"
title = "DevOps"

[[items.children]]
id = "docker"
title = "Docker Zero to Hero"
path = "guides/Docker.md"
readTime = 90
"#;
        let catalog = Catalog::from_toml_str(text).unwrap();
        assert_eq!(catalog.nodes().len(), 2);
        match catalog.find("docker").unwrap() {
            Node::Leaf(leaf) => {
                assert_eq!(leaf.meta.read_time, Some(90));
                assert_eq!(leaf.source_ref, PathBuf::from("guides/Docker.md"));
            }
            Node::Group(_) => panic!("expected leaf"),
        }
    }

    #[test]
    fn test_toml_node_with_path_and_children_rejected() {
        let text = r#"
[[items]]
id = "both"
title = "Both"
path = "a.md"
children = []
"#;
        let err = Catalog::from_toml_str(text).unwrap_err();
        assert!(err.to_string().contains("both children and a path"));
    }

    #[test]
    fn test_toml_group_with_metadata_rejected() {
        let text = r#"
[[items]]
id = "group"
title = "Group"
category = "devops"
"#;
        let err = Catalog::from_toml_str(text).unwrap_err();
        assert!(err.to_string().contains("leaf metadata"));
    }

    #[test]
    fn test_node_without_path_or_children_is_empty_group() {
        let text = r#"
[[items]]
id = "empty"
title = "Empty"
"#;
        let catalog = Catalog::from_toml_str(text).unwrap();
        match &catalog.nodes()[0] {
            Node::Group(group) => assert!(group.children.is_empty()),
            Node::Leaf(_) => panic!("expected group"),
        }
    }

    #[test]
    fn test_listing_json_shape() {
        let catalog = Catalog::new(sample()).unwrap();
        let json = serde_json::to_value(&catalog).unwrap();
        let items = json.as_array().unwrap();
        assert_eq!(items[0]["path"], "README.md");
        assert!(items[0].get("content").is_none());
        assert!(items[0].get("children").is_none());
        assert_eq!(items[1]["children"][1]["readTime"], 120);
        assert!(items[1].get("path").is_none());
    }

    #[test]
    fn test_listing_json_round_trips_into_nodes() {
        let catalog = Catalog::new(sample()).unwrap();
        let json = serde_json::to_string(&catalog).unwrap();
        let nodes: Vec<Node> = serde_json::from_str(&json).unwrap();
        assert_eq!(Catalog::new(nodes).unwrap(), catalog);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Catalog::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
