//! # mastery
//!
//! Content catalog and navigation for a collection of learning guides.
//!
//! Guides are markdown files, Jupyter notebooks, or source-code listings.
//! This library turns each into a markdown body, arranges them in a
//! navigable tree, and computes the reading order across that tree.
//!
//! ## Example
//!
//! ```rust
//! use mastery::catalog::{Catalog, flatten, neighbors};
//!
//! let catalog = Catalog::builtin();
//! let leaves = flatten(catalog.nodes());
//! let around = neighbors(&leaves, "readme");
//!
//! assert!(around.prev.is_none());
//! assert_eq!(around.next.map(|leaf| leaf.id.as_str()), Some("start-here"));
//! ```

/// The guide tree: model, compiled-in catalog, traversal, and search.
pub mod catalog;

/// Converters from source files to markdown.
pub mod convert;

/// Resolution of catalog ids into documents.
pub mod resolve;

/// Configuration module for persisting user preferences.
///
/// Content location, conversion options, and sidebar layout.
pub mod config;

pub mod logging;

/// TUI module for the interactive browser.
pub mod tui;

pub use catalog::{Catalog, CatalogError, Group, Leaf, Node};
pub use config::Config;
pub use resolve::{Document, ResolveError, Resolver, SourceIssue};
