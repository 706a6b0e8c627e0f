//! Sequential traversal over catalog leaves.
//!
//! Prev/next navigation walks the leaves of the *active* tree, so callers
//! that filter the sidebar must flatten the filtered tree rather than the
//! full catalog.

use super::{Leaf, Node};

/// Neighbours of a leaf in traversal order.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Neighbors<'a> {
    pub prev: Option<&'a Leaf>,
    pub next: Option<&'a Leaf>,
}

/// Collect leaves depth-first in authored order.
///
/// Groups contribute only their descendants; they never appear in the
/// result themselves.
pub fn flatten(nodes: &[Node]) -> Vec<&Leaf> {
    let mut leaves = Vec::new();

    fn walk<'a>(nodes: &'a [Node], leaves: &mut Vec<&'a Leaf>) {
        for node in nodes {
            match node {
                Node::Group(group) => walk(&group.children, leaves),
                Node::Leaf(leaf) => leaves.push(leaf),
            }
        }
    }

    walk(nodes, &mut leaves);
    leaves
}

/// Find the leaves immediately before and after `id`.
///
/// There is no wraparound: the first leaf has no `prev` and the last has
/// no `next`. An id that is not a leaf in `leaves` has neither.
pub fn neighbors<'a>(leaves: &[&'a Leaf], id: &str) -> Neighbors<'a> {
    let Some(index) = leaves.iter().position(|leaf| leaf.id == id) else {
        return Neighbors::default();
    };

    Neighbors {
        prev: index.checked_sub(1).map(|i| leaves[i]),
        next: leaves.get(index + 1).copied(),
    }
}
