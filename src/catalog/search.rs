//! Sidebar search: prune the tree to leaves whose title matches a query.

use super::{Group, Node};
use std::borrow::Cow;

/// Filter `nodes` down to matching leaves and the groups that contain them.
///
/// Matching is a case-insensitive substring test against leaf titles. A
/// group survives only when at least one descendant leaf matches, and then
/// it keeps only the surviving descendants; a group's own title never keeps
/// it alive. A blank query returns the input slice untouched.
///
/// # Examples
///
/// ```
/// use mastery::catalog::{Group, Leaf, Node, filter};
///
/// let tree: Vec<Node> = vec![Group::new(
///     "devops",
///     "DevOps",
///     vec![
///         Leaf::new("k8s", "Kubernetes Guide", "k8s.md").into(),
///         Leaf::new("docker", "Docker Guide", "docker.md").into(),
///     ],
/// )
/// .into()];
///
/// let found = filter(&tree, "kubernetes");
/// assert_eq!(found.len(), 1);
/// ```
pub fn filter<'a>(nodes: &'a [Node], query: &str) -> Cow<'a, [Node]> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Cow::Borrowed(nodes);
    }
    Cow::Owned(prune(nodes, &needle))
}

fn prune(nodes: &[Node], needle: &str) -> Vec<Node> {
    nodes
        .iter()
        .filter_map(|node| match node {
            Node::Leaf(leaf) => leaf
                .title
                .to_lowercase()
                .contains(needle)
                .then(|| node.clone()),
            Node::Group(group) => {
                let children = prune(&group.children, needle);
                (!children.is_empty()).then(|| {
                    Node::Group(Group {
                        id: group.id.clone(),
                        title: group.title.clone(),
                        children,
                    })
                })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Leaf, flatten};
    use proptest::prelude::*;

    fn tree() -> Vec<Node> {
        vec![
            Leaf::new("readme", "Welcome", "README.md").into(),
            Group::new(
                "devops",
                "DevOps Guides",
                vec![
                    Leaf::new("k8s", "Kubernetes Guide", "k8s.md").into(),
                    Leaf::new("docker", "Docker Guide", "docker.md").into(),
                ],
            )
            .into(),
            Group::new(
                "outer",
                "Outer",
                vec![
                    Group::new(
                        "inner",
                        "Inner",
                        vec![Leaf::new("deep", "Deep Kubernetes Notes", "deep.md").into()],
                    )
                    .into(),
                ],
            )
            .into(),
        ]
    }

    fn leaf_ids(nodes: &[Node]) -> Vec<String> {
        flatten(nodes).iter().map(|leaf| leaf.id.clone()).collect()
    }

    #[test]
    fn test_empty_query_is_identity() {
        let tree = tree();
        let result = filter(&tree, "");
        assert!(matches!(result, Cow::Borrowed(_)));
        assert!(std::ptr::eq(result.as_ptr(), tree.as_ptr()));

        let blank = filter(&tree, "   \t");
        assert!(matches!(blank, Cow::Borrowed(_)));
        assert_eq!(&*blank, &tree[..]);
    }

    #[test]
    fn test_ancestor_inclusion() {
        let tree = tree();
        let result = filter(&tree, "kubernetes");

        assert_eq!(result.len(), 2);
        match &result[0] {
            Node::Group(group) => {
                assert_eq!(group.id, "devops");
                assert_eq!(group.children.len(), 1);
                assert_eq!(group.children[0].id(), "k8s");
            }
            Node::Leaf(_) => panic!("expected devops group"),
        }
        assert_eq!(leaf_ids(&result), vec!["k8s", "deep"]);
    }

    #[test]
    fn test_nested_ancestors_kept() {
        let tree = tree();
        let result = filter(&tree, "deep");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id(), "outer");
        match &result[0] {
            Node::Group(outer) => assert_eq!(outer.children[0].id(), "inner"),
            Node::Leaf(_) => panic!("expected group"),
        }
    }

    #[test]
    fn test_case_insensitive() {
        let tree = tree();
        assert_eq!(filter(&tree, "DOCKER"), filter(&tree, "docker"));
        assert_eq!(leaf_ids(&filter(&tree, "DoCkEr")), vec!["docker"]);
    }

    #[test]
    fn test_group_title_alone_does_not_match() {
        let tree = tree();
        assert!(filter(&tree, "devops").is_empty());
        assert!(filter(&tree, "inner").is_empty());
    }

    #[test]
    fn test_query_is_trimmed() {
        let tree = tree();
        assert_eq!(leaf_ids(&filter(&tree, "  welcome ")), vec!["readme"]);
    }

    #[test]
    fn test_no_matches() {
        let tree = tree();
        assert!(filter(&tree, "terraform").is_empty());
    }

    proptest! {
        #[test]
        fn prop_case_insensitive(query in "[a-zA-Z ]{0,8}") {
            let tree = tree();
            let upper = filter(&tree, &query.to_uppercase()).into_owned();
            let lower = filter(&tree, &query.to_lowercase()).into_owned();
            prop_assert_eq!(upper, lower);
        }

        #[test]
        fn prop_every_surviving_leaf_matches(query in "[a-z]{1,4}") {
            let tree = tree();
            let result = filter(&tree, &query);
            for leaf in flatten(&result) {
                prop_assert!(leaf.title.to_lowercase().contains(&query));
            }
        }
    }
}
