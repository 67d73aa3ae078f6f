//! Generic tree walking for the markdown and HTML trees.
//!
//! Every transform in this crate is a depth-first walk with a callback that
//! decides, per node, whether to descend, keep, drop or replace it.
//!
//! # Example
//!
//! ```
//! use symbolist_site::model::mdast::{Node, NodeKind};
//! use symbolist_site::render::visitor::{walk_mut, VisitorAction};
//!
//! let mut tree = Node::root(vec![
//!     Node::paragraph(vec![Node::text("a"), Node::image("x.png", "x")]),
//! ]);
//!
//! walk_mut(&mut tree, |node, _ctx| {
//!     if node.kind() == NodeKind::Image {
//!         VisitorAction::Remove
//!     } else {
//!         VisitorAction::Continue
//!     }
//! });
//!
//! assert_eq!(tree.plain_text(), "a");
//! ```

/// A tree whose nodes own their children.
pub trait TreeNode: Sized {
    /// Children of a parent node, `None` for leaves.
    fn children(&self) -> Option<&[Self]>;

    /// Mutable children of a parent node, `None` for leaves.
    fn children_mut(&mut self) -> Option<&mut Vec<Self>>;
}

/// Action returned by the walk callback to control traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisitorAction<N> {
    /// Keep the node and descend into its children.
    Continue,

    /// Keep the node but do not descend into it.
    Skip,

    /// Drop the node and its subtree.
    Remove,

    /// Splice these nodes in place of the visited one. Replacements are
    /// not visited.
    Replace(Vec<N>),
}

/// Position of the visited node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitContext {
    /// Distance from the root; children of the root have depth 1.
    pub depth: usize,
    /// Index among the parent's current children.
    pub index: usize,
}

/// Walk the descendants of `root` depth-first, pre-order, applying the
/// callback's action to each. The root itself is not visited.
pub fn walk_mut<N, F>(root: &mut N, mut visitor: F)
where
    N: TreeNode,
    F: FnMut(&mut N, VisitContext) -> VisitorAction<N>,
{
    walk_children(root, 1, &mut visitor);
}

fn walk_children<N, F>(parent: &mut N, depth: usize, visitor: &mut F)
where
    N: TreeNode,
    F: FnMut(&mut N, VisitContext) -> VisitorAction<N>,
{
    let Some(children) = parent.children_mut() else {
        return;
    };

    let mut index = 0;
    while index < children.len() {
        let ctx = VisitContext { depth, index };
        match visitor(&mut children[index], ctx) {
            VisitorAction::Continue => {
                walk_children(&mut children[index], depth + 1, visitor);
                index += 1;
            }
            VisitorAction::Skip => index += 1,
            VisitorAction::Remove => {
                children.remove(index);
            }
            VisitorAction::Replace(nodes) => {
                let count = nodes.len();
                children.splice(index..=index, nodes);
                index += count;
            }
        }
    }
}

/// Visit `root` and all descendants read-only, pre-order.
pub fn walk<N, F>(root: &N, mut visitor: F)
where
    N: TreeNode,
    F: FnMut(&N, usize),
{
    fn inner<N: TreeNode, F: FnMut(&N, usize)>(node: &N, depth: usize, visitor: &mut F) {
        visitor(node, depth);
        if let Some(children) = node.children() {
            for child in children {
                inner(child, depth + 1, visitor);
            }
        }
    }
    inner(root, 0, &mut visitor);
}

/// Find the first node in pre-order (root included) matching the predicate.
pub fn find_first<'a, N, P>(root: &'a N, predicate: P) -> Option<&'a N>
where
    N: TreeNode,
    P: Fn(&N) -> bool,
{
    let path = find_path(root, &predicate)?;
    let mut node = root;
    for index in path {
        node = node.children()?.get(index)?;
    }
    Some(node)
}

/// Take the first node in pre-order (root included) matching the predicate
/// out of `root`, discarding everything else.
pub fn take_first<N, P>(root: N, predicate: P) -> Option<N>
where
    N: TreeNode,
    P: Fn(&N) -> bool,
{
    let path = find_path(&root, &predicate)?;
    let mut node = root;
    for index in path {
        let children = std::mem::take(node.children_mut()?);
        node = children.into_iter().nth(index)?;
    }
    Some(node)
}

/// Child indices leading from `root` to the first matching node.
fn find_path<N, P>(root: &N, predicate: &P) -> Option<Vec<usize>>
where
    N: TreeNode,
    P: Fn(&N) -> bool,
{
    if predicate(root) {
        return Some(Vec::new());
    }
    for (index, child) in root.children()?.iter().enumerate() {
        if let Some(mut path) = find_path(child, predicate) {
            path.insert(0, index);
            return Some(path);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::mdast::{Node, NodeKind};

    fn sample() -> Node {
        Node::root(vec![
            Node::heading(1, vec![Node::text("Title")]),
            Node::paragraph(vec![Node::text("intro")]),
            Node::list(
                false,
                vec![Node::list_item(vec![Node::paragraph(vec![Node::text(
                    "one",
                )])])],
            ),
        ])
    }

    #[test]
    fn test_walk_mut_depths() {
        let mut tree = sample();
        let mut seen = Vec::new();
        walk_mut(&mut tree, |node, ctx| {
            seen.push((node.kind(), ctx.depth));
            VisitorAction::Continue
        });
        assert_eq!(seen[0], (NodeKind::Heading, 1));
        assert_eq!(seen[1], (NodeKind::Text, 2));
        assert!(seen.contains(&(NodeKind::ListItem, 2)));
        assert!(seen.contains(&(NodeKind::Text, 4)));
    }

    #[test]
    fn test_skip_does_not_descend() {
        let mut tree = sample();
        let mut count = 0;
        walk_mut(&mut tree, |_, _| {
            count += 1;
            VisitorAction::Skip
        });
        assert_eq!(count, 3);
    }

    #[test]
    fn test_replace_splices_without_revisiting() {
        let mut tree = Node::root(vec![Node::text("a"), Node::text("b")]);
        let mut visits = 0;
        walk_mut(&mut tree, |node, _| {
            visits += 1;
            match node {
                Node::Text { value } if value == "a" => {
                    VisitorAction::Replace(vec![Node::text("a1"), Node::text("a2")])
                }
                _ => VisitorAction::Continue,
            }
        });
        assert_eq!(visits, 2);
        assert_eq!(tree.children().unwrap().len(), 3);
        assert_eq!(tree.plain_text(), "a1a2b");
    }

    #[test]
    fn test_find_first_includes_root() {
        let tree = sample();
        let found = find_first(&tree, |n| n.kind() == NodeKind::Root).unwrap();
        assert_eq!(found.kind(), NodeKind::Root);
    }

    #[test]
    fn test_take_first_returns_subtree() {
        let found = take_first(sample(), |n| n.kind() == NodeKind::List).unwrap();
        assert_eq!(found.kind(), NodeKind::List);
        assert_eq!(found.plain_text(), "one");
    }

    #[test]
    fn test_take_first_no_match() {
        assert!(take_first(sample(), |n| n.kind() == NodeKind::Table).is_none());
    }
}
