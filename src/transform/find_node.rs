//! Extract the first node of a given kind.

use crate::model::mdast::{Node, NodeKind, Test};
use crate::render::visitor::take_first;
use crate::render::PipelineStats;

use super::MarkdownTransform;

/// Replace the tree with the first node (pre-order, root included) that
/// matches `test`. An empty root is returned when nothing matches.
pub fn find_node(tree: Node, test: &Test) -> Node {
    take_first(tree, |node| test.matches(node)).unwrap_or_default()
}

/// Markdown stage keeping only the first node of a kind.
#[derive(Debug, Clone)]
pub struct FindNode {
    test: Test,
}

impl FindNode {
    /// Find the first node of the given kind.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            test: Test::kind(kind),
        }
    }

    /// Find the first node matching a test.
    pub fn with_test(test: Test) -> Self {
        Self { test }
    }

    /// The test this stage searches with.
    pub fn test(&self) -> &Test {
        &self.test
    }
}

impl MarkdownTransform for FindNode {
    fn name(&self) -> &'static str {
        "find-node"
    }

    fn transform(&self, tree: &mut Node, stats: &mut PipelineStats) {
        let found = find_node(std::mem::take(tree), &self.test);
        let matched = !found.is_empty_root() || self.test.kind == NodeKind::Root;
        if !matched {
            log::debug!("No {} node found; result is empty", self.test.kind);
        }
        stats.set_node_found(matched);
        *tree = found;
    }
}
