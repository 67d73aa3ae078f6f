//! Remove top-level headings by depth.

use crate::error::{Error, Result};
use crate::model::mdast::{Node, Test};
use crate::render::visitor::{walk_mut, VisitorAction};
use crate::render::PipelineStats;

use super::MarkdownTransform;

/// Remove every top-level child of `tree` matching one of `exclude`.
/// Nested nodes are never inspected. Returns the number removed.
pub fn filter_headings(tree: &mut Node, exclude: &[Test]) -> u32 {
    if exclude.is_empty() {
        return 0;
    }

    let mut removed = 0;
    walk_mut(tree, |node, _ctx| {
        if exclude.iter().any(|test| test.matches(node)) {
            removed += 1;
            VisitorAction::Remove
        } else {
            VisitorAction::Skip
        }
    });
    removed
}

/// Markdown stage removing top-level headings of the excluded depths.
#[derive(Debug, Clone, Default)]
pub struct FilterHeadings {
    exclude: Vec<Test>,
}

impl FilterHeadings {
    /// Exclude headings of the given depths.
    ///
    /// Fails on depths outside 1-6.
    pub fn new(depths: impl IntoIterator<Item = u8>) -> Result<Self> {
        let exclude = depths
            .into_iter()
            .map(|depth| {
                if (1..=6).contains(&depth) {
                    Ok(Test::heading(depth))
                } else {
                    Err(Error::InvalidHeadingDepth(depth))
                }
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { exclude })
    }

    /// Exclude nodes matching arbitrary tests.
    pub fn with_tests(exclude: Vec<Test>) -> Self {
        Self { exclude }
    }

    /// The exclusion tests.
    pub fn exclude(&self) -> &[Test] {
        &self.exclude
    }
}

impl MarkdownTransform for FilterHeadings {
    fn name(&self) -> &'static str {
        "filter-headings"
    }

    fn transform(&self, tree: &mut Node, stats: &mut PipelineStats) {
        let removed = filter_headings(tree, &self.exclude);
        log::debug!("Removed {} top-level headings", removed);
        for _ in 0..removed {
            stats.add_heading_removed();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::mdast::NodeKind;

    fn sample() -> Node {
        Node::root(vec![
            Node::heading(1, vec![Node::text("Symbolist")]),
            Node::paragraph(vec![Node::text("intro")]),
            Node::Blockquote {
                children: vec![Node::heading(1, vec![Node::text("quoted")])],
            },
            Node::heading(2, vec![Node::text("Usage")]),
            Node::heading(1, vec![Node::text("Again")]),
        ])
    }

    #[test]
    fn test_removes_top_level_depth_one() {
        let mut tree = sample();
        let removed = filter_headings(&mut tree, &[Test::heading(1)]);
        assert_eq!(removed, 2);

        let kinds: Vec<NodeKind> = tree.children().unwrap().iter().map(Node::kind).collect();
        assert_eq!(
            kinds,
            vec![NodeKind::Paragraph, NodeKind::Blockquote, NodeKind::Heading]
        );
        // The heading inside the blockquote stays.
        assert_eq!(tree.children().unwrap()[1].plain_text(), "quoted");
    }

    #[test]
    fn test_empty_exclusion_is_identity() {
        let mut tree = sample();
        assert_eq!(filter_headings(&mut tree, &[]), 0);
        assert_eq!(tree, sample());
    }

    #[test]
    fn test_multiple_depths() {
        let stage = FilterHeadings::new([1, 2]).unwrap();
        let mut tree = sample();
        let mut stats = PipelineStats::new();
        stage.transform(&mut tree, &mut stats);
        assert_eq!(stats.headings_removed, 3);
        assert_eq!(tree.children().unwrap().len(), 2);
    }

    #[test]
    fn test_invalid_depth() {
        let err = FilterHeadings::new([0]).unwrap_err();
        assert!(matches!(err, Error::InvalidHeadingDepth(0)));
    }
}
