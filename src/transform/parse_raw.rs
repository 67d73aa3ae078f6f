//! Reparse raw HTML into real elements.

use crate::model::hast::Node;
use crate::parser::parse_html_fragment;
use crate::render::visitor::walk;
use crate::render::{to_html, PipelineStats};

use super::HtmlTransform;

/// HTML stage turning raw nodes into elements.
///
/// The whole tree is serialized and parsed again so raw fragments that
/// open and close elements across several nodes nest correctly. Trees
/// without raw nodes are left untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseRaw;

impl ParseRaw {
    /// Create the stage.
    pub fn new() -> Self {
        Self
    }
}

impl HtmlTransform for ParseRaw {
    fn name(&self) -> &'static str {
        "parse-raw"
    }

    fn transform(&self, tree: &mut Node, stats: &mut PipelineStats) {
        let mut raw_nodes = 0;
        walk(tree, |node, _depth| {
            if matches!(node, Node::Raw { .. }) {
                raw_nodes += 1;
            }
        });
        if raw_nodes == 0 {
            return;
        }

        let html = to_html(tree);
        *tree = Node::root(parse_html_fragment(&html));
        log::debug!("Reparsed tree with {} raw nodes", raw_nodes);
        stats.add_raw_nodes(raw_nodes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::hast::Element;

    #[test]
    fn test_raw_becomes_elements() {
        let mut tree = Node::root(vec![
            Node::raw(r#"<p align="center">"#),
            Node::text("\n"),
            Element::new("em")
                .with_children(vec![Node::text("hi")])
                .into(),
            Node::raw("</p>"),
        ]);
        let mut stats = PipelineStats::new();
        ParseRaw.transform(&mut tree, &mut stats);

        assert_eq!(stats.raw_nodes_parsed, 2);
        assert!(!tree.contains_raw());
        let p = tree.children().unwrap()[0].as_element().unwrap();
        assert_eq!(p.tag_name, "p");
        assert_eq!(p.properties.get("align"), Some("center"));
        assert_eq!(to_html(&tree), "<p align=\"center\">\n<em>hi</em></p>");
    }

    #[test]
    fn test_tree_without_raw_is_untouched() {
        let mut tree = Node::root(vec![Element::new("p")
            .with_children(vec![Node::text("a")])
            .into()]);
        let before = tree.clone();
        ParseRaw.transform(&mut tree, &mut PipelineStats::new());
        assert_eq!(tree, before);
    }
}
