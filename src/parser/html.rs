//! HTML parsing for raw markup embedded in markdown.

use html5ever::tendril::TendrilSink;
use html5ever::{local_name, ns, parse_fragment, ParseOpts, QualName};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::model::hast::{Element, Node, Properties};

/// Parse an HTML fragment into HTML tree nodes.
///
/// The fragment is parsed as the content of a `body` element, so
/// whitespace and comments between blocks stay where they were.
pub fn parse_html_fragment(html: &str) -> Vec<Node> {
    let context = QualName::new(None, ns!(html), local_name!("body"));
    let dom = parse_fragment(RcDom::default(), ParseOpts::default(), context, Vec::new(), false)
        .one(html);

    // Fragment parsing puts the parsed nodes under a synthetic `html` root.
    let document = dom.document.children.borrow();
    let nodes = document
        .iter()
        .filter(|child| is_element(child, "html"))
        .flat_map(|root| {
            root.children
                .borrow()
                .iter()
                .filter_map(convert)
                .collect::<Vec<_>>()
        })
        .collect();
    nodes
}

fn is_element(handle: &Handle, tag: &str) -> bool {
    matches!(&handle.data, NodeData::Element { name, .. } if &*name.local == tag)
}

fn convert(handle: &Handle) -> Option<Node> {
    match &handle.data {
        NodeData::Element { name, attrs, .. } => {
            let properties: Properties = attrs
                .borrow()
                .iter()
                .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                .collect();
            let children = handle.children.borrow().iter().filter_map(convert).collect();
            Some(Node::Element(Element {
                tag_name: name.local.to_string(),
                properties,
                children,
            }))
        }
        NodeData::Text { contents } => Some(Node::text(contents.borrow().to_string())),
        NodeData::Comment { contents } => Some(Node::Comment {
            value: contents.to_string(),
        }),
        NodeData::Document | NodeData::Doctype { .. } | NodeData::ProcessingInstruction { .. } => {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_elements_and_attributes() {
        let nodes = parse_html_fragment(r#"<p align="center"><img src="a.png" alt="A"></p>"#);
        assert_eq!(nodes.len(), 1);

        let p = nodes[0].as_element().unwrap();
        assert_eq!(p.tag_name, "p");
        assert_eq!(p.properties.get("align"), Some("center"));

        let img = p.children[0].as_element().unwrap();
        assert_eq!(img.tag_name, "img");
        assert_eq!(img.properties.get("src"), Some("a.png"));
    }

    #[test]
    fn test_parse_text_and_comments() {
        let nodes = parse_html_fragment("<p>a &amp; b</p><!-- note -->");
        assert_eq!(nodes[0].text_content(), "a & b");
        assert_eq!(
            nodes[1],
            Node::Comment {
                value: " note ".into()
            }
        );
    }

    #[test]
    fn test_whitespace_after_leading_comment_is_kept() {
        let nodes = parse_html_fragment("<!-- top -->\n<ul><li>a</li></ul>");
        assert_eq!(nodes.len(), 3);
        assert_eq!(
            nodes[0],
            Node::Comment {
                value: " top ".into()
            }
        );
        assert_eq!(nodes[1], Node::text("\n"));
        assert_eq!(nodes[2].as_element().map(|e| e.tag_name.as_str()), Some("ul"));
    }

    #[test]
    fn test_document_tags_are_dropped() {
        let nodes = parse_html_fragment("<html><body><p>x</p></body></html>");
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].text_content(), "x");
    }
}
