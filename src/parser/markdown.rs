//! Markdown parser built on comrak.
//!
//! comrak produces an arena-allocated CommonMark tree; this module lowers it
//! into the owned [`mdast::Node`] tree the pipelines operate on.

use std::path::Path;

use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{parse_document, Arena, ComrakOptions};

use crate::error::{Error, Result};
use crate::model::mdast::Node;

use super::options::ParseOptions;

/// Markdown document parser.
#[derive(Debug, Clone, Default)]
pub struct MarkdownParser {
    options: ParseOptions,
}

impl MarkdownParser {
    /// Create a parser with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Parse markdown text into a tree rooted at a `root` node.
    pub fn parse(&self, source: &str) -> Node {
        let arena = Arena::new();
        let options = self.comrak_options();
        let root = parse_document(&arena, source, &options);

        let tree = Node::root(convert_children(root));
        log::debug!(
            "Parsed {} bytes into {} top-level nodes",
            source.len(),
            tree.children().map_or(0, <[Node]>::len)
        );
        tree
    }

    /// Read and parse a markdown file.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Node> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| Error::SourceRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.parse(&source))
    }

    fn comrak_options(&self) -> ComrakOptions<'static> {
        let mut options = ComrakOptions::default();
        options.extension.table = self.options.tables;
        options.extension.strikethrough = self.options.strikethrough;
        options.extension.autolink = self.options.autolink;
        if self.options.front_matter {
            options.extension.front_matter_delimiter = Some("---".to_string());
        }
        options
    }
}

/// Parse markdown text with default options.
pub fn parse_markdown(source: &str) -> Node {
    MarkdownParser::new().parse(source)
}

fn convert_children<'a>(node: &'a AstNode<'a>) -> Vec<Node> {
    let mut children = Vec::new();
    for child in node.children() {
        convert_node(child, &mut children);
    }
    merge_adjacent_text(children)
}

fn convert_node<'a>(node: &'a AstNode<'a>, out: &mut Vec<Node>) {
    let data = node.data.borrow();

    let converted = match &data.value {
        NodeValue::Document => Node::root(convert_children(node)),

        NodeValue::FrontMatter(_) => return,

        NodeValue::BlockQuote => Node::Blockquote {
            children: convert_children(node),
        },

        NodeValue::List(list) => {
            let ordered = matches!(list.list_type, ListType::Ordered);
            let spread = !list.tight;
            let children = convert_children(node)
                .into_iter()
                .map(|item| match item {
                    Node::ListItem { children, .. } => Node::ListItem { spread, children },
                    other => other,
                })
                .collect();
            Node::List {
                ordered,
                start: if ordered {
                    u32::try_from(list.start).ok()
                } else {
                    None
                },
                spread,
                children,
            }
        }

        NodeValue::Item(_) => Node::ListItem {
            spread: false,
            children: convert_children(node),
        },

        NodeValue::CodeBlock(code) => {
            let (lang, meta) = split_info(&code.info);
            Node::Code {
                lang,
                meta,
                value: strip_final_newline(&code.literal).to_string(),
            }
        }

        NodeValue::HtmlBlock(html) => Node::Html {
            value: strip_final_newline(&html.literal).to_string(),
        },

        NodeValue::Paragraph => Node::Paragraph {
            children: convert_children(node),
        },

        NodeValue::Heading(heading) => Node::Heading {
            depth: heading.level,
            children: convert_children(node),
        },

        NodeValue::ThematicBreak => Node::ThematicBreak,

        NodeValue::Table(..) => Node::Table {
            children: convert_children(node),
        },

        NodeValue::TableRow(..) => Node::TableRow {
            children: convert_children(node),
        },

        NodeValue::TableCell => Node::TableCell {
            children: convert_children(node),
        },

        NodeValue::Text(text) => Node::text(text.clone()),

        NodeValue::SoftBreak => Node::text("\n"),

        NodeValue::LineBreak => Node::Break,

        NodeValue::Code(code) => Node::InlineCode {
            value: code.literal.clone(),
        },

        NodeValue::HtmlInline(html) => Node::Html {
            value: html.clone(),
        },

        NodeValue::Emph => Node::Emphasis {
            children: convert_children(node),
        },

        NodeValue::Strong => Node::Strong {
            children: convert_children(node),
        },

        NodeValue::Strikethrough => Node::Delete {
            children: convert_children(node),
        },

        NodeValue::Link(link) => Node::Link {
            url: link.url.clone(),
            title: non_empty(&link.title),
            children: convert_children(node),
        },

        NodeValue::Image(link) => Node::Image {
            url: link.url.clone(),
            title: non_empty(&link.title),
            alt: convert_children(node).iter().map(Node::plain_text).collect(),
        },

        _ => {
            // Extension nodes without a counterpart keep their content.
            log::debug!("Flattening unsupported markdown node");
            out.extend(convert_children(node));
            return;
        }
    };

    out.push(converted);
}

/// Split a fenced code info string into language and meta.
fn split_info(info: &str) -> (Option<String>, Option<String>) {
    let info = info.trim();
    if info.is_empty() {
        return (None, None);
    }
    match info.split_once(char::is_whitespace) {
        Some((lang, meta)) => (Some(lang.to_string()), non_empty(meta.trim())),
        None => (Some(info.to_string()), None),
    }
}

fn strip_final_newline(value: &str) -> &str {
    value
        .strip_suffix("\r\n")
        .or_else(|| value.strip_suffix('\n'))
        .unwrap_or(value)
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Join runs of text nodes into one, the way soft breaks read in mdast.
fn merge_adjacent_text(nodes: Vec<Node>) -> Vec<Node> {
    let mut merged: Vec<Node> = Vec::with_capacity(nodes.len());
    for node in nodes {
        if let Node::Text { value } = &node {
            if let Some(Node::Text { value: previous }) = merged.last_mut() {
                previous.push_str(value);
                continue;
            }
        }
        merged.push(node);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::mdast::NodeKind;

    fn top_level_kinds(tree: &Node) -> Vec<NodeKind> {
        tree.children().unwrap().iter().map(Node::kind).collect()
    }

    #[test]
    fn test_parse_blocks() {
        let tree = parse_markdown("# Title\n\nSome text.\n\n- a\n- b\n");
        assert_eq!(
            top_level_kinds(&tree),
            vec![NodeKind::Heading, NodeKind::Paragraph, NodeKind::List]
        );
        assert_eq!(tree.children().unwrap()[0].depth(), Some(1));
    }

    #[test]
    fn test_soft_breaks_merge_into_text() {
        let tree = parse_markdown("one\ntwo\n");
        let para = &tree.children().unwrap()[0];
        assert_eq!(para.children().unwrap(), &[Node::text("one\ntwo")]);
    }

    #[test]
    fn test_code_block_info_and_value() {
        let tree = parse_markdown("```js title=\"x\"\nconst a = 1\n```\n");
        assert_eq!(
            tree.children().unwrap()[0],
            Node::Code {
                lang: Some("js".into()),
                meta: Some("title=\"x\"".into()),
                value: "const a = 1".into(),
            }
        );
    }

    #[test]
    fn test_tight_and_loose_lists() {
        let tight = parse_markdown("- a\n- b\n");
        let loose = parse_markdown("- a\n\n- b\n");
        assert!(matches!(
            tight.children().unwrap()[0],
            Node::List { spread: false, .. }
        ));
        assert!(matches!(
            loose.children().unwrap()[0],
            Node::List { spread: true, .. }
        ));
    }

    #[test]
    fn test_ordered_list_start() {
        let tree = parse_markdown("3. three\n4. four\n");
        assert!(matches!(
            tree.children().unwrap()[0],
            Node::List {
                ordered: true,
                start: Some(3),
                ..
            }
        ));
    }

    #[test]
    fn test_image_alt_and_html() {
        let tree = parse_markdown("![An *icon*](icon.png)\n\n<p align=\"center\">hi</p>\n");
        let para = &tree.children().unwrap()[0];
        assert_eq!(
            para.children().unwrap()[0],
            Node::Image {
                url: "icon.png".into(),
                title: None,
                alt: "An icon".into(),
            }
        );
        assert_eq!(
            tree.children().unwrap()[1],
            Node::Html {
                value: "<p align=\"center\">hi</p>".into()
            }
        );
    }

    #[test]
    fn test_front_matter_is_dropped() {
        let tree = parse_markdown("---\ntitle: x\n---\n\n# Hello\n");
        assert_eq!(top_level_kinds(&tree), vec![NodeKind::Heading]);
    }

    #[test]
    fn test_parse_file_missing() {
        let err = MarkdownParser::new()
            .parse_file("/definitely/not/here/README.md")
            .unwrap_err();
        assert!(matches!(err, Error::SourceRead { .. }));
    }

    #[test]
    fn test_split_info() {
        assert_eq!(split_info(""), (None, None));
        assert_eq!(split_info("rust"), (Some("rust".into()), None));
    }
}
