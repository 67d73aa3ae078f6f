//! Markdown tree to HTML tree conversion.
//!
//! Follows the mdast-to-hast conventions so the serialized output matches
//! what remark/rehype produce: block siblings are separated by `"\n"` text
//! nodes, tight list items unwrap their paragraphs, and code blocks carry a
//! `language-*` class.
//!
//! # Example
//!
//! ```
//! use symbolist_site::convert::{to_hast, ToHastOptions};
//! use symbolist_site::parser::parse_markdown;
//! use symbolist_site::render::to_html;
//!
//! let mdast = parse_markdown("- one\n- two\n");
//! let hast = to_hast(&mdast, &ToHastOptions::default());
//! assert_eq!(to_html(&hast), "<ul>\n<li>one</li>\n<li>two</li>\n</ul>");
//! ```

use crate::model::hast::{self, Element};
use crate::model::mdast::Node;

/// Options for the markdown to HTML tree conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToHastOptions {
    /// Keep raw HTML from the markdown source as raw nodes instead of
    /// dropping it.
    pub allow_dangerous_html: bool,
}

impl ToHastOptions {
    /// Create options with defaults (raw HTML dropped).
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable raw HTML passthrough.
    pub fn with_dangerous_html(mut self, allow: bool) -> Self {
        self.allow_dangerous_html = allow;
        self
    }
}

/// Convert a markdown tree into an HTML tree.
///
/// A markdown root becomes an HTML root; any other node becomes a root
/// holding that node's HTML rendering.
pub fn to_hast(tree: &Node, options: &ToHastOptions) -> hast::Node {
    let converter = Converter { options: *options };
    match tree {
        Node::Root { children } => hast::Node::root(wrap(converter.all(children), false)),
        other => hast::Node::root(converter.one(other, None)),
    }
}

struct Converter {
    options: ToHastOptions,
}

impl Converter {
    fn all(&self, nodes: &[Node]) -> Vec<hast::Node> {
        nodes.iter().flat_map(|node| self.one(node, None)).collect()
    }

    /// Convert one node. `list_loose` is set when the node is a list item.
    fn one(&self, node: &Node, list_loose: Option<bool>) -> Vec<hast::Node> {
        match node {
            Node::Root { children } => self.all(children),

            Node::Paragraph { children } => {
                vec![element("p", self.all(children))]
            }

            Node::Heading { depth, children } => {
                vec![element(&format!("h{}", depth), self.all(children))]
            }

            Node::ThematicBreak => vec![element("hr", Vec::new())],

            Node::Blockquote { children } => {
                vec![element("blockquote", wrap(self.all(children), true))]
            }

            Node::List {
                ordered,
                start,
                children,
                ..
            } => {
                let loose = list_is_loose(node);
                let items = children
                    .iter()
                    .flat_map(|item| self.one(item, Some(loose)))
                    .collect();
                let mut list = Element::new(if *ordered { "ol" } else { "ul" });
                if let Some(start) = start.filter(|start| *ordered && *start != 1) {
                    list.properties.set("start", start.to_string());
                }
                vec![list.with_children(wrap(items, true)).into()]
            }

            Node::ListItem { spread, children } => {
                let loose = list_loose.unwrap_or(*spread || children.len() > 1);
                vec![element("li", self.list_item_children(children, loose))]
            }

            Node::Code { lang, value, .. } => {
                let mut code = Element::new("code");
                if let Some(lang) = lang {
                    code.properties.add_class(&format!("language-{}", lang));
                }
                let text = if value.is_empty() {
                    String::new()
                } else {
                    format!("{}\n", value)
                };
                let code = code.with_children(vec![hast::Node::text(text)]);
                vec![element("pre", vec![code.into()])]
            }

            Node::Html { value } => {
                if self.options.allow_dangerous_html {
                    vec![hast::Node::raw(value.clone())]
                } else {
                    Vec::new()
                }
            }

            Node::Table { children } => vec![self.table(children)],

            Node::TableRow { children } => vec![self.table_row(children, false)],

            Node::TableCell { children } => vec![element("td", self.all(children))],

            Node::Text { value } => vec![hast::Node::text(trim_lines(value))],

            Node::Emphasis { children } => vec![element("em", self.all(children))],

            Node::Strong { children } => vec![element("strong", self.all(children))],

            Node::Delete { children } => vec![element("del", self.all(children))],

            Node::InlineCode { value } => {
                let value = value.replace("\r\n", " ").replace(['\r', '\n'], " ");
                vec![element("code", vec![hast::Node::text(value)])]
            }

            Node::Break => vec![element("br", Vec::new()), hast::Node::text("\n")],

            Node::Link {
                url,
                title,
                children,
            } => {
                let mut link = Element::new("a").with_property("href", url.clone());
                if let Some(title) = title {
                    link.properties.set("title", title.clone());
                }
                vec![link.with_children(self.all(children)).into()]
            }

            Node::Image { url, title, alt } => {
                let mut image = Element::new("img")
                    .with_property("src", url.clone())
                    .with_property("alt", alt.clone());
                if let Some(title) = title {
                    image.properties.set("title", title.clone());
                }
                vec![image.into()]
            }
        }
    }

    fn list_item_children(&self, children: &[Node], loose: bool) -> Vec<hast::Node> {
        let results = self.all(children);
        let mut output = Vec::with_capacity(results.len() * 2);

        for (index, child) in results.iter().enumerate() {
            let is_paragraph = child.is_element("p");
            if loose || index != 0 || !is_paragraph {
                output.push(hast::Node::text("\n"));
            }
            match child {
                hast::Node::Element(p) if is_paragraph && !loose => {
                    output.extend(p.children.iter().cloned());
                }
                _ => output.push(child.clone()),
            }
        }

        if let Some(tail) = results.last() {
            if loose || !tail.is_element("p") {
                output.push(hast::Node::text("\n"));
            }
        }

        output
    }

    fn table(&self, rows: &[Node]) -> hast::Node {
        let mut sections = Vec::new();
        if let Some((head, body)) = rows.split_first() {
            let Node::TableRow { children } = head else {
                return element("table", Vec::new());
            };
            sections.push(element(
                "thead",
                wrap(vec![self.table_row(children, true)], true),
            ));

            if !body.is_empty() {
                let body_rows = body
                    .iter()
                    .filter_map(|row| match row {
                        Node::TableRow { children } => Some(self.table_row(children, false)),
                        _ => None,
                    })
                    .collect();
                sections.push(element("tbody", wrap(body_rows, true)));
            }
        }
        element("table", wrap(sections, true))
    }

    fn table_row(&self, cells: &[Node], header: bool) -> hast::Node {
        let tag = if header { "th" } else { "td" };
        let cells = cells
            .iter()
            .map(|cell| element(tag, cell.children().map(|c| self.all(c)).unwrap_or_default()))
            .collect();
        element("tr", wrap(cells, true))
    }
}

fn element(tag: &str, children: Vec<hast::Node>) -> hast::Node {
    Element::new(tag).with_children(children).into()
}

/// Join nodes with line endings; `loose` also pads the start and end.
fn wrap(nodes: Vec<hast::Node>, loose: bool) -> Vec<hast::Node> {
    let mut output = Vec::with_capacity(nodes.len() * 2 + 1);
    if loose {
        output.push(hast::Node::text("\n"));
    }
    let has_nodes = !nodes.is_empty();
    for (index, node) in nodes.into_iter().enumerate() {
        if index > 0 {
            output.push(hast::Node::text("\n"));
        }
        output.push(node);
    }
    if loose && has_nodes {
        output.push(hast::Node::text("\n"));
    }
    output
}

fn list_is_loose(list: &Node) -> bool {
    match list {
        Node::List {
            spread, children, ..
        } => {
            *spread
                || children.iter().any(|item| match item {
                    Node::ListItem { spread, .. } => *spread,
                    _ => false,
                })
        }
        _ => false,
    }
}

/// Strip spaces and tabs around line endings.
fn trim_lines(value: &str) -> String {
    if !value.contains('\n') {
        return value.to_string();
    }
    let lines: Vec<&str> = value.split('\n').collect();
    let last = lines.len() - 1;
    lines
        .iter()
        .enumerate()
        .map(|(index, line)| {
            let line = if index > 0 {
                line.trim_start_matches([' ', '\t'])
            } else {
                line
            };
            if index < last {
                line.trim_end_matches([' ', '\t'])
            } else {
                line
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
