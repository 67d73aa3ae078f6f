//! Markdown syntax tree.
//!
//! Node kinds follow the mdast vocabulary so the tree serializes to the
//! same JSON shape (`{"type": "heading", "depth": 2, "children": [...]}`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::render::visitor::TreeNode;

/// A node of the markdown syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    /// Document root
    Root {
        /// Top-level blocks
        children: Vec<Node>,
    },

    /// A paragraph
    Paragraph {
        /// Inline content
        children: Vec<Node>,
    },

    /// An ATX or setext heading
    Heading {
        /// Heading depth (1-6)
        depth: u8,
        /// Inline content
        children: Vec<Node>,
    },

    /// A thematic break (`---`)
    ThematicBreak,

    /// A block quote
    Blockquote {
        /// Quoted blocks
        children: Vec<Node>,
    },

    /// An ordered or unordered list
    List {
        /// Whether the list is numbered
        ordered: bool,
        /// Start number of an ordered list
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start: Option<u32>,
        /// Whether items are separated by blank lines
        spread: bool,
        /// List items
        children: Vec<Node>,
    },

    /// A list item
    ListItem {
        /// Whether the item's blocks are separated by blank lines
        spread: bool,
        /// Item blocks
        children: Vec<Node>,
    },

    /// A fenced or indented code block
    Code {
        /// Language from the info string
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lang: Option<String>,
        /// Rest of the info string after the language
        #[serde(default, skip_serializing_if = "Option::is_none")]
        meta: Option<String>,
        /// Code without its final line ending
        value: String,
    },

    /// Raw HTML, block or inline
    Html {
        /// HTML source
        value: String,
    },

    /// A GFM table; the first row is the header
    Table {
        /// Table rows
        children: Vec<Node>,
    },

    /// A table row
    TableRow {
        /// Row cells
        children: Vec<Node>,
    },

    /// A table cell
    TableCell {
        /// Inline content
        children: Vec<Node>,
    },

    /// Literal text
    Text {
        /// Text content
        value: String,
    },

    /// Emphasized content
    Emphasis {
        /// Inline content
        children: Vec<Node>,
    },

    /// Strongly emphasized content
    Strong {
        /// Inline content
        children: Vec<Node>,
    },

    /// Struck-through content
    Delete {
        /// Inline content
        children: Vec<Node>,
    },

    /// Inline code span
    InlineCode {
        /// Code content
        value: String,
    },

    /// A hard line break
    Break,

    /// A hyperlink
    Link {
        /// Link destination
        url: String,
        /// Link title
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        /// Link content
        children: Vec<Node>,
    },

    /// An image
    Image {
        /// Image source
        url: String,
        /// Image title
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        /// Alternative text
        alt: String,
    },
}

impl Node {
    /// Create a root node.
    pub fn root(children: Vec<Node>) -> Self {
        Node::Root { children }
    }

    /// Create a paragraph.
    pub fn paragraph(children: Vec<Node>) -> Self {
        Node::Paragraph { children }
    }

    /// Create a heading; the depth is clamped to 1-6.
    pub fn heading(depth: u8, children: Vec<Node>) -> Self {
        Node::Heading {
            depth: depth.clamp(1, 6),
            children,
        }
    }

    /// Create a tight list.
    pub fn list(ordered: bool, children: Vec<Node>) -> Self {
        Node::List {
            ordered,
            start: ordered.then_some(1),
            spread: false,
            children,
        }
    }

    /// Create a tight list item.
    pub fn list_item(children: Vec<Node>) -> Self {
        Node::ListItem {
            spread: false,
            children,
        }
    }

    /// Create a code block.
    pub fn code(lang: Option<&str>, value: impl Into<String>) -> Self {
        Node::Code {
            lang: lang.map(str::to_string),
            meta: None,
            value: value.into(),
        }
    }

    /// Create a text node.
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text {
            value: value.into(),
        }
    }

    /// Create an image.
    pub fn image(url: impl Into<String>, alt: impl Into<String>) -> Self {
        Node::Image {
            url: url.into(),
            title: None,
            alt: alt.into(),
        }
    }

    /// Get the kind of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Root { .. } => NodeKind::Root,
            Node::Paragraph { .. } => NodeKind::Paragraph,
            Node::Heading { .. } => NodeKind::Heading,
            Node::ThematicBreak => NodeKind::ThematicBreak,
            Node::Blockquote { .. } => NodeKind::Blockquote,
            Node::List { .. } => NodeKind::List,
            Node::ListItem { .. } => NodeKind::ListItem,
            Node::Code { .. } => NodeKind::Code,
            Node::Html { .. } => NodeKind::Html,
            Node::Table { .. } => NodeKind::Table,
            Node::TableRow { .. } => NodeKind::TableRow,
            Node::TableCell { .. } => NodeKind::TableCell,
            Node::Text { .. } => NodeKind::Text,
            Node::Emphasis { .. } => NodeKind::Emphasis,
            Node::Strong { .. } => NodeKind::Strong,
            Node::Delete { .. } => NodeKind::Delete,
            Node::InlineCode { .. } => NodeKind::InlineCode,
            Node::Break => NodeKind::Break,
            Node::Link { .. } => NodeKind::Link,
            Node::Image { .. } => NodeKind::Image,
        }
    }

    /// Get the heading depth, if this node has one.
    pub fn depth(&self) -> Option<u8> {
        match self {
            Node::Heading { depth, .. } => Some(*depth),
            _ => None,
        }
    }

    /// Get the children of a parent node.
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Root { children }
            | Node::Paragraph { children }
            | Node::Heading { children, .. }
            | Node::Blockquote { children }
            | Node::List { children, .. }
            | Node::ListItem { children, .. }
            | Node::Table { children }
            | Node::TableRow { children }
            | Node::TableCell { children }
            | Node::Emphasis { children }
            | Node::Strong { children }
            | Node::Delete { children }
            | Node::Link { children, .. } => Some(children),
            Node::ThematicBreak
            | Node::Code { .. }
            | Node::Html { .. }
            | Node::Text { .. }
            | Node::InlineCode { .. }
            | Node::Break
            | Node::Image { .. } => None,
        }
    }

    /// Get mutable access to the children of a parent node.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Root { children }
            | Node::Paragraph { children }
            | Node::Heading { children, .. }
            | Node::Blockquote { children }
            | Node::List { children, .. }
            | Node::ListItem { children, .. }
            | Node::Table { children }
            | Node::TableRow { children }
            | Node::TableCell { children }
            | Node::Emphasis { children }
            | Node::Strong { children }
            | Node::Delete { children }
            | Node::Link { children, .. } => Some(children),
            Node::ThematicBreak
            | Node::Code { .. }
            | Node::Html { .. }
            | Node::Text { .. }
            | Node::InlineCode { .. }
            | Node::Break
            | Node::Image { .. } => None,
        }
    }

    /// Check whether this is a root without children.
    pub fn is_empty_root(&self) -> bool {
        matches!(self, Node::Root { children } if children.is_empty())
    }

    /// Concatenated text of this node and its descendants.
    pub fn plain_text(&self) -> String {
        match self {
            Node::Text { value } | Node::InlineCode { value } | Node::Code { value, .. } => {
                value.clone()
            }
            Node::Image { alt, .. } => alt.clone(),
            Node::Break => "\n".to_string(),
            _ => self
                .children()
                .map(|children| children.iter().map(Node::plain_text).collect())
                .unwrap_or_default(),
        }
    }
}

impl Default for Node {
    fn default() -> Self {
        Node::root(Vec::new())
    }
}

impl TreeNode for Node {
    fn children(&self) -> Option<&[Self]> {
        Node::children(self)
    }

    fn children_mut(&mut self) -> Option<&mut Vec<Self>> {
        Node::children_mut(self)
    }
}

/// Payload-free discriminant of [`Node`], named after the mdast types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Root,
    Paragraph,
    Heading,
    ThematicBreak,
    Blockquote,
    List,
    ListItem,
    Code,
    Html,
    Table,
    TableRow,
    TableCell,
    Text,
    Emphasis,
    Strong,
    Delete,
    InlineCode,
    Break,
    Link,
    Image,
}

impl NodeKind {
    /// All node kinds, in declaration order.
    pub const ALL: [NodeKind; 20] = [
        NodeKind::Root,
        NodeKind::Paragraph,
        NodeKind::Heading,
        NodeKind::ThematicBreak,
        NodeKind::Blockquote,
        NodeKind::List,
        NodeKind::ListItem,
        NodeKind::Code,
        NodeKind::Html,
        NodeKind::Table,
        NodeKind::TableRow,
        NodeKind::TableCell,
        NodeKind::Text,
        NodeKind::Emphasis,
        NodeKind::Strong,
        NodeKind::Delete,
        NodeKind::InlineCode,
        NodeKind::Break,
        NodeKind::Link,
        NodeKind::Image,
    ];

    /// The mdast type name.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Root => "root",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Heading => "heading",
            NodeKind::ThematicBreak => "thematicBreak",
            NodeKind::Blockquote => "blockquote",
            NodeKind::List => "list",
            NodeKind::ListItem => "listItem",
            NodeKind::Code => "code",
            NodeKind::Html => "html",
            NodeKind::Table => "table",
            NodeKind::TableRow => "tableRow",
            NodeKind::TableCell => "tableCell",
            NodeKind::Text => "text",
            NodeKind::Emphasis => "emphasis",
            NodeKind::Strong => "strong",
            NodeKind::Delete => "delete",
            NodeKind::InlineCode => "inlineCode",
            NodeKind::Break => "break",
            NodeKind::Link => "link",
            NodeKind::Image => "image",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::UnknownNodeKind(s.to_string()))
    }
}

/// Predicate over markdown nodes: a node kind plus an optional heading depth.
///
/// Nodes without a depth never match a test that requires one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Test {
    /// Required node kind
    pub kind: NodeKind,
    /// Required heading depth
    pub depth: Option<u8>,
}

impl Test {
    /// Match any node of the given kind.
    pub const fn kind(kind: NodeKind) -> Self {
        Self { kind, depth: None }
    }

    /// Match headings of the given depth.
    pub const fn heading(depth: u8) -> Self {
        Self {
            kind: NodeKind::Heading,
            depth: Some(depth),
        }
    }

    /// Require a depth in addition to the kind.
    pub const fn with_depth(mut self, depth: u8) -> Self {
        self.depth = Some(depth);
        self
    }

    /// Check whether a node satisfies this test.
    pub fn matches(&self, node: &Node) -> bool {
        if node.kind() != self.kind {
            return false;
        }
        match self.depth {
            Some(depth) => node.depth() == Some(depth),
            None => true,
        }
    }
}

impl From<NodeKind> for Test {
    fn from(kind: NodeKind) -> Self {
        Test::kind(kind)
    }
}
