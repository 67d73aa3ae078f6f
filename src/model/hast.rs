//! HTML syntax tree.

use serde::{Deserialize, Serialize};

use crate::render::visitor::TreeNode;

/// A node of the HTML syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    /// Fragment root
    Root {
        /// Top-level nodes
        children: Vec<Node>,
    },

    /// An element
    Element(Element),

    /// Text content
    Text {
        /// Text, unescaped
        value: String,
    },

    /// An HTML comment
    Comment {
        /// Comment body
        value: String,
    },

    /// HTML passed through verbatim
    Raw {
        /// HTML source
        value: String,
    },
}

impl Node {
    /// Create a root node.
    pub fn root(children: Vec<Node>) -> Self {
        Node::Root { children }
    }

    /// Create a text node.
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text {
            value: value.into(),
        }
    }

    /// Create a raw node.
    pub fn raw(value: impl Into<String>) -> Self {
        Node::Raw {
            value: value.into(),
        }
    }

    /// Get the element, if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Get mutable access to the element, if this node is one.
    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Check whether this node is an element with the given tag.
    pub fn is_element(&self, tag: &str) -> bool {
        matches!(self, Node::Element(element) if element.tag_name == tag)
    }

    /// Get the children of a parent node.
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Root { children } => Some(children),
            Node::Element(element) => Some(&element.children),
            Node::Text { .. } | Node::Comment { .. } | Node::Raw { .. } => None,
        }
    }

    /// Get mutable access to the children of a parent node.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Root { children } => Some(children),
            Node::Element(element) => Some(&mut element.children),
            Node::Text { .. } | Node::Comment { .. } | Node::Raw { .. } => None,
        }
    }

    /// Concatenated text of this node and its descendants.
    ///
    /// Raw and comment nodes contribute nothing.
    pub fn text_content(&self) -> String {
        match self {
            Node::Text { value } => value.clone(),
            Node::Comment { .. } | Node::Raw { .. } => String::new(),
            Node::Root { children } => children.iter().map(Node::text_content).collect(),
            Node::Element(element) => element.text_content(),
        }
    }

    /// Check whether this node or any descendant is a raw node.
    pub fn contains_raw(&self) -> bool {
        match self {
            Node::Raw { .. } => true,
            _ => self
                .children()
                .is_some_and(|children| children.iter().any(Node::contains_raw)),
        }
    }
}

impl Default for Node {
    fn default() -> Self {
        Node::root(Vec::new())
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
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

/// An HTML element.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Element {
    /// Lowercase tag name
    pub tag_name: String,
    /// Attributes in insertion order
    pub properties: Properties,
    /// Child nodes
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element without attributes or children.
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            properties: Properties::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute.
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.set(name, value);
        self
    }

    /// Add a class name.
    pub fn with_class(mut self, class: &str) -> Self {
        self.properties.add_class(class);
        self
    }

    /// Set the children.
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Check whether this is a heading element (`h1`-`h6`).
    pub fn heading_rank(&self) -> Option<u8> {
        match self.tag_name.as_str() {
            "h1" => Some(1),
            "h2" => Some(2),
            "h3" => Some(3),
            "h4" => Some(4),
            "h5" => Some(5),
            "h6" => Some(6),
            _ => None,
        }
    }

    /// Concatenated text of the element's descendants.
    pub fn text_content(&self) -> String {
        self.children.iter().map(Node::text_content).collect()
    }
}

/// Element attributes, kept in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties(Vec<(String, String)>);

impl Properties {
    /// Create an empty attribute list.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Get an attribute value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Check whether an attribute is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Set an attribute, replacing an existing value in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value,
            None => self.0.push((name, value)),
        }
    }

    /// Iterate over attributes in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Class names from the `class` attribute.
    pub fn classes(&self) -> Vec<&str> {
        self.get("class")
            .map(|value| value.split_whitespace().collect())
            .unwrap_or_default()
    }

    /// Check whether a class name is present.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().contains(&class)
    }

    /// Append a class name unless it is already present.
    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let value = match self.get("class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {}", existing, class),
            _ => class.to_string(),
        };
        self.set("class", value);
    }
}

impl FromIterator<(String, String)> for Properties {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut properties = Properties::new();
        for (name, value) in iter {
            properties.set(name, value);
        }
        properties
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_properties_keep_insertion_order() {
        let mut props = Properties::new();
        props.set("aria-hidden", "true");
        props.set("tabindex", "-1");
        props.set("href", "#usage");
        props.set("tabindex", "0");

        let names: Vec<&str> = props.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["aria-hidden", "tabindex", "href"]);
        assert_eq!(props.get("tabindex"), Some("0"));
    }

    #[test]
    fn test_add_class() {
        let mut props = Properties::new();
        props.add_class("language-js");
        props.add_class("code-highlight");
        props.add_class("language-js");
        assert_eq!(props.get("class"), Some("language-js code-highlight"));
        assert!(props.has_class("code-highlight"));
    }

    #[test]
    fn test_text_content_skips_raw() {
        let node = Node::from(Element::new("h2").with_children(vec![
            Node::text("Usage"),
            Node::raw("<b>x</b>"),
            Element::new("code")
                .with_children(vec![Node::text("()")])
                .into(),
        ]));
        assert_eq!(node.text_content(), "Usage()");
    }

    #[test]
    fn test_heading_rank() {
        assert_eq!(Element::new("h3").heading_rank(), Some(3));
        assert_eq!(Element::new("header").heading_rank(), None);
    }

    #[test]
    fn test_contains_raw() {
        let tree = Node::root(vec![Element::new("p")
            .with_children(vec![Node::raw("<br>")])
            .into()]);
        assert!(tree.contains_raw());
        assert!(!Node::root(vec![Node::text("x")]).contains_raw());
    }
}
