//! HTML serialization of the HTML tree.
//!
//! Escaping, void elements and raw-text elements follow html5ever's
//! serializer; `Raw` nodes are written to its output untouched.

use std::io::{self, Write};

use html5ever::serialize::{HtmlSerializer as Html5Serializer, SerializeOpts, Serializer};
use html5ever::{ns, LocalName, QualName};

use crate::model::hast::{Element, Node};

/// Options for HTML serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HtmlOptions {
    /// Treat `noscript` content as raw text, as a browser with scripting does.
    pub scripting_enabled: bool,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            scripting_enabled: true,
        }
    }
}

impl HtmlOptions {
    fn serialize_opts(&self) -> SerializeOpts {
        SerializeOpts {
            scripting_enabled: self.scripting_enabled,
            ..Default::default()
        }
    }
}

/// Serialize a tree to an HTML string with default options.
pub fn to_html(tree: &Node) -> String {
    HtmlSerializer::new(HtmlOptions::default()).serialize(tree)
}

/// HTML serializer.
#[derive(Debug, Clone, Default)]
pub struct HtmlSerializer {
    options: HtmlOptions,
}

impl HtmlSerializer {
    /// Create a serializer with the given options.
    pub fn new(options: HtmlOptions) -> Self {
        Self { options }
    }

    /// Serialize a tree to an HTML string.
    pub fn serialize(&self, tree: &Node) -> String {
        let mut serializer = Html5Serializer::new(Vec::new(), self.options.serialize_opts());
        if let Err(err) = write_node(&mut serializer, tree) {
            log::error!("HTML serialization failed: {}", err);
        }
        String::from_utf8(serializer.writer)
            .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned())
    }
}

fn write_node<W: Write>(serializer: &mut Html5Serializer<W>, node: &Node) -> io::Result<()> {
    match node {
        Node::Root { children } => {
            for child in children {
                write_node(serializer, child)?;
            }
            Ok(())
        }
        Node::Element(element) => write_element(serializer, element),
        Node::Text { value } => serializer.write_text(value),
        Node::Comment { value } => serializer.write_comment(value),
        Node::Raw { value } => serializer.writer.write_all(value.as_bytes()),
    }
}

fn write_element<W: Write>(
    serializer: &mut Html5Serializer<W>,
    element: &Element,
) -> io::Result<()> {
    let name = QualName::new(None, ns!(html), LocalName::from(element.tag_name.as_str()));
    let attr_names: Vec<QualName> = element
        .properties
        .iter()
        .map(|(key, _)| QualName::new(None, ns!(), LocalName::from(key)))
        .collect();
    let attrs = attr_names
        .iter()
        .zip(element.properties.iter().map(|(_, value)| value));

    serializer.start_elem(name.clone(), attrs)?;
    for child in &element.children {
        write_node(serializer, child)?;
    }
    serializer.end_elem(name)
}
