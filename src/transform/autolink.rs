//! Anchor links on headings.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::model::hast::{Element, Node, Properties};
use crate::render::visitor::{walk_mut, VisitorAction};
use crate::render::PipelineStats;

use super::HtmlTransform;

/// Where the anchor goes relative to the heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutolinkBehavior {
    /// First child of the heading
    #[default]
    Prepend,
    /// Last child of the heading
    Append,
    /// Wrap the heading's content in the anchor
    Wrap,
    /// Sibling before the heading
    Before,
    /// Sibling after the heading
    After,
}

impl AutolinkBehavior {
    /// Name used on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            AutolinkBehavior::Prepend => "prepend",
            AutolinkBehavior::Append => "append",
            AutolinkBehavior::Wrap => "wrap",
            AutolinkBehavior::Before => "before",
            AutolinkBehavior::After => "after",
        }
    }
}

impl fmt::Display for AutolinkBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AutolinkBehavior {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prepend" => Ok(AutolinkBehavior::Prepend),
            "append" => Ok(AutolinkBehavior::Append),
            "wrap" => Ok(AutolinkBehavior::Wrap),
            "before" => Ok(AutolinkBehavior::Before),
            "after" => Ok(AutolinkBehavior::After),
            other => Err(Error::UnknownAutolinkBehavior(other.to_string())),
        }
    }
}

/// Options for heading anchors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutolinkOptions {
    /// Anchor placement
    pub behavior: AutolinkBehavior,

    /// Anchor attributes; `None` uses `aria-hidden="true" tabindex="-1"`
    /// for every behavior except [`AutolinkBehavior::Wrap`].
    pub properties: Option<Properties>,

    /// Anchor children (ignored when wrapping)
    pub content: Vec<Node>,
}

impl AutolinkOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the anchor placement.
    pub fn with_behavior(mut self, behavior: AutolinkBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// Set the anchor attributes.
    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = Some(properties);
        self
    }

    /// Set the anchor content.
    pub fn with_content(mut self, content: Vec<Node>) -> Self {
        self.content = content;
        self
    }

    /// Use an anchor with no content.
    pub fn empty_content(self) -> Self {
        self.with_content(Vec::new())
    }

    fn anchor_properties(&self, id: &str) -> Properties {
        let mut properties = match &self.properties {
            Some(properties) => properties.clone(),
            None if self.behavior == AutolinkBehavior::Wrap => Properties::new(),
            None => {
                let mut defaults = Properties::new();
                defaults.set("aria-hidden", "true");
                defaults.set("tabindex", "-1");
                defaults
            }
        };
        properties.set("href", format!("#{}", id));
        properties
    }
}

impl Default for AutolinkOptions {
    fn default() -> Self {
        Self {
            behavior: AutolinkBehavior::Prepend,
            properties: None,
            content: vec![Element::new("span")
                .with_class("icon")
                .with_class("icon-link")
                .into()],
        }
    }
}

/// HTML stage linking headings that have an `id` to themselves.
#[derive(Debug, Clone, Default)]
pub struct AutolinkHeadings {
    options: AutolinkOptions,
}

impl AutolinkHeadings {
    /// Create the stage with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the stage with custom options.
    pub fn with_options(options: AutolinkOptions) -> Self {
        Self { options }
    }

    fn anchor(&self, id: &str, children: Vec<Node>) -> Node {
        Node::Element(Element {
            tag_name: "a".to_string(),
            properties: self.options.anchor_properties(id),
            children,
        })
    }
}

impl HtmlTransform for AutolinkHeadings {
    fn name(&self) -> &'static str {
        "autolink-headings"
    }

    fn transform(&self, tree: &mut Node, stats: &mut PipelineStats) {
        walk_mut(tree, |node, _ctx| {
            let Some(element) = node.as_element_mut() else {
                return VisitorAction::Continue;
            };
            if element.heading_rank().is_none() {
                return VisitorAction::Continue;
            }
            let Some(id) = element.properties.get("id").map(str::to_string) else {
                return VisitorAction::Skip;
            };

            stats.add_anchor();
            match self.options.behavior {
                AutolinkBehavior::Prepend => {
                    let anchor = self.anchor(&id, self.options.content.clone());
                    element.children.insert(0, anchor);
                    VisitorAction::Skip
                }
                AutolinkBehavior::Append => {
                    let anchor = self.anchor(&id, self.options.content.clone());
                    element.children.push(anchor);
                    VisitorAction::Skip
                }
                AutolinkBehavior::Wrap => {
                    let children = std::mem::take(&mut element.children);
                    element.children = vec![self.anchor(&id, children)];
                    VisitorAction::Skip
                }
                AutolinkBehavior::Before => {
                    let anchor = self.anchor(&id, self.options.content.clone());
                    VisitorAction::Replace(vec![anchor, node.clone()])
                }
                AutolinkBehavior::After => {
                    let anchor = self.anchor(&id, self.options.content.clone());
                    VisitorAction::Replace(vec![node.clone(), anchor])
                }
            }
        });
    }
}
