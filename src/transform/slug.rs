//! Heading ids generated from heading text.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::hast::Node;
use crate::render::visitor::{walk_mut, VisitorAction};
use crate::render::PipelineStats;

use super::HtmlTransform;

/// Everything but letters, marks, numbers, connectors, spaces and hyphens.
static STRIP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^\p{L}\p{M}\p{N}\p{Pc} \-]").expect("slug pattern is valid")
});

/// GitHub-style slug generator with duplicate tracking.
///
/// ```
/// use symbolist_site::transform::Slugger;
///
/// let mut slugger = Slugger::new();
/// assert_eq!(slugger.slug("Hello, World!"), "hello-world");
/// assert_eq!(slugger.slug("Hello World"), "hello-world-1");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Slugger {
    occurrences: HashMap<String, u32>,
}

impl Slugger {
    /// Create a slugger with no recorded slugs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a unique slug for `value`.
    pub fn slug(&mut self, value: &str) -> String {
        let original = slugify(value);
        let mut result = original.clone();

        while self.occurrences.contains_key(&result) {
            let count = self.occurrences.entry(original.clone()).or_insert(0);
            *count += 1;
            result = format!("{}-{}", original, count);
        }

        self.occurrences.insert(result.clone(), 0);
        result
    }
}

/// Slug without duplicate tracking.
pub fn slugify(value: &str) -> String {
    STRIP
        .replace_all(&value.to_lowercase(), "")
        .replace(' ', "-")
}

/// Options for the slug stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlugOptions {
    /// Prefix prepended to every generated id
    pub prefix: String,
}

impl SlugOptions {
    /// Create options with no prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the id prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }
}

/// HTML stage adding `id`s to headings that lack one.
#[derive(Debug, Clone, Default)]
pub struct Slug {
    options: SlugOptions,
}

impl Slug {
    /// Create the stage with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the stage with custom options.
    pub fn with_options(options: SlugOptions) -> Self {
        Self { options }
    }
}

impl HtmlTransform for Slug {
    fn name(&self) -> &'static str {
        "slug"
    }

    fn transform(&self, tree: &mut Node, stats: &mut PipelineStats) {
        let mut slugger = Slugger::new();
        walk_mut(tree, |node, _ctx| {
            if let Some(element) = node.as_element_mut() {
                if element.heading_rank().is_some() && !element.properties.contains("id") {
                    let id = format!(
                        "{}{}",
                        self.options.prefix,
                        slugger.slug(&element.text_content())
                    );
                    element.properties.set("id", id);
                    stats.add_slug();
                }
            }
            VisitorAction::Continue
        });
    }
}
