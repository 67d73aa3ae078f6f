//! Rendering result with statistics.

use serde::{Deserialize, Serialize};

/// Result of running a pipeline, including the HTML and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The serialized HTML
    pub html: String,

    /// Pipeline statistics
    pub stats: PipelineStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(html: String, stats: PipelineStats) -> Self {
        Self { html, stats }
    }
}

/// Statistics collected while a pipeline runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineStats {
    /// Whether a node finder stage found its target
    pub node_found: Option<bool>,

    /// Number of top-level headings removed
    pub headings_removed: u32,

    /// Number of images removed
    pub images_removed: u32,

    /// Number of raw HTML nodes reparsed
    pub raw_nodes_parsed: u32,

    /// Number of code blocks highlighted
    pub code_blocks_highlighted: u32,

    /// Number of heading ids assigned
    pub slugs_assigned: u32,

    /// Number of heading anchors inserted
    pub anchors_added: u32,

    /// Number of symbol glyphs wrapped
    pub symbols_wrapped: u32,
}

impl PipelineStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of a node search.
    pub fn set_node_found(&mut self, found: bool) {
        self.node_found = Some(found);
    }

    /// Increment removed heading count.
    pub fn add_heading_removed(&mut self) {
        self.headings_removed += 1;
    }

    /// Increment removed image count.
    pub fn add_image_removed(&mut self) {
        self.images_removed += 1;
    }

    /// Add to the reparsed raw node count.
    pub fn add_raw_nodes(&mut self, count: u32) {
        self.raw_nodes_parsed += count;
    }

    /// Increment highlighted code block count.
    pub fn add_code_block(&mut self) {
        self.code_blocks_highlighted += 1;
    }

    /// Increment assigned slug count.
    pub fn add_slug(&mut self) {
        self.slugs_assigned += 1;
    }

    /// Increment inserted anchor count.
    pub fn add_anchor(&mut self) {
        self.anchors_added += 1;
    }

    /// Add to the wrapped symbol count.
    pub fn add_symbols(&mut self, count: u32) {
        self.symbols_wrapped += count;
    }

    /// Merge another set of statistics into this one.
    pub fn merge(&mut self, other: &PipelineStats) {
        if other.node_found.is_some() {
            self.node_found = other.node_found;
        }
        self.headings_removed += other.headings_removed;
        self.images_removed += other.images_removed;
        self.raw_nodes_parsed += other.raw_nodes_parsed;
        self.code_blocks_highlighted += other.code_blocks_highlighted;
        self.slugs_assigned += other.slugs_assigned;
        self.anchors_added += other.anchors_added;
        self.symbols_wrapped += other.symbols_wrapped;
    }
}
