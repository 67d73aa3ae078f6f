//! Site generation options and configuration.

use crate::model::NodeKind;
use crate::parser::ParseOptions;
use crate::transform::{AutolinkOptions, HighlightOptions, SlugOptions, WrapSymbolsOptions};

use super::HtmlOptions;

/// Options for building the two site fragments.
///
/// The defaults reproduce the documentation site: the features fragment
/// is the README's first list, the content fragment drops the level-1
/// title, removes images, highlights code, links headings with empty
/// anchors and wraps symbol glyphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteOptions {
    /// Markdown parsing options
    pub parse: ParseOptions,

    /// Node kind extracted for the features fragment
    pub features_node: NodeKind,

    /// Heading depths removed from the top level of the content fragment
    pub exclude_heading_depths: Vec<u8>,

    /// Keep raw HTML from the README and parse it into elements
    pub allow_dangerous_html: bool,

    /// Remove images from the content fragment
    pub remove_images: bool,

    /// Code highlighting, `None` to leave code blocks as they are
    pub highlight: Option<HighlightOptions>,

    /// Heading id generation
    pub slug: SlugOptions,

    /// Heading anchors in the content fragment, `None` to skip them
    pub autolink: Option<AutolinkOptions>,

    /// Symbol wrapping in the content fragment, `None` to skip it
    pub wrap_symbols: Option<WrapSymbolsOptions>,

    /// HTML serialization options
    pub html: HtmlOptions,
}

impl SiteOptions {
    /// Create new site options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the markdown parsing options.
    pub fn with_parse_options(mut self, parse: ParseOptions) -> Self {
        self.parse = parse;
        self
    }

    /// Set the node kind extracted for the features fragment.
    pub fn with_features_node(mut self, kind: NodeKind) -> Self {
        self.features_node = kind;
        self
    }

    /// Set the heading depths removed from the content fragment.
    pub fn with_excluded_depths(mut self, depths: impl IntoIterator<Item = u8>) -> Self {
        self.exclude_heading_depths = depths.into_iter().collect();
        self
    }

    /// Enable or disable raw HTML passthrough.
    pub fn with_dangerous_html(mut self, allow: bool) -> Self {
        self.allow_dangerous_html = allow;
        self
    }

    /// Enable or disable image removal.
    pub fn with_image_removal(mut self, remove: bool) -> Self {
        self.remove_images = remove;
        self
    }

    /// Set highlighting options.
    pub fn with_highlight(mut self, highlight: HighlightOptions) -> Self {
        self.highlight = Some(highlight);
        self
    }

    /// Disable code highlighting.
    pub fn without_highlight(mut self) -> Self {
        self.highlight = None;
        self
    }

    /// Set slug options.
    pub fn with_slug(mut self, slug: SlugOptions) -> Self {
        self.slug = slug;
        self
    }

    /// Set heading anchor options.
    pub fn with_autolink(mut self, autolink: AutolinkOptions) -> Self {
        self.autolink = Some(autolink);
        self
    }

    /// Disable heading anchors.
    pub fn without_autolink(mut self) -> Self {
        self.autolink = None;
        self
    }

    /// Set symbol wrapping options.
    pub fn with_wrap_symbols(mut self, wrap: WrapSymbolsOptions) -> Self {
        self.wrap_symbols = Some(wrap);
        self
    }

    /// Disable symbol wrapping.
    pub fn without_wrap_symbols(mut self) -> Self {
        self.wrap_symbols = None;
        self
    }

    /// Set HTML serialization options.
    pub fn with_html_options(mut self, html: HtmlOptions) -> Self {
        self.html = html;
        self
    }
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            parse: ParseOptions::default(),
            features_node: NodeKind::List,
            exclude_heading_depths: vec![1],
            allow_dangerous_html: true,
            remove_images: true,
            highlight: Some(HighlightOptions::default()),
            slug: SlugOptions::default(),
            autolink: Some(AutolinkOptions::default().empty_content()),
            wrap_symbols: Some(WrapSymbolsOptions::default()),
            html: HtmlOptions::default(),
        }
    }
}
