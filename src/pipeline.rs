//! Ordered transform pipelines from a markdown tree to an HTML string.
//!
//! A [`Pipeline`] runs its markdown stages, converts the tree to HTML, runs
//! its HTML stages and serializes the result. Pipelines never modify the
//! tree they are given, so one parsed document can feed several of them.

use crate::convert::{to_hast, ToHastOptions};
use crate::error::Result;
use crate::model::mdast;
use crate::render::{HtmlOptions, HtmlSerializer, PipelineStats, RenderResult, SiteOptions};
use crate::transform::{
    AutolinkHeadings, FilterHeadings, FindNode, Highlight, HtmlTransform, MarkdownTransform,
    ParseRaw, RemoveImages, Slug, WrapSymbols,
};

/// A configured sequence of markdown and HTML stages.
#[derive(Debug)]
pub struct Pipeline {
    name: String,
    markdown: Vec<Box<dyn MarkdownTransform>>,
    to_hast: ToHastOptions,
    html: Vec<Box<dyn HtmlTransform>>,
    serializer: HtmlSerializer,
}

impl Pipeline {
    /// Create an empty pipeline: parse tree straight to HTML.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            markdown: Vec::new(),
            to_hast: ToHastOptions::default(),
            html: Vec::new(),
            serializer: HtmlSerializer::default(),
        }
    }

    /// The features fragment: the first node of the configured kind,
    /// with raw HTML parsed and heading ids assigned.
    pub fn features(options: &SiteOptions) -> Self {
        Self::new("features")
            .with_markdown_stage(FindNode::new(options.features_node))
            .with_to_hast(ToHastOptions::new().with_dangerous_html(options.allow_dangerous_html))
            .with_html_stage(ParseRaw::new())
            .with_html_stage(Slug::with_options(options.slug.clone()))
            .with_html_options(options.html)
    }

    /// The content fragment: the README without its excluded headings and
    /// images, with highlighted code, linked headings and wrapped symbols.
    ///
    /// Fails when an excluded heading depth is outside 1-6.
    pub fn content(options: &SiteOptions) -> Result<Self> {
        let mut pipeline = Self::new("content")
            .with_markdown_stage(FilterHeadings::new(
                options.exclude_heading_depths.iter().copied(),
            )?)
            .with_to_hast(ToHastOptions::new().with_dangerous_html(options.allow_dangerous_html))
            .with_html_stage(ParseRaw::new());

        if options.remove_images {
            pipeline = pipeline.with_html_stage(RemoveImages::new());
        }
        if let Some(highlight) = &options.highlight {
            pipeline = pipeline.with_html_stage(Highlight::with_options(highlight.clone()));
        }
        pipeline = pipeline.with_html_stage(Slug::with_options(options.slug.clone()));
        if let Some(autolink) = &options.autolink {
            pipeline = pipeline.with_html_stage(AutolinkHeadings::with_options(autolink.clone()));
        }
        if let Some(wrap) = &options.wrap_symbols {
            pipeline = pipeline.with_html_stage(WrapSymbols::with_options(wrap.clone()));
        }

        Ok(pipeline.with_html_options(options.html))
    }

    /// Append a markdown stage.
    pub fn with_markdown_stage(mut self, stage: impl MarkdownTransform + 'static) -> Self {
        self.markdown.push(Box::new(stage));
        self
    }

    /// Append an HTML stage.
    pub fn with_html_stage(mut self, stage: impl HtmlTransform + 'static) -> Self {
        self.html.push(Box::new(stage));
        self
    }

    /// Set the markdown to HTML conversion options.
    pub fn with_to_hast(mut self, options: ToHastOptions) -> Self {
        self.to_hast = options;
        self
    }

    /// Set the serializer options.
    pub fn with_html_options(mut self, options: HtmlOptions) -> Self {
        self.serializer = HtmlSerializer::new(options);
        self
    }

    /// Pipeline name used in logs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names of all stages in run order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.markdown
            .iter()
            .map(|stage| stage.name())
            .chain(std::iter::once("to-hast"))
            .chain(self.html.iter().map(|stage| stage.name()))
            .collect()
    }

    /// Run on a copy of `tree` and return the HTML.
    pub fn run(&self, tree: &mdast::Node) -> String {
        self.run_owned(tree.clone()).html
    }

    /// Run on a copy of `tree` and return the HTML with statistics.
    pub fn run_with_stats(&self, tree: &mdast::Node) -> RenderResult {
        self.run_owned(tree.clone())
    }

    /// Run on an owned tree.
    pub fn run_owned(&self, mut tree: mdast::Node) -> RenderResult {
        let mut stats = PipelineStats::new();

        for stage in &self.markdown {
            log::debug!("[{}] running {}", self.name, stage.name());
            stage.transform(&mut tree, &mut stats);
        }

        let mut html = to_hast(&tree, &self.to_hast);
        for stage in &self.html {
            log::debug!("[{}] running {}", self.name, stage.name());
            stage.transform(&mut html, &mut stats);
        }

        let output = self.serializer.serialize(&html);
        log::debug!("[{}] produced {} bytes of HTML", self.name, output.len());
        RenderResult::new(output, stats)
    }
}
