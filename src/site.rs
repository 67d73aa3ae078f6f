//! Build-time props for the documentation site.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::mdast;
use crate::parser::MarkdownParser;
use crate::pipeline::Pipeline;
use crate::render::{to_json, JsonFormat, PipelineStats, SiteOptions};

/// The two HTML fragments rendered from the README.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteContent {
    /// The README without its excluded headings, as HTML
    pub content: String,

    /// The README's first list, as HTML
    pub features: String,
}

impl SiteContent {
    /// Serialize as the page props object `{"content": ..., "features": ...}`.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        to_json(self, format)
    }
}

/// Site content together with the statistics of each pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteReport {
    /// The rendered fragments
    pub site: SiteContent,

    /// Statistics of the features pipeline
    pub features: PipelineStats,

    /// Statistics of the content pipeline
    pub content: PipelineStats,
}

impl SiteReport {
    /// Statistics of both pipelines added together.
    pub fn totals(&self) -> PipelineStats {
        let mut totals = self.features.clone();
        totals.merge(&self.content);
        totals
    }
}

/// Read the README at `path` once and render both fragments.
///
/// # Example
///
/// ```no_run
/// use symbolist_site::{generate, SiteOptions};
///
/// let site = generate("README.md", &SiteOptions::default())?;
/// println!("{}", site.features);
/// # Ok::<(), symbolist_site::Error>(())
/// ```
pub fn generate<P: AsRef<Path>>(path: P, options: &SiteOptions) -> Result<SiteContent> {
    generate_with_stats(path, options).map(|report| report.site)
}

/// Like [`generate`], also returning per-pipeline statistics.
pub fn generate_with_stats<P: AsRef<Path>>(path: P, options: &SiteOptions) -> Result<SiteReport> {
    let path = path.as_ref();
    let tree = MarkdownParser::with_options(options.parse.clone()).parse_file(path)?;
    let report = render_tree(&tree, options)?;
    log::info!(
        "Generated site content from {} ({} bytes features, {} bytes content)",
        path.display(),
        report.site.features.len(),
        report.site.content.len()
    );
    Ok(report)
}

/// Render both fragments from markdown text.
pub fn generate_from_str(source: &str, options: &SiteOptions) -> Result<SiteContent> {
    let tree = MarkdownParser::with_options(options.parse.clone()).parse(source);
    render_tree(&tree, options).map(|report| report.site)
}

/// Render the features fragment from markdown text with default options.
pub fn render_features(source: &str) -> String {
    let options = SiteOptions::default();
    let tree = MarkdownParser::with_options(options.parse.clone()).parse(source);
    Pipeline::features(&options).run(&tree)
}

/// Render the content fragment from markdown text with default options.
pub fn render_content(source: &str) -> Result<String> {
    let options = SiteOptions::default();
    let tree = MarkdownParser::with_options(options.parse.clone()).parse(source);
    Ok(Pipeline::content(&options)?.run(&tree))
}

/// Run both pipelines over one parsed tree in parallel.
fn render_tree(tree: &mdast::Node, options: &SiteOptions) -> Result<SiteReport> {
    let features = Pipeline::features(options);
    let content = Pipeline::content(options)?;

    let (features, content) = rayon::join(
        || features.run_with_stats(tree),
        || content.run_with_stats(tree),
    );

    Ok(SiteReport {
        site: SiteContent {
            content: content.html,
            features: features.html,
        },
        features: features.stats,
        content: content.stats,
    })
}

/// Read the README asynchronously and render both fragments on the
/// blocking thread pool.
#[cfg(feature = "async")]
pub async fn generate_async<P: AsRef<Path>>(path: P, options: &SiteOptions) -> Result<SiteContent> {
    use std::sync::Arc;

    use crate::error::Error;

    let path = path.as_ref();
    let source = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| Error::SourceRead {
            path: path.to_path_buf(),
            source,
        })?;
    let tree = Arc::new(MarkdownParser::with_options(options.parse.clone()).parse(&source));

    let features = Pipeline::features(options);
    let content = Pipeline::content(options)?;

    let features_tree = Arc::clone(&tree);
    let features_task = tokio::task::spawn_blocking(move || features.run(&features_tree));
    let content_task = tokio::task::spawn_blocking(move || content.run(&tree));

    let features = features_task
        .await
        .map_err(|e| Error::Task(e.to_string()))?;
    let content = content_task
        .await
        .map_err(|e| Error::Task(e.to_string()))?;

    log::info!("Generated site content from {}", path.display());
    Ok(SiteContent { content, features })
}
