//! # symbolist-site
//!
//! Build-time content generator for the Symbolist documentation site.
//!
//! The library README is parsed once into a markdown syntax tree and fed to
//! two pipelines:
//!
//! - **features**: the README's first list, as HTML
//! - **content**: the README without its title and images, with
//!   highlighted code, heading anchors and wrapped SF Symbols glyphs
//!
//! ## Quick Start
//!
//! ```no_run
//! use symbolist_site::{generate, JsonFormat, SiteOptions};
//!
//! fn main() -> symbolist_site::Result<()> {
//!     let site = generate("packages/symbolist/README.md", &SiteOptions::default())?;
//!
//!     // `{"content": "...", "features": "..."}`
//!     println!("{}", site.to_json(JsonFormat::Pretty)?);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Custom pipelines
//!
//! ```
//! use symbolist_site::model::NodeKind;
//! use symbolist_site::transform::{FindNode, Slug};
//! use symbolist_site::{parse_markdown, Pipeline};
//!
//! let tree = parse_markdown("# Title\n\n## Setup\n\n1. install\n");
//! let html = Pipeline::new("first-heading")
//!     .with_markdown_stage(FindNode::new(NodeKind::Heading))
//!     .with_html_stage(Slug::new())
//!     .run(&tree);
//! assert_eq!(html, "<h1 id=\"title\">Title</h1>");
//! ```
//!
//! ## Features
//!
//! - **One parse, two pipelines**: both fragments come from the same tree
//! - **Parallel rendering**: pipelines run concurrently with Rayon
//! - **Raw HTML**: inline HTML in the README becomes real elements
//! - **Syntax highlighting**: JavaScript, TypeScript, JSON, shell and CSS
//! - **Async**: `generate_async` behind the `async` feature

pub mod convert;
pub mod error;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod render;
pub mod site;
pub mod transform;

// Re-export commonly used types
pub use convert::{to_hast, ToHastOptions};
pub use error::{Error, Result};
pub use model::{NodeKind, Test};
pub use parser::{parse_markdown, MarkdownParser, ParseOptions};
pub use pipeline::Pipeline;
pub use render::{to_html, JsonFormat, PipelineStats, RenderResult, SiteOptions};
pub use site::{
    generate, generate_from_str, generate_with_stats, render_content, render_features,
    SiteContent, SiteReport,
};

#[cfg(feature = "async")]
pub use site::generate_async;

/// Parse a markdown file into a syntax tree with default options.
///
/// # Example
///
/// ```no_run
/// use symbolist_site::parse_file;
///
/// let tree = parse_file("README.md").unwrap();
/// println!("{} top-level nodes", tree.children().map_or(0, |c| c.len()));
/// ```
pub fn parse_file<P: AsRef<std::path::Path>>(path: P) -> Result<model::mdast::Node> {
    MarkdownParser::new().parse_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_file_missing() {
        let err = parse_file("/nonexistent/README.md").unwrap_err();
        assert!(matches!(err, Error::SourceRead { .. }));
        assert!(err.to_string().contains("/nonexistent/README.md"));
    }

    #[test]
    fn test_features_of_readme_without_list() {
        assert_eq!(render_features("# Only a title\n\nAnd prose."), "");
    }

    #[test]
    fn test_options_reexported() {
        let options = SiteOptions::new().with_features_node(NodeKind::Code);
        assert_eq!(options.features_node, NodeKind::Code);
    }
}
