//! Parsing module: markdown source to markdown tree, raw HTML to HTML tree.

mod html;
mod markdown;
mod options;

pub use html::parse_html_fragment;
pub use markdown::{parse_markdown, MarkdownParser};
pub use options::ParseOptions;
