//! Tree transform stages.
//!
//! A pipeline is an ordered list of stages. Markdown stages run on the
//! markdown tree before conversion; HTML stages run on the HTML tree after
//! it. Each stage mutates the tree it is given in place.

mod autolink;
mod filter_headings;
mod find_node;
mod highlight;
mod parse_raw;
mod remove_images;
mod slug;
mod wrap_symbols;

use std::fmt;

use crate::model::{hast, mdast};
use crate::render::PipelineStats;

pub use autolink::{AutolinkBehavior, AutolinkHeadings, AutolinkOptions};
pub use filter_headings::{filter_headings, FilterHeadings};
pub use find_node::{find_node, FindNode};
pub use highlight::{Highlight, HighlightOptions};
pub use parse_raw::ParseRaw;
pub use remove_images::{remove_images, RemoveImages};
pub use slug::{Slug, SlugOptions, Slugger};
pub use wrap_symbols::{is_symbol, WrapSymbols, WrapSymbolsOptions};

/// A stage that transforms the markdown tree in place.
pub trait MarkdownTransform: Send + Sync + fmt::Debug {
    /// Short stage name used in logs.
    fn name(&self) -> &'static str;

    /// Transform the tree.
    fn transform(&self, tree: &mut mdast::Node, stats: &mut PipelineStats);
}

/// A stage that transforms the HTML tree in place.
pub trait HtmlTransform: Send + Sync + fmt::Debug {
    /// Short stage name used in logs.
    fn name(&self) -> &'static str;

    /// Transform the tree.
    fn transform(&self, tree: &mut hast::Node, stats: &mut PipelineStats);
}
