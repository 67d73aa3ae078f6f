//! Rendering module: HTML serialization, JSON output, options and
//! pipeline statistics.

mod html;
mod json;
mod options;
mod result;
pub mod visitor;

pub use html::{to_html, HtmlOptions, HtmlSerializer};
pub use json::{to_json, JsonFormat};
pub use options::SiteOptions;
pub use result::{PipelineStats, RenderResult};
pub use visitor::{VisitContext, VisitorAction};
