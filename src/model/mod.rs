//! Syntax tree types.
//!
//! Two trees take part in every pipeline run: the markdown tree produced by
//! the parser ([`mdast`]) and the HTML tree it is converted into ([`hast`]).
//! Both are plain owned trees; a pipeline mutates its own copy in place.

pub mod hast;
pub mod mdast;

pub use hast::{Element, Properties};
pub use mdast::{NodeKind, Test};
