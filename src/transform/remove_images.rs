//! Remove images from the HTML tree.

use crate::model::hast::Node;
use crate::render::visitor::{walk_mut, VisitorAction};
use crate::render::PipelineStats;

use super::HtmlTransform;

/// Remove every `img` element at any depth. Returns the number removed.
pub fn remove_images(tree: &mut Node) -> u32 {
    let mut removed = 0;
    walk_mut(tree, |node, _ctx| {
        if node.is_element("img") {
            removed += 1;
            VisitorAction::Remove
        } else {
            VisitorAction::Continue
        }
    });
    removed
}

/// HTML stage removing images.
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveImages;

impl RemoveImages {
    /// Create the stage.
    pub fn new() -> Self {
        Self
    }
}

impl HtmlTransform for RemoveImages {
    fn name(&self) -> &'static str {
        "remove-images"
    }

    fn transform(&self, tree: &mut Node, stats: &mut PipelineStats) {
        let removed = remove_images(tree);
        log::debug!("Removed {} images", removed);
        for _ in 0..removed {
            stats.add_image_removed();
        }
    }
}
