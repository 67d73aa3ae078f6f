//! Wrap SF Symbols glyphs in their own elements.

use crate::model::hast::{Element, Node};
use crate::render::visitor::{walk_mut, VisitorAction};
use crate::render::PipelineStats;

use super::HtmlTransform;

/// First code point of the SF Symbols range (Supplementary Private Use Area-B).
pub const SYMBOL_RANGE_START: char = '\u{100000}';

/// Last code point of the SF Symbols range.
pub const SYMBOL_RANGE_END: char = '\u{10FFFD}';

/// Check whether a character is an SF Symbols glyph.
pub fn is_symbol(c: char) -> bool {
    (SYMBOL_RANGE_START..=SYMBOL_RANGE_END).contains(&c)
}

/// Options for the symbol wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapSymbolsOptions {
    /// Wrapper tag
    pub tag_name: String,
    /// Wrapper class
    pub class_name: String,
}

impl WrapSymbolsOptions {
    /// Create options with defaults (`<span class="symbol">`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the wrapper tag.
    pub fn with_tag_name(mut self, tag_name: impl Into<String>) -> Self {
        self.tag_name = tag_name.into();
        self
    }

    /// Set the wrapper class.
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }
}

impl Default for WrapSymbolsOptions {
    fn default() -> Self {
        Self {
            tag_name: "span".to_string(),
            class_name: "symbol".to_string(),
        }
    }
}

/// HTML stage wrapping every symbol glyph in its own element.
#[derive(Debug, Clone, Default)]
pub struct WrapSymbols {
    options: WrapSymbolsOptions,
}

impl WrapSymbols {
    /// Create the stage with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the stage with custom options.
    pub fn with_options(options: WrapSymbolsOptions) -> Self {
        Self { options }
    }

    fn wrapper(&self, symbol: char) -> Node {
        Element::new(self.options.tag_name.as_str())
            .with_class(&self.options.class_name)
            .with_children(vec![Node::text(symbol.to_string())])
            .into()
    }

    /// Split `value` into text and wrapper nodes, or `None` when it holds
    /// no symbol.
    fn split(&self, value: &str) -> Option<Vec<Node>> {
        if !value.chars().any(is_symbol) {
            return None;
        }

        let mut nodes = Vec::new();
        let mut pending = String::new();
        for c in value.chars() {
            if is_symbol(c) {
                if !pending.is_empty() {
                    nodes.push(Node::text(std::mem::take(&mut pending)));
                }
                nodes.push(self.wrapper(c));
            } else {
                pending.push(c);
            }
        }
        if !pending.is_empty() {
            nodes.push(Node::text(pending));
        }
        Some(nodes)
    }
}

/// Elements whose content is never parsed as markup.
const TEXT_ONLY_ELEMENTS: &[&str] = &["script", "style", "textarea", "title", "noscript"];

impl HtmlTransform for WrapSymbols {
    fn name(&self) -> &'static str {
        "wrap-symbols"
    }

    fn transform(&self, tree: &mut Node, stats: &mut PipelineStats) {
        let mut wrapped = 0;
        walk_mut(tree, |node, _ctx| {
            let value = match node {
                Node::Text { value } => value,
                Node::Element(element)
                    if TEXT_ONLY_ELEMENTS.contains(&element.tag_name.as_str()) =>
                {
                    return VisitorAction::Skip;
                }
                _ => return VisitorAction::Continue,
            };
            match self.split(value) {
                Some(nodes) => {
                    wrapped += value.chars().filter(|&c| is_symbol(c)).count() as u32;
                    VisitorAction::Replace(nodes)
                }
                None => VisitorAction::Skip,
            }
        });
        if wrapped > 0 {
            log::debug!("Wrapped {} symbols", wrapped);
        }
        stats.add_symbols(wrapped);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::to_html;

    const SYMBOL: char = '\u{100001}';

    fn paragraph(text: &str) -> Node {
        Node::root(vec![Element::new("p")
            .with_children(vec![Node::text(text)])
            .into()])
    }

    #[test]
    fn test_symbol_range() {
        assert!(is_symbol('\u{100000}'));
        assert!(is_symbol('\u{10FFFD}'));
        assert!(!is_symbol('\u{E000}'));
        assert!(!is_symbol('a'));
    }

    #[test]
    fn test_splits_text_around_symbol() {
        let mut tree = paragraph(&format!("ab{}cd", SYMBOL));
        let mut stats = PipelineStats::new();
        WrapSymbols::new().transform(&mut tree, &mut stats);

        let p = tree.children().unwrap()[0].as_element().unwrap();
        assert_eq!(p.children.len(), 3);
        assert_eq!(p.children[0], Node::text("ab"));
        let span = p.children[1].as_element().unwrap();
        assert_eq!(span.tag_name, "span");
        assert_eq!(span.properties.get("class"), Some("symbol"));
        assert_eq!(span.text_content(), SYMBOL.to_string());
        assert_eq!(p.children[2], Node::text("cd"));
        assert_eq!(stats.symbols_wrapped, 1);
    }

    #[test]
    fn test_adjacent_symbols_get_own_wrappers() {
        let mut tree = paragraph(&format!("{0}{0} x", SYMBOL));
        WrapSymbols::new().transform(&mut tree, &mut PipelineStats::new());
        assert_eq!(
            to_html(&tree),
            format!(
                "<p><span class=\"symbol\">{0}</span><span class=\"symbol\">{0}</span> x</p>",
                SYMBOL
            )
        );
    }

    #[test]
    fn test_text_without_symbols_untouched() {
        let mut tree = paragraph("plain text");
        let before = tree.clone();
        WrapSymbols::new().transform(&mut tree, &mut PipelineStats::new());
        assert_eq!(tree, before);
    }

    #[test]
    fn test_custom_wrapper() {
        let options = WrapSymbolsOptions::new()
            .with_tag_name("i")
            .with_class_name("sf");
        let mut tree = paragraph(&SYMBOL.to_string());
        WrapSymbols::with_options(options).transform(&mut tree, &mut PipelineStats::new());
        assert_eq!(to_html(&tree), format!("<p><i class=\"sf\">{}</i></p>", SYMBOL));
    }

    #[test]
    fn test_script_and_style_left_alone() {
        let script = format!("var a = '{}';", SYMBOL);
        let mut tree = Node::root(vec![
            Element::new("script")
                .with_children(vec![Node::text(script.clone())])
                .into(),
            Element::new("style")
                .with_children(vec![Node::text(format!("a::after {{ content: '{}' }}", SYMBOL))])
                .into(),
            Element::new("p")
                .with_children(vec![Node::text(SYMBOL.to_string())])
                .into(),
        ]);
        let mut stats = PipelineStats::new();
        WrapSymbols::new().transform(&mut tree, &mut stats);

        assert_eq!(stats.symbols_wrapped, 1);
        let html = to_html(&tree);
        assert!(html.starts_with(&format!("<script>{}</script>", script)));
        assert!(html.ends_with(&format!("<p><span class=\"symbol\">{}</span></p>", SYMBOL)));
    }
}
