//! End-to-end tests for the features and content pipelines.

use symbolist_site::model::NodeKind;
use symbolist_site::{generate_from_str, parse_markdown, Pipeline, SiteOptions};

const GLYPH: char = '\u{100001}';

fn readme() -> String {
    format!(
        "# Symbolist\n\
         \n\
         Build icons with <strong>SF Symbols</strong> glyphs.\n\
         \n\
         - Typed\n\
         - Tiny\n\
         - Fast\n\
         \n\
         ## Usage\n\
         \n\
         ```ts\n\
         import {{ Symbol }} from \"symbolist\"\n\
         ```\n\
         \n\
         Render <img src=\"logo.png\" alt=\"logo\"> inline and ![demo](demo.png).\n\
         \n\
         The {} glyph.\n",
        GLYPH
    )
}

#[test]
fn test_features_is_first_list_only() {
    let site = generate_from_str(&readme(), &SiteOptions::default()).unwrap();
    assert_eq!(
        site.features,
        "<ul>\n<li>Typed</li>\n<li>Tiny</li>\n<li>Fast</li>\n</ul>"
    );
}

#[test]
fn test_content_drops_title_and_images() {
    let site = generate_from_str(&readme(), &SiteOptions::default()).unwrap();
    let content = &site.content;

    assert!(!content.contains("<h1"));
    assert!(!content.contains("Symbolist</h1>"));
    assert!(!content.contains("<img"));
    assert!(content.starts_with("<p>Build icons with <strong>SF Symbols</strong> glyphs.</p>"));
}

#[test]
fn test_content_links_headings_and_highlights_code() {
    let site = generate_from_str(&readme(), &SiteOptions::default()).unwrap();
    let content = &site.content;

    assert!(content.contains(
        "<h2 id=\"usage\"><a aria-hidden=\"true\" tabindex=\"-1\" href=\"#usage\"></a>Usage</h2>"
    ));
    assert!(content.contains("<pre class=\"language-ts\"><code class=\"language-ts code-highlight\">"));
    assert!(content.contains("<span class=\"token keyword\">import</span>"));
    assert!(content.contains("<span class=\"code-line\">"));
}

#[test]
fn test_content_wraps_symbols() {
    let site = generate_from_str(&readme(), &SiteOptions::default()).unwrap();
    assert!(site
        .content
        .contains(&format!("The <span class=\"symbol\">{}</span> glyph.", GLYPH)));
    // The features pipeline does not wrap symbols.
    assert!(!site.features.contains("class=\"symbol\""));
}

#[test]
fn test_two_lists_returns_first() {
    let source = "- first a\n- first b\n\nBetween.\n\n- second\n";
    let site = generate_from_str(source, &SiteOptions::default()).unwrap();
    assert!(site.features.contains("first a"));
    assert!(site.features.contains("first b"));
    assert!(!site.features.contains("second"));
}

#[test]
fn test_first_list_found_in_pre_order() {
    let source = "> - quoted\n\n- top level\n";
    let site = generate_from_str(source, &SiteOptions::default()).unwrap();
    assert_eq!(site.features, "<ul>\n<li>quoted</li>\n</ul>");
}

#[test]
fn test_no_list_gives_empty_features() {
    let site = generate_from_str("# Title\n\nOnly prose.\n", &SiteOptions::default()).unwrap();
    assert_eq!(site.features, "");
    assert_eq!(site.content, "<p>Only prose.</p>");
}

#[test]
fn test_nested_headings_survive_filter() {
    let source = "> # Quoted title\n\n# Title\n\ntext\n";
    let site = generate_from_str(source, &SiteOptions::default()).unwrap();
    assert!(site.content.contains("id=\"quoted-title\""));
    assert!(!site.content.contains("id=\"title\""));
}

#[test]
fn test_repeated_headings_get_unique_ids() {
    let source = "## Usage\n\n## Usage\n";
    let site = generate_from_str(source, &SiteOptions::default()).unwrap();
    assert!(site.content.contains("<h2 id=\"usage\">"));
    assert!(site.content.contains("<h2 id=\"usage-1\">"));
}

#[test]
fn test_custom_options() {
    let options = SiteOptions::new()
        .with_features_node(NodeKind::Code)
        .with_image_removal(false)
        .without_highlight()
        .without_autolink()
        .without_wrap_symbols();
    let site = generate_from_str(&readme(), &options).unwrap();

    assert!(site.features.starts_with("<pre><code class=\"language-ts\">import"));
    assert!(site.content.contains("<img"));
    assert!(site.content.contains("<h2 id=\"usage\">Usage</h2>"));
    assert!(!site.content.contains("code-highlight"));
    assert!(!site.content.contains("class=\"symbol\""));
}

#[test]
fn test_pipelines_share_one_parse() {
    let tree = parse_markdown(&readme());
    let before = tree.clone();
    let options = SiteOptions::default();

    let features = Pipeline::features(&options).run(&tree);
    let content = Pipeline::content(&options).unwrap().run(&tree);

    assert_eq!(tree, before);
    assert!(!features.is_empty());
    assert!(!content.is_empty());
}

#[test]
fn test_unknown_language_is_wrapped_not_highlighted() {
    let tree = parse_markdown("## Build\n\n```rust\nfn main() {}\nlet x = 1;\n```\n");
    let result = Pipeline::content(&SiteOptions::default())
        .unwrap()
        .run_with_stats(&tree);

    assert_eq!(result.stats.code_blocks_highlighted, 0);
    assert!(result.html.contains(
        "<pre class=\"language-rust\"><code class=\"language-rust code-highlight\">\
         <span class=\"code-line\">fn main() {}</span>\n\
         <span class=\"code-line\">let x = 1;</span>\n</code></pre>"
    ));
    assert!(!result.html.contains("class=\"token"));
}

#[test]
fn test_script_source_keeps_symbols() {
    let source = format!("## H\n\n<script>var a = '{}';</script>\n", GLYPH);
    let site = generate_from_str(&source, &SiteOptions::default()).unwrap();
    assert!(site
        .content
        .contains(&format!("<script>var a = '{}';</script>", GLYPH)));
    assert!(!site.content.contains("class=\"symbol\""));
}

#[test]
fn test_leading_comment_keeps_block_separator() {
    let site =
        generate_from_str("<!-- top -->\n\n# T\n\n- a\n", &SiteOptions::default()).unwrap();
    assert!(site.content.starts_with("<!-- top -->\n<ul>"));
}
