//! Integration tests for generating site content from files on disk.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use symbolist_site::{generate, generate_with_stats, Error, JsonFormat, SiteOptions};

const README: &str = "# Symbolist\n\n\
    SF Symbols for the web.\n\n\
    - One\n- Two\n\n\
    ## Install\n\n\
    ```bash\nnpm install symbolist\n```\n\n\
    ![banner](banner.png)\n";

fn write_readme(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("README.md");
    fs::write(&path, contents).unwrap();
    (dir, path)
}

#[test]
fn test_generate_from_file() {
    let (_dir, path) = write_readme(README);
    let site = generate(&path, &SiteOptions::default()).unwrap();

    assert_eq!(site.features, "<ul>\n<li>One</li>\n<li>Two</li>\n</ul>");
    assert!(site.content.starts_with("<p>SF Symbols for the web.</p>"));
    assert!(site.content.contains("<span class=\"token function\">npm</span>"));
    assert!(!site.content.contains("banner.png"));
}

#[test]
fn test_generate_with_stats() {
    let (_dir, path) = write_readme(README);
    let report = generate_with_stats(&path, &SiteOptions::default()).unwrap();

    assert_eq!(report.features.node_found, Some(true));
    assert_eq!(report.content.headings_removed, 1);
    assert_eq!(report.content.images_removed, 1);
    assert_eq!(report.content.code_blocks_highlighted, 1);
    assert_eq!(report.content.slugs_assigned, 1);
    assert_eq!(report.content.anchors_added, 1);

    let totals = report.totals();
    assert_eq!(totals.node_found, Some(true));
    assert_eq!(totals.slugs_assigned, 1);
    assert_eq!(totals.images_removed, 1);
}

#[test]
fn test_missing_source_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.md");

    let err = generate(&path, &SiteOptions::default()).unwrap_err();
    match err {
        Error::SourceRead { path: failed, .. } => assert_eq!(failed, path),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_invalid_options_are_rejected() {
    let (_dir, path) = write_readme(README);
    let options = SiteOptions::new().with_excluded_depths([0]);
    assert!(matches!(
        generate(&path, &options),
        Err(Error::InvalidHeadingDepth(0))
    ));
}

#[test]
fn test_props_json_round_trip() {
    let (_dir, path) = write_readme(README);
    let site = generate(&path, &SiteOptions::default()).unwrap();

    let json = site.to_json(JsonFormat::Pretty).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["features"], site.features.as_str());
    assert_eq!(value["content"], site.content.as_str());
}

#[test]
fn test_empty_readme() {
    let (_dir, path) = write_readme("");
    let site = generate(&path, &SiteOptions::default()).unwrap();
    assert_eq!(site.features, "");
    assert_eq!(site.content, "");
}

#[cfg(feature = "async")]
#[tokio::test]
async fn test_generate_async_matches_sync() {
    let (_dir, path) = write_readme(README);
    let options = SiteOptions::default();

    let sync = generate(&path, &options).unwrap();
    let async_site = symbolist_site::generate_async(&path, &options).await.unwrap();
    assert_eq!(sync, async_site);
}

#[cfg(feature = "async")]
#[tokio::test]
async fn test_generate_async_missing_source() {
    let result = symbolist_site::generate_async("/nonexistent/README.md", &SiteOptions::default()).await;
    assert!(matches!(result, Err(Error::SourceRead { .. })));
}
