//! Benchmarks for symbolist-site pipeline performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks render synthetic READMEs of increasing size.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use symbolist_site::{generate_from_str, parse_markdown, Pipeline, SiteOptions};

/// Creates a README with the given number of sections.
fn create_readme(sections: usize) -> String {
    let mut readme = String::from("# Symbolist\n\nSF Symbols for the web.\n\n- Typed\n- Tiny\n- Fast\n\n");

    for i in 0..sections {
        readme.push_str(&format!("## Section {}\n\n", i));
        readme.push_str("Some <strong>inline</strong> text with a \u{100001} glyph.\n\n");
        readme.push_str("```ts\n");
        readme.push_str(&format!("const value{} = symbol(\"star\", {{ size: {} }})\n", i, i));
        readme.push_str("```\n\n");
        readme.push_str(&format!("![image {}](image{}.png)\n\n", i, i));
    }

    readme
}

fn bench_parse(c: &mut Criterion) {
    let readme = create_readme(50);

    c.bench_function("parse_markdown_50_sections", |b| {
        b.iter(|| parse_markdown(black_box(&readme)))
    });
}

fn bench_pipelines(c: &mut Criterion) {
    let options = SiteOptions::default();
    let tree = parse_markdown(&create_readme(50));
    let features = Pipeline::features(&options);
    let content = Pipeline::content(&options).expect("default options are valid");

    c.bench_function("features_pipeline", |b| {
        b.iter(|| features.run(black_box(&tree)))
    });

    c.bench_function("content_pipeline", |b| {
        b.iter(|| content.run(black_box(&tree)))
    });
}

fn bench_generate(c: &mut Criterion) {
    let options = SiteOptions::default();
    let mut group = c.benchmark_group("generate");

    for sections in [1, 10, 100] {
        let readme = create_readme(sections);
        group.bench_with_input(BenchmarkId::from_parameter(sections), &readme, |b, readme| {
            b.iter(|| generate_from_str(black_box(readme), &options))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_pipelines, bench_generate);
criterion_main!(benches);
