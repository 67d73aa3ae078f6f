//! symbolist-site CLI - render the Symbolist README into site props

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use symbolist_site::model::NodeKind;
use symbolist_site::transform::{AutolinkBehavior, AutolinkOptions};
use symbolist_site::{
    generate_with_stats, render, JsonFormat, MarkdownParser, Pipeline, PipelineStats, SiteOptions,
};

#[derive(Parser)]
#[command(name = "symbolist-site")]
#[command(version)]
#[command(about = "Render the Symbolist README into the site's features and content HTML", long_about = None)]
struct Cli {
    /// Input README file
    #[arg(value_name = "README")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    pipeline: PipelineArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Flags shared by every rendering command.
#[derive(Args, Clone, Default)]
struct PipelineArgs {
    /// Leave code blocks unhighlighted
    #[arg(long, global = true)]
    no_highlight: bool,

    /// Keep images in the content fragment
    #[arg(long, global = true)]
    keep_images: bool,

    /// Heading depth to drop from the content fragment (repeatable)
    #[arg(long = "exclude-depth", value_name = "N", global = true)]
    exclude_depth: Vec<u8>,

    /// Node type extracted for the features fragment
    #[arg(long, value_name = "KIND", value_parser = parse_kind, global = true)]
    find: Option<NodeKind>,

    /// Heading anchor placement (prepend, append, wrap, before, after)
    #[arg(long, value_name = "BEHAVIOUR", value_parser = parse_behavior, global = true)]
    autolink: Option<AutolinkBehavior>,

    /// Print pipeline statistics to stderr
    #[arg(long, global = true)]
    stats: bool,
}

impl PipelineArgs {
    fn site_options(&self) -> SiteOptions {
        let mut options = SiteOptions::new().with_image_removal(!self.keep_images);

        if self.no_highlight {
            options = options.without_highlight();
        }
        if !self.exclude_depth.is_empty() {
            options = options.with_excluded_depths(self.exclude_depth.iter().copied());
        }
        if let Some(kind) = self.find {
            options = options.with_features_node(kind);
        }
        if let Some(behavior) = self.autolink {
            options = options.with_autolink(
                AutolinkOptions::new()
                    .with_behavior(behavior)
                    .empty_content(),
            );
        }
        options
    }
}

fn parse_kind(value: &str) -> Result<NodeKind, String> {
    value.parse().map_err(|e: symbolist_site::Error| e.to_string())
}

fn parse_behavior(value: &str) -> Result<AutolinkBehavior, String> {
    value.parse().map_err(|e: symbolist_site::Error| e.to_string())
}

#[derive(Subcommand)]
enum Commands {
    /// Render both fragments and the props JSON into a directory
    Build {
        /// Input README file
        #[arg(value_name = "README")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Render the features fragment
    Features {
        /// Input README file
        #[arg(value_name = "README")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Render the content fragment
    Content {
        /// Input README file
        #[arg(value_name = "README")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Dump the parsed markdown tree as JSON
    Tree {
        /// Input README file
        #[arg(value_name = "README")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show version information
    Version,
}

#[derive(Clone, Copy)]
enum Fragment {
    Features,
    Content,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let args = cli.pipeline;

    let result = match cli.command {
        Some(Commands::Build { input, output }) => cmd_build(&input, output.as_deref(), &args),
        Some(Commands::Features { input, output }) => {
            cmd_fragment(&input, output.as_deref(), Fragment::Features, &args)
        }
        Some(Commands::Content { input, output }) => {
            cmd_fragment(&input, output.as_deref(), Fragment::Content, &args)
        }
        Some(Commands::Tree {
            input,
            output,
            compact,
        }) => cmd_tree(&input, output.as_deref(), compact),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: build if input is provided
            if let Some(input) = cli.input {
                cmd_build(&input, cli.output.as_deref(), &args)
            } else {
                println!("{}", "Usage: symbolist-site <README> [OUTPUT]".yellow());
                println!("       symbolist-site --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_build(
    input: &Path,
    output: Option<&Path>,
    args: &PipelineArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("site"));

    let pb = ProgressBar::new(2);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Rendering README...");
    let report = generate_with_stats(input, &args.site_options())?;
    pb.inc(1);

    pb.set_message("Writing files...");
    fs::create_dir_all(&output_dir)?;
    write_output(&output_dir.join("features.html"), &report.site.features)?;
    write_output(&output_dir.join("content.html"), &report.site.content)?;
    write_output(
        &output_dir.join("props.json"),
        &report.site.to_json(JsonFormat::Pretty)?,
    )?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    println!("  {} features.html", "├─".dimmed());
    println!("  {} content.html", "├─".dimmed());
    println!("  {} props.json", "└─".dimmed());

    if args.stats {
        print_stats("features", &report.features)?;
        print_stats("content", &report.content)?;
        print_stats("total", &report.totals())?;
    }

    Ok(())
}

fn cmd_fragment(
    input: &Path,
    output: Option<&Path>,
    fragment: Fragment,
    args: &PipelineArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = args.site_options();
    let tree = MarkdownParser::with_options(options.parse.clone()).parse_file(input)?;

    let pipeline = match fragment {
        Fragment::Features => Pipeline::features(&options),
        Fragment::Content => Pipeline::content(&options)?,
    };
    let result = pipeline.run_with_stats(&tree);

    if let Some(path) = output {
        write_output(path, &result.html)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", result.html);
    }

    if args.stats {
        print_stats(pipeline.name(), &result.stats)?;
    }

    Ok(())
}

fn cmd_tree(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let tree = symbolist_site::parse_file(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = render::to_json(&tree, format)?;

    if let Some(path) = output {
        write_output(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_version() {
    println!(
        "{} {}",
        "symbolist-site".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("Symbolist documentation site content generator");
    println!();
    println!("License: MIT");
}

fn write_output(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)
}

fn print_stats(name: &str, stats: &PipelineStats) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("\n{} {}", "Statistics:".cyan().bold(), name);
    eprintln!("{}", "─".repeat(40).dimmed());
    eprintln!("{}", serde_json::to_string_pretty(stats)?);
    Ok(())
}
