//! xmldoc-md — generate Markdown API pages from a compiler XML documentation export.
//!
//! ```text
//! xmldoc-md <xml-file> [output-dir]
//! ```
//!
//! Writes `index.md` (types grouped by namespace) plus one page per type.

mod error;
mod model;
mod parser;
mod render;
mod toc;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const BANNER: &str = "XML Documentation - Markdown Documentation Generator";

#[derive(Parser)]
#[command(
    name = "xmldoc-md",
    version,
    about = "Generate Markdown API documentation from an XML documentation file"
)]
struct Cli {
    /// XML documentation file produced by the compiler
    input: Option<PathBuf>,

    /// Output directory (created if missing)
    #[arg(default_value = render::DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// Extra positional arguments are accepted and ignored
    #[arg(hide = true)]
    ignored: Vec<String>,

    /// Language tag for fenced code blocks taken from <code> elements
    #[arg(long, default_value = "csharp")]
    code_lang: String,

    /// Also render fields, events and method exceptions
    #[arg(long)]
    all_members: bool,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if !cli.ignored.is_empty() {
        debug!(args = ?cli.ignored, "ignoring extra arguments");
    }

    let Some(input) = cli.input.as_deref() else {
        print_usage();
        return Ok(ExitCode::from(1));
    };

    if !input.exists() {
        println!("Error: XML file not found: {}", input.display());
        println!();
        println!("Make sure to build the project first to generate XML documentation:");
        println!("  dotnet build --configuration Release");
        return Ok(ExitCode::from(1));
    }

    let rule = "=".repeat(60);
    println!("{}", BANNER);
    println!("{}", rule);
    println!("Input XML: {}", input.display());
    println!("Output directory: {}", cli.output.display());
    println!();

    let index = parser::DocIndex::load(input, &cli.code_lang)
        .with_context(|| format!("failed to parse {}", input.display()))?;
    info!(members = index.len(), "loaded documentation");

    let config = render::GeneratorConfig {
        output_dir: cli.output.clone(),
        all_members: cli.all_members,
    };
    let summary = render::Generator::new(&index, &config).generate_all()?;

    println!("Generated markdown documentation in {}", config.output_dir.display());
    println!("Total types documented: {}", summary.types);
    println!();
    println!("{}", rule);
    println!("Documentation generation complete!");
    println!("View the documentation at: {}", summary.index_path.display());

    Ok(ExitCode::SUCCESS)
}

fn print_usage() {
    println!("Usage: xmldoc-md <xml-file> [output-dir]");
    println!();
    println!("Example:");
    println!("  xmldoc-md src/MyLibrary/bin/Release/net9.0/MyLibrary.xml docs/api-markdown");
}

/// Log to stderr so stdout carries only the run summary.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn output_defaults() {
        let cli = Cli::parse_from(["xmldoc-md", "doc.xml"]);
        assert_eq!(cli.input, Some(PathBuf::from("doc.xml")));
        assert_eq!(cli.output, PathBuf::from("docs/api-markdown"));
        assert_eq!(cli.code_lang, "csharp");
        assert!(!cli.all_members);
    }

    #[test]
    fn input_is_optional_at_parse_time() {
        let cli = Cli::parse_from(["xmldoc-md"]);
        assert!(cli.input.is_none());
    }

    #[test]
    fn extra_positionals_are_ignored() {
        let cli = Cli::parse_from(["xmldoc-md", "doc.xml", "out", "extra", "more"]);
        assert_eq!(cli.input, Some(PathBuf::from("doc.xml")));
        assert_eq!(cli.output, PathBuf::from("out"));
        assert_eq!(cli.ignored, vec!["extra", "more"]);
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::parse_from(["xmldoc-md", "-vv", "doc.xml", "out"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.output, PathBuf::from("out"));
    }
}
