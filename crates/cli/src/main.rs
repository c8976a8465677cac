//! raml-flatten CLI
//!
//! Command-line interface for flattening parsed RAML documents into
//! simplified JSON.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use raml_flatten_common::SimplifyConfig;
use raml_flatten_parser::{DocumentLoader, FileLoader, RamlSimplifier};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "raml-flatten")]
#[command(version, about = "Flatten parsed RAML documents into simplified JSON", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Flatten a document and print resources, errors and traits
    #[command(after_help = "EXAMPLES:\n  \
        # Flatten a JSON dump of the RAML parser output\n  \
        raml-flatten simplify --input api.json\n\n  \
        # Keep URI parameters scoped to each branch\n  \
        raml-flatten simplify --input api.yaml --config flatten.yaml")]
    Simplify {
        /// Parsed RAML document (.json, or YAML otherwise)
        #[arg(short, long)]
        input: PathBuf,

        /// Flattening config (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print compact JSON instead of pretty-printed JSON
        #[arg(long)]
        compact: bool,
    },

    /// Print the trait dictionary of a document
    Traits {
        /// Parsed RAML document (.json, or YAML otherwise)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Print the error responses of a document, grouped by HTTP method
    Errors {
        /// Parsed RAML document (.json, or YAML otherwise)
        #[arg(short, long)]
        input: PathBuf,

        /// Flattening config (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Simplify {
            input,
            config,
            compact,
        } => simplify_command(&input, config.as_deref(), compact),
        Commands::Traits { input } => traits_command(&input),
        Commands::Errors { input, config } => errors_command(&input, config.as_deref()),
    }
}

/// Install the stderr log subscriber; `RUST_LOG` overrides the default level
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn simplify_command(input: &Path, config: Option<&Path>, compact: bool) -> Result<()> {
    let mut simplifier = load_simplifier(input, config)?;

    let result = simplifier
        .simplify()
        .context("Failed to flatten RAML document")?;

    eprintln!(
        "{} Flattened {} top-level resources, {} error responses",
        "✓".green(),
        result.resources.len(),
        result.errors.len()
    );
    if !result.diagnostics.is_empty() {
        eprintln!(
            "{} {} schema warnings",
            "⚠".yellow(),
            result.diagnostics.len()
        );
    }

    let value = serde_json::to_value(&result).context("Failed to serialize result")?;
    print_json(&value, compact)
}

fn traits_command(input: &Path) -> Result<()> {
    let simplifier = load_simplifier(input, None)?;

    let traits = simplifier
        .get_traits()
        .context("Failed to build trait dictionary")?;

    eprintln!("{} Found {} traits", "✓".green(), traits.len());

    let value = serde_json::to_value(&traits).context("Failed to serialize traits")?;
    print_json(&value, false)
}

fn errors_command(input: &Path, config: Option<&Path>) -> Result<()> {
    let mut simplifier = load_simplifier(input, config)?;

    simplifier
        .resources()
        .context("Failed to walk resource tree")?;
    let errors = simplifier.all_status_errors();

    eprintln!(
        "{} Found {} error responses across {} methods",
        "✓".green(),
        errors.len(),
        errors.verbs().count()
    );

    let value = serde_json::to_value(errors).context("Failed to serialize error index")?;
    print_json(&value, false)
}

fn load_simplifier(input: &Path, config: Option<&Path>) -> Result<RamlSimplifier> {
    eprintln!("{} Loading document: {}", "→".cyan(), input.display());

    let document = FileLoader::new(input)
        .load()
        .with_context(|| format!("Failed to load RAML document {}", input.display()))?;

    let config = match config {
        Some(path) => SimplifyConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SimplifyConfig::default(),
    };
    tracing::debug!(?config, "Using flattening config");

    Ok(RamlSimplifier::new(document).with_config(config))
}

fn print_json(value: &Value, compact: bool) -> Result<()> {
    let rendered = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{}", rendered);
    Ok(())
}
