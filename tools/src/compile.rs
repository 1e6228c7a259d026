//! Compile a curated palette dataset into the C++ map literal used by
//! the native build:
//!
//! ```text
//! compile-palettes -i raw_data.json -o color_palettes.cpp -f ochRe
//! compile-palettes --config palettes.toml
//! ```

use std::path::PathBuf;
use anyhow::{bail, Context, Result};
use clap::Parser;
use palette_kit::{CompileOptions, CompilerConfig, FamilySelection, compile};
use tracing::info;

mod logging;

/// Compile palette families into a C++ nested map literal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML file providing defaults for the other options
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Palette dataset (JSON, or JSON5 for `.json5` files)
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// File receiving the literal, overwritten if it exists
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Family to compile, as named in the dataset (repeatable)
    #[arg(short, long = "family", value_name = "NAME",
          conflicts_with = "all_families")]
    families: Vec<String>,

    /// Compile every family of the dataset
    #[arg(long)]
    all_families: bool,

    /// Name of the C++ variable
    #[arg(long, value_name = "NAME")]
    variable: Option<String>,

    /// Emit a complete header, the map living in this namespace
    #[arg(long, value_name = "NS")]
    namespace: Option<String>,

    /// Show debug logs
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(if cli.verbose { "debug" } else { "info" });

    let config = match &cli.config {
        Some(path) => CompilerConfig::load(path)?,
        None => CompilerConfig::default(),
    };
    let input = cli.input.or_else(|| config.input.clone())
        .context("no dataset given: use --input or `input` in the configuration")?;
    let output = cli.output.or_else(|| config.output.clone())
        .context("no output file given: use --output or `output` in the \
                  configuration")?;
    let selection = if cli.all_families {
        FamilySelection::All
    } else if !cli.families.is_empty() {
        FamilySelection::Only(cli.families)
    } else if let Some(selection) = config.selection() {
        selection
    } else {
        bail!("no family selected: use --family NAME or --all-families")
    };

    let mut options = config.apply(CompileOptions::new(selection));
    if let Some(name) = cli.variable { options = options.variable(name) }
    if let Some(ns) = cli.namespace { options = options.header(ns) }

    let mapping = compile::compile_file(&input, &output, &options)
        .with_context(|| format!("cannot compile {}", input.display()))?;
    info!(input = %input.display(), output = %output.display(),
          bytes = mapping.as_str().len(), "done");
    Ok(())
}
