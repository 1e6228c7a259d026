//! Plot a palette strip from colors read on stdin:
//!
//! ```text
//! echo '#FF0000, #00FF00, #0000FF' | palette-strip palette.png
//! ```

use std::{io::{self, Read}, path::PathBuf};
use anyhow::{Context, Result};
use clap::Parser;
use palette_kit::PaletteStrip;

mod logging;

/// Plot a palette strip from a list of hex colors read on stdin
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output image file (e.g. palette.png or palette.svg)
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init("warn");

    let mut input = String::new();
    io::stdin().read_to_string(&mut input).context("cannot read stdin")?;
    let strip = PaletteStrip::parse(&input)?;
    strip.save(&cli.output)?;
    Ok(())
}
