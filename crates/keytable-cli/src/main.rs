#![warn(missing_docs)]

//! Entry point for the `keytable` binary.

mod cli;

use std::{
    path::{Path, PathBuf},
    process,
};

use clap::Parser;
use keytable::{Manifest, Result, extract_to_file, keymap::scancodes_file};
use tracing::{error, info};

use crate::cli::{Cli, Commands, ExtractArgs, GenerateArgs};

fn main() {
    if let Err(err) = run() {
        error!("{err}");
        eprintln!("error: {err}");
        process::exit(1);
    }
}

/// Parse CLI arguments, install logging, and dispatch to the chosen subcommand.
fn run() -> Result<()> {
    let Cli { log, command } = Cli::parse();
    logging::init(&log.spec());

    match command {
        Commands::Generate(args) => generate(args),
        Commands::Extract(args) => extract(&args),
    }
}

/// Manifest read when `--config` is not given, if present.
const DEFAULT_MANIFEST: &str = "keytable.ron";

/// Load the manifest, apply directory overrides, and generate every keymap.
fn generate(args: GenerateArgs) -> Result<()> {
    let default_path = Path::new(DEFAULT_MANIFEST);
    let mut manifest = match &args.config {
        Some(path) => Manifest::load(path)?,
        None if default_path.is_file() => Manifest::load(default_path)?,
        None => Manifest::default(),
    };
    if let Some(dir) = args.data_dir {
        manifest.data_dir = dir;
    }
    if let Some(dir) = args.out_dir {
        manifest.out_dir = dir;
    }
    manifest.generate()
}

/// Scrape a platform header into a scancode CSV file.
fn extract(args: &ExtractArgs) -> Result<()> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from("data").join(scancodes_file(args.platform.name())));
    let count = extract_to_file(args.platform, args.input.as_deref(), &output)?;
    info!(count, file = %output.display(), "wrote scancode table");
    Ok(())
}
