//! Command-line interface definitions for `keytable`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use keytable::Platform;
use logging::LogArgs;

/// Command-line interface for the `keytable` binary.
#[derive(Parser, Debug)]
#[command(
    name = "keytable",
    about = "Generate keycode name and translation tables as C source",
    version
)]
pub struct Cli {
    /// Logging controls.
    #[command(flatten)]
    pub log: LogArgs,

    /// What to do.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate keycode maps from extracted data files.
    Generate(GenerateArgs),
    /// Extract a keycode table from a platform SDK header.
    Extract(ExtractArgs),
}

/// Arguments for the `generate` subcommand.
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Build manifest (RON). Defaults to `keytable.ron` if present, otherwise
    /// the platforms with shipped data are generated.
    #[arg(long, short, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory containing input CSV data.
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Directory to write generated code.
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

/// Arguments for the `extract` subcommand.
#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    /// Platform whose header to read (linux, macos, windows).
    #[arg(long, value_name = "PLATFORM")]
    pub platform: Platform,

    /// Input header file. Defaults to the platform SDK location.
    #[arg(long, short, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Output CSV file. Defaults to `data/<platform>_scancodes.csv`.
    #[arg(long, short, value_name = "PATH")]
    pub output: Option<PathBuf>,
}
