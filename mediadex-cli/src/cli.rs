// mediadex-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Parser, Subcommand, ValueEnum};
use mediadex_core::Layout;
use mediadex_core::config::{DEFAULT_OUTPUT_FILENAME, DEFAULT_PROBE_TIMEOUT_SECS};
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Mediadex: Media inventory tool",
    long_about = "Builds a JSON inventory of filesystem roots, attaching ffprobe-backed media metadata to every recognized video file, via the mediadex-core library."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inventories one or more root paths into a JSON document
    Scan(ScanArgs),
}

#[derive(Parser, Debug)]
pub struct ScanArgs {
    /// Root paths to inventory; comma-separated within one argument or repeated
    #[arg(required = true, value_delimiter = ',', value_name = "ROOTS")]
    pub roots: Vec<PathBuf>,

    /// Output document path (overwritten on every run)
    #[arg(short = 'o', long = "output", value_name = "FILE", default_value = DEFAULT_OUTPUT_FILENAME)]
    pub output: PathBuf,

    /// Output shape: one flat sequence, or one nested tree per root
    #[arg(long, value_enum, default_value_t = LayoutArg::Flat)]
    pub layout: LayoutArg,

    /// Directory for the downloaded toolchain archive and unpacked build
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub cache_dir: PathBuf,

    /// Per-file ffprobe timeout in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_PROBE_TIMEOUT_SECS)]
    pub probe_timeout: u64,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutArg {
    Flat,
    Tree,
}

impl From<LayoutArg> for Layout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Flat => Layout::Flat,
            LayoutArg::Tree => Layout::Tree,
        }
    }
}
