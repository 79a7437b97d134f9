// mediadex-cli/src/main.rs
//
// This file defines the command-line interface (CLI) for the Mediadex media
// inventory tool. It uses the `clap` crate to parse command-line arguments
// for the 'scan' command.
//
// Responsibilities include:
// - Parsing user-provided arguments.
// - Setting up logging via env_logger (RUST_LOG, default info).
// - Configuring the `mediadex-core` library based on CLI arguments.
// - Resolving the ffmpeg toolchain before any walking starts.
// - Invoking the core inventory logic and writing the output document.
// - Managing process exit codes based on success or failure.

mod cli;

use clap::Parser;
use log::{error, info};
use mediadex_core::{
    CoreConfig, CoreResult, FfprobeProber, build_inventory, ensure_toolchain, write_document,
};
use std::process;
use std::time::Duration;

use cli::{Cli, Commands, ScanArgs};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Scan(args) => run_scan(args),
    };

    if let Err(e) = result {
        error!("{e}");
        process::exit(1);
    }
}

fn run_scan(args: ScanArgs) -> CoreResult<()> {
    let mut config = CoreConfig::new(args.roots);
    config.layout = args.layout.into();
    config.output_path = args.output;
    config.cache_dir = args.cache_dir;
    config.probe_timeout = Duration::from_secs(args.probe_timeout);
    config.validate()?;

    // Resolve (or bootstrap) the toolchain before any root is walked; a
    // failure here halts the run before partial work is done.
    let toolchain = ensure_toolchain(&config.cache_dir)?;
    match toolchain.bin_dir() {
        Some(dir) => info!("Using bootstrapped ffmpeg toolchain at {}", dir.display()),
        None => info!("Using ffmpeg toolchain from the search path"),
    }

    let prober = FfprobeProber::new(toolchain, config.probe_timeout);
    let document = build_inventory(&config, &prober)?;
    write_document(&document, &config.output_path)?;
    info!("Results saved to {}", config.output_path.display());
    Ok(())
}
