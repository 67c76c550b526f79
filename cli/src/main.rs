//! # Repack Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! Entry point of the `repack` CLI, run by the release workflow once all build
//! jobs have uploaded their archives. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Running the repack command and reporting its failure
//!
//! ## Examples
//!
//! ```bash
//! # Get help
//! repack --help
//!
//! # Repack with increased verbosity
//! repack -vv cast v12.0.0 ./artifacts ./release
//! ```
//!
//! Processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level (`RUST_LOG` overrides it)
//! 3. Run the repack
//! 4. On failure, print the full error chain and exit with status 1
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Command logic (repack)
mod common; // Shared utilities (fs, process, external tools)
mod core; // Core infrastructure (errors, config, version)

/// Width of the separator lines framing a fatal error.
const SEPARATOR_WIDTH: usize = 60;

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "repack",
    about = "Repack SDK build archives into release assets",
    long_about = "Classifies the build archives of one SDK release, extracts them into a\n\
                  canonical layout (assets, examples, include, doc) and compresses one\n\
                  zip per release asset.",
    version
)]
struct Cli {
    #[command(flatten)]
    args: commands::repack::RepackArgs,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    if let Err(e) = commands::repack::handle_repack(cli.args) {
        tracing::error!("Repack failed: {}", e);
        let separator = "-".repeat(SEPARATOR_WIDTH);
        eprintln!("{}", separator);
        eprintln!("{:?}", e);
        eprintln!("{}", separator);
        std::process::exit(1);
    }

    Ok(())
}
