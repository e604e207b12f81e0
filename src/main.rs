//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `portmap` library that handles:
//! - Command-line argument parsing
//! - Banner and logger initialization
//! - User-facing summary and exit status
//!
//! All core functionality is implemented in the library crate.

use anyhow::Result;
use clap::Parser;
use std::process;

use portmap::config::cli::Cli;
use portmap::initialization::init_logger_with;
use portmap::{print_banner, run_portmap, summary_line};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let cli = Cli::parse();
    let silent = cli.silent;

    if !silent {
        print_banner();
    }

    let config = match cli.into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("portmap error: {e}");
            process::exit(1);
        }
    };

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    if let Err(e) = init_logger_with(log_level.into(), log_format) {
        eprintln!("portmap error: failed to initialize logger: {e}");
        process::exit(1);
    }

    // stdout carries records only; the summary goes to stderr
    match run_portmap(config).await {
        Ok(report) => {
            if !silent {
                eprintln!("{}", summary_line(&report));
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("portmap error: {:#}", e);
            process::exit(1);
        }
    }
}
