//! # pricing
//!
//! Command-line front end for the customs duty & freight pricing engine.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  parse args ──► init logging ──► load config ──► run command          │
//! │                                                      │                 │
//! │                          stdout: pretty JSON ◄───────┤                 │
//! │                          stderr: error, exit 1 ◄─────┘                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cli;
mod commands;
mod config;
mod logging;

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = logging::init_logging(cli.verbose, cli.quiet) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }

    let exit_code = match execute(&cli) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("error: {e:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn execute(cli: &Cli) -> anyhow::Result<()> {
    let engine_config = config::load(cli.config.as_deref()).context("failed to load configuration")?;
    debug!(?engine_config, "Configuration loaded");

    let output = commands::run(&cli.command, &engine_config)?;
    let rendered = serde_json::to_string_pretty(&output)?;
    println!("{rendered}");
    Ok(())
}
