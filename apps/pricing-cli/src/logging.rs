//! Logging setup for the CLI.
//!
//! Logs always go to stderr so stdout stays pure JSON.
//!
//! | Flags     | Filter                              |
//! |-----------|-------------------------------------|
//! | (none)    | `RUST_LOG`, or `warn` when unset    |
//! | `-q`      | `error`                             |
//! | `-v`      | `info`                              |
//! | `-vv`     | `debug`                             |
//! | `-vvv`    | `trace`                             |

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Picks the level from the verbosity flags. `None` means "defer to
/// `RUST_LOG`".
pub fn level_from_flags(verbose: u8, quiet: bool) -> Option<LevelFilter> {
    if quiet {
        return Some(LevelFilter::ERROR);
    }
    match verbose {
        0 => None,
        1 => Some(LevelFilter::INFO),
        2 => Some(LevelFilter::DEBUG),
        _ => Some(LevelFilter::TRACE),
    }
}

/// Installs the global subscriber. Call once, before any command runs.
pub fn init_logging(verbose: u8, quiet: bool) -> anyhow::Result<()> {
    let filter = match level_from_flags(verbose, quiet) {
        Some(level) => EnvFilter::default().add_directive(level.into()),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))
}
