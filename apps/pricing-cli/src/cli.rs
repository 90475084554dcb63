//! CLI argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "pricing",
    version,
    about = "Customs duty & freight pricing engine",
    long_about = "Computes customs duties, splits CAF values across HS codes, \n\
                  suggests local trucking rates and totals quotations.\n\n\
                  Documents are JSON files (use - for stdin). Results are printed \n\
                  as pretty JSON on stdout; logs go to stderr."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Engine config file (TOML). Defaults to pricing.toml in the user config dir.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// More logging (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Errors only.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Duty and tax breakdown for one HS code.
    Duties(DutiesArgs),

    /// Split a CAF total across HS codes.
    Distribute(RequestArgs),

    /// Suggest a local trucking rate.
    Rate(RateArgs),

    /// Totals of a manually edited quotation.
    Quote(RequestArgs),

    /// Price a whole shipment (distribution, duties, transport).
    Assemble(AssembleArgs),
}

#[derive(Debug, Args)]
pub struct DutiesArgs {
    /// Tariff table (JSON array of tariff rows).
    #[arg(long, value_name = "FILE")]
    pub tariffs: PathBuf,

    /// HS code, with or without dots.
    #[arg(long, value_name = "CODE")]
    pub hs: String,

    /// CAF value in XOF.
    #[arg(long, value_name = "AMOUNT")]
    pub caf: i64,

    /// Country of origin (ISO 3166-1 alpha-2).
    #[arg(long, value_name = "CC")]
    pub origin: Option<String>,

    /// Importer holds CGE status (no advance income tax).
    #[arg(long)]
    pub cge: bool,
}

#[derive(Debug, Args)]
pub struct RequestArgs {
    /// Request document (JSON).
    #[arg(long, value_name = "FILE")]
    pub request: PathBuf,
}

#[derive(Debug, Args)]
pub struct RateArgs {
    /// Local transport rate table (JSON array).
    #[arg(long, value_name = "FILE")]
    pub rates: PathBuf,

    /// Pricing context (JSON object).
    #[arg(long, value_name = "FILE")]
    pub context: PathBuf,

    /// Service the rate is for.
    #[arg(long, value_name = "KEY", default_value = "LOCAL_TRANSPORT")]
    pub service: String,

    /// Shipment moves by air.
    #[arg(long)]
    pub air: bool,

    /// Reference date for rate validity (default: today, UTC).
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Args)]
pub struct AssembleArgs {
    /// Tariff table (JSON array of tariff rows).
    #[arg(long, value_name = "FILE")]
    pub tariffs: PathBuf,

    /// Shipment request (JSON object).
    #[arg(long, value_name = "FILE")]
    pub request: PathBuf,

    /// Local transport rate table (JSON array).
    #[arg(long, value_name = "FILE")]
    pub rates: Option<PathBuf>,
}
