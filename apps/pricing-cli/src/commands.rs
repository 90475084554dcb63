//! Command handlers. Each reads its documents, calls the engine and returns
//! the JSON value to print.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use pricing_core::{
    assemble, compute_duties, compute_quote, distribute, index_tariff_codes, resolve_on, Article,
    EngineConfig, LocalTransportRate, Money, OriginInfo, PricingContext, QuoteInput, ShipmentRequest,
    TariffCode,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::cli::{AssembleArgs, Command, DutiesArgs, RateArgs, RequestArgs};

/// Body of a `distribute` request.
#[derive(Debug, Deserialize)]
pub struct DistributeRequest {
    pub hs_codes: Vec<String>,
    pub caf_total: Money,
    #[serde(default)]
    pub articles: Vec<Article>,
}

/// Runs one command.
pub fn run(command: &Command, config: &EngineConfig) -> Result<Value> {
    match command {
        Command::Duties(args) => run_duties(args, config),
        Command::Distribute(args) => run_distribute(args, config),
        Command::Rate(args) => run_rate(args, config),
        Command::Quote(args) => run_quote(args, config),
        Command::Assemble(args) => run_assemble(args, config),
    }
}

fn run_duties(args: &DutiesArgs, config: &EngineConfig) -> Result<Value> {
    let catalog = index_tariff_codes(read_document::<Vec<TariffCode>>(&args.tariffs)?);
    let origin = OriginInfo {
        country_code: args.origin.clone(),
        trade_bloc_member: None,
        cge_exempt: args.cge,
    };
    let breakdown = compute_duties(&catalog, &args.hs, Money::from_units(args.caf), &origin, config)?;
    info!(
        hs_code = %breakdown.hs_code,
        grand_total = %breakdown.totals.grand_total,
        "Duties computed"
    );
    Ok(serde_json::to_value(breakdown)?)
}

fn run_distribute(args: &RequestArgs, config: &EngineConfig) -> Result<Value> {
    let request: DistributeRequest = read_document(&args.request)?;
    let result = distribute(&request.hs_codes, request.caf_total, &request.articles, config);
    for warning in &result.warnings {
        warn!("{warning}");
    }
    Ok(serde_json::to_value(result)?)
}

fn run_rate(args: &RateArgs, config: &EngineConfig) -> Result<Value> {
    let rates: Vec<LocalTransportRate> = read_document(&args.rates)?;
    let context: PricingContext = read_document(&args.context)?;
    let today = args.date.unwrap_or_else(|| Utc::now().date_naive());

    let found = resolve_on(&rates, &args.service, &context, args.air, config, today);
    if found.is_none() {
        info!(service = %args.service, "No rate suggestion");
    }
    Ok(serde_json::to_value(found)?)
}

fn run_quote(args: &RequestArgs, config: &EngineConfig) -> Result<Value> {
    let input: QuoteInput = read_document(&args.request)?;
    let result = compute_quote(&input, config);
    for issue in &result.issues {
        warn!(code = %issue.code, path = %issue.path, "{}", issue.message);
    }
    Ok(serde_json::to_value(result)?)
}

fn run_assemble(args: &AssembleArgs, config: &EngineConfig) -> Result<Value> {
    let catalog = index_tariff_codes(read_document::<Vec<TariffCode>>(&args.tariffs)?);
    let request: ShipmentRequest = read_document(&args.request)?;
    let rates: Vec<LocalTransportRate> = match &args.rates {
        Some(path) => read_document(path)?,
        None => Vec::new(),
    };
    let quote = assemble(&catalog, &request, &rates, config)?;
    Ok(serde_json::to_value(quote)?)
}

/// Reads a JSON document from a file, or stdin when the path is `-`.
fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?
    };
    parse_document(&contents).with_context(|| format!("invalid JSON in {}", path.display()))
}

fn parse_document<T: DeserializeOwned>(contents: &str) -> Result<T> {
    Ok(serde_json::from_str(contents)?)
}
