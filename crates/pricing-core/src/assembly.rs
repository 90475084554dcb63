//! # Shipment Assembly
//!
//! Chains the building blocks for a whole shipment:
//!
//! ```text
//! request ──► caf::distribute ──► duty::compute_duties (per share)
//!                                        │
//!                                        ▼
//!                               shipment totals (Σ lines)
//!                                        │
//! context + service key ──► rates::resolve_on ──► transport (optional)
//! ```

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;

use crate::caf::{distribute, CafDistributionResult};
use crate::config::EngineConfig;
use crate::duty::{compute_duties, DutyBreakdown, DutyTotals};
use crate::error::CoreResult;
use crate::money::Money;
use crate::rates::{resolve_on, RateMatch};
use crate::types::{Article, LocalTransportRate, OriginInfo, PricingContext, TariffCatalog};

/// Everything needed to price one shipment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipmentRequest {
    pub hs_codes: Vec<String>,
    /// Total CAF value of the shipment in XOF.
    pub caf_total: Money,
    pub articles: Vec<Article>,
    pub origin: OriginInfo,
    pub context: Option<PricingContext>,
    /// Service the transport suggestion is for (`LOCAL_TRANSPORT`, ...).
    pub service_key: Option<String>,
    pub is_air_mode: bool,
    /// Reference date for rate validity; today (UTC) when absent.
    pub pricing_date: Option<NaiveDate>,
}

/// Priced shipment: distribution, per-line duties and their sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ShipmentQuote {
    pub distribution: CafDistributionResult,
    pub breakdowns: Vec<DutyBreakdown>,
    pub totals: DutyTotals,
    pub transport: Option<RateMatch>,
    /// Distribution and duty warnings, in order, without repeats.
    pub warnings: Vec<String>,
}

fn accumulate(into: &mut DutyTotals, line: &DutyTotals) {
    into.customs_duties += line.customs_duties;
    into.internal_taxes += line.internal_taxes;
    into.vat += line.vat;
    into.advance_tax += line.advance_tax;
    into.grand_total += line.grand_total;
    into.taxable_value += line.taxable_value;
}

fn push_unique(warnings: &mut Vec<String>, warning: &str) {
    if !warnings.iter().any(|w| w == warning) {
        warnings.push(warning.to_string());
    }
}

/// Prices a shipment end to end.
///
/// ## Errors
/// [`crate::CoreError::TariffCodeNotFound`] for the first requested code
/// with no tariff row. Nothing else fails.
pub fn assemble<C>(
    catalog: &C,
    request: &ShipmentRequest,
    rates: &[LocalTransportRate],
    config: &EngineConfig,
) -> CoreResult<ShipmentQuote>
where
    C: TariffCatalog + ?Sized,
{
    let distribution = distribute(&request.hs_codes, request.caf_total, &request.articles, config);

    let mut breakdowns = Vec::with_capacity(distribution.shares.len());
    let mut totals = DutyTotals::default();
    for share in &distribution.shares {
        let breakdown = compute_duties(catalog, &share.hs_code, share.caf_value, &request.origin, config)?;
        accumulate(&mut totals, &breakdown.totals);
        breakdowns.push(breakdown);
    }

    let mut warnings = Vec::new();
    for warning in distribution
        .warnings
        .iter()
        .chain(breakdowns.iter().flat_map(|b| b.warnings.iter()))
    {
        push_unique(&mut warnings, warning);
    }

    let transport = match (&request.context, request.service_key.as_deref()) {
        (Some(context), Some(service_key)) => {
            let today = request.pricing_date.unwrap_or_else(|| Utc::now().date_naive());
            resolve_on(rates, service_key, context, request.is_air_mode, config, today)
        }
        _ => {
            debug!("No pricing context or service key, transport not resolved");
            None
        }
    };

    info!(
        lines = breakdowns.len(),
        caf = %request.caf_total,
        grand_total = %totals.grand_total,
        transport = transport.is_some(),
        "Shipment priced"
    );

    Ok(ShipmentQuote {
        distribution,
        breakdowns,
        totals,
        transport,
        warnings,
    })
}
