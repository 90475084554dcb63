//! # Local Transport Rate Resolver
//!
//! Suggests a trucking rate from the rate table for a destination city and
//! container type.
//!
//! ## Resolution Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  resolve(rates, service_key, context, is_air_mode)                      │
//! │                                                                         │
//! │  service key not trucking ─────────────────────────► None              │
//! │  air leg ──────────────────────────────────────────► None              │
//! │  no destination city / no container type ──────────► None              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  active rates valid today                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  exact destination ──(none)──► partial destination                      │
//! │       │                        ├── several destinations ──► None        │
//! │       │                        └── one destination                      │
//! │       ▼                                   │                             │
//! │  container family filter ◄────────────────┘                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  first match wins → RateMatch (confidence 0.90)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `None` is a normal answer ("no suggestion"), never an error.

use std::collections::BTreeSet;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::config::EngineConfig;
use crate::types::{LocalTransportRate, PricingContext};

/// Service keys that can receive a trucking rate.
pub const TRUCKING_SERVICE_KEYS: [&str; 2] = ["LOCAL_TRANSPORT", "TRUCKING"];

const TWENTY_FOOT_TOKENS: [&str; 3] = ["20'", "20' DRY", "20'DRY"];
const FORTY_FOOT_TOKENS: [&str; 3] = ["40'", "40' DRY", "40'DRY"];
const LOW_BED_TOKENS: [&str; 7] = [
    "LOW BED",
    "LOWBED",
    "LOW-BED",
    "FLAT RACK",
    "FLATRACK",
    "FLAT-RACK",
    "PLATEAU",
];

// =============================================================================
// Rate Match
// =============================================================================

/// A suggested rate with its audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RateMatch {
    pub rate_id: Option<String>,
    pub origin: String,
    pub destination: String,
    pub container_type: String,
    #[ts(type = "number")]
    pub amount: Decimal,
    pub currency: String,
    pub confidence: f64,
    pub explanation: String,
}

// =============================================================================
// Container Families
// =============================================================================

/// Container family inferred from a free-text container type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerFamily {
    /// `20DV`, `20'`, `20 DRY`, ...
    TwentyFoot,
    /// `40DV`, `40HC`, `40'`, ...
    FortyFoot,
    /// Low-bed trailers and flat racks.
    LowBed,
    Other,
}

impl ContainerFamily {
    pub fn classify(container_type: &str) -> Self {
        let compact = compact(container_type);
        if compact.starts_with("20") {
            ContainerFamily::TwentyFoot
        } else if compact.starts_with("40") {
            ContainerFamily::FortyFoot
        } else if matches!(compact.as_str(), "LB" | "FR")
            || ["LOWBED", "FLATRACK", "PLATEAU"]
                .iter()
                .any(|alias| compact.starts_with(alias))
        {
            ContainerFamily::LowBed
        } else {
            ContainerFamily::Other
        }
    }

    /// Whether a rate's container-type string serves this family.
    fn accepts(&self, query: &str, rate_container_type: &str) -> bool {
        let upper = rate_container_type.to_uppercase();
        let rate_compact = compact(rate_container_type);
        match self {
            ContainerFamily::TwentyFoot => {
                TWENTY_FOOT_TOKENS.iter().any(|t| upper.contains(t)) || rate_compact.starts_with("20")
            }
            ContainerFamily::FortyFoot => {
                FORTY_FOOT_TOKENS.iter().any(|t| upper.contains(t)) || rate_compact.starts_with("40")
            }
            ContainerFamily::LowBed => LOW_BED_TOKENS.iter().any(|t| upper.contains(t)),
            ContainerFamily::Other => {
                let query = compact(query);
                !query.is_empty() && rate_compact.contains(&query)
            }
        }
    }
}

/// Upper-cased, without whitespace, dashes or underscores.
fn compact(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(char::to_uppercase)
        .collect()
}

/// Canonical destination: trimmed and upper-cased.
fn canonical(value: &str) -> String {
    value.trim().to_uppercase()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// =============================================================================
// Resolution
// =============================================================================

/// Whether `service_key` designates a trucking service.
pub fn is_trucking_service(service_key: &str) -> bool {
    let key = service_key.trim();
    TRUCKING_SERVICE_KEYS
        .iter()
        .any(|k| k.eq_ignore_ascii_case(key))
}

/// Resolves a rate as of today's UTC date.
pub fn resolve(
    rates: &[LocalTransportRate],
    service_key: &str,
    context: &PricingContext,
    is_air_mode: bool,
    config: &EngineConfig,
) -> Option<RateMatch> {
    resolve_on(rates, service_key, context, is_air_mode, config, Utc::now().date_naive())
}

/// Resolves a rate as of `today`.
pub fn resolve_on(
    rates: &[LocalTransportRate],
    service_key: &str,
    context: &PricingContext,
    is_air_mode: bool,
    config: &EngineConfig,
    today: NaiveDate,
) -> Option<RateMatch> {
    if !is_trucking_service(service_key) {
        debug!(service_key, "Not a trucking service, no rate suggestion");
        return None;
    }
    if is_air_mode {
        debug!("Air leg, trucking rates do not apply");
        return None;
    }
    let destination = non_blank(context.destination_city.as_deref())?;
    let container_type = non_blank(context.container_type.as_deref())?;

    let usable: Vec<&LocalTransportRate> = rates
        .iter()
        .filter(|rate| rate.active && rate.is_valid_on(today))
        .collect();

    let query = canonical(destination);
    let exact: Vec<&LocalTransportRate> = usable
        .iter()
        .copied()
        .filter(|rate| canonical(&rate.destination) == query)
        .collect();

    let (candidates, exact_match) = if exact.is_empty() {
        let partial: Vec<&LocalTransportRate> = usable
            .iter()
            .copied()
            .filter(|rate| {
                let candidate = canonical(&rate.destination);
                !candidate.is_empty() && (candidate.contains(&query) || query.contains(&candidate))
            })
            .collect();
        let destinations: BTreeSet<String> =
            partial.iter().map(|rate| canonical(&rate.destination)).collect();
        if destinations.len() != 1 {
            debug!(
                destination = %query,
                candidates = destinations.len(),
                "No unique destination match"
            );
            return None;
        }
        (partial, false)
    } else {
        (exact, true)
    };

    let family = ContainerFamily::classify(container_type);
    let rate = candidates
        .into_iter()
        .find(|rate| family.accepts(container_type, &rate.container_type))?;

    let currency = non_blank(rate.currency.as_deref())
        .map(str::to_uppercase)
        .unwrap_or_else(|| "XOF".to_string());
    let explanation = explain(rate, &currency, &query, container_type, exact_match);
    debug!(
        destination = %rate.destination,
        container = %rate.container_type,
        amount = %rate.amount,
        "Transport rate resolved"
    );

    Some(RateMatch {
        rate_id: rate.id.clone(),
        origin: rate.origin.clone(),
        destination: rate.destination.clone(),
        container_type: rate.container_type.clone(),
        amount: rate.amount,
        currency,
        confidence: config.rate_confidence,
        explanation,
    })
}

fn explain(
    rate: &LocalTransportRate,
    currency: &str,
    query: &str,
    container_type: &str,
    exact_match: bool,
) -> String {
    let mut text = format!(
        "Transport local {} → {} ({}) : {} {}",
        rate.origin.trim(),
        rate.destination.trim(),
        rate.container_type.trim(),
        rate.amount.normalize(),
        currency
    );
    if let Some(provider) = non_blank(rate.provider.as_deref()) {
        text.push_str(&format!(", transporteur {provider}"));
    }
    let kind = if exact_match { "exacte" } else { "partielle" };
    text.push_str(&format!(
        ". Destination « {query} » (correspondance {kind}), conteneur « {} ».",
        container_type.trim()
    ));
    text
}

// =============================================================================
// Unit Tests
// =============================================================================
