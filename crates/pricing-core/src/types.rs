//! # Domain Types
//!
//! Reference data and request types consumed by the pricing engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Reference data (read-only, owned by the import pipeline)              │
//! │  ┌─────────────────────┐          ┌─────────────────────────┐          │
//! │  │    TariffCode       │          │  LocalTransportRate     │          │
//! │  │  ─────────────────  │          │  ─────────────────────  │          │
//! │  │  code / normalized  │          │  origin → destination   │          │
//! │  │  fiscal rates       │          │  container_type         │          │
//! │  │  advance tax flag   │          │  amount / currency      │          │
//! │  └─────────────────────┘          │  validity window        │          │
//! │                                   └─────────────────────────┘          │
//! │  Per-request data (created per call, discarded after)                  │
//! │  ┌───────────┐  ┌────────────┐  ┌────────────────┐  ┌────────────┐     │
//! │  │  Article  │  │ OriginInfo │  │ PricingContext │  │ QuoteIssue │     │
//! │  └───────────┘  └────────────┘  └────────────────┘  └────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rates Are Fractions
//! Every rate field stores a fraction: `0.01` is 1 %, `0.18` is 18 %.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::validation::RawNumber;

/// Number of digits of a full national tariff line.
pub const HS_CODE_LENGTH: usize = 10;

// =============================================================================
// HS Code Normalization
// =============================================================================

/// Strips everything but ASCII digits: `"8703.23.19"` → `"87032319"`.
pub fn normalize_hs_code(code: &str) -> String {
    code.chars().filter(char::is_ascii_digit).collect()
}

/// Brings a digit string to the 10-digit catalog convention.
///
/// Shorter codes are left-padded with zeros (restores leading zeros lost
/// when codes travel through spreadsheets as numbers); longer ones are
/// truncated.
pub fn to_catalog_key(digits: &str) -> String {
    if digits.len() >= HS_CODE_LENGTH {
        digits[..HS_CODE_LENGTH].to_string()
    } else {
        format!("{digits:0>width$}", width = HS_CODE_LENGTH)
    }
}

// =============================================================================
// Tariff Code
// =============================================================================

/// One row of the customs tariff (HS code) with its fiscal rates.
///
/// Missing rates mean "use the configured default" for the statistical,
/// solidarity, community and shipping levies, and zero for everything else.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TariffCode {
    /// Code as imported (may contain dots or spaces).
    pub code: String,
    /// Digits-only form. Computed from `code` when empty.
    pub normalized_code: String,
    pub description: Option<String>,

    /// Droit de douane (DD).
    pub customs_duty_rate: Option<Decimal>,
    /// Surtaxe.
    pub surtax_rate: Option<Decimal>,
    /// Redevance statistique (RS).
    pub statistical_levy_rate: Option<Decimal>,
    /// Prélèvement communautaire de solidarité (PCS).
    pub solidarity_levy_rate: Option<Decimal>,
    /// Prélèvement communautaire (PC), waived for trade-bloc origins.
    pub community_levy_rate: Option<Decimal>,
    /// COSEC shipping levy.
    pub shipping_levy_rate: Option<Decimal>,
    /// Taxe intérieure, assessed on CAF + DD + RS.
    pub internal_tax_rate: Option<Decimal>,
    /// Taxe conjoncturelle à l'importation (TCI).
    pub conjunctural_tax_rate: Option<Decimal>,
    pub environmental_tax_rate: Option<Decimal>,
    pub pastoral_tax_rate: Option<Decimal>,
    pub parafiscal_tax_rate: Option<Decimal>,
    pub cement_tax_rate: Option<Decimal>,
    pub vat_rate: Option<Decimal>,

    /// Subject to the advance income tax (AIR) unless the importer is CGE.
    pub advance_tax_applicable: bool,
    /// An official (mercuriale) value may override the declared CAF.
    pub official_valuation: bool,
}

impl TariffCode {
    /// Returns the catalog key (10-digit form) for this row.
    pub fn key(&self) -> String {
        let digits = if self.normalized_code.is_empty() {
            normalize_hs_code(&self.code)
        } else {
            normalize_hs_code(&self.normalized_code)
        };
        to_catalog_key(&digits)
    }
}

// =============================================================================
// Tariff Catalog
// =============================================================================

/// Read-only access to the tariff reference table.
///
/// Implementors only provide an exact lookup by key; `lookup` handles
/// normalization of user-supplied codes.
pub trait TariffCatalog {
    /// Exact lookup by a digits-only key.
    fn find(&self, key: &str) -> Option<&TariffCode>;

    /// Looks up a code as typed by a user or extracted from a document.
    ///
    /// Tries the raw digit string first, then its 10-digit catalog key.
    fn lookup(&self, code: &str) -> Option<&TariffCode> {
        let digits = normalize_hs_code(code);
        if digits.is_empty() {
            return None;
        }
        self.find(&digits).or_else(|| {
            let key = to_catalog_key(&digits);
            if key == digits {
                None
            } else {
                self.find(&key)
            }
        })
    }
}

impl TariffCatalog for HashMap<String, TariffCode> {
    fn find(&self, key: &str) -> Option<&TariffCode> {
        self.get(key)
    }
}

impl TariffCatalog for [TariffCode] {
    fn find(&self, key: &str) -> Option<&TariffCode> {
        self.iter().find(|row| row.key() == key)
    }
}

impl TariffCatalog for Vec<TariffCode> {
    fn find(&self, key: &str) -> Option<&TariffCode> {
        self.as_slice().find(key)
    }
}

/// Indexes tariff rows by their 10-digit catalog key.
///
/// Later rows win on duplicate keys, matching the import pipeline's
/// "last write wins" upsert.
pub fn index_tariff_codes(rows: impl IntoIterator<Item = TariffCode>) -> HashMap<String, TariffCode> {
    rows.into_iter().map(|row| (row.key(), row)).collect()
}

// =============================================================================
// Article
// =============================================================================

/// One line of goods within a shipment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub hs_code: String,
    /// Declared value, untrusted (number, numeric text or null).
    #[serde(default)]
    pub value: RawNumber,
    /// Declared currency; absent means XOF.
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Article {
    pub fn new(hs_code: impl Into<String>, value: f64, currency: impl Into<String>) -> Self {
        Article {
            hs_code: hs_code.into(),
            value: RawNumber::Number(value),
            currency: Some(currency.into()),
            description: None,
        }
    }
}

// =============================================================================
// Origin
// =============================================================================

/// Origin and importer status relevant to the duty cascade.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OriginInfo {
    /// ISO 3166-1 alpha-2 country of origin.
    pub country_code: Option<String>,
    /// Explicit trade-bloc qualification (certificate of origin checked
    /// upstream). Overrides the country list when set.
    pub trade_bloc_member: Option<bool>,
    /// Importer holds CGE status (exempt from the advance income tax).
    pub cge_exempt: bool,
}

// =============================================================================
// Local Transport Rate
// =============================================================================

/// One row of the local trucking rate table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalTransportRate {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub origin: String,
    pub destination: String,
    pub container_type: String,
    pub amount: Decimal,
    /// Absent means XOF.
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub valid_from: Option<NaiveDate>,
    #[serde(default)]
    pub valid_until: Option<NaiveDate>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub cargo_category: Option<String>,
}

fn default_active() -> bool {
    true
}

impl LocalTransportRate {
    /// Checks the validity window; open bounds are unlimited, closed bounds
    /// are inclusive.
    pub fn is_valid_on(&self, day: NaiveDate) -> bool {
        let started = self.valid_from.map_or(true, |from| from <= day);
        let not_expired = self.valid_until.map_or(true, |until| day <= until);
        started && not_expired
    }
}

// =============================================================================
// Pricing Context
// =============================================================================

/// Request-scoped facts about a shipment, produced by the extraction
/// pipeline. The rate resolver's only input besides the rate table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingContext {
    pub scope: Option<String>,
    pub container_type: Option<String>,
    pub container_count: Option<u32>,
    pub corridor: Option<String>,
    pub origin_port: Option<String>,
    pub destination_port: Option<String>,
    pub origin_country: Option<String>,
    pub destination_country: Option<String>,
    pub destination_city: Option<String>,
    pub weight_kg: Option<Decimal>,
    pub caf_value: Option<Decimal>,
    pub client_code: Option<String>,
}

// =============================================================================
// Quote Issue
// =============================================================================

/// Machine-readable code of a guard or rounding decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum IssueCode {
    /// NaN, infinity or non-numeric text; the value was dropped.
    NonFiniteNumber,
    /// A negative value was replaced by zero.
    NegativeValuesCoerced,
    /// A total was rounded to a whole unit.
    RoundingApplied,
}

impl IssueCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCode::NonFiniteNumber => "NON_FINITE_NUMBER",
            IssueCode::NegativeValuesCoerced => "NEGATIVE_VALUES_COERCED",
            IssueCode::RoundingApplied => "ROUNDING_APPLIED",
        }
    }
}

impl std::fmt::Display for IssueCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A diagnostic attached to a computation. Append-only, never dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuoteIssue {
    pub code: IssueCode,
    pub message: String,
    /// Where the value came from, e.g. `service_lines[1].quantity`.
    pub path: String,
}

impl QuoteIssue {
    pub fn new(code: IssueCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        QuoteIssue {
            code,
            message: message.into(),
            path: path.into(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
