//! # Quotation Line Engine
//!
//! Totals for manually edited quotations: cargo lines (weight/volume) and
//! service lines (price), with VAT and the rounding policy.
//!
//! ```text
//! cargo line    quantity × weight_kg   → total_weight_kg
//!               quantity × volume_m3   → total_volume_m3
//! service line  quantity × unit_price  → total_ht
//!
//! tax = total_ht × tax_rate         (unrounded inputs)
//! ttc = total_ht + tax              (unrounded inputs)
//! rounding applied to total_ht, tax, ttc independently
//! ```
//!
//! A product or sum that leaves the decimal range is dropped (counted as
//! zero) with a `NON_FINITE_NUMBER` issue.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::config::EngineConfig;
use crate::types::{IssueCode, QuoteIssue};
use crate::validation::{apply_rounding, guard_number, RawNumber, RoundingMode};

// =============================================================================
// Input
// =============================================================================

/// A goods line: counts and unit measures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CargoLine {
    pub description: Option<String>,
    pub quantity: RawNumber,
    pub weight_kg: RawNumber,
    pub volume_m3: RawNumber,
}

/// A billed service line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceLine {
    pub description: Option<String>,
    pub service_key: Option<String>,
    pub quantity: RawNumber,
    pub unit_price: RawNumber,
}

/// A manually edited quotation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteInput {
    pub cargo_lines: Vec<CargoLine>,
    pub service_lines: Vec<ServiceLine>,
    /// VAT as a fraction; absent uses the configured default.
    pub tax_rate: RawNumber,
    /// Absent uses the configured default.
    pub rounding: Option<RoundingMode>,
    pub currency: Option<String>,
}

// =============================================================================
// Output
// =============================================================================

/// Computed totals of a quotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuoteSnapshot {
    #[ts(type = "number")]
    pub total_weight_kg: Decimal,
    #[ts(type = "number")]
    pub total_volume_m3: Decimal,
    /// `quantity × unit_price` per service line, unrounded.
    #[ts(type = "Array<number>")]
    pub service_line_totals: Vec<Decimal>,
    #[ts(type = "number")]
    pub total_ht: Decimal,
    #[ts(type = "number")]
    pub tax_rate: Decimal,
    #[ts(type = "number")]
    pub tax: Decimal,
    #[ts(type = "number")]
    pub ttc: Decimal,
    pub rounding: RoundingMode,
    pub currency: String,
}

/// Snapshot plus every issue raised while computing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuoteComputation {
    pub snapshot: QuoteSnapshot,
    pub issues: Vec<QuoteIssue>,
}

// =============================================================================
// Computation
// =============================================================================

fn out_of_range(path: &str, issues: &mut Vec<QuoteIssue>) {
    issues.push(QuoteIssue::new(
        IssueCode::NonFiniteNumber,
        "Montant hors plage ignoré",
        path,
    ));
}

/// `left × right`, or zero when the product overflows.
fn checked_product(left: Decimal, right: Decimal, path: &str, issues: &mut Vec<QuoteIssue>) -> Decimal {
    left.checked_mul(right).unwrap_or_else(|| {
        out_of_range(path, issues);
        Decimal::ZERO
    })
}

/// `total + value`, keeping `total` when the sum overflows.
fn checked_total(total: Decimal, value: Decimal, path: &str, issues: &mut Vec<QuoteIssue>) -> Decimal {
    total.checked_add(value).unwrap_or_else(|| {
        out_of_range(path, issues);
        total
    })
}

/// Guarded factor of a line; a missing factor counts as zero.
fn factor(raw: &RawNumber, line_path: &str, field: &str, issues: &mut Vec<QuoteIssue>) -> Decimal {
    guard_number(raw, &format!("{line_path}.{field}"), issues).unwrap_or_default()
}

/// Computes quotation totals. Pure; never fails.
pub fn compute_quote(input: &QuoteInput, config: &EngineConfig) -> QuoteComputation {
    let mut issues = Vec::new();

    let mut total_weight_kg = Decimal::ZERO;
    let mut total_volume_m3 = Decimal::ZERO;
    for (index, line) in input.cargo_lines.iter().enumerate() {
        let path = format!("cargo_lines[{index}]");
        let quantity = factor(&line.quantity, &path, "quantity", &mut issues);
        let weight = factor(&line.weight_kg, &path, "weight_kg", &mut issues);
        let volume = factor(&line.volume_m3, &path, "volume_m3", &mut issues);

        let weight = checked_product(quantity, weight, &path, &mut issues);
        total_weight_kg = checked_total(total_weight_kg, weight, "total_weight_kg", &mut issues);
        let volume = checked_product(quantity, volume, &path, &mut issues);
        total_volume_m3 = checked_total(total_volume_m3, volume, "total_volume_m3", &mut issues);
    }

    let mut service_line_totals = Vec::with_capacity(input.service_lines.len());
    let mut total_ht = Decimal::ZERO;
    for (index, line) in input.service_lines.iter().enumerate() {
        let path = format!("service_lines[{index}]");
        let quantity = factor(&line.quantity, &path, "quantity", &mut issues);
        let unit_price = factor(&line.unit_price, &path, "unit_price", &mut issues);
        let line_total = checked_product(quantity, unit_price, &path, &mut issues);
        total_ht = checked_total(total_ht, line_total, "total_ht", &mut issues);
        service_line_totals.push(line_total);
    }

    let tax_rate = guard_number(&input.tax_rate, "tax_rate", &mut issues).unwrap_or(config.quote_tax_rate);
    let tax = checked_product(total_ht, tax_rate, "tax", &mut issues);
    let ttc = checked_total(total_ht, tax, "ttc", &mut issues);

    let rounding = input.rounding.unwrap_or(config.quote_rounding);
    let total_ht = apply_rounding(total_ht, rounding, "total_ht", &mut issues);
    let tax = apply_rounding(tax, rounding, "tax", &mut issues);
    let ttc = apply_rounding(ttc, rounding, "ttc", &mut issues);

    debug!(
        cargo_lines = input.cargo_lines.len(),
        service_lines = input.service_lines.len(),
        total_ht = %total_ht,
        issues = issues.len(),
        "Quotation totals computed"
    );

    QuoteComputation {
        snapshot: QuoteSnapshot {
            total_weight_kg: total_weight_kg.normalize(),
            total_volume_m3: total_volume_m3.normalize(),
            service_line_totals: service_line_totals.into_iter().map(|t| t.normalize()).collect(),
            total_ht: total_ht.normalize(),
            tax_rate: tax_rate.normalize(),
            tax: tax.normalize(),
            ttc: ttc.normalize(),
            rounding,
            currency: input
                .currency
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_uppercase)
                .unwrap_or_else(|| "XOF".to_string()),
        },
        issues,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
