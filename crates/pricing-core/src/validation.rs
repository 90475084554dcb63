//! # Numeric Guard
//!
//! Turns untrusted numeric input into validated, non-negative decimals and
//! owns the rounding policy applied to published totals.
//!
//! ## Guard Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      guard_number(raw, path)                            │
//! │                                                                         │
//! │  null / absent ────────────────────► None       (no issue)             │
//! │  NaN, ±inf, "abc" ─────────────────► None       NON_FINITE_NUMBER      │
//! │  -2 ───────────────────────────────► Some(0)    NEGATIVE_VALUES_COERCED│
//! │  "1 234,5" ────────────────────────► Some(1234.5)                      │
//! │  999.6 ────────────────────────────► Some(999.6)                       │
//! │                                                                         │
//! │  Nothing here returns an error. Every coercion leaves a QuoteIssue     │
//! │  so the caller can flag the line for review.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pricing_core::validation::{guard_number, RawNumber};
//! use pricing_core::IssueCode;
//!
//! let mut issues = Vec::new();
//! let qty = guard_number(&RawNumber::Number(-2.0), "service_lines[0].quantity", &mut issues);
//! assert_eq!(qty, Some(rust_decimal::Decimal::ZERO));
//! assert_eq!(issues[0].code, IssueCode::NegativeValuesCoerced);
//! ```

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{IssueCode, QuoteIssue};

// =============================================================================
// Raw Number
// =============================================================================

/// An untrusted numeric value as it arrives on the wire.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    /// `null` or field absent.
    #[default]
    Missing,
    Number(f64),
    /// Numeric text such as `"1 234,5"`, or garbage.
    Text(String),
}

impl From<f64> for RawNumber {
    fn from(value: f64) -> Self {
        RawNumber::Number(value)
    }
}

impl From<Option<f64>> for RawNumber {
    fn from(value: Option<f64>) -> Self {
        value.map_or(RawNumber::Missing, RawNumber::Number)
    }
}

impl From<&str> for RawNumber {
    fn from(value: &str) -> Self {
        RawNumber::Text(value.to_string())
    }
}

impl From<serde_json::Value> for RawNumber {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => RawNumber::Missing,
            serde_json::Value::Number(n) => n.as_f64().map_or(RawNumber::Missing, RawNumber::Number),
            serde_json::Value::String(s) => RawNumber::Text(s),
            other => RawNumber::Text(other.to_string()),
        }
    }
}

// =============================================================================
// Guards
// =============================================================================

/// Validates a raw value into a non-negative finite decimal.
///
/// Returns `None` for absent values (no issue) and for non-finite or
/// non-numeric values (`NON_FINITE_NUMBER`). Negative values become zero
/// (`NEGATIVE_VALUES_COERCED`).
pub fn guard_number(raw: &RawNumber, path: &str, issues: &mut Vec<QuoteIssue>) -> Option<Decimal> {
    match raw {
        RawNumber::Missing => None,
        RawNumber::Number(value) => guard_f64(*value, path, issues),
        RawNumber::Text(text) => match parse_numeric_text(text) {
            Some(value) => guard_f64(value, path, issues),
            None if text.trim().is_empty() => None,
            None => {
                issues.push(QuoteIssue::new(
                    IssueCode::NonFiniteNumber,
                    format!("Valeur non numérique ignorée : \"{}\"", text.trim()),
                    path,
                ));
                None
            }
        },
    }
}

/// Validates an already-typed float. Same contract as [`guard_number`]
/// except that there is no "absent" case.
pub fn guard_f64(value: f64, path: &str, issues: &mut Vec<QuoteIssue>) -> Option<Decimal> {
    if !value.is_finite() {
        issues.push(QuoteIssue::new(
            IssueCode::NonFiniteNumber,
            format!("Valeur non finie ignorée : {value}"),
            path,
        ));
        return None;
    }

    let Some(decimal) = f64_to_decimal(value) else {
        issues.push(QuoteIssue::new(
            IssueCode::NonFiniteNumber,
            format!("Valeur hors plage ignorée : {value}"),
            path,
        ));
        return None;
    };

    Some(guard_decimal(decimal, path, issues))
}

/// Coerces a negative decimal to zero, recording the coercion.
pub fn guard_decimal(value: Decimal, path: &str, issues: &mut Vec<QuoteIssue>) -> Decimal {
    if value.is_sign_negative() && !value.is_zero() {
        issues.push(QuoteIssue::new(
            IssueCode::NegativeValuesCoerced,
            format!("Valeur négative ({value}) ramenée à 0"),
            path,
        ));
        return Decimal::ZERO;
    }
    value
}

/// Shortest decimal representation of a float (999.6 stays 999.6, not
/// 999.60000000000002).
fn f64_to_decimal(value: f64) -> Option<Decimal> {
    value
        .to_string()
        .parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_f64(value))
}

/// Accepts `"1234.5"`, `" 1 234,5 "` and `"1e3"`. Grouping spaces
/// (including no-break spaces) are dropped; a lone comma is a decimal
/// separator.
fn parse_numeric_text(text: &str) -> Option<f64> {
    let compact: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\u{202f}')
        .collect();
    if compact.is_empty() {
        return None;
    }
    let normalized = if !compact.contains('.') && compact.matches(',').count() == 1 {
        compact.replace(',', ".")
    } else {
        compact
    };
    normalized.parse::<f64>().ok()
}

// =============================================================================
// Rounding
// =============================================================================

/// Rounding policy for published totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RoundingMode {
    /// Keep full precision.
    #[default]
    None,
    /// Round half away from zero to a whole unit.
    Integer,
}

impl std::str::FromStr for RoundingMode {
    type Err = crate::error::ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "" => Ok(RoundingMode::None),
            "integer" | "int" | "unit" => Ok(RoundingMode::Integer),
            other => Err(crate::error::ConfigError::InvalidFormat {
                field: "rounding".to_string(),
                reason: format!("unknown rounding mode '{other}' (expected none or integer)"),
            }),
        }
    }
}

/// Applies the rounding mode to a final total.
///
/// Emits `ROUNDING_APPLIED` only when the value actually changed. Never
/// call this on a value that feeds a later computation stage.
pub fn apply_rounding(
    value: Decimal,
    mode: RoundingMode,
    path: &str,
    issues: &mut Vec<QuoteIssue>,
) -> Decimal {
    match mode {
        RoundingMode::None => value,
        RoundingMode::Integer => {
            let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
            if rounded != value {
                issues.push(QuoteIssue::new(
                    IssueCode::RoundingApplied,
                    format!("Arrondi appliqué : {} → {}", value.normalize(), rounded.normalize()),
                    path,
                ));
            }
            rounded.normalize()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
