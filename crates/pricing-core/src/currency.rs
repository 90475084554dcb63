//! # Currency Normalizer
//!
//! Converts declared article values into the settlement currency (XOF).
//!
//! Only two currencies have a fixed reference rate: XOF itself and EUR,
//! pegged at 655.957. Anything else passes through unchanged with a
//! warning, so a distribution never fails because of an exotic currency;
//! it just becomes flagged as possibly inexact.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::warn;

/// Fixed EUR → XOF parity.
pub const EUR_XOF_PEG: Decimal = dec!(655.957);

/// Currencies the normalizer knows how to convert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Currency {
    /// XOF, FCFA or CFA.
    Xof,
    Eur,
    /// Unsupported code, kept upper-cased for the warning.
    Other(String),
}

impl Currency {
    /// Parses a declared currency code. Blank or absent means XOF.
    pub fn parse(code: Option<&str>) -> Self {
        let code = code.map(str::trim).unwrap_or_default().to_uppercase();
        match code.as_str() {
            "" | "XOF" | "FCFA" | "CFA" => Currency::Xof,
            "EUR" => Currency::Eur,
            _ => Currency::Other(code),
        }
    }
}

/// Converts `value` into XOF.
///
/// Unsupported currencies return the value unchanged and push a warning.
/// `None` when the converted value leaves the decimal range.
pub fn to_settlement_currency(
    value: Decimal,
    currency_code: Option<&str>,
    eur_peg: Decimal,
    warnings: &mut Vec<String>,
) -> Option<Decimal> {
    match Currency::parse(currency_code) {
        Currency::Xof => Some(value),
        Currency::Eur => value.checked_mul(eur_peg),
        Currency::Other(code) => {
            warn!(currency = %code, "Unsupported currency, value kept unconverted");
            let message = format!("Devise {code} non supportée — répartition potentiellement inexacte");
            if !warnings.contains(&message) {
                warnings.push(message);
            }
            Some(value)
        }
    }
}
