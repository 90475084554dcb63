//! # Engine Configuration
//!
//! Default rates and policy knobs for the pricing engine.
//!
//! ## Where Values Come From
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Tariff row rate (per HS code)            ← always wins when set    │
//! │  2. Environment variables (PRICING_*)        ← applied by the CLI      │
//! │  3. TOML file (pricing.toml)                 ← loaded by the CLI       │
//! │  4. EngineConfig::default() (this file)                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This module is pure data: loading files and reading the environment is
//! the application's job.
//!
//! ## Configuration File Format
//! ```toml
//! statistical_levy_rate = 0.01
//! solidarity_levy_rate = 0.008
//! community_levy_rate = 0.005
//! shipping_levy_rate = 0.004
//! advance_tax_rate = 0.03
//! eur_xof_peg = 655.957
//! trade_bloc_countries = ["SN", "CI", "ML"]
//! rate_confidence = 0.9
//! quote_tax_rate = 0.18
//! quote_rounding = "integer"
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::currency::EUR_XOF_PEG;
use crate::error::ConfigError;
use crate::validation::RoundingMode;

/// ECOWAS member states (ISO 3166-1 alpha-2).
pub const ECOWAS_COUNTRIES: [&str; 15] = [
    "BJ", "BF", "CV", "CI", "GM", "GH", "GN", "GW", "LR", "ML", "NE", "NG", "SN", "SL", "TG",
];

/// Engine-wide defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Redevance statistique when the tariff row has none.
    pub statistical_levy_rate: Decimal,
    /// Prélèvement communautaire de solidarité when the row has none.
    pub solidarity_levy_rate: Decimal,
    /// Prélèvement communautaire when the row has none.
    pub community_levy_rate: Decimal,
    /// COSEC levy when the row has none.
    pub shipping_levy_rate: Decimal,
    /// Advance income tax (AIR) rate.
    pub advance_tax_rate: Decimal,
    pub eur_xof_peg: Decimal,
    /// Origins exempt from the community levy.
    pub trade_bloc_countries: Vec<String>,
    /// Confidence reported with a resolved transport rate.
    pub rate_confidence: f64,
    /// VAT applied by the quotation line engine when the request has none.
    pub quote_tax_rate: Decimal,
    /// Rounding applied by the quotation line engine when the request has none.
    pub quote_rounding: RoundingMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            statistical_levy_rate: dec!(0.01),
            solidarity_levy_rate: dec!(0.008),
            community_levy_rate: dec!(0.005),
            shipping_levy_rate: dec!(0.004),
            advance_tax_rate: dec!(0.03),
            eur_xof_peg: EUR_XOF_PEG,
            trade_bloc_countries: ECOWAS_COUNTRIES.iter().map(|c| c.to_string()).collect(),
            rate_confidence: 0.90,
            quote_tax_rate: dec!(0.18),
            quote_rounding: RoundingMode::None,
        }
    }
}

impl EngineConfig {
    /// Checks every rate is a fraction in `[0, 1]` and the peg is positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rates = [
            ("statistical_levy_rate", self.statistical_levy_rate),
            ("solidarity_levy_rate", self.solidarity_levy_rate),
            ("community_levy_rate", self.community_levy_rate),
            ("shipping_levy_rate", self.shipping_levy_rate),
            ("advance_tax_rate", self.advance_tax_rate),
            ("quote_tax_rate", self.quote_tax_rate),
        ];
        for (field, value) in rates {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(ConfigError::RateOutOfRange {
                    field: field.to_string(),
                    value: value.to_string(),
                });
            }
        }

        if self.eur_xof_peg <= Decimal::ZERO {
            return Err(ConfigError::MustBePositive {
                field: "eur_xof_peg".to_string(),
                value: self.eur_xof_peg.to_string(),
            });
        }

        if !(0.0..=1.0).contains(&self.rate_confidence) {
            return Err(ConfigError::RateOutOfRange {
                field: "rate_confidence".to_string(),
                value: self.rate_confidence.to_string(),
            });
        }

        Ok(())
    }

    /// Whether goods from `country_code` qualify for the trade-bloc
    /// exemption. Case-insensitive.
    pub fn is_trade_bloc_country(&self, country_code: &str) -> bool {
        let code = country_code.trim();
        !code.is_empty()
            && self
                .trade_bloc_countries
                .iter()
                .any(|c| c.trim().eq_ignore_ascii_case(code))
    }
}
