//! # pricing-core: Customs Duty & Freight Pricing Engine
//!
//! Pure computation behind a freight forwarder's quotations: customs duties
//! per HS code, CAF allocation over tariff lines, local trucking rate
//! suggestions and quotation totals. Zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Pricing Engine Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │            pricing-cli (config, logging, JSON in/out)           │   │
//! │  │    duties ── distribute ── rate ── quote ── assemble            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ pricing-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │    caf    │  │   duty    │  │   rates   │  │   quote   │  │   │
//! │  │   │ split CAF │  │  cascade  │  │ trucking  │  │  totals   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │ currency  │  │validation │  │ assembly  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                ▲                                        │
//! │          tariff rows, rate table snapshot (loaded by the caller)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (TariffCode, Article, LocalTransportRate, ...)
//! - [`money`] - Whole-unit XOF amounts with half-up rounding from decimals
//! - [`validation`] - Numeric guard and rounding policy
//! - [`currency`] - Conversion to the settlement currency (EUR peg)
//! - [`caf`] - CAF distribution over HS codes
//! - [`duty`] - Senegalese duty and tax cascade
//! - [`rates`] - Local transport rate resolver
//! - [`quote`] - Quotation line engine
//! - [`assembly`] - Whole-shipment pricing
//! - [`config`] - Engine defaults
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output (only `rates::resolve` reads the clock)
//! 2. **No I/O**: callers load tariffs and rate tables
//! 3. **Exact Arithmetic**: rates and bases are `Decimal`, published amounts are whole XOF
//! 4. **Round Once**: intermediate stages keep full precision
//!
//! ## Example Usage
//!
//! ```rust
//! use pricing_core::{compute_duties_for, EngineConfig, Money, OriginInfo, TariffCode};
//! use rust_decimal_macros::dec;
//!
//! let tariff = TariffCode {
//!     code: "8703231900".to_string(),
//!     customs_duty_rate: Some(dec!(0.20)),
//!     vat_rate: Some(dec!(0.18)),
//!     ..TariffCode::default()
//! };
//! let breakdown = compute_duties_for(
//!     &tariff,
//!     Money::from_units(1_000_000),
//!     &OriginInfo::default(),
//!     &EngineConfig::default(),
//! );
//! assert_eq!(breakdown.totals.customs_duties.units(), 227_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod assembly;
pub mod caf;
pub mod config;
pub mod currency;
pub mod duty;
pub mod error;
pub mod money;
pub mod quote;
pub mod rates;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use assembly::{assemble, ShipmentQuote, ShipmentRequest};
pub use caf::{distribute, CafDistributionResult, CafShare, DistributionMethod};
pub use config::EngineConfig;
pub use duty::{compute_duties, compute_duties_for, DutyBreakdown, DutyLine, DutyTotals};
pub use error::{ConfigError, CoreError, CoreResult};
pub use money::Money;
pub use quote::{compute_quote, QuoteComputation, QuoteInput, QuoteSnapshot};
pub use rates::{resolve, resolve_on, RateMatch};
pub use types::*;
pub use validation::{RawNumber, RoundingMode};
