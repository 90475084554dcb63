//! # Error Types
//!
//! Domain-specific error types for pricing-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Failure Modes                                   │
//! │                                                                         │
//! │  Hard errors (this file)                                                │
//! │  ├── CoreError::TariffCodeNotFound  - reference row missing (404-like) │
//! │  └── ConfigError                    - engine configuration rejected    │
//! │                                                                         │
//! │  Soft outcomes (NOT errors, carried on results)                         │
//! │  ├── QuoteIssue       - numeric input coerced / rounded                 │
//! │  ├── warnings         - unsupported currency, partial coverage, ...     │
//! │  └── Option::None     - resolver found no applicable rate               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Malformed business data never produces an error: it is coerced and
//! recorded. Only a missing reference row stops a computation.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors surfaced by engine operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The requested HS code has no row in the tariff reference table.
    ///
    /// `suggestion` is a human-readable hint for the operator (e.g. check the
    /// code length or re-run the tariff import).
    #[error("Tariff code not found: {code}. {suggestion}")]
    TariffCodeNotFound { code: String, suggestion: String },
}

impl CoreError {
    /// Builds the not-found error for a queried code, with a suggestion
    /// adapted to what the caller sent.
    pub fn tariff_not_found(code: &str) -> Self {
        let digits = code.chars().filter(char::is_ascii_digit).count();
        let suggestion = if digits == 0 {
            "Le code SH doit contenir des chiffres.".to_string()
        } else if digits < 10 {
            format!(
                "Le code SH ne comporte que {digits} chiffres ; vérifiez la position tarifaire complète (10 chiffres)."
            )
        } else {
            "Vérifiez la position tarifaire ou relancez l'import du tarif douanier.".to_string()
        };
        CoreError::TariffCodeNotFound {
            code: code.to_string(),
            suggestion,
        }
    }
}

// =============================================================================
// Config Error
// =============================================================================

/// Engine configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A rate is outside the `[0, 1]` fraction range.
    #[error("{field} must be a fraction between 0 and 1, got {value}")]
    RateOutOfRange { field: String, value: String },

    /// A value that must be strictly positive is not.
    #[error("{field} must be positive, got {value}")]
    MustBePositive { field: String, value: String },

    /// A value could not be parsed.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
