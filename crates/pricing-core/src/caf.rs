//! # CAF Distributor
//!
//! Splits one customs (CAF) value across the tariff lines of a mixed
//! shipment.
//!
//! ## Allocation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  distribute(hs_codes, caf_total, articles)                              │
//! │                                                                         │
//! │  articles < 2 ──────────────────────────────────────► EQUAL            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  guard + convert each article value to XOF, sum per HS code            │
//! │       │                                                                 │
//! │       ├── total value <= 0 ─────────────────────────► EQUAL            │
//! │       ├── some requested code without value ────────► EQUAL + warning  │
//! │       ▼                                                                 │
//! │  PROPORTIONAL                                                           │
//! │    code 1 .. N-1 : round(caf × value / total of all articles)           │
//! │    code N        : caf − Σ previous shares     ← absorbs rounding      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every path returns shares whose sum is exactly `caf_total`.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::config::EngineConfig;
use crate::currency::to_settlement_currency;
use crate::money::Money;
use crate::types::{normalize_hs_code, Article, IssueCode, QuoteIssue};
use crate::validation::guard_number;

// =============================================================================
// Result Types
// =============================================================================

/// How the CAF value was split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DistributionMethod {
    /// Pro rata of each line's declared value.
    Proportional,
    /// Same share for every line (last line takes the remainder).
    Equal,
}

/// CAF value allocated to one tariff line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CafShare {
    /// HS code as requested by the caller.
    pub hs_code: String,
    pub caf_value: Money,
}

/// Outcome of a distribution. `shares` follows the order of the requested
/// codes and always sums to the requested total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CafDistributionResult {
    pub shares: Vec<CafShare>,
    pub method: DistributionMethod,
    pub warnings: Vec<String>,
    pub issues: Vec<QuoteIssue>,
}

impl CafDistributionResult {
    /// Sum of all shares.
    pub fn total(&self) -> Money {
        self.shares.iter().map(|s| s.caf_value).sum()
    }

    /// Share of a code (first occurrence), compared on digits only.
    pub fn share_for(&self, hs_code: &str) -> Option<Money> {
        let key = normalize_hs_code(hs_code);
        self.shares
            .iter()
            .find(|s| normalize_hs_code(&s.hs_code) == key)
            .map(|s| s.caf_value)
    }
}

// =============================================================================
// Distribution
// =============================================================================

/// Allocates `caf_total` across `hs_codes`.
///
/// `articles` carries the per-line declared values; with fewer than two
/// articles there is nothing to weigh and the split is equal.
pub fn distribute<S: AsRef<str>>(
    hs_codes: &[S],
    caf_total: Money,
    articles: &[Article],
    config: &EngineConfig,
) -> CafDistributionResult {
    let mut warnings = Vec::new();
    let mut issues = Vec::new();
    let codes: Vec<String> = hs_codes.iter().map(|c| c.as_ref().to_string()).collect();

    let caf_total = if caf_total.is_negative() {
        issues.push(QuoteIssue::new(
            IssueCode::NegativeValuesCoerced,
            format!("Valeur CAF négative ({caf_total}) ramenée à 0"),
            "caf_total",
        ));
        Money::zero()
    } else {
        caf_total
    };

    if codes.is_empty() {
        warnings.push("Aucun code SH fourni — aucune répartition".to_string());
        return CafDistributionResult {
            shares: Vec::new(),
            method: DistributionMethod::Equal,
            warnings,
            issues,
        };
    }

    if articles.len() < 2 {
        debug!(codes = codes.len(), "Less than two articles, equal CAF split");
        return equal_split(&codes, caf_total, warnings, issues);
    }

    // Per-code settlement value, keyed by digits-only code
    let mut values: HashMap<String, Decimal> = HashMap::new();
    for (index, article) in articles.iter().enumerate() {
        let path = format!("articles[{index}].value");
        let Some(value) = guard_number(&article.value, &path, &mut issues) else {
            continue;
        };
        let settled = to_settlement_currency(
            value,
            article.currency.as_deref(),
            config.eur_xof_peg,
            &mut warnings,
        );
        let entry = values.entry(normalize_hs_code(&article.hs_code)).or_default();
        match settled.and_then(|settled| entry.checked_add(settled)) {
            Some(sum) => *entry = sum,
            None => issues.push(out_of_range(&path, value)),
        }
    }

    let Some(total_value) = values
        .values()
        .try_fold(Decimal::ZERO, |acc, value| acc.checked_add(*value))
    else {
        warn!("Article values overflow, equal CAF split");
        issues.push(QuoteIssue::new(
            IssueCode::NonFiniteNumber,
            "Somme des valeurs articles hors plage — répartition équitable utilisée",
            "articles",
        ));
        return equal_split(&codes, caf_total, warnings, issues);
    };
    if total_value <= Decimal::ZERO {
        debug!("No positive article value, equal CAF split");
        return equal_split(&codes, caf_total, warnings, issues);
    }

    let requested: Vec<String> = codes.iter().map(|c| normalize_hs_code(c)).collect();
    let covered = requested
        .iter()
        .filter(|code| values.get(*code).is_some_and(|v| *v > Decimal::ZERO))
        .count();
    if covered < requested.len() {
        warn!(covered, requested = requested.len(), "Partial HS coverage, equal CAF split");
        warnings.push(format!(
            "{covered}/{} HS couverts — répartition équitable utilisée",
            requested.len()
        ));
        return equal_split(&codes, caf_total, warnings, issues);
    }

    let mut occurrences: HashMap<&str, u32> = HashMap::new();
    for code in &requested {
        *occurrences.entry(code.as_str()).or_default() += 1;
    }

    let requested_value: Decimal = occurrences
        .keys()
        .map(|code| values.get(*code).copied().unwrap_or_default())
        .sum();
    if requested_value < total_value {
        warnings.push(
            "Articles hors des codes SH demandés : leur part revient au dernier code".to_string(),
        );
    }

    let shares = proportional_shares(&requested, &values, &occurrences, total_value, caf_total);
    if shares.len() != codes.len() {
        warn!(
            produced = shares.len(),
            expected = codes.len(),
            "Proportional split length mismatch, equal CAF split"
        );
        return equal_split(&codes, caf_total, warnings, issues);
    }

    debug!(codes = codes.len(), caf_total = caf_total.units(), "Proportional CAF split");
    CafDistributionResult {
        shares: codes
            .into_iter()
            .zip(shares)
            .map(|(hs_code, caf_value)| CafShare { hs_code, caf_value })
            .collect(),
        method: DistributionMethod::Proportional,
        warnings,
        issues,
    }
}

fn out_of_range(path: &str, value: Decimal) -> QuoteIssue {
    QuoteIssue::new(
        IssueCode::NonFiniteNumber,
        format!("Valeur hors plage ignorée après conversion : {value}"),
        path,
    )
}

/// First N-1 shares are rounded pro rata of `base` (all article values);
/// the last one is the remainder.
fn proportional_shares(
    requested: &[String],
    values: &HashMap<String, Decimal>,
    occurrences: &HashMap<&str, u32>,
    base: Decimal,
    caf_total: Money,
) -> Vec<Money> {
    let caf = caf_total.to_decimal();
    let last = requested.len() - 1;
    let mut running = Money::zero();
    let mut shares = Vec::with_capacity(requested.len());

    for (index, code) in requested.iter().enumerate() {
        if index == last {
            shares.push(caf_total - running);
            break;
        }
        let repeat = Decimal::from(occurrences.get(code.as_str()).copied().unwrap_or(1));
        let value = values.get(code).copied().unwrap_or_default() / repeat;
        let share = Money::from_decimal(caf * (value / base));
        running += share;
        shares.push(share);
    }

    shares
}

/// `floor(caf / N)` for every code but the last, which takes the rest.
fn equal_split(
    codes: &[String],
    caf_total: Money,
    warnings: Vec<String>,
    issues: Vec<QuoteIssue>,
) -> CafDistributionResult {
    let count = codes.len() as i64;
    let each = Money::from_units(caf_total.units() / count);
    let last = caf_total - Money::from_units(each.units() * (count - 1));

    let shares = codes
        .iter()
        .enumerate()
        .map(|(index, code)| CafShare {
            hs_code: code.clone(),
            caf_value: if index == codes.len() - 1 { last } else { each },
        })
        .collect();

    CafDistributionResult {
        shares,
        method: DistributionMethod::Equal,
        warnings,
        issues,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::RawNumber;
    use proptest::prelude::*;

    fn config() -> EngineConfig {
        EngineConfig::default()
    }

    #[test]
    fn test_single_code_gets_everything() {
        let result = distribute(&["8703231900"], Money::from_units(1_000_000), &[], &config());
        assert_eq!(result.method, DistributionMethod::Equal);
        assert_eq!(result.shares.len(), 1);
        assert_eq!(result.shares[0].caf_value.units(), 1_000_000);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_single_article_is_equal_split() {
        let articles = vec![Article::new("8703231900", 5000.0, "EUR")];
        let result = distribute(&["8703231900"], Money::from_units(750_000), &articles, &config());
        assert_eq!(result.method, DistributionMethod::Equal);
        assert_eq!(result.total().units(), 750_000);
    }

    #[test]
    fn test_equal_split_remainder_goes_to_last() {
        let result = distribute(&["1", "2", "3"], Money::from_units(100), &[], &config());
        let values: Vec<i64> = result.shares.iter().map(|s| s.caf_value.units()).collect();
        assert_eq!(values, vec![33, 33, 34]);
    }

    #[test]
    fn test_proportional_eur_split_is_exact() {
        let articles = vec![
            Article::new("8471.30.00.00", 165.0, "EUR"),
            Article::new("8528.72.00.00", 3760.0, "EUR"),
        ];
        let result = distribute(
            &["8471300000", "8528720000"],
            Money::from_units(3_053_480),
            &articles,
            &config(),
        );
        assert_eq!(result.method, DistributionMethod::Proportional);
        assert_eq!(result.shares[0].caf_value.units(), 128_363);
        assert_eq!(result.shares[1].caf_value.units(), 2_925_117);
        assert_eq!(result.total().units(), 3_053_480);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_mixed_currencies_normalize_before_ratio() {
        // 100 EUR == 65 595.7 XOF
        let articles = vec![
            Article::new("1001", 100.0, "EUR"),
            Article::new("1002", 65_595.7, "XOF"),
        ];
        let result = distribute(&["1001", "1002"], Money::from_units(1_000_000), &articles, &config());
        assert_eq!(result.method, DistributionMethod::Proportional);
        assert_eq!(result.shares[0].caf_value.units(), 500_000);
        assert_eq!(result.shares[1].caf_value.units(), 500_000);
    }

    #[test]
    fn test_partial_coverage_falls_back_to_equal() {
        let articles = vec![Article::new("1001", 100.0, "XOF"), Article::new("1001", 50.0, "XOF")];
        let result = distribute(&["1001", "1002"], Money::from_units(1001), &articles, &config());
        assert_eq!(result.method, DistributionMethod::Equal);
        assert_eq!(result.warnings, vec!["1/2 HS couverts — répartition équitable utilisée".to_string()]);
        assert_eq!(result.total().units(), 1001);
    }

    #[test]
    fn test_zero_total_value_falls_back_to_equal() {
        let articles = vec![Article::new("1001", 0.0, "XOF"), Article::new("1002", -5.0, "XOF")];
        let result = distribute(&["1001", "1002"], Money::from_units(10), &articles, &config());
        assert_eq!(result.method, DistributionMethod::Equal);
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].code, IssueCode::NegativeValuesCoerced);
        assert_eq!(result.issues[0].path, "articles[1].value");
    }

    #[test]
    fn test_unsupported_currency_is_flagged_but_used() {
        let articles = vec![Article::new("1001", 300.0, "USD"), Article::new("1002", 100.0, "XOF")];
        let result = distribute(&["1001", "1002"], Money::from_units(400), &articles, &config());
        assert_eq!(result.method, DistributionMethod::Proportional);
        assert_eq!(result.shares[0].caf_value.units(), 300);
        assert!(result.warnings[0].contains("USD"));
    }

    #[test]
    fn test_unparseable_article_value_is_skipped() {
        let articles = vec![
            Article {
                hs_code: "1001".to_string(),
                value: RawNumber::from("n/a"),
                currency: None,
                description: None,
            },
            Article::new("1002", 100.0, "XOF"),
        ];
        let result = distribute(&["1001", "1002"], Money::from_units(10), &articles, &config());
        assert_eq!(result.method, DistributionMethod::Equal);
        assert_eq!(result.issues[0].code, IssueCode::NonFiniteNumber);
    }

    #[test]
    fn test_duplicate_requested_codes_share_their_value() {
        let articles = vec![Article::new("1001", 100.0, "XOF"), Article::new("1002", 200.0, "XOF")];
        let result = distribute(&["1001", "1001", "1002"], Money::from_units(400), &articles, &config());
        let values: Vec<i64> = result.shares.iter().map(|s| s.caf_value.units()).collect();
        assert_eq!(values, vec![67, 67, 266]);
        assert_eq!(result.total().units(), 400);
    }

    #[test]
    fn test_equal_split_floors_non_divisible_total() {
        let result = distribute(&["1", "2", "3"], Money::from_units(101), &[], &config());
        let values: Vec<i64> = result.shares.iter().map(|s| s.caf_value.units()).collect();
        assert_eq!(values, vec![33, 33, 35]);
    }

    #[test]
    fn test_equal_split_never_goes_negative() {
        let codes: Vec<String> = (0..10).map(|i| format!("10{i:02}")).collect();
        let result = distribute(&codes, Money::from_units(7), &[], &config());
        assert!(result.shares.iter().all(|s| !s.caf_value.is_negative()));
        assert_eq!(result.total().units(), 7);
    }

    #[test]
    fn test_unrequested_articles_stay_in_the_ratio_base() {
        let articles = vec![
            Article::new("1001", 100.0, "XOF"),
            Article::new("1002", 100.0, "XOF"),
            Article::new("1003", 200.0, "XOF"),
        ];
        let result = distribute(&["1001", "1002"], Money::from_units(1000), &articles, &config());
        let values: Vec<i64> = result.shares.iter().map(|s| s.caf_value.units()).collect();
        assert_eq!(result.method, DistributionMethod::Proportional);
        assert_eq!(values, vec![250, 750]);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_out_of_range_conversion_is_dropped_not_fatal() {
        let articles = vec![
            Article::new("1001", 1e27, "EUR"),
            Article::new("1002", 1.0, "XOF"),
        ];
        let result = distribute(&["1001", "1002"], Money::from_units(1000), &articles, &config());
        assert_eq!(result.method, DistributionMethod::Equal);
        assert_eq!(result.total().units(), 1000);
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].code, IssueCode::NonFiniteNumber);
        assert_eq!(result.issues[0].path, "articles[0].value");
    }

    #[test]
    fn test_overflowing_value_sum_falls_back_to_equal() {
        let articles = vec![
            Article::new("1001", 7e28, "XOF"),
            Article::new("1002", 7e28, "XOF"),
        ];
        let result = distribute(&["1001", "1002"], Money::from_units(10), &articles, &config());
        assert_eq!(result.method, DistributionMethod::Equal);
        assert_eq!(result.total().units(), 10);
        assert!(result.issues.iter().any(|i| i.path == "articles"));
    }

    #[test]
    fn test_negative_caf_is_coerced() {
        let result = distribute(&["1001"], Money::from_units(-5), &[], &config());
        assert_eq!(result.total().units(), 0);
        assert_eq!(result.issues[0].path, "caf_total");
        assert!(result.issues[0].message.contains("-5 FCFA"));
    }

    #[test]
    fn test_empty_codes_yield_no_shares() {
        let result = distribute::<&str>(&[], Money::from_units(5), &[], &config());
        assert!(result.shares.is_empty());
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_share_lookup_ignores_formatting() {
        let result = distribute(&["8471.30.00.00"], Money::from_units(9), &[], &config());
        assert_eq!(result.share_for("8471300000"), Some(Money::from_units(9)));
    }

    proptest! {
        #[test]
        fn prop_shares_always_sum_to_caf(
            caf in 0i64..10_000_000_000,
            values in prop::collection::vec(0.0f64..1_000_000.0, 1..8),
            eur_mask in prop::collection::vec(any::<bool>(), 8),
        ) {
            let codes: Vec<String> = (0..values.len()).map(|i| format!("10{i:02}")).collect();
            let articles: Vec<Article> = values
                .iter()
                .enumerate()
                .map(|(i, v)| Article::new(codes[i].clone(), *v, if eur_mask[i] { "EUR" } else { "XOF" }))
                .collect();
            let result = distribute(&codes, Money::from_units(caf), &articles, &EngineConfig::default());
            prop_assert_eq!(result.shares.len(), codes.len());
            prop_assert_eq!(result.total().units(), caf);
        }
    }
}
