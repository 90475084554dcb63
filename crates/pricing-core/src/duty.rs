//! # Duty Cascade Calculator
//!
//! Computes every import duty and tax for one HS code and one CAF value.
//!
//! ## Legal Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Stage                         Base                                     │
//! │  ─────────────────────────     ───────────────────────────────────────  │
//! │   1  DD     customs duty       CAF                                      │
//! │   2  SUR    surtax (if > 0)    CAF                                      │
//! │   3  RS     statistical 1%     CAF                                      │
//! │   4  PCS    solidarity 0.8%    CAF                                      │
//! │   5  PC     community 0.5%     CAF        (0 for trade-bloc origin)     │
//! │   6  COSEC  shipping 0.4%      CAF                                      │
//! │      ── intermediate base = CAF + DD + RS ──                            │
//! │   8  TI     internal tax       intermediate base                        │
//! │   9  TCI    conjunctural       CAF                                      │
//! │  10  TP / PARA / TSC / TE      CAF        (only when rate ≠ 0)          │
//! │      ── VAT base = CAF + DD + RS + TI + TCI ──                          │
//! │  12  TVA    VAT                VAT base                                 │
//! │  13  AIR    advance tax 3%     VAT base   (flagged codes, non-CGE)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every stage works on exact decimals. Amounts become whole francs only
//! when the breakdown is produced; totals are rounded from the unrounded
//! sums, not summed from rounded lines. A product or sum that leaves the
//! decimal or `i64` range saturates and adds a warning to the breakdown.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::config::EngineConfig;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{OriginInfo, TariffCatalog, TariffCode};

// =============================================================================
// Line Codes
// =============================================================================

pub const CODE_CUSTOMS_DUTY: &str = "DD";
pub const CODE_SURTAX: &str = "SUR";
pub const CODE_STATISTICAL_LEVY: &str = "RS";
pub const CODE_SOLIDARITY_LEVY: &str = "PCS";
pub const CODE_COMMUNITY_LEVY: &str = "PC";
pub const CODE_SHIPPING_LEVY: &str = "COSEC";
pub const CODE_INTERNAL_TAX: &str = "TI";
pub const CODE_CONJUNCTURAL_TAX: &str = "TCI";
pub const CODE_PASTORAL_TAX: &str = "TP";
pub const CODE_PARAFISCAL_TAX: &str = "PARA";
pub const CODE_CEMENT_TAX: &str = "TSC";
pub const CODE_ENVIRONMENTAL_TAX: &str = "TE";
pub const CODE_VAT: &str = "TVA";
pub const CODE_ADVANCE_TAX: &str = "AIR";

// =============================================================================
// Breakdown Types
// =============================================================================

/// One duty or tax line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DutyLine {
    pub name: String,
    pub code: String,
    /// Fraction applied to `base` (0.18 = 18 %).
    #[ts(type = "number")]
    pub rate: Decimal,
    pub base: Money,
    pub amount: Money,
    pub note: Option<String>,
}

/// Aggregated totals of a breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DutyTotals {
    /// DD, SUR, RS, PCS, PC, COSEC.
    pub customs_duties: Money,
    /// TI, TCI and special taxes.
    pub internal_taxes: Money,
    pub vat: Money,
    pub advance_tax: Money,
    pub grand_total: Money,
    /// CAF + grand total.
    pub taxable_value: Money,
}

/// Full duty computation for one HS code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DutyBreakdown {
    pub hs_code: String,
    pub description: Option<String>,
    pub caf_value: Money,
    pub lines: Vec<DutyLine>,
    pub totals: DutyTotals,
    pub warnings: Vec<String>,
}

impl DutyBreakdown {
    /// Finds a line by its code (`"TVA"`, `"PC"`, ...).
    pub fn line(&self, code: &str) -> Option<&DutyLine> {
        self.lines.iter().find(|line| line.code == code)
    }
}

// =============================================================================
// Cascade
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DutyGroup {
    Customs,
    Internal,
    Vat,
    AdvanceTax,
}

/// A computed stage, still at full precision.
struct Stage {
    name: &'static str,
    code: &'static str,
    rate: Decimal,
    base: Decimal,
    amount: Decimal,
    group: DutyGroup,
    note: Option<String>,
}

/// Accumulates stages in order, keeps unrounded group sums.
#[derive(Default)]
struct Cascade {
    stages: Vec<Stage>,
    /// Set once any amount saturated.
    capped: bool,
}

fn saturating_sum(values: impl IntoIterator<Item = Decimal>, capped: &mut bool) -> Decimal {
    values.into_iter().fold(Decimal::ZERO, |total, value| {
        total.checked_add(value).unwrap_or_else(|| {
            *capped = true;
            total.saturating_add(value)
        })
    })
}

fn to_money(value: Decimal, capped: &mut bool) -> Money {
    Money::checked_from_decimal(value).unwrap_or_else(|| {
        *capped = true;
        Money::from_decimal(value)
    })
}

impl Cascade {
    /// Adds `rate × base` and returns the unrounded amount.
    fn apply(
        &mut self,
        name: &'static str,
        code: &'static str,
        rate: Decimal,
        base: Decimal,
        group: DutyGroup,
    ) -> Decimal {
        let amount = rate.checked_mul(base).unwrap_or_else(|| {
            self.capped = true;
            rate.saturating_mul(base)
        });
        self.stages.push(Stage {
            name,
            code,
            rate,
            base,
            amount,
            group,
            note: None,
        });
        amount
    }

    /// Adds a zero line carrying an explanation (exemptions).
    fn exempt(&mut self, name: &'static str, code: &'static str, base: Decimal, group: DutyGroup, note: &str) {
        self.stages.push(Stage {
            name,
            code,
            rate: Decimal::ZERO,
            base,
            amount: Decimal::ZERO,
            group,
            note: Some(note.to_string()),
        });
    }

    /// Sum of base components, saturating.
    fn base(&mut self, parts: &[Decimal]) -> Decimal {
        saturating_sum(parts.iter().copied(), &mut self.capped)
    }

    fn group_total(&self, group: DutyGroup, capped: &mut bool) -> Money {
        let sum = saturating_sum(
            self.stages
                .iter()
                .filter(|stage| stage.group == group)
                .map(|stage| stage.amount),
            capped,
        );
        to_money(sum, capped)
    }

    fn finish(self, tariff: &TariffCode, caf: Money, mut warnings: Vec<String>) -> DutyBreakdown {
        let mut capped = self.capped;
        let grand_total = saturating_sum(self.stages.iter().map(|stage| stage.amount), &mut capped);
        let grand_total = to_money(grand_total, &mut capped);

        let totals = DutyTotals {
            customs_duties: self.group_total(DutyGroup::Customs, &mut capped),
            internal_taxes: self.group_total(DutyGroup::Internal, &mut capped),
            vat: self.group_total(DutyGroup::Vat, &mut capped),
            advance_tax: self.group_total(DutyGroup::AdvanceTax, &mut capped),
            grand_total,
            taxable_value: caf.checked_add(grand_total).unwrap_or_else(|| {
                capped = true;
                caf + grand_total
            }),
        };

        let lines = self
            .stages
            .into_iter()
            .map(|stage| DutyLine {
                name: stage.name.to_string(),
                code: stage.code.to_string(),
                rate: stage.rate.normalize(),
                base: to_money(stage.base, &mut capped),
                amount: to_money(stage.amount, &mut capped),
                note: stage.note,
            })
            .collect();

        if capped {
            warn!(hs_code = %tariff.code, caf = %caf, "Duty amounts saturated");
            warnings.push("Montant hors plage : valeurs plafonnées".to_string());
        }

        DutyBreakdown {
            hs_code: tariff.code.clone(),
            description: tariff.description.clone(),
            caf_value: caf,
            lines,
            totals,
            warnings,
        }
    }
}

/// Rate if set and strictly positive.
fn positive(rate: Option<Decimal>) -> Option<Decimal> {
    rate.filter(|r| *r > Decimal::ZERO)
}

/// Whether the origin qualifies for the community levy exemption.
fn qualifies_for_trade_bloc(origin: &OriginInfo, config: &EngineConfig) -> bool {
    origin.trade_bloc_member.unwrap_or_else(|| {
        origin
            .country_code
            .as_deref()
            .is_some_and(|code| config.is_trade_bloc_country(code))
    })
}

// =============================================================================
// Public API
// =============================================================================

/// Looks up `hs_code` in the catalog and computes its breakdown.
///
/// ## Errors
/// [`CoreError::TariffCodeNotFound`] when the code has no reference row.
pub fn compute_duties<C>(
    catalog: &C,
    hs_code: &str,
    caf_value: Money,
    origin: &OriginInfo,
    config: &EngineConfig,
) -> CoreResult<DutyBreakdown>
where
    C: TariffCatalog + ?Sized,
{
    let tariff = catalog
        .lookup(hs_code)
        .ok_or_else(|| CoreError::tariff_not_found(hs_code))?;
    Ok(compute_duties_for(tariff, caf_value, origin, config))
}

/// Computes the breakdown for an already resolved tariff row.
pub fn compute_duties_for(
    tariff: &TariffCode,
    caf_value: Money,
    origin: &OriginInfo,
    config: &EngineConfig,
) -> DutyBreakdown {
    let mut warnings = Vec::new();

    let caf_value = if caf_value.is_negative() {
        warnings.push(format!("Valeur CAF négative ({caf_value}) ramenée à 0"));
        Money::zero()
    } else {
        caf_value
    };
    if tariff.official_valuation {
        warnings.push(
            "Position soumise à la valeur mercuriale : la valeur officielle peut remplacer la valeur CAF déclarée"
                .to_string(),
        );
    }

    let caf = caf_value.to_decimal();
    let mut cascade = Cascade::default();

    // 1-6: customs duties, all on CAF
    let customs_duty = cascade.apply(
        "Droit de douane",
        CODE_CUSTOMS_DUTY,
        tariff.customs_duty_rate.unwrap_or_default(),
        caf,
        DutyGroup::Customs,
    );
    if let Some(rate) = positive(tariff.surtax_rate) {
        cascade.apply("Surtaxe", CODE_SURTAX, rate, caf, DutyGroup::Customs);
    }
    let statistical_levy = cascade.apply(
        "Redevance statistique",
        CODE_STATISTICAL_LEVY,
        tariff.statistical_levy_rate.unwrap_or(config.statistical_levy_rate),
        caf,
        DutyGroup::Customs,
    );
    cascade.apply(
        "Prélèvement communautaire de solidarité",
        CODE_SOLIDARITY_LEVY,
        tariff.solidarity_levy_rate.unwrap_or(config.solidarity_levy_rate),
        caf,
        DutyGroup::Customs,
    );
    if qualifies_for_trade_bloc(origin, config) {
        cascade.exempt(
            "Prélèvement communautaire CEDEAO",
            CODE_COMMUNITY_LEVY,
            caf,
            DutyGroup::Customs,
            "Exonéré (origine communautaire)",
        );
    } else {
        cascade.apply(
            "Prélèvement communautaire CEDEAO",
            CODE_COMMUNITY_LEVY,
            tariff.community_levy_rate.unwrap_or(config.community_levy_rate),
            caf,
            DutyGroup::Customs,
        );
    }
    cascade.apply(
        "Prélèvement COSEC",
        CODE_SHIPPING_LEVY,
        tariff.shipping_levy_rate.unwrap_or(config.shipping_levy_rate),
        caf,
        DutyGroup::Customs,
    );

    // 7-10: internal taxes
    let intermediate_base = cascade.base(&[caf, customs_duty, statistical_levy]);
    let internal_tax = positive(tariff.internal_tax_rate)
        .map(|rate| {
            cascade.apply(
                "Taxe intérieure",
                CODE_INTERNAL_TAX,
                rate,
                intermediate_base,
                DutyGroup::Internal,
            )
        })
        .unwrap_or_default();
    let conjunctural_tax = positive(tariff.conjunctural_tax_rate)
        .map(|rate| {
            cascade.apply(
                "Taxe conjoncturelle à l'importation",
                CODE_CONJUNCTURAL_TAX,
                rate,
                caf,
                DutyGroup::Internal,
            )
        })
        .unwrap_or_default();

    let special_taxes = [
        ("Taxe pastorale", CODE_PASTORAL_TAX, tariff.pastoral_tax_rate),
        ("Prélèvement parafiscal", CODE_PARAFISCAL_TAX, tariff.parafiscal_tax_rate),
        ("Taxe spéciale sur le ciment", CODE_CEMENT_TAX, tariff.cement_tax_rate),
        ("Taxe environnementale", CODE_ENVIRONMENTAL_TAX, tariff.environmental_tax_rate),
    ];
    for (name, code, rate) in special_taxes {
        if let Some(rate) = rate.filter(|r| !r.is_zero()) {
            cascade.apply(name, code, rate, caf, DutyGroup::Internal);
        }
    }

    // 11-12: VAT
    let vat_base = cascade.base(&[caf, customs_duty, statistical_levy, internal_tax, conjunctural_tax]);
    match positive(tariff.vat_rate) {
        Some(rate) => {
            cascade.apply("TVA", CODE_VAT, rate, vat_base, DutyGroup::Vat);
        }
        None => cascade.exempt("TVA", CODE_VAT, vat_base, DutyGroup::Vat, "Exonéré de TVA"),
    }

    // 13: advance income tax
    if tariff.advance_tax_applicable {
        if origin.cge_exempt {
            debug!(hs_code = %tariff.code, "Advance tax skipped for CGE importer");
        } else {
            cascade.apply(
                "Acompte sur impôt (AIR)",
                CODE_ADVANCE_TAX,
                config.advance_tax_rate,
                vat_base,
                DutyGroup::AdvanceTax,
            );
        }
    }

    let breakdown = cascade.finish(tariff, caf_value, warnings);
    debug!(
        hs_code = %breakdown.hs_code,
        caf = %breakdown.caf_value,
        grand_total = %breakdown.totals.grand_total,
        lines = breakdown.lines.len(),
        "Duty cascade computed"
    );
    breakdown
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::index_tariff_codes;
    use rust_decimal_macros::dec;

    fn vehicle() -> TariffCode {
        TariffCode {
            code: "8703.23.19.00".to_string(),
            customs_duty_rate: Some(dec!(0.20)),
            vat_rate: Some(dec!(0.18)),
            advance_tax_applicable: true,
            ..TariffCode::default()
        }
    }

    fn from_france() -> OriginInfo {
        OriginInfo {
            country_code: Some("FR".to_string()),
            ..OriginInfo::default()
        }
    }

    fn codes(breakdown: &DutyBreakdown) -> Vec<&str> {
        breakdown.lines.iter().map(|l| l.code.as_str()).collect()
    }

    #[test]
    fn test_standard_cascade() {
        let b = compute_duties_for(&vehicle(), Money::from_units(1_000_000), &from_france(), &EngineConfig::default());

        assert_eq!(codes(&b), vec!["DD", "RS", "PCS", "PC", "COSEC", "TVA", "AIR"]);
        assert_eq!(b.line("DD").unwrap().amount.units(), 200_000);
        assert_eq!(b.line("RS").unwrap().amount.units(), 10_000);
        assert_eq!(b.line("PCS").unwrap().amount.units(), 8_000);
        assert_eq!(b.line("PC").unwrap().amount.units(), 5_000);
        assert_eq!(b.line("COSEC").unwrap().amount.units(), 4_000);

        let vat = b.line("TVA").unwrap();
        assert_eq!(vat.base.units(), 1_210_000);
        assert_eq!(vat.amount.units(), 217_800);
        assert_eq!(b.line("AIR").unwrap().amount.units(), 36_300);

        assert_eq!(b.totals.customs_duties.units(), 227_000);
        assert_eq!(b.totals.internal_taxes.units(), 0);
        assert_eq!(b.totals.vat.units(), 217_800);
        assert_eq!(b.totals.advance_tax.units(), 36_300);
        assert_eq!(b.totals.grand_total.units(), 481_100);
        assert_eq!(b.totals.taxable_value.units(), 1_481_100);
    }

    #[test]
    fn test_trade_bloc_origin_waives_community_levy() {
        let origin = OriginInfo {
            country_code: Some("SN".to_string()),
            ..OriginInfo::default()
        };
        let b = compute_duties_for(&vehicle(), Money::from_units(1_000_000), &origin, &EngineConfig::default());
        let pc = b.line("PC").unwrap();
        assert!(pc.amount.is_zero());
        assert!(pc.note.is_some());
        assert_eq!(b.totals.customs_duties.units(), 222_000);
    }

    #[test]
    fn test_explicit_bloc_flag_overrides_country() {
        let origin = OriginInfo {
            country_code: Some("SN".to_string()),
            trade_bloc_member: Some(false),
            cge_exempt: false,
        };
        let b = compute_duties_for(&vehicle(), Money::from_units(1_000_000), &origin, &EngineConfig::default());
        assert_eq!(b.line("PC").unwrap().amount.units(), 5_000);
    }

    #[test]
    fn test_cge_importer_skips_advance_tax() {
        let origin = OriginInfo {
            cge_exempt: true,
            ..from_france()
        };
        let b = compute_duties_for(&vehicle(), Money::from_units(1_000_000), &origin, &EngineConfig::default());
        assert!(b.line("AIR").is_none());
        assert!(b.totals.advance_tax.is_zero());
    }

    #[test]
    fn test_internal_and_conjunctural_taxes_feed_vat_base() {
        let tariff = TariffCode {
            internal_tax_rate: Some(dec!(0.05)),
            conjunctural_tax_rate: Some(dec!(0.10)),
            advance_tax_applicable: false,
            ..vehicle()
        };
        let b = compute_duties_for(&tariff, Money::from_units(1_000_000), &from_france(), &EngineConfig::default());

        let ti = b.line("TI").unwrap();
        assert_eq!(ti.base.units(), 1_210_000);
        assert_eq!(ti.amount.units(), 60_500);
        assert_eq!(b.line("TCI").unwrap().amount.units(), 100_000);

        // 1 210 000 + 60 500 + 100 000
        let vat = b.line("TVA").unwrap();
        assert_eq!(vat.base.units(), 1_370_500);
        assert_eq!(vat.amount.units(), 246_690);
        assert_eq!(b.totals.internal_taxes.units(), 160_500);
    }

    #[test]
    fn test_special_taxes_only_when_nonzero() {
        let tariff = TariffCode {
            code: "2523290000".to_string(),
            cement_tax_rate: Some(dec!(0.02)),
            pastoral_tax_rate: Some(Decimal::ZERO),
            vat_rate: Some(dec!(0.18)),
            ..TariffCode::default()
        };
        let b = compute_duties_for(&tariff, Money::from_units(500_000), &from_france(), &EngineConfig::default());
        assert!(b.line("TP").is_none());
        assert_eq!(b.line("TSC").unwrap().amount.units(), 10_000);
        // Special taxes stay out of the VAT base
        assert_eq!(b.line("TVA").unwrap().base.units(), 505_000);
    }

    #[test]
    fn test_surtax_listed_only_when_positive() {
        let with = TariffCode {
            surtax_rate: Some(dec!(0.10)),
            ..vehicle()
        };
        let b = compute_duties_for(&with, Money::from_units(100_000), &from_france(), &EngineConfig::default());
        assert_eq!(&codes(&b)[..3], &["DD", "SUR", "RS"]);
        assert_eq!(b.line("SUR").unwrap().amount.units(), 10_000);
    }

    #[test]
    fn test_zero_vat_is_noted_exempt() {
        let tariff = TariffCode {
            vat_rate: None,
            ..vehicle()
        };
        let b = compute_duties_for(&tariff, Money::from_units(100_000), &from_france(), &EngineConfig::default());
        let vat = b.line("TVA").unwrap();
        assert!(vat.amount.is_zero());
        assert_eq!(vat.note.as_deref(), Some("Exonéré de TVA"));
    }

    #[test]
    fn test_row_rates_override_defaults() {
        let tariff = TariffCode {
            statistical_levy_rate: Some(Decimal::ZERO),
            ..vehicle()
        };
        let b = compute_duties_for(&tariff, Money::from_units(100_000), &from_france(), &EngineConfig::default());
        assert!(b.line("RS").unwrap().amount.is_zero());
    }

    #[test]
    fn test_rounding_happens_only_at_the_end() {
        let b = compute_duties_for(&vehicle(), Money::from_units(3_053_480), &from_france(), &EngineConfig::default());
        assert_eq!(b.line("RS").unwrap().amount.units(), 30_535); // 30 534.8
        assert_eq!(b.line("PCS").unwrap().amount.units(), 24_428); // 24 427.84
        assert_eq!(b.line("PC").unwrap().amount.units(), 15_267); // 15 267.4
        assert_eq!(b.line("COSEC").unwrap().amount.units(), 12_214); // 12 213.92
        // 610 696 + 30 534.8 + 24 427.84 + 15 267.4 + 12 213.92
        assert_eq!(b.totals.customs_duties.units(), 693_140);
        // VAT base keeps the unrounded RS: 3 053 480 + 610 696 + 30 534.8
        assert_eq!(b.line("TVA").unwrap().amount.units(), 665_048); // 665 047.944
    }

    #[test]
    fn test_cascade_is_deterministic() {
        let config = EngineConfig::default();
        let first = compute_duties_for(&vehicle(), Money::from_units(2_718_281), &from_france(), &config);
        let second = compute_duties_for(&vehicle(), Money::from_units(2_718_281), &from_france(), &config);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_official_valuation_warns() {
        let tariff = TariffCode {
            official_valuation: true,
            ..vehicle()
        };
        let b = compute_duties_for(&tariff, Money::from_units(1), &from_france(), &EngineConfig::default());
        assert_eq!(b.warnings.len(), 1);
        assert!(b.warnings[0].contains("mercuriale"));
    }

    #[test]
    fn test_catalog_lookup_and_not_found() {
        let catalog = index_tariff_codes(vec![vehicle()]);
        let config = EngineConfig::default();
        let found = compute_duties(&catalog, "8703 23 19 00", Money::from_units(10), &from_france(), &config);
        assert!(found.is_ok());

        let missing = compute_duties(&catalog, "0000000001", Money::from_units(10), &from_france(), &config);
        assert!(matches!(missing, Err(CoreError::TariffCodeNotFound { ref code, .. }) if code == "0000000001"));
    }

    #[test]
    fn test_negative_caf_is_coerced_with_warning() {
        let b = compute_duties_for(&vehicle(), Money::from_units(-5), &from_france(), &EngineConfig::default());
        assert!(b.caf_value.is_zero());
        assert!(b.totals.grand_total.is_zero());
        assert_eq!(b.warnings, vec!["Valeur CAF négative (-5 FCFA) ramenée à 0".to_string()]);
    }

    #[test]
    fn test_taxable_value_saturates_for_largest_caf() {
        let b = compute_duties_for(&vehicle(), Money::from_units(i64::MAX), &from_france(), &EngineConfig::default());
        assert_eq!(b.totals.taxable_value.units(), i64::MAX);
        assert!(b.totals.grand_total.units() > 0);
        assert_eq!(b.warnings.len(), 1);
        assert!(b.warnings[0].contains("hors plage"));
    }

    #[test]
    fn test_oversized_rate_saturates_instead_of_failing() {
        let tariff = TariffCode {
            customs_duty_rate: Some(Decimal::from_i128_with_scale(10_i128.pow(20), 0)),
            ..vehicle()
        };
        let b = compute_duties_for(&tariff, Money::from_units(1_000_000_000), &from_france(), &EngineConfig::default());
        assert_eq!(b.line("DD").unwrap().amount.units(), i64::MAX);
        assert_eq!(b.totals.grand_total.units(), i64::MAX);
        assert!(b.warnings.iter().any(|w| w.contains("hors plage")));
    }

    #[test]
    fn test_ordinary_amounts_carry_no_range_warning() {
        let b = compute_duties_for(&vehicle(), Money::from_units(1_000_000), &from_france(), &EngineConfig::default());
        assert!(b.warnings.is_empty());
    }
}
