//! End-to-end pricing scenarios driven through JSON payloads, the way the
//! CLI and upstream services feed the engine.

use chrono::NaiveDate;
use pricing_core::{
    assemble, compute_quote, distribute, index_tariff_codes, resolve_on, Article, DistributionMethod,
    EngineConfig, IssueCode, LocalTransportRate, Money, PricingContext, QuoteInput, ShipmentRequest,
    TariffCode,
};
use rust_decimal_macros::dec;

const RATE_TABLE: &str = r#"[
    {"id": "k-20", "origin": "DAKAR", "destination": "KAOLACK", "container_type": "20' DRY", "amount": 310000},
    {"id": "k-40", "origin": "DAKAR", "destination": "KAOLACK", "container_type": "40' DRY", "amount": 527460},
    {"id": "k-40-old", "origin": "DAKAR", "destination": "KAOLACK", "container_type": "40'", "amount": 480000,
     "valid_until": "2024-12-31"},
    {"id": "t-20", "origin": "DAKAR", "destination": "THIES VILLE", "container_type": "20'DRY", "amount": 151040,
     "currency": "XOF", "provider": "Transports du Cayor"},
    {"id": "t-40", "origin": "DAKAR", "destination": "THIES VILLE", "container_type": "40' DRY", "amount": 230000}
]"#;

fn rate_table() -> Vec<LocalTransportRate> {
    serde_json::from_str(RATE_TABLE).unwrap()
}

fn pricing_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
}

fn context(city: &str, container: &str) -> PricingContext {
    PricingContext {
        destination_city: Some(city.to_string()),
        container_type: Some(container.to_string()),
        ..PricingContext::default()
    }
}

#[test]
fn caf_split_over_two_euro_invoices() {
    let articles = vec![
        Article::new("8703.23.19.00", 165.0, "EUR"),
        Article::new("8708.99.00.00", 3760.0, "EUR"),
    ];
    let result = distribute(
        &["8703231900", "8708990000"],
        Money::from_units(3_053_480),
        &articles,
        &EngineConfig::default(),
    );

    assert_eq!(result.method, DistributionMethod::Proportional);
    assert_eq!(result.shares[0].caf_value.units(), 128_363);
    assert_eq!(result.shares[1].caf_value.units(), 2_925_117);
    assert_eq!(result.total().units(), 3_053_480);
    assert!(result.warnings.is_empty());
}

#[test]
fn kaolack_forty_foot_exact_match() {
    let found = resolve_on(
        &rate_table(),
        "LOCAL_TRANSPORT",
        &context("KAOLACK", "40DV"),
        false,
        &EngineConfig::default(),
        pricing_day(),
    )
    .unwrap();

    assert_eq!(found.amount, dec!(527460));
    assert_eq!(found.currency, "XOF");
    assert_eq!(found.rate_id.as_deref(), Some("k-40"));
}

#[test]
fn thies_unique_partial_match() {
    let found = resolve_on(
        &rate_table(),
        "TRUCKING",
        &context("Thies", "20DV"),
        false,
        &EngineConfig::default(),
        pricing_day(),
    )
    .unwrap();

    assert_eq!(found.amount, dec!(151040));
    assert_eq!(found.destination, "THIES VILLE");
    assert!(found.explanation.contains("Transports du Cayor"));
}

#[test]
fn air_leg_never_gets_a_trucking_rate() {
    let found = resolve_on(
        &rate_table(),
        "LOCAL_TRANSPORT",
        &context("KAOLACK", "40DV"),
        true,
        &EngineConfig::default(),
        pricing_day(),
    );
    assert!(found.is_none());
}

#[test]
fn quote_with_negative_quantities() {
    let input: QuoteInput = serde_json::from_str(
        r#"{
            "cargo_lines": [{"quantity": -1, "weight_kg": 1200, "volume_m3": 33}],
            "service_lines": [
                {"service_key": "HANDLING", "quantity": -2, "unit_price": 45000},
                {"service_key": "CUSTOMS_CLEARANCE", "quantity": 1, "unit_price": 150000}
            ]
        }"#,
    )
    .unwrap();
    let result = compute_quote(&input, &EngineConfig::default());

    let coerced = result
        .issues
        .iter()
        .filter(|i| i.code == IssueCode::NegativeValuesCoerced)
        .count();
    assert_eq!(coerced, 2);
    assert_eq!(result.snapshot.total_weight_kg, dec!(0));
    assert_eq!(result.snapshot.total_ht, dec!(150000));
    assert_eq!(result.snapshot.ttc, dec!(177000));
}

#[test]
fn quote_with_integer_rounding() {
    let input: QuoteInput = serde_json::from_str(
        r#"{
            "service_lines": [{"quantity": 1, "unit_price": 999.6}],
            "tax_rate": 0.18,
            "rounding": "integer"
        }"#,
    )
    .unwrap();
    let result = compute_quote(&input, &EngineConfig::default());

    assert_eq!(result.snapshot.total_ht, dec!(1000));
    assert_eq!(result.snapshot.tax, dec!(180));
    assert_eq!(result.snapshot.ttc, dec!(1180));
    assert!(result.issues.iter().any(|i| i.code == IssueCode::RoundingApplied));
}

#[test]
fn whole_shipment_from_json() {
    let catalog = index_tariff_codes(
        serde_json::from_str::<Vec<TariffCode>>(
            r#"[
                {"code": "8703.23.19.00", "description": "Véhicules de tourisme",
                 "customs_duty_rate": 0.2, "vat_rate": 0.18, "advance_tax_applicable": true},
                {"code": "8708.99.00.00", "description": "Parties et accessoires",
                 "customs_duty_rate": 0.1, "vat_rate": 0.18}
            ]"#,
        )
        .unwrap(),
    );
    let request: ShipmentRequest = serde_json::from_str(
        r#"{
            "hs_codes": ["8703231900", "8708990000"],
            "caf_total": 3053480,
            "articles": [
                {"hs_code": "8703231900", "value": 165, "currency": "EUR"},
                {"hs_code": "8708990000", "value": "3 760", "currency": "EUR"}
            ],
            "origin": {"country_code": "FR"},
            "context": {"destination_city": "KAOLACK", "container_type": "40DV"},
            "service_key": "LOCAL_TRANSPORT",
            "pricing_date": "2026-03-02"
        }"#,
    )
    .unwrap();

    let quote = assemble(&catalog, &request, &rate_table(), &EngineConfig::default()).unwrap();

    assert_eq!(quote.distribution.total().units(), 3_053_480);
    assert_eq!(quote.breakdowns.len(), 2);
    let per_line: i64 = quote.breakdowns.iter().map(|b| b.totals.grand_total.units()).sum();
    assert_eq!(quote.totals.grand_total.units(), per_line);
    assert_eq!(quote.transport.map(|t| t.amount), Some(dec!(527460)));

    let json = serde_json::to_value(&quote.totals).unwrap();
    assert!(json["grand_total"].is_i64());
}
