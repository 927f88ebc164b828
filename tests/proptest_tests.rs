//! Property-based tests for the value calculator.
//!
//! Run with: `cargo test --test proptest_tests`

use fakturka::core::*;
use proptest::prelude::*;
use rust_decimal::Decimal;

// ── Proptest Strategies ─────────────────────────────────────────────────────

/// Generate a price with up to four fraction digits (0.0000 to 99999.9999).
fn arb_price() -> impl Strategy<Value = Decimal> {
    (0u64..1_000_000_000u64).prop_map(|units| Decimal::new(units as i64, 4))
}

/// Generate a quantity, whole or with up to three fraction digits.
fn arb_quantity() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        (0u32..=1000u32).prop_map(Decimal::from),
        (0u64..1_000_000u64).prop_map(|m| Decimal::new(m as i64, 3)),
    ]
}

/// Generate a VAT rate, sometimes with a non-canonical scale.
fn arb_rate() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        Just(Decimal::new(0, 0)),
        Just(Decimal::new(5, 0)),
        Just(Decimal::new(8, 0)),
        Just(Decimal::new(23, 0)),
        Just(Decimal::new(2300, 2)),
        (0u32..=10_000u32).prop_map(|bp| Decimal::new(i64::from(bp), 2)),
    ]
}

fn arb_item() -> impl Strategy<Value = LineItem> {
    (arb_quantity(), arb_price(), arb_rate(), any::<bool>()).prop_map(
        |(amount, price, rate, as_text)| {
            if as_text {
                LineItemBuilder::new(
                    "item",
                    amount.to_string(),
                    price.to_string(),
                    rate.to_string(),
                )
                .build()
            } else {
                LineItemBuilder::new("item", amount, price, rate).build()
            }
        },
    )
}

fn arb_items() -> impl Strategy<Value = Vec<LineItem>> {
    prop::collection::vec(arb_item(), 0..=20)
}

// ── Properties ──────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn summary_passes_its_own_validation(items in arb_items()) {
        let result = calculate_invoice_summary(&items).unwrap();
        let errors = validate_summary(&result);
        prop_assert!(errors.is_empty(), "errors: {:?}", errors);
    }

    #[test]
    fn totals_foot_to_items(items in arb_items()) {
        let result = calculate_invoice_summary(&items).unwrap();

        let net: Decimal = result.items.iter().map(|i| i.net_value).sum();
        let vat: Decimal = result.items.iter().map(|i| i.vat_value).sum();
        prop_assert_eq!(result.summary.net_value, net);
        prop_assert_eq!(result.summary.vat_value, vat);
        prop_assert_eq!(
            result.summary.gross_value,
            result.summary.net_value + result.summary.vat_value
        );
    }

    #[test]
    fn rate_groups_partition_items(items in arb_items()) {
        let result = calculate_invoice_summary(&items).unwrap();

        let group_net: Decimal = result.vat_rate_values.iter().map(|g| g.net_value).sum();
        let group_vat: Decimal = result.vat_rate_values.iter().map(|g| g.vat_value).sum();
        let group_gross: Decimal = result.vat_rate_values.iter().map(|g| g.gross_value).sum();
        prop_assert_eq!(group_net, result.summary.net_value);
        prop_assert_eq!(group_vat, result.summary.vat_value);
        prop_assert_eq!(group_gross, result.summary.gross_value);

        for item in &result.items {
            let owners = result
                .vat_rate_values
                .iter()
                .filter(|g| g.vat_rate == item.vat_percent)
                .count();
            prop_assert_eq!(owners, 1);
        }
    }

    #[test]
    fn items_keep_input_order(items in arb_items()) {
        let result = calculate_invoice_summary(&items).unwrap();
        prop_assert_eq!(result.items.len(), items.len());
        for (input, output) in items.iter().zip(&result.items) {
            prop_assert_eq!(input.amount.to_decimal(), Some(output.amount));
            prop_assert_eq!(input.net_price.to_decimal(), Some(output.net_price));
        }
    }

    #[test]
    fn rate_groups_in_first_occurrence_order(items in arb_items()) {
        let result = calculate_invoice_summary(&items).unwrap();

        let mut expected: Vec<Decimal> = Vec::new();
        for item in &result.items {
            if !expected.contains(&item.vat_percent) {
                expected.push(item.vat_percent);
            }
        }
        let actual: Vec<Decimal> = result.vat_rate_values.iter().map(|g| g.vat_rate).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn calculation_is_deterministic(items in arb_items()) {
        prop_assert_eq!(
            calculate_invoice_summary(&items).unwrap(),
            calculate_invoice_summary(&items).unwrap()
        );
    }

    #[test]
    fn parse_never_panics(s in "\\PC{0,40}") {
        let _ = parse_decimal(&s);
    }

    #[test]
    fn decimal_text_round_trips(value in arb_price()) {
        prop_assert_eq!(parse_decimal(&value.to_string()), Some(value));
    }
}
