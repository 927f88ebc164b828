use fakturka::core::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn item(amount: Decimal, net_price: Decimal, vat_percent: Decimal) -> LineItem {
    LineItemBuilder::new("description", amount, net_price, vat_percent).build()
}

fn assert_value(value: InvoiceValue, net: Decimal, vat: Decimal, gross: Decimal) {
    assert_eq!(value.net_value, net, "net");
    assert_eq!(value.vat_value, vat, "vat");
    assert_eq!(value.gross_value, gross, "gross");
}

// --- Basic calculation ---

#[test]
fn empty_input_yields_zero_summary() {
    let result = calculate_invoice_summary(&[]).unwrap();

    assert!(result.items.is_empty());
    assert!(result.vat_rate_values.is_empty());
    assert_value(result.summary, dec!(0), dec!(0), dec!(0));
}

#[test]
fn single_item_is_multiplied_by_amount() {
    let result = calculate_invoice_summary(&[item(dec!(3), dec!(10000), dec!(10))]).unwrap();

    assert_eq!(result.items.len(), 1);
    assert_value(
        result.items[0].value(),
        dec!(30000),
        dec!(3000),
        dec!(33000),
    );

    assert_eq!(result.vat_rate_values.len(), 1);
    assert_eq!(result.vat_rate_values[0].vat_rate, dec!(10));
    assert_value(
        result.vat_rate_values[0].value(),
        dec!(30000),
        dec!(3000),
        dec!(33000),
    );

    assert_value(result.summary, dec!(30000), dec!(3000), dec!(33000));
}

#[test]
fn items_keep_input_fields_and_order() {
    let items = vec![
        LineItemBuilder::new("first", dec!(2), dec!(5), dec!(23)).build(),
        LineItemBuilder::new("second", dec!(1), dec!(7), dec!(8)).build(),
        LineItemBuilder::new("first", dec!(2), dec!(5), dec!(23)).build(),
    ];
    let result = calculate_invoice_summary(&items).unwrap();

    let descriptions: Vec<_> = result.items.iter().map(|i| i.description.as_str()).collect();
    assert_eq!(descriptions, ["first", "second", "first"]);
    assert_eq!(result.items[1].amount, dec!(1));
    assert_eq!(result.items[1].net_price, dec!(7));
    assert_eq!(result.items[1].vat_percent, dec!(8));
    // Duplicates are independent items, both counted.
    assert_eq!(result.vat_rate_values[0].net_value, dec!(20));
}

// --- Grouping by VAT rate ---

#[test]
fn groups_values_by_vat_percent() {
    let items = vec![
        item(dec!(1), dec!(10000), dec!(10)),
        item(dec!(1), dec!(10000), dec!(20)),
        item(dec!(1), dec!(5000), dec!(20)),
        item(dec!(1), dec!(5000), dec!(10)),
    ];
    let result = calculate_invoice_summary(&items).unwrap();

    assert_eq!(result.vat_rate_values.len(), 2);

    let rate10 = &result.vat_rate_values[0];
    assert_eq!(rate10.vat_rate, dec!(10));
    assert_value(rate10.value(), dec!(15000), dec!(1500), dec!(16500));

    let rate20 = &result.vat_rate_values[1];
    assert_eq!(rate20.vat_rate, dec!(20));
    assert_value(rate20.value(), dec!(15000), dec!(3000), dec!(18000));

    assert_value(result.summary, dec!(30000), dec!(4500), dec!(34500));
}

#[test]
fn rate_groups_follow_first_occurrence_not_numeric_order() {
    let items = vec![
        item(dec!(1), dec!(100), dec!(20)),
        item(dec!(1), dec!(100), dec!(10)),
        item(dec!(1), dec!(100), dec!(5)),
        item(dec!(1), dec!(100), dec!(20)),
        item(dec!(1), dec!(100), dec!(0)),
    ];
    let result = calculate_invoice_summary(&items).unwrap();

    let rates: Vec<_> = result.vat_rate_values.iter().map(|g| g.vat_rate).collect();
    assert_eq!(rates, [dec!(20), dec!(10), dec!(5), dec!(0)]);

    // Identical input, identical order.
    let again = calculate_invoice_summary(&items).unwrap();
    assert_eq!(result, again);
}

// --- Decimal exactness ---

#[test]
fn tenth_times_three_is_exact() {
    let result = calculate_invoice_summary(&[item(dec!(3), dec!(0.1), dec!(23))]).unwrap();

    assert_eq!(result.items[0].net_value, dec!(0.3));
    assert_eq!(result.items[0].vat_value, dec!(0.069));
    assert_eq!(result.items[0].gross_value, dec!(0.369));
    assert_eq!(
        result.summary.gross_value,
        result.summary.net_value + result.summary.vat_value
    );
}

#[test]
fn many_small_amounts_foot_exactly() {
    let items: Vec<_> = (0..10).map(|_| item(dec!(1), dec!(0.1), dec!(23))).collect();
    let result = calculate_invoice_summary(&items).unwrap();

    assert_value(result.summary, dec!(1), dec!(0.23), dec!(1.23));
    assert_eq!(result.vat_rate_values[0].value(), result.summary);
}

#[test]
fn no_rounding_before_display() {
    let result = calculate_invoice_summary(&[item(dec!(1), dec!(0.05), dec!(23))]).unwrap();
    assert_eq!(result.items[0].vat_value, dec!(0.0115));
    assert_eq!(format_currency(result.items[0].vat_value), "0.01");
    assert_eq!(format_currency(result.items[0].gross_value), "0.06");
}

// --- String and numeric inputs ---

#[test]
fn string_and_numeric_inputs_agree() {
    let numeric = vec![
        LineItemBuilder::new("a", 3, 10000, 10).build(),
        LineItemBuilder::new("b", dec!(1.5), dec!(19.99), dec!(23)).build(),
    ];
    let text = vec![
        LineItemBuilder::new("a", "3", "10000", "10").build(),
        LineItemBuilder::new("b", "1.5", " 19.99 ", "2.3e1").build(),
    ];

    assert_eq!(
        calculate_invoice_summary(&numeric).unwrap(),
        calculate_invoice_summary(&text).unwrap()
    );
}

#[test]
fn malformed_net_price_fails_without_output() {
    let items = vec![
        item(dec!(1), dec!(100), dec!(23)),
        LineItemBuilder::new("broken", "1", "sto", "23").build(),
    ];

    let err = calculate_invoice_summary(&items).unwrap_err();
    match err {
        InvoiceError::MalformedAmount { index, field, value } => {
            assert_eq!(index, 1);
            assert_eq!(field, "netPrice");
            assert_eq!(value, "sto");
        }
        other => panic!("expected MalformedAmount, got {other:?}"),
    }
}

#[test]
fn malformed_vat_percent_is_named() {
    let items = vec![LineItemBuilder::new("x", "1", "1", "23%").build()];
    let err = calculate_invoice_summary(&items).unwrap_err();
    assert!(err.to_string().contains("vatPercent"));
}

// --- Invoice builder ---

#[test]
fn invoice_summary_from_builder() {
    let invoice = InvoiceBuilder::new(
        "1/2019",
        chrono::NaiveDate::from_ymd_opt(2019, 1, 31).unwrap(),
    )
    .issuer(
        IssuerBuilder::new("Issuer Name", "1234567890")
            .account_line("bankName")
            .build(),
    )
    .receiver(InstitutionBuilder::new("Receiver name", "0987654321").build())
    .add_item(LineItemBuilder::new("Nazwa usługi", 1, 1650, 23).build())
    .add_item(LineItemBuilder::new("Nazwa usługi2", 2, 850, 23).build())
    .build()
    .unwrap();

    let summary = invoice.summary().unwrap();
    assert_value(summary.summary, dec!(3350), dec!(770.5), dec!(4120.5));
    assert!(validate_summary(&summary).is_empty());
}

#[test]
fn summary_serializes_decimals_as_strings() {
    let result = calculate_invoice_summary(&[item(dec!(1), dec!(2.50), dec!(10))]).unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["items"][0]["netValue"], "2.50");
    assert_eq!(json["vatRateValues"][0]["vatRate"], "10");
    assert!(json["summary"]["grossValue"].is_string());
}
