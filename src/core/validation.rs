use rust_decimal::Decimal;

use super::error::ValidationError;
use super::exact;
use super::types::*;

/// Validate an invoice before rendering.
/// Returns all validation errors found (not just the first).
pub fn validate_invoice(invoice: &Invoice) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if invoice.invoice_number.trim().is_empty() {
        errors.push(ValidationError::new(
            "invoiceNumber",
            "invoice number must not be empty",
        ));
    }

    if invoice.payment_due < invoice.date {
        errors.push(ValidationError::new(
            "paymentDue",
            format!(
                "payment due date {} is before issue date {}",
                invoice.payment_due, invoice.date
            ),
        ));
    }

    if invoice.issuer.name.trim().is_empty() {
        errors.push(ValidationError::new("issuer.name", "name must not be empty"));
    }
    if invoice.receiver.name.trim().is_empty() {
        errors.push(ValidationError::new(
            "receiver.name",
            "name must not be empty",
        ));
    }

    for (i, item) in invoice.items.iter().enumerate() {
        validate_item(item, i, &mut errors);
    }

    errors
}

fn validate_item(item: &LineItem, index: usize, errors: &mut Vec<ValidationError>) {
    let prefix = format!("items[{index}]");

    if item.description.trim().is_empty() {
        errors.push(ValidationError::new(
            format!("{prefix}.description"),
            "description must not be empty",
        ));
    }

    let fields = [
        ("amount", &item.amount),
        ("netPrice", &item.net_price),
        ("vatPercent", &item.vat_percent),
    ];
    for (name, raw) in fields {
        match raw.to_decimal() {
            None => errors.push(ValidationError::new(
                format!("{prefix}.{name}"),
                format!("'{raw}' is not a decimal number"),
            )),
            Some(value) if value.is_sign_negative() && !value.is_zero() => {
                errors.push(ValidationError::new(
                    format!("{prefix}.{name}"),
                    format!("must not be negative, got {value}"),
                ))
            }
            Some(_) => {}
        }
    }
}

/// Check a computed summary against the calculation invariants.
///
/// Every summary produced by the calculator passes; this exists for
/// summaries received from elsewhere (deserialized, hand-edited) before they
/// are rendered. Recomputation is exact, so a value that cannot be recomputed
/// without overflow or rounding is reported as an error, never a panic.
pub fn validate_summary(summary: &InvoiceSummary) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (i, item) in summary.items.iter().enumerate() {
        let prefix = format!("items[{i}]");
        check_decimal(
            &mut errors,
            format!("{prefix}.netValue"),
            item.net_value,
            exact::mul(item.net_price, item.amount),
            || {
                format!(
                    "net value {} does not match price {} × amount {}",
                    item.net_value, item.net_price, item.amount
                )
            },
        );
        check_decimal(
            &mut errors,
            format!("{prefix}.vatValue"),
            item.vat_value,
            exact::percent_of(item.net_value, item.vat_percent),
            || {
                format!(
                    "VAT value {} does not match {} at {}%",
                    item.vat_value, item.net_value, item.vat_percent
                )
            },
        );
        check_decimal(
            &mut errors,
            format!("{prefix}.grossValue"),
            item.gross_value,
            exact::add(item.net_value, item.vat_value),
            || {
                format!(
                    "gross value {} does not match net {} + VAT {}",
                    item.gross_value, item.net_value, item.vat_value
                )
            },
        );
    }

    // Rate groups must partition the items.
    for (i, group) in summary.vat_rate_values.iter().enumerate() {
        if summary.vat_rate_values[..i]
            .iter()
            .any(|g| g.vat_rate == group.vat_rate)
        {
            errors.push(ValidationError::new(
                format!("vatRateValues[{i}].vatRate"),
                format!("VAT rate {} appears more than once", group.vat_rate),
            ));
        }
        let expected = InvoiceValue::checked_sum(
            summary
                .items
                .iter()
                .filter(|item| item.vat_percent == group.vat_rate)
                .map(CalculatedItem::value),
        );
        check_value(&mut errors, format!("vatRateValues[{i}]"), group.value(), expected, || {
            format!(
                "totals for VAT rate {} do not match the sum of its items",
                group.vat_rate
            )
        });
    }
    for (i, item) in summary.items.iter().enumerate() {
        if !summary
            .vat_rate_values
            .iter()
            .any(|g| g.vat_rate == item.vat_percent)
        {
            errors.push(ValidationError::new(
                format!("items[{i}].vatPercent"),
                format!("VAT rate {} has no rate group", item.vat_percent),
            ));
        }
    }

    let from_items = InvoiceValue::checked_sum(summary.items.iter().map(CalculatedItem::value));
    check_value(&mut errors, "summary".into(), summary.summary, from_items, || {
        "grand total does not match the sum of items".into()
    });
    let from_groups =
        InvoiceValue::checked_sum(summary.vat_rate_values.iter().map(RateGroupSummary::value));
    check_value(&mut errors, "summary".into(), summary.summary, from_groups, || {
        "grand total does not match the sum of VAT rate groups".into()
    });

    let total = &summary.summary;
    check_decimal(
        &mut errors,
        "summary.grossValue".into(),
        total.gross_value,
        exact::add(total.net_value, total.vat_value),
        || {
            format!(
                "gross total {} does not match net {} + VAT {}",
                total.gross_value, total.net_value, total.vat_value
            )
        },
    );

    errors
}

fn check_decimal(
    errors: &mut Vec<ValidationError>,
    field: String,
    actual: Decimal,
    expected: Option<Decimal>,
    mismatch: impl FnOnce() -> String,
) {
    match expected {
        Some(expected) if expected == actual => {}
        Some(_) => errors.push(ValidationError::new(field, mismatch())),
        None => errors.push(ValidationError::new(field, NOT_RECOMPUTABLE)),
    }
}

fn check_value(
    errors: &mut Vec<ValidationError>,
    field: String,
    actual: InvoiceValue,
    expected: Option<InvoiceValue>,
    mismatch: impl FnOnce() -> String,
) {
    match expected {
        Some(expected) if expected == actual => {}
        Some(_) => errors.push(ValidationError::new(field, mismatch())),
        None => errors.push(ValidationError::new(field, NOT_RECOMPUTABLE)),
    }
}

const NOT_RECOMPUTABLE: &str = "expected value cannot be represented exactly as a decimal";
