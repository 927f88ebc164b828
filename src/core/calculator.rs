use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::debug;

use super::error::InvoiceError;
use super::exact;
use super::types::*;

/// Calculate per-item values, per-rate totals and the grand total.
///
/// Items keep their input order. Rate groups appear in the order in which
/// each distinct VAT rate is first seen; rates are compared numerically, so
/// `10` and `10.00` fall into the same group. The grand total is summed from
/// the items directly, not from the groups.
///
/// Fails with [`InvoiceError::MalformedAmount`] on the first field that is not
/// a finite decimal, and with [`InvoiceError::Arithmetic`] when a value falls
/// outside the decimal range or would need more than 28 fraction digits.
/// Nothing is ever rounded. No partial summary is produced.
///
/// ```
/// use fakturka::core::*;
/// use rust_decimal_macros::dec;
///
/// let items = vec![
///     LineItemBuilder::new("Consulting", dec!(3), dec!(10000), dec!(10)).build(),
/// ];
/// let summary = calculate_invoice_summary(&items).unwrap();
/// assert_eq!(summary.summary.gross_value, dec!(33000));
/// ```
pub fn calculate_invoice_summary(items: &[LineItem]) -> Result<InvoiceSummary, InvoiceError> {
    let calculated = items
        .iter()
        .enumerate()
        .map(|(index, item)| calculate_item(index, item))
        .collect::<Result<Vec<_>, _>>()?;

    let summary = sum_values(calculated.iter().map(CalculatedItem::value))?;
    let vat_rate_values = group_by_rate(&calculated)?;

    debug!(
        items = calculated.len(),
        rates = vat_rate_values.len(),
        net = %summary.net_value,
        gross = %summary.gross_value,
        "calculated invoice summary"
    );

    Ok(InvoiceSummary {
        items: calculated,
        vat_rate_values,
        summary,
    })
}

/// Parse decimal text without going through binary floating point.
///
/// Accepts plain (`-12.50`) and scientific (`1.25e2`) notation, ignoring
/// surrounding whitespace. Returns `None` for anything else, including
/// `NaN`, infinities and digit group separators.
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim();
    if text.is_empty() || text.contains('_') {
        return None;
    }
    if text.contains(['e', 'E']) {
        Decimal::from_scientific(text).ok()
    } else {
        Decimal::from_str_exact(text).ok()
    }
}

fn parse_field(index: usize, field: &'static str, raw: &RawDecimal) -> Result<Decimal, InvoiceError> {
    raw.to_decimal().ok_or_else(|| InvoiceError::MalformedAmount {
        index,
        field,
        value: raw.to_string(),
    })
}

fn calculate_item(index: usize, item: &LineItem) -> Result<CalculatedItem, InvoiceError> {
    let amount = parse_field(index, "amount", &item.amount)?;
    let net_price = parse_field(index, "netPrice", &item.net_price)?;
    let vat_percent = parse_field(index, "vatPercent", &item.vat_percent)?;

    let inexact = || {
        InvoiceError::Arithmetic(format!(
            "item {index}: value cannot be represented exactly as a decimal"
        ))
    };

    let net_value = exact::mul(net_price, amount).ok_or_else(inexact)?;
    let vat_value = exact::percent_of(net_value, vat_percent).ok_or_else(inexact)?;
    let gross_value = exact::add(net_value, vat_value).ok_or_else(inexact)?;

    Ok(CalculatedItem {
        description: item.description.clone(),
        amount,
        net_price,
        vat_percent,
        net_value,
        vat_value,
        gross_value,
    })
}

fn sum_values(values: impl Iterator<Item = InvoiceValue>) -> Result<InvoiceValue, InvoiceError> {
    InvoiceValue::checked_sum(values).ok_or_else(|| {
        InvoiceError::Arithmetic("invoice total cannot be represented exactly".into())
    })
}

fn group_by_rate(items: &[CalculatedItem]) -> Result<Vec<RateGroupSummary>, InvoiceError> {
    // Decimal's Hash agrees with its numeric Eq, so 23 and 23.0 share a slot.
    let mut positions: HashMap<Decimal, usize> = HashMap::new();
    let mut groups: Vec<(Decimal, InvoiceValue)> = Vec::new();

    for item in items {
        let slot = *positions.entry(item.vat_percent).or_insert_with(|| {
            groups.push((item.vat_percent, InvoiceValue::ZERO));
            groups.len() - 1
        });
        let (rate, total) = &mut groups[slot];
        *total = total.checked_add(item.value()).ok_or_else(|| {
            InvoiceError::Arithmetic(format!("total for VAT rate {rate} cannot be represented exactly"))
        })?;
    }

    Ok(groups
        .into_iter()
        .map(|(vat_rate, total)| RateGroupSummary {
            vat_rate,
            net_value: total.net_value,
            vat_value: total.vat_value,
            gross_value: total.gross_value,
        })
        .collect())
}
