//! Display formatting for amounts. Rounding happens here and nowhere else.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round half-up (commercial rounding) to two places and always show two
/// fraction digits: `1650` → `"1650.00"`, `2.345` → `"2.35"`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}

/// Quantities and percentages without trailing zeros: `23.00` → `"23"`.
pub fn format_decimal(value: Decimal) -> String {
    value.normalize().to_string()
}
