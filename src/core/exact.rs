//! Decimal arithmetic that never rounds.
//!
//! `rust_decimal` silently rounds any result that needs more than 28
//! fraction digits or more than 96 bits of mantissa. These helpers compute
//! the exact result on the `i128` mantissas instead and return `None` when it
//! cannot be represented as a `Decimal`.

use rust_decimal::Decimal;

/// Exact `a × b`.
pub(crate) fn mul(a: Decimal, b: Decimal) -> Option<Decimal> {
    let (mantissa, scale) = match a.mantissa().checked_mul(b.mantissa()) {
        Some(mantissa) => (mantissa, a.scale() + b.scale()),
        None => {
            let (a, b) = (a.normalize(), b.normalize());
            (a.mantissa().checked_mul(b.mantissa())?, a.scale() + b.scale())
        }
    };
    from_parts(mantissa, scale)
}

/// Exact `value × percent ÷ 100`.
pub(crate) fn percent_of(value: Decimal, percent: Decimal) -> Option<Decimal> {
    let product = mul(value, percent)?;
    from_parts(product.mantissa(), product.scale() + 2)
}

/// Exact `a + b`.
pub(crate) fn add(a: Decimal, b: Decimal) -> Option<Decimal> {
    aligned_sum(a, b).or_else(|| aligned_sum(a.normalize(), b.normalize()))
}

fn aligned_sum(a: Decimal, b: Decimal) -> Option<Decimal> {
    let scale = a.scale().max(b.scale());
    let sum = widen(a, scale)?.checked_add(widen(b, scale)?)?;
    from_parts(sum, scale)
}

/// Mantissa of `value` expressed at the larger `scale`.
fn widen(value: Decimal, scale: u32) -> Option<i128> {
    10i128
        .checked_pow(scale - value.scale())?
        .checked_mul(value.mantissa())
}

/// Build `mantissa × 10^-scale`, dropping trailing zeros only as far as
/// needed to fit.
fn from_parts(mut mantissa: i128, mut scale: u32) -> Option<Decimal> {
    loop {
        if let Ok(value) = Decimal::try_from_i128_with_scale(mantissa, scale) {
            return Some(value);
        }
        if scale == 0 || mantissa % 10 != 0 {
            return None;
        }
        mantissa /= 10;
        scale -= 1;
    }
}
