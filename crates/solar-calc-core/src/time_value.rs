use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::types::{Money, Rate};

pub const MONTHS_PER_YEAR: i64 = 12;

const PERCENT: Decimal = dec!(100);

/// Monthly periodic rate from a nominal annual rate quoted in percent
/// (5.8 → 0.0048333…).
pub fn monthly_rate_from_pct(annual_rate_pct: Decimal) -> Rate {
    annual_rate_pct / PERCENT / Decimal::from(MONTHS_PER_YEAR)
}

/// Level periodic payment (PMT) that fully amortizes `principal` over
/// `nper` periods at `rate` per period, quoted as a positive outflow.
///
/// Degenerate cases resolve to their limits instead of failing:
/// `nper <= 0` pays nothing, a zero rate repays straight-line, and a growth
/// factor beyond Decimal range pays interest only.
pub fn level_payment(rate: Rate, nper: i64, principal: Money) -> Money {
    if nper <= 0 {
        return Decimal::ZERO;
    }

    let periods = Decimal::from(nper);
    if rate.is_zero() {
        return principal / periods;
    }

    let growth = match (Decimal::ONE + rate).checked_powi(nper) {
        Some(g) => g,
        None => return rate.saturating_mul(principal),
    };
    if growth.is_zero() {
        return Decimal::ZERO;
    }

    let denominator = match Decimal::ONE.checked_div(growth) {
        Some(discount) => Decimal::ONE - discount,
        None => return Decimal::ZERO,
    };

    // Rate too small to move the growth factor at 28 digits
    if denominator.is_zero() {
        return principal / periods;
    }

    saturating_div(rate.saturating_mul(principal), denominator)
}

/// Division that clamps to the Decimal range instead of panicking.
/// A zero divisor yields zero.
pub fn saturating_div(numerator: Decimal, divisor: Decimal) -> Decimal {
    if divisor.is_zero() {
        return Decimal::ZERO;
    }
    numerator.checked_div(divisor).unwrap_or_else(|| {
        if numerator.is_sign_negative() != divisor.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        }
    })
}
