//! Money calculation utilities using rust_decimal for precision
//!
//! Wire amounts are `f64`; everything past validation is `Decimal`. Amounts
//! are rounded half-up to cents, percentages to two decimals.

use rust_decimal::prelude::*;

use crate::core::{PricingError, PricingResult};

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Decimal places kept on reported percentages
const PERCENT_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maximum accepted amount per cost or sale line (1e15)
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Maximum accepted tax rate (1000%)
pub const MAX_TAX_RATE_PERCENT: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
fn require_finite(value: f64, field: &str) -> PricingResult<()> {
    if !value.is_finite() {
        return Err(PricingError::invalid_amount(
            field,
            format!("must be a finite number, got {}", value),
        ));
    }
    Ok(())
}

/// Error for arithmetic that leaves the Decimal range
pub fn out_of_range(field: &str) -> PricingError {
    PricingError::invalid_amount(field, "result exceeds the supported range")
}

/// Convert a finite f64 to Decimal without rounding
pub fn to_decimal(value: f64, field: &str) -> PricingResult<Decimal> {
    require_finite(value, field)?;
    Decimal::from_f64(value)
        .ok_or_else(|| PricingError::invalid_amount(field, format!("{} is out of range", value)))
}

/// Validate a wire amount and convert it to cents
pub fn parse_amount(value: f64, field: &str) -> PricingResult<Decimal> {
    let amount = to_decimal(value, field)?;
    require_amount(amount, field)
}

/// Reject negative or oversized amounts; returns the amount rounded to cents
pub fn require_amount(value: Decimal, field: &str) -> PricingResult<Decimal> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(PricingError::invalid_amount(
            field,
            format!("must be non-negative, got {}", value),
        ));
    }
    if value > MAX_AMOUNT {
        return Err(PricingError::invalid_amount(
            field,
            format!("exceeds maximum allowed ({}), got {}", MAX_AMOUNT, value),
        ));
    }
    Ok(round_money(value))
}

/// Validate a wire tax rate
pub fn parse_tax_rate(value: f64) -> PricingResult<Decimal> {
    require_tax_rate(to_decimal(value, "tax_rate_percent")?)
}

/// Tax rate in `[0, MAX_TAX_RATE_PERCENT]`, rounded to two decimals
pub fn require_tax_rate(value: Decimal) -> PricingResult<Decimal> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(PricingError::invalid_amount(
            "tax_rate_percent",
            format!("must be non-negative, got {}", value),
        ));
    }
    if value > MAX_TAX_RATE_PERCENT {
        return Err(PricingError::invalid_amount(
            "tax_rate_percent",
            format!("exceeds maximum allowed ({}), got {}", MAX_TAX_RATE_PERCENT, value),
        ));
    }
    Ok(round_percent(value))
}

/// Sum that reports overflow as `InvalidAmount` on `field`
pub fn checked_sum(
    values: impl IntoIterator<Item = Decimal>,
    field: &str,
) -> PricingResult<Decimal> {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v))
        .ok_or_else(|| out_of_range(field))
}

/// Round to cents, midpoint away from zero
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

#[inline]
pub fn round_percent(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(PERCENT_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Compare two amounts within [`MONEY_TOLERANCE`]
pub fn money_eq(a: Decimal, b: Decimal) -> bool {
    (a - b).abs() < MONEY_TOLERANCE
}
