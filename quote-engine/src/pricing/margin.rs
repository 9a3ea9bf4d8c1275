//! Margin Calculator
//!
//! Margin is a fraction of the sale price, not a markup on cost:
//! `price = cost / (1 - margin/100)`. A 25% margin on a 10 000 cost yields a
//! 13 333.33 price, of which 3 333.33 (25%) is profit.

use rust_decimal::prelude::*;

use crate::core::{PricingError, PricingResult};
use crate::utils::money::out_of_range;

/// Margin shortcuts offered by the quoting screens. Any value in [0, 100) is
/// accepted by the engine.
pub const MARGIN_PRESETS: [u32; 4] = [30, 25, 20, 15];

/// Validate a margin percentage: `0 <= m < 100`
pub fn validate_margin(margin_percent: Decimal) -> PricingResult<Decimal> {
    if margin_percent.is_sign_negative() && !margin_percent.is_zero() {
        return Err(PricingError::invalid_margin(margin_percent));
    }
    if margin_percent >= Decimal::ONE_HUNDRED {
        return Err(PricingError::invalid_margin(margin_percent));
    }
    Ok(margin_percent)
}

/// Validate a wire margin value
pub fn parse_margin(margin_percent: f64) -> PricingResult<Decimal> {
    if !margin_percent.is_finite() {
        return Err(PricingError::invalid_margin(margin_percent));
    }
    let margin =
        Decimal::from_f64(margin_percent).ok_or_else(|| PricingError::invalid_margin(margin_percent))?;
    validate_margin(margin)
}

/// `1 - margin/100`
#[inline]
fn keep_ratio(margin_percent: Decimal) -> Decimal {
    Decimal::ONE - margin_percent / Decimal::ONE_HUNDRED
}

/// Invert a total cost and target margin into a suggested sale price
///
/// Returns the unrounded price; callers round when materializing a record.
/// A zero cost yields a zero price for any valid margin.
pub fn compute_suggested_price(total_cost: Decimal, margin_percent: Decimal) -> PricingResult<Decimal> {
    let margin = validate_margin(margin_percent)?;
    if total_cost.is_sign_negative() && !total_cost.is_zero() {
        return Err(PricingError::invalid_amount(
            "total_cost",
            format!("must be non-negative, got {}", total_cost),
        ));
    }
    if total_cost.is_zero() {
        return Ok(Decimal::ZERO);
    }

    total_cost
        .checked_div(keep_ratio(margin))
        .ok_or_else(|| out_of_range("suggested_price"))
}

/// Equivalent markup on cost for a margin on price: `m / (100 - m) * 100`
pub fn markup_percent(margin_percent: Decimal) -> PricingResult<Decimal> {
    let margin = validate_margin(margin_percent)?;
    margin
        .checked_div(Decimal::ONE_HUNDRED - margin)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or_else(|| out_of_range("markup_percent"))
}

/// Cost implied by a sale amount priced at `margin_percent`: `sale * (1 - m/100)`
pub fn implied_cost(sale: Decimal, margin_percent: Decimal) -> PricingResult<Decimal> {
    let margin = validate_margin(margin_percent)?;
    sale.checked_mul(keep_ratio(margin))
        .ok_or_else(|| out_of_range("implied_cost"))
}

/// Profit as a percentage of the sale price; zero when there is no sale
pub fn realized_margin_percent(subtotal: Decimal, profit: Decimal) -> Decimal {
    if subtotal > Decimal::ZERO {
        profit / subtotal * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::round_money;
    use rust_decimal_macros::dec;

    #[test]
    fn test_suggested_price_inverts_margin() {
        let price = compute_suggested_price(dec!(10000), dec!(20)).unwrap();
        assert_eq!(price, dec!(12500));

        let price = compute_suggested_price(dec!(10000), dec!(25)).unwrap();
        assert_eq!(round_money(price), dec!(13333.33));
    }

    #[test]
    fn test_suggested_price_matches_formula_for_presets() {
        let cost = dec!(21000);
        for preset in MARGIN_PRESETS {
            let margin = Decimal::from(preset);
            let price = compute_suggested_price(cost, margin).unwrap();
            let expected = cost / (Decimal::ONE - margin / dec!(100));
            assert_eq!(price, expected);
            // Profit share of the price equals the margin
            let realized = realized_margin_percent(price, price - cost);
            assert_eq!(realized.round_dp(6), margin);
        }
    }

    #[test]
    fn test_zero_margin_returns_cost() {
        assert_eq!(compute_suggested_price(dec!(8123.45), dec!(0)).unwrap(), dec!(8123.45));
    }

    #[test]
    fn test_zero_cost_returns_zero() {
        assert_eq!(compute_suggested_price(dec!(0), dec!(99.9)).unwrap(), dec!(0));
    }

    #[test]
    fn test_full_margin_rejected() {
        let err = compute_suggested_price(dec!(100), dec!(100)).unwrap_err();
        assert!(matches!(err, PricingError::InvalidMargin { .. }));
        assert!(compute_suggested_price(dec!(0), dec!(150)).is_err());
    }

    #[test]
    fn test_negative_inputs_rejected() {
        assert!(matches!(
            compute_suggested_price(dec!(-1), dec!(20)).unwrap_err(),
            PricingError::InvalidAmount { .. }
        ));
        assert!(matches!(
            compute_suggested_price(dec!(100), dec!(-5)).unwrap_err(),
            PricingError::InvalidMargin { .. }
        ));
    }

    #[test]
    fn test_price_overflow_is_an_error() {
        let margin = dec!(99.99999999999999999999999);
        let err = compute_suggested_price(dec!(1000000000000000), margin).unwrap_err();
        assert_eq!(err, out_of_range("suggested_price"));
        assert!(compute_suggested_price(Decimal::MAX, dec!(50)).is_err());
    }

    #[test]
    fn test_parse_margin() {
        assert_eq!(parse_margin(25.0).unwrap(), dec!(25));
        assert!(parse_margin(f64::NAN).is_err());
        assert!(parse_margin(100.0).is_err());
        assert!(parse_margin(99.99).is_ok());
    }

    #[test]
    fn test_markup_percent() {
        assert_eq!(markup_percent(dec!(20)).unwrap(), dec!(25));
        assert_eq!(markup_percent(dec!(50)).unwrap(), dec!(100));
        assert_eq!(markup_percent(dec!(0)).unwrap(), dec!(0));
    }

    #[test]
    fn test_implied_cost() {
        assert_eq!(implied_cost(dec!(1000), dec!(20)).unwrap(), dec!(800));
        assert_eq!(implied_cost(dec!(0), dec!(20)).unwrap(), dec!(0));
    }

    #[test]
    fn test_realized_margin_zero_subtotal() {
        assert_eq!(realized_margin_percent(dec!(0), dec!(-10)), dec!(0));
        assert_eq!(realized_margin_percent(dec!(500), dec!(500)), dec!(100));
    }
}
