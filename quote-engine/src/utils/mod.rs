//! Utility module
//!
//! - [`money`] - Decimal conversion, validation and rounding
//! - [`logger`] - tracing subscriber setup

pub mod logger;
pub mod money;

pub use money::{
    MAX_AMOUNT, MAX_TAX_RATE_PERCENT, checked_sum, money_eq, parse_amount, parse_tax_rate,
    round_money, round_percent, to_decimal,
};
