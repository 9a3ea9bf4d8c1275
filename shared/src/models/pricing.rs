//! Price breakdown shared by quotes and tariffs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::cost::CostComponent;
use super::sale_line::SaleLineItem;

/// Cost basis, sale lines and every derived financial figure of a record
///
/// Monetary fields are rounded to cents; `realized_margin_percent` to two
/// decimals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub cost_components: Vec<CostComponent>,
    pub sale_line_items: Vec<SaleLineItem>,
    /// Target margin (fraction of sale price, in percent)
    #[serde(with = "rust_decimal::serde::float")]
    pub margin_percent: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_rate_percent: Decimal,
    /// Σ cost_components.amount
    #[serde(with = "rust_decimal::serde::float")]
    pub total_cost: Decimal,
    /// Σ sale_line_items.amount
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_amount: Decimal,
    /// subtotal + tax_amount
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    /// subtotal - total_cost
    #[serde(with = "rust_decimal::serde::float")]
    pub profit: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub realized_margin_percent: Decimal,
}
