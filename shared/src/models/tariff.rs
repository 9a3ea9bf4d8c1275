//! Pre-approved Tariff Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::pricing::PriceBreakdown;
use super::route::RouteKey;

/// Cost/margin/sale-line structure bound to a route identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tariff {
    #[serde(flatten)]
    pub route: RouteKey,
    /// Catalog identifier of the route, when seeded from the catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transit_days: Option<u32>,
    #[serde(flatten)]
    pub pricing: PriceBreakdown,
}

impl Tariff {
    /// Client-facing sale price before tax
    pub fn total_sale(&self) -> Decimal {
        self.pricing.subtotal
    }
}

/// Tariff stored in a tariff book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TariffRecord {
    pub id: String,
    /// Creation time (Unix millis)
    pub created_at: i64,
    /// Last revision time (Unix millis)
    pub updated_at: i64,
    #[serde(flatten)]
    pub tariff: Tariff,
}

/// Lookup result handed to a quoting flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TariffSummary {
    pub id: String,
    #[serde(flatten)]
    pub route: RouteKey,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_sale: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub margin_percent: Decimal,
}

impl From<&TariffRecord> for TariffSummary {
    fn from(record: &TariffRecord) -> Self {
        Self {
            id: record.id.clone(),
            route: record.tariff.route.clone(),
            total_cost: record.tariff.pricing.total_cost,
            total_sale: record.tariff.total_sale(),
            margin_percent: record.tariff.pricing.margin_percent,
        }
    }
}
