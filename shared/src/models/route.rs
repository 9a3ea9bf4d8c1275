//! Route identity and catalog rate models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Transport mode of a route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    Maritime,
    Rail,
    Intermodal,
    Truck,
}

impl TransportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Maritime => "maritime",
            Self::Rail => "rail",
            Self::Intermodal => "intermodal",
            Self::Truck => "truck",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Route identity a tariff is bound to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteKey {
    pub origin: String,
    pub destination: String,
    pub transport_mode: TransportMode,
    /// Container size label, e.g. "20ft", "40ft", "40HC"
    pub container_size: String,
}

impl RouteKey {
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        transport_mode: TransportMode,
        container_size: impl Into<String>,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            transport_mode,
            container_size: container_size.into(),
        }
    }

    /// "origin → destination"
    pub fn description(&self) -> String {
        format!("{} → {}", self.origin, self.destination)
    }

    /// Case-insensitive identity comparison
    pub fn same_route(&self, other: &RouteKey) -> bool {
        self.transport_mode == other.transport_mode
            && self.origin.trim().eq_ignore_ascii_case(other.origin.trim())
            && self
                .destination
                .trim()
                .eq_ignore_ascii_case(other.destination.trim())
            && self
                .container_size
                .trim()
                .eq_ignore_ascii_case(other.container_size.trim())
    }
}

/// Observed rate for a route, supplied by the route catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRate {
    #[serde(flatten)]
    pub route: RouteKey,
    /// Catalog identifier of the route
    #[serde(default)]
    pub route_id: Option<String>,
    /// Average observed cost
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub avg_cost: Option<Decimal>,
    /// Lowest observed cost
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub min_cost: Option<Decimal>,
    #[serde(default)]
    pub transit_days: Option<u32>,
}

impl RouteRate {
    /// Seed amount for the base cost line: average, else minimum, else zero
    pub fn seed_cost(&self) -> Decimal {
        self.avg_cost.or(self.min_cost).unwrap_or(Decimal::ZERO)
    }
}
