//! Sale Line Item Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sale services offered by the tariff editor (all tariff category)
pub const SALE_SERVICE_TEMPLATES: &[&str] = &[
    "Flete Door-to-Door",
    "Flete Internacional",
    "Flete Nacional",
    "Despacho Aduanal",
    "Maniobras y Handling",
    "Seguro de Carga",
];

/// Extra services a sales rep can add on top of a pre-approved tariff
pub const EXTRA_SERVICES: &[&str] = &[
    "Almacenaje",
    "Demoras",
    "Inspección",
    "Fumigación",
    "Revalidación",
    "Custodia",
    "Previo",
];

/// Sale line classification (reporting only, never affects totals)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SaleCategory {
    /// Base rate service
    #[default]
    #[serde(rename = "tarifa")]
    Tariff,
    /// Ancillary service
    #[serde(rename = "extra")]
    Extra,
}

impl SaleCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tariff => "tarifa",
            Self::Extra => "extra",
        }
    }
}

/// A named, categorized component of the client-facing price
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleLineItem {
    pub name: String,
    #[serde(default)]
    pub category: SaleCategory,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl SaleLineItem {
    pub fn new(name: impl Into<String>, category: SaleCategory, amount: Decimal) -> Self {
        Self {
            name: name.into(),
            category,
            amount,
        }
    }

    pub fn tariff(name: impl Into<String>, amount: Decimal) -> Self {
        Self::new(name, SaleCategory::Tariff, amount)
    }

    pub fn extra(name: impl Into<String>, amount: Decimal) -> Self {
        Self::new(name, SaleCategory::Extra, amount)
    }
}
