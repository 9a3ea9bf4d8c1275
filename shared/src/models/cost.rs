//! Cost Component Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Name of the seed cost line created from a route catalog entry
pub const BASE_COST_NAME: &str = "Flete Marítimo / Tarifa Base";

/// Cost concepts offered by the tariff editor: (name, is_base)
pub const COST_TEMPLATES: &[(&str, bool)] = &[
    ("Flete Marítimo", true),
    ("Flete Ferroviario", false),
    ("Última Milla", false),
    ("Maniobras Terminal Portuaria", false),
    ("Maniobras Terminal Intermodal", false),
    ("Despacho Aduanal", false),
    ("Seguro de Carga", false),
    ("Almacenaje Base", false),
];

/// A named cost line item of a shipment or route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostComponent {
    pub name: String,
    /// Non-negative amount, rounded to cents
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Marks the primary freight-rate cost (display only)
    #[serde(default)]
    pub is_base: bool,
}

impl CostComponent {
    pub fn new(name: impl Into<String>, amount: Decimal) -> Self {
        Self {
            name: name.into(),
            amount,
            is_base: false,
        }
    }

    /// Create the primary freight-rate cost line
    pub fn base(name: impl Into<String>, amount: Decimal) -> Self {
        Self {
            name: name.into(),
            amount,
            is_base: true,
        }
    }
}
