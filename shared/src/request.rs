//! Request types
//!
//! Wire shapes accepted by the quote engine. Amounts arrive as plain JSON
//! numbers and are validated (finite, non-negative) before conversion to
//! `Decimal`.

use serde::{Deserialize, Serialize};

use crate::models::{QuoteDetails, RouteKey, SaleCategory, TransportMode};

/// Cost line as entered by the operator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostComponentInput {
    pub name: String,
    pub amount: f64,
    #[serde(default)]
    pub is_base: bool,
}

/// Sale line as entered by the operator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleLineInput {
    pub name: String,
    #[serde(default)]
    pub category: SaleCategory,
    pub amount: f64,
}

/// One entry of a proportional distribution template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateWeight {
    pub name: String,
    #[serde(default)]
    pub category: SaleCategory,
    pub weight_percent: f64,
}

impl TemplateWeight {
    pub fn new(name: impl Into<String>, category: SaleCategory, weight_percent: f64) -> Self {
        Self {
            name: name.into(),
            category,
            weight_percent,
        }
    }
}

/// Generate sale lines from the suggested price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoDistribute {
    pub template_weights: Vec<TemplateWeight>,
}

/// Input of a quote assembly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    #[serde(default)]
    pub cost_components: Vec<CostComponentInput>,
    /// Manual sale lines; their sum becomes the subtotal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_line_items: Option<Vec<SaleLineInput>>,
    /// Ignored when `sale_line_items` is non-empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_distribute: Option<AutoDistribute>,
    pub margin_percent: f64,
    /// Falls back to the configured default rate when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_rate_percent: Option<f64>,
}

/// Input of a tariff assembly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TariffRequest {
    pub origin: String,
    pub destination: String,
    pub transport_mode: TransportMode,
    pub container_size: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transit_days: Option<u32>,
    #[serde(flatten)]
    pub pricing: QuoteRequest,
}

impl TariffRequest {
    pub fn route(&self) -> RouteKey {
        RouteKey::new(
            self.origin.clone(),
            self.destination.clone(),
            self.transport_mode,
            self.container_size.clone(),
        )
    }
}

/// Partial update of a stored tariff; absent fields keep their value
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TariffRevision {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_components: Option<Vec<CostComponentInput>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_line_items: Option<Vec<SaleLineInput>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_rate_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transit_days: Option<u32>,
}

/// Tariff lookup criteria; `None` matches anything
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TariffFilter {
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub transport_mode: Option<TransportMode>,
    #[serde(default)]
    pub container_size: Option<String>,
}

/// Extra service priced on top of a tariff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraServiceInput {
    pub name: String,
    pub amount: f64,
}

/// Quote built from a pre-approved tariff plus extra services
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteFromTariffRequest {
    pub tariff_id: String,
    #[serde(default)]
    pub extras: Vec<ExtraServiceInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_rate_percent: Option<f64>,
    pub details: QuoteDetails,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_request_deserialize_minimal() {
        let json = r#"{
            "cost_components": [{"name": "Tarifa All-In", "amount": 10000, "is_base": true}],
            "margin_percent": 25
        }"#;
        let req: QuoteRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.cost_components.len(), 1);
        assert!(req.cost_components[0].is_base);
        assert_eq!(req.margin_percent, 25.0);
        assert!(req.sale_line_items.is_none());
        assert!(req.tax_rate_percent.is_none());
    }

    #[test]
    fn test_sale_line_category_wire_names() {
        let json = r#"[
            {"name": "Flete", "category": "tarifa", "amount": 100},
            {"name": "Demoras", "category": "extra", "amount": 5.5},
            {"name": "Sin categoria", "amount": 1}
        ]"#;
        let lines: Vec<SaleLineInput> = serde_json::from_str(json).unwrap();
        assert_eq!(lines[0].category, SaleCategory::Tariff);
        assert_eq!(lines[1].category, SaleCategory::Extra);
        assert_eq!(lines[2].category, SaleCategory::Tariff);
    }

    #[test]
    fn test_tariff_request_flattens_pricing() {
        let json = r#"{
            "origin": "Veracruz",
            "destination": "CDMX",
            "transport_mode": "maritime",
            "container_size": "40ft",
            "transit_days": 5,
            "cost_components": [{"name": "Flete Marítimo", "amount": 15000, "is_base": true}],
            "margin_percent": 20,
            "tax_rate_percent": 16
        }"#;
        let req: TariffRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.transport_mode, TransportMode::Maritime);
        assert_eq!(req.pricing.cost_components[0].amount, 15000.0);
        assert_eq!(req.pricing.tax_rate_percent, Some(16.0));
        assert_eq!(req.route().description(), "Veracruz → CDMX");
    }

    #[test]
    fn test_unknown_transport_mode_rejected() {
        let json = r#"{"origin": "A", "destination": "B", "transport_mode": "air",
            "container_size": "20ft", "margin_percent": 10}"#;
        assert!(serde_json::from_str::<TariffRequest>(json).is_err());
    }
}
