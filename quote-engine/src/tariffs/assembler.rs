//! Tariff Assembler
//!
//! Same computation as quotes, keyed by a route identity.

use rust_decimal::Decimal;
use shared::models::{CostComponent, RouteKey, SaleLineItem, Tariff};
use shared::request::{TariffRequest, TariffRevision};

use crate::core::{Config, PricingError, PricingResult};
use crate::pricing::{CostLedger, parse_margin};
use crate::quotes::QuoteAssembler;
use crate::quotes::assembler::{SalePlan, has_synthetic_line};
use crate::utils::money::parse_tax_rate;

/// Trim origin, destination and container size; each must be non-empty
///
/// The transport mode is a closed enum and needs no check.
pub fn validate_route(route: &RouteKey) -> PricingResult<RouteKey> {
    let fields = [
        ("origin", &route.origin),
        ("destination", &route.destination),
        ("container_size", &route.container_size),
    ];
    for (name, value) in fields {
        if value.trim().is_empty() {
            return Err(PricingError::InvalidRoute(format!("{} is required", name)));
        }
    }
    Ok(RouteKey::new(
        route.origin.trim(),
        route.destination.trim(),
        route.transport_mode,
        route.container_size.trim(),
    ))
}

#[derive(Debug, Clone, Default)]
pub struct TariffAssembler {
    quotes: QuoteAssembler,
}

impl TariffAssembler {
    pub fn new(quotes: QuoteAssembler) -> Self {
        Self { quotes }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(QuoteAssembler::from_config(config))
    }

    pub fn quotes(&self) -> &QuoteAssembler {
        &self.quotes
    }

    /// Assemble a tariff for `route` from typed components
    pub fn assemble(
        &self,
        route: RouteKey,
        cost_components: Vec<CostComponent>,
        sale_line_items: Option<Vec<SaleLineItem>>,
        margin_percent: Decimal,
        tax_rate_percent: Decimal,
    ) -> PricingResult<Tariff> {
        let route = validate_route(&route)?;
        let quote = self.quotes.assemble(
            cost_components,
            sale_line_items,
            margin_percent,
            tax_rate_percent,
        )?;
        Ok(Tariff {
            route,
            route_id: None,
            transit_days: None,
            pricing: quote.pricing,
        })
    }

    /// Assemble a tariff from the wire request shape
    pub fn assemble_request(&self, request: &TariffRequest) -> PricingResult<Tariff> {
        let route = validate_route(&request.route())?;
        let pricing = self.quotes.price_request(&request.pricing)?;

        tracing::debug!(
            route = %route.description(),
            mode = %route.transport_mode,
            total_sale = %pricing.subtotal,
            "Assembled tariff"
        );

        Ok(Tariff {
            route,
            route_id: request.route_id.clone().filter(|id| !id.trim().is_empty()),
            transit_days: request.transit_days,
            pricing,
        })
    }

    /// Re-assemble `current` with the revised fields, keeping its route
    ///
    /// Sale lines that were derived from the margin are derived again; manual
    /// lines are kept unless the revision replaces them.
    pub fn revise(&self, current: &Tariff, revision: &TariffRevision) -> PricingResult<Tariff> {
        let base = &current.pricing;

        let ledger = match &revision.cost_components {
            Some(inputs) => CostLedger::from_inputs(inputs)?,
            None => CostLedger::from_components(base.cost_components.clone())?,
        };
        let margin = match revision.margin_percent {
            Some(m) => parse_margin(m)?,
            None => base.margin_percent,
        };
        let tax_rate = match revision.tax_rate_percent {
            Some(rate) => parse_tax_rate(rate)?,
            None => base.tax_rate_percent,
        };
        let plan = match &revision.sale_line_items {
            Some(lines) if !lines.is_empty() => {
                SalePlan::Manual(self.quotes.allocator().manual(lines)?)
            }
            Some(_) => SalePlan::Suggested,
            None if has_synthetic_line(base) => SalePlan::Suggested,
            None => SalePlan::Manual(base.sale_line_items.clone()),
        };

        let pricing = self.quotes.price(ledger, plan, margin, tax_rate)?;
        Ok(Tariff {
            route: current.route.clone(),
            route_id: current.route_id.clone(),
            transit_days: revision.transit_days.or(current.transit_days),
            pricing,
        })
    }
}
