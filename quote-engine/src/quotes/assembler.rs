//! Quote Assembler
//!
//! Combines a cost ledger, a sale line plan, a margin and a tax rate into a
//! fully derived [`Quote`]. Every derived figure is computed from the
//! full-precision price and rounded to cents once, when the record is built.

use rust_decimal::Decimal;
use shared::models::{
    CostComponent, PriceBreakdown, Quote, QuoteDetails, QuoteStatus, SaleLineItem, TariffRecord,
};
use shared::request::{ExtraServiceInput, QuoteRequest, TemplateWeight};

use crate::core::{Config, PricingError, PricingResult};
use crate::pricing::{
    CostLedger, SaleLineAllocator, compute_suggested_price, implied_cost, parse_margin,
    realized_margin_percent, sum_lines, validate_margin,
};
use crate::utils::money::{
    money_eq, out_of_range, parse_amount, parse_tax_rate, require_amount, require_tax_rate,
    round_money, round_percent,
};

/// Name of the single sale line materialized when no sale lines are given
pub const SYNTHETIC_SALE_LINE: &str = "Tarifa All-In";

/// Cost component carrying the implied cost of extras on a tariff quote
pub const IMPLIED_EXTRAS_COST_NAME: &str = "Costo implícito de extras";

/// Default tax rate (IVA 16%)
pub const DEFAULT_TAX_RATE_PERCENT: Decimal = Decimal::from_parts(16, 0, 0, false, 0);

/// How the sale side of a record is produced
#[derive(Debug, Clone)]
pub(crate) enum SalePlan<'a> {
    /// Single synthetic line at the suggested price
    Suggested,
    /// Explicit lines, subtotal taken verbatim
    Manual(Vec<SaleLineItem>),
    /// Suggested price split by template weights
    Distribute(&'a [TemplateWeight]),
}

impl SalePlan<'_> {
    fn label(&self) -> &'static str {
        match self {
            Self::Suggested => "suggested",
            Self::Manual(_) => "manual",
            Self::Distribute(_) => "distribute",
        }
    }
}

/// True when the record's only sale line is the synthetic one at the
/// margin-implied price
pub(crate) fn has_synthetic_line(pricing: &PriceBreakdown) -> bool {
    match pricing.sale_line_items.as_slice() {
        [line] if line.name == SYNTHETIC_SALE_LINE => {
            compute_suggested_price(pricing.total_cost, pricing.margin_percent)
                .map(|price| money_eq(round_money(price), line.amount))
                .unwrap_or(false)
        }
        _ => false,
    }
}

#[derive(Debug, Clone)]
pub struct QuoteAssembler {
    allocator: SaleLineAllocator,
    default_tax_rate: Decimal,
}

impl Default for QuoteAssembler {
    fn default() -> Self {
        Self::new(SaleLineAllocator::default(), DEFAULT_TAX_RATE_PERCENT)
    }
}

impl QuoteAssembler {
    pub fn new(allocator: SaleLineAllocator, default_tax_rate: Decimal) -> Self {
        Self {
            allocator,
            default_tax_rate,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            SaleLineAllocator::new(config.allocation_tolerance_percent),
            config.default_tax_rate_percent,
        )
    }

    pub fn allocator(&self) -> &SaleLineAllocator {
        &self.allocator
    }

    pub fn default_tax_rate(&self) -> Decimal {
        self.default_tax_rate
    }

    /// Assemble a draft quote from typed components
    ///
    /// `sale_line_items` of `None` (or empty) derives the subtotal from the
    /// margin; otherwise the lines are the subtotal verbatim.
    pub fn assemble(
        &self,
        cost_components: Vec<CostComponent>,
        sale_line_items: Option<Vec<SaleLineItem>>,
        margin_percent: Decimal,
        tax_rate_percent: Decimal,
    ) -> PricingResult<Quote> {
        let ledger = CostLedger::from_components(cost_components)?;
        let margin = validate_margin(margin_percent)?;
        let tax_rate = require_tax_rate(tax_rate_percent)?;

        let plan = match sale_line_items {
            Some(lines) if !lines.is_empty() => SalePlan::Manual(
                lines
                    .into_iter()
                    .enumerate()
                    .map(|(i, mut line)| {
                        line.amount = require_amount(
                            line.amount,
                            &format!("sale_line_items[{}].amount", i),
                        )?;
                        Ok(line)
                    })
                    .collect::<PricingResult<Vec<_>>>()?,
            ),
            _ => SalePlan::Suggested,
        };

        let pricing = self.price(ledger, plan, margin, tax_rate)?;
        Ok(draft(pricing))
    }

    /// Assemble a draft quote from the wire request shape
    pub fn assemble_request(&self, request: &QuoteRequest) -> PricingResult<Quote> {
        let pricing = self.price_request(request)?;
        Ok(draft(pricing))
    }

    /// Quote a client from a pre-approved tariff plus extra services
    ///
    /// Extras are priced at the tariff's margin: their implied cost is added
    /// as a separate cost component. `tax_rate_percent` of `None` keeps the
    /// tariff's rate.
    pub fn assemble_from_tariff(
        &self,
        tariff: &TariffRecord,
        extras: &[ExtraServiceInput],
        tax_rate_percent: Option<f64>,
        details: QuoteDetails,
    ) -> PricingResult<Quote> {
        if details.client_name.trim().is_empty() {
            return Err(PricingError::InvalidQuoteDetails(
                "client_name is required".to_string(),
            ));
        }

        let base = &tariff.tariff.pricing;
        let margin = validate_margin(base.margin_percent)?;
        let tax_rate = match tax_rate_percent {
            Some(rate) => parse_tax_rate(rate)?,
            None => base.tax_rate_percent,
        };

        let mut ledger = CostLedger::from_components(base.cost_components.clone())?;
        let mut lines = if base.sale_line_items.is_empty() {
            vec![SaleLineItem::tariff(SYNTHETIC_SALE_LINE, base.subtotal)]
        } else {
            base.sale_line_items.clone()
        };

        let mut extra_lines = Vec::with_capacity(extras.len());
        for (i, extra) in extras.iter().enumerate() {
            let amount = parse_amount(extra.amount, &format!("extras[{}].amount", i))?;
            extra_lines.push(SaleLineItem::extra(extra.name.trim(), amount));
        }
        if !extra_lines.is_empty() {
            let extras_total = sum_lines(&extra_lines)?;
            let cost = round_money(implied_cost(extras_total, margin)?);
            ledger.add(CostComponent::new(IMPLIED_EXTRAS_COST_NAME, cost))?;
            lines.extend(extra_lines);
        }

        let pricing = self.price(ledger, SalePlan::Manual(lines), margin, tax_rate)?;

        tracing::debug!(
            tariff_id = %tariff.id,
            extras = extras.len(),
            subtotal = %pricing.subtotal,
            "Assembled quote from tariff"
        );

        Ok(Quote {
            pricing,
            status: QuoteStatus::Draft,
            tariff_id: Some(tariff.id.clone()),
            route_description: Some(tariff.tariff.route.description()),
            details: Some(details),
        })
    }

    /// Validate a wire request and derive its price breakdown
    pub(crate) fn price_request(&self, request: &QuoteRequest) -> PricingResult<PriceBreakdown> {
        let ledger = CostLedger::from_inputs(&request.cost_components)?;
        let margin = parse_margin(request.margin_percent)?;
        let tax_rate = match request.tax_rate_percent {
            Some(rate) => parse_tax_rate(rate)?,
            None => self.default_tax_rate,
        };

        let manual = request
            .sale_line_items
            .as_deref()
            .filter(|lines| !lines.is_empty());
        let plan = match (manual, &request.auto_distribute) {
            (Some(lines), auto) => {
                if auto.is_some() {
                    tracing::warn!(
                        sale_lines = lines.len(),
                        "Both sale_line_items and auto_distribute given, using sale_line_items"
                    );
                }
                SalePlan::Manual(self.allocator.manual(lines)?)
            }
            (None, Some(auto)) => SalePlan::Distribute(&auto.template_weights),
            (None, None) => SalePlan::Suggested,
        };

        self.price(ledger, plan, margin, tax_rate)
    }

    /// Derive every figure of a record from a validated ledger
    pub(crate) fn price(
        &self,
        ledger: CostLedger,
        plan: SalePlan<'_>,
        margin: Decimal,
        tax_rate: Decimal,
    ) -> PricingResult<PriceBreakdown> {
        let total_cost = ledger.total();
        let plan_label = plan.label();

        let (sale_line_items, exact_subtotal) = match plan {
            SalePlan::Manual(lines) if !lines.is_empty() => {
                let subtotal = sum_lines(&lines)?;
                (lines, subtotal)
            }
            SalePlan::Manual(_) | SalePlan::Suggested => {
                ledger.require_non_empty()?;
                let price = compute_suggested_price(total_cost, margin)?;
                (
                    vec![SaleLineItem::tariff(SYNTHETIC_SALE_LINE, round_money(price))],
                    price,
                )
            }
            SalePlan::Distribute(template) => {
                ledger.require_non_empty()?;
                let price = compute_suggested_price(total_cost, margin)?;
                let lines = self.allocator.distribute(price, template)?;
                let subtotal = sum_lines(&lines)?;
                (lines, subtotal)
            }
        };

        let exact_profit = exact_subtotal - total_cost;
        let exact_tax = exact_subtotal
            .checked_mul(tax_rate)
            .map(|v| v / Decimal::ONE_HUNDRED)
            .ok_or_else(|| out_of_range("tax_amount"))?;
        let exact_total = exact_subtotal
            .checked_add(exact_tax)
            .ok_or_else(|| out_of_range("total"))?;

        let pricing = PriceBreakdown {
            cost_components: ledger.into_components(),
            sale_line_items,
            margin_percent: margin,
            tax_rate_percent: tax_rate,
            total_cost,
            subtotal: round_money(exact_subtotal),
            tax_amount: round_money(exact_tax),
            total: round_money(exact_total),
            profit: round_money(exact_profit),
            realized_margin_percent: round_percent(realized_margin_percent(
                exact_subtotal,
                exact_profit,
            )),
        };

        tracing::debug!(
            plan = plan_label,
            total_cost = %pricing.total_cost,
            margin_percent = %pricing.margin_percent,
            subtotal = %pricing.subtotal,
            total = %pricing.total,
            realized_margin_percent = %pricing.realized_margin_percent,
            "Priced record"
        );

        Ok(pricing)
    }
}

fn draft(pricing: PriceBreakdown) -> Quote {
    Quote {
        pricing,
        status: QuoteStatus::Draft,
        tariff_id: None,
        route_description: None,
        details: None,
    }
}
