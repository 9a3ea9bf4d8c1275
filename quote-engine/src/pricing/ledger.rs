//! Cost Ledger
//!
//! Ordered list of cost components for one quote or tariff. Amounts are
//! validated on entry so the total is always a sum of non-negative cents.

use rust_decimal::Decimal;
use shared::CostComponent;
use shared::models::BASE_COST_NAME;
use shared::request::CostComponentInput;

use crate::core::{PricingError, PricingResult};
use crate::tariffs::catalog::RouteCatalog;
use crate::utils::money::{MAX_AMOUNT, parse_amount, require_amount, round_money};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CostLedger {
    components: Vec<CostComponent>,
}

impl CostLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from wire inputs, validating every amount
    pub fn from_inputs(inputs: &[CostComponentInput]) -> PricingResult<Self> {
        let components = inputs
            .iter()
            .enumerate()
            .map(|(i, input)| {
                let amount = parse_amount(input.amount, &format!("cost_components[{}].amount", i))?;
                Ok(CostComponent {
                    name: input.name.clone(),
                    amount,
                    is_base: input.is_base,
                })
            })
            .collect::<PricingResult<Vec<_>>>()?;
        Ok(Self { components })
    }

    /// Build a ledger from already typed components
    pub fn from_components(components: Vec<CostComponent>) -> PricingResult<Self> {
        let mut ledger = Self::new();
        for component in components {
            ledger.add(component)?;
        }
        Ok(ledger)
    }

    /// Seed a ledger with the base freight cost observed for a route
    ///
    /// Unknown routes seed a zero base cost the operator fills in.
    pub fn seed_from_route<C: RouteCatalog + ?Sized>(
        catalog: &C,
        route: &shared::RouteKey,
    ) -> Self {
        let amount = catalog
            .lookup(route)
            .map(|rate| rate.seed_cost())
            .unwrap_or(Decimal::ZERO);
        Self {
            components: vec![CostComponent::base(
                BASE_COST_NAME,
                round_money(amount.max(Decimal::ZERO)),
            )],
        }
    }

    pub fn add(&mut self, mut component: CostComponent) -> PricingResult<usize> {
        let field = format!("cost_components[{}].amount", self.components.len());
        component.amount = require_amount(component.amount, &field)?;
        self.components.push(component);
        Ok(self.components.len() - 1)
    }

    /// Replace the amount at `index`, returning the previous amount
    pub fn set_amount(&mut self, index: usize, amount: Decimal) -> PricingResult<Option<Decimal>> {
        let field = format!("cost_components[{}].amount", index);
        let amount = require_amount(amount, &field)?;
        Ok(self
            .components
            .get_mut(index)
            .map(|c| std::mem::replace(&mut c.amount, amount)))
    }

    pub fn remove(&mut self, index: usize) -> Option<CostComponent> {
        (index < self.components.len()).then(|| self.components.remove(index))
    }

    /// Sum of all amounts
    ///
    /// Every amount is capped at [`MAX_AMOUNT`], so the sum stays far inside
    /// the Decimal range.
    pub fn total(&self) -> Decimal {
        self.components.iter().map(|c| c.amount).sum()
    }

    /// First component flagged as the base freight cost
    pub fn base_component(&self) -> Option<&CostComponent> {
        self.components.iter().find(|c| c.is_base)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn components(&self) -> &[CostComponent] {
        &self.components
    }

    pub fn into_components(self) -> Vec<CostComponent> {
        self.components
    }

    pub(crate) fn require_non_empty(&self) -> PricingResult<()> {
        if self.components.is_empty() {
            return Err(PricingError::EmptyCostSet);
        }
        Ok(())
    }
}
