//! Sale Line Allocator
//!
//! Turns either explicit sale lines or a weighted template into the list of
//! sale line items whose sum is the quote subtotal.

use rust_decimal::prelude::*;
use shared::SaleLineItem;
use shared::models::SaleCategory;
use shared::request::{SaleLineInput, TemplateWeight};

use crate::core::{PricingError, PricingResult};
use crate::utils::money::{checked_sum, out_of_range, parse_amount, round_money, to_decimal};

/// Allowed deviation of template weights from 100 percentage points (0.5)
pub const DEFAULT_WEIGHT_TOLERANCE: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Default auto-distribute template (70 / 12 / 18)
pub fn default_template() -> Vec<TemplateWeight> {
    vec![
        TemplateWeight::new("Flete Internacional", SaleCategory::Tariff, 70.0),
        TemplateWeight::new("Despacho Aduanal", SaleCategory::Tariff, 12.0),
        TemplateWeight::new("Maniobras y Handling", SaleCategory::Tariff, 18.0),
    ]
}

/// Sum of sale line amounts
pub fn sum_lines(lines: &[SaleLineItem]) -> PricingResult<Decimal> {
    checked_sum(lines.iter().map(|l| l.amount), "sale_line_items")
}

#[derive(Debug, Clone)]
pub struct SaleLineAllocator {
    tolerance: Decimal,
}

impl Default for SaleLineAllocator {
    fn default() -> Self {
        Self::new(DEFAULT_WEIGHT_TOLERANCE)
    }
}

impl SaleLineAllocator {
    pub fn new(tolerance: Decimal) -> Self {
        Self {
            tolerance: tolerance.abs(),
        }
    }

    pub fn tolerance(&self) -> Decimal {
        self.tolerance
    }

    /// Validate explicit sale lines; amounts are kept verbatim (in cents)
    pub fn manual(&self, lines: &[SaleLineInput]) -> PricingResult<Vec<SaleLineItem>> {
        lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let amount = parse_amount(line.amount, &format!("sale_line_items[{}].amount", i))?;
                Ok(SaleLineItem::new(line.name.clone(), line.category, amount))
            })
            .collect()
    }

    /// Split `price` across the template by weight
    ///
    /// Each share is rounded to cents and the residual lands on the last
    /// entry, so the lines sum to the rounded price exactly.
    pub fn distribute(
        &self,
        price: Decimal,
        template: &[TemplateWeight],
    ) -> PricingResult<Vec<SaleLineItem>> {
        if template.is_empty() {
            return Err(PricingError::AllocationRounding {
                sum: Decimal::ZERO,
                tolerance: self.tolerance,
            });
        }
        if price.is_sign_negative() && !price.is_zero() {
            return Err(PricingError::invalid_amount(
                "price",
                format!("must be non-negative, got {}", price),
            ));
        }

        let mut weights = Vec::with_capacity(template.len());
        for (i, entry) in template.iter().enumerate() {
            let field = format!("auto_distribute.template_weights[{}].weight_percent", i);
            let weight = to_decimal(entry.weight_percent, &field)?;
            if weight.is_sign_negative() && !weight.is_zero() {
                return Err(PricingError::invalid_amount(
                    field,
                    format!("must be non-negative, got {}", weight),
                ));
            }
            weights.push(weight);
        }

        let weight_sum = checked_sum(weights.iter().copied(), "auto_distribute.template_weights")?;
        if (weight_sum - Decimal::ONE_HUNDRED).abs() > self.tolerance {
            return Err(PricingError::AllocationRounding {
                sum: weight_sum,
                tolerance: self.tolerance,
            });
        }

        let target = round_money(price);
        let mut lines = template
            .iter()
            .zip(&weights)
            .map(|(entry, weight)| {
                let share = target
                    .checked_mul(*weight)
                    .map(|v| v / Decimal::ONE_HUNDRED)
                    .ok_or_else(|| out_of_range("price"))?;
                Ok(SaleLineItem::new(entry.name.clone(), entry.category, round_money(share)))
            })
            .collect::<PricingResult<Vec<_>>>()?;

        let residual = target - sum_lines(&lines)?;
        if let Some(last) = lines.last_mut() {
            last.amount += residual;
            if last.amount.is_sign_negative() && !last.amount.is_zero() {
                return Err(PricingError::AllocationRounding {
                    sum: weight_sum,
                    tolerance: self.tolerance,
                });
            }
        }

        tracing::debug!(
            target = %target,
            weight_sum = %weight_sum,
            residual = %residual,
            lines = lines.len(),
            "Distributed sale lines"
        );

        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn amounts(lines: &[SaleLineItem]) -> Vec<Decimal> {
        lines.iter().map(|l| l.amount).collect()
    }

    #[test]
    fn test_default_template_even_price() {
        let allocator = SaleLineAllocator::default();
        let lines = allocator.distribute(dec!(10000), &default_template()).unwrap();
        assert_eq!(amounts(&lines), vec![dec!(7000.00), dec!(1200.00), dec!(1800.00)]);
        assert_eq!(lines[0].name, "Flete Internacional");
        assert_eq!(lines[2].name, "Maniobras y Handling");
        assert!(lines.iter().all(|l| l.category == SaleCategory::Tariff));
    }

    #[test]
    fn test_default_template_residual_on_last() {
        let allocator = SaleLineAllocator::default();
        let lines = allocator.distribute(dec!(10001), &default_template()).unwrap();
        // 7000.70 + 1200.12 + 1800.18 = 10001.00
        assert_eq!(sum_lines(&lines).unwrap(), dec!(10001.00));
        assert_eq!(lines[0].amount, dec!(7000.70));
        assert_eq!(lines[1].amount, dec!(1200.12));
        assert_eq!(lines[2].amount, dec!(1800.18));
    }

    #[test]
    fn test_rounding_residual_assigned_to_last() {
        let allocator = SaleLineAllocator::default();
        let template = vec![
            TemplateWeight::new("A", SaleCategory::Tariff, 33.33),
            TemplateWeight::new("B", SaleCategory::Tariff, 33.33),
            TemplateWeight::new("C", SaleCategory::Extra, 33.34),
        ];
        let lines = allocator.distribute(dec!(100.01), &template).unwrap();
        assert_eq!(lines[0].amount, dec!(33.33));
        assert_eq!(lines[1].amount, dec!(33.33));
        assert_eq!(lines[2].amount, dec!(33.35));
        assert_eq!(sum_lines(&lines).unwrap(), dec!(100.01));
        assert_eq!(lines[2].category, SaleCategory::Extra);
    }

    #[test]
    fn test_target_is_rounded_first() {
        let allocator = SaleLineAllocator::default();
        let lines = allocator.distribute(dec!(13333.3333), &default_template()).unwrap();
        assert_eq!(sum_lines(&lines).unwrap(), dec!(13333.33));
    }

    #[test]
    fn test_weights_outside_tolerance_rejected() {
        let allocator = SaleLineAllocator::default();
        let template = vec![
            TemplateWeight::new("A", SaleCategory::Tariff, 70.0),
            TemplateWeight::new("B", SaleCategory::Tariff, 20.0),
        ];
        let err = allocator.distribute(dec!(1000), &template).unwrap_err();
        assert_eq!(
            err,
            PricingError::AllocationRounding {
                sum: dec!(90),
                tolerance: dec!(0.5),
            }
        );
    }

    #[test]
    fn test_weights_within_tolerance_accepted() {
        let allocator = SaleLineAllocator::default();
        let template = vec![
            TemplateWeight::new("A", SaleCategory::Tariff, 50.0),
            TemplateWeight::new("B", SaleCategory::Tariff, 49.75),
        ];
        let lines = allocator.distribute(dec!(1000), &template).unwrap();
        assert_eq!(lines[0].amount, dec!(500.00));
        // Residual absorbs the missing quarter point
        assert_eq!(lines[1].amount, dec!(500.00));
    }

    #[test]
    fn test_custom_tolerance() {
        let allocator = SaleLineAllocator::new(dec!(0));
        let template = vec![
            TemplateWeight::new("A", SaleCategory::Tariff, 50.0),
            TemplateWeight::new("B", SaleCategory::Tariff, 49.75),
        ];
        assert!(allocator.distribute(dec!(1000), &template).is_err());
        assert_eq!(allocator.tolerance(), dec!(0));
    }

    #[test]
    fn test_empty_template_rejected() {
        let err = SaleLineAllocator::default()
            .distribute(dec!(1000), &[])
            .unwrap_err();
        assert!(matches!(err, PricingError::AllocationRounding { .. }));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let template = vec![
            TemplateWeight::new("A", SaleCategory::Tariff, 110.0),
            TemplateWeight::new("B", SaleCategory::Tariff, -10.0),
        ];
        let err = SaleLineAllocator::default()
            .distribute(dec!(1000), &template)
            .unwrap_err();
        match err {
            PricingError::InvalidAmount { field, .. } => {
                assert_eq!(field, "auto_distribute.template_weights[1].weight_percent");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_weight_rejected() {
        let template = vec![TemplateWeight::new("A", SaleCategory::Tariff, f64::NAN)];
        let err = SaleLineAllocator::default()
            .distribute(dec!(1000), &template)
            .unwrap_err();
        assert!(matches!(err, PricingError::InvalidAmount { .. }));
    }

    #[test]
    fn test_negative_last_line_rejected() {
        // Rounding overshoot on the leading shares cannot be absorbed by a
        // zero-weight last entry
        let allocator = SaleLineAllocator::default();
        let template = vec![
            TemplateWeight::new("A", SaleCategory::Tariff, 50.25),
            TemplateWeight::new("B", SaleCategory::Tariff, 50.25),
            TemplateWeight::new("C", SaleCategory::Tariff, 0.0),
        ];
        let err = allocator.distribute(dec!(1000), &template).unwrap_err();
        assert!(matches!(err, PricingError::AllocationRounding { .. }));
    }

    #[test]
    fn test_oversized_price_is_an_error() {
        let err = SaleLineAllocator::default()
            .distribute(Decimal::MAX, &default_template())
            .unwrap_err();
        assert_eq!(err, out_of_range("price"));
    }

    #[test]
    fn test_zero_price() {
        let lines = SaleLineAllocator::default()
            .distribute(dec!(0), &default_template())
            .unwrap();
        assert_eq!(sum_lines(&lines).unwrap(), dec!(0));
    }

    #[test]
    fn test_manual_lines_kept_verbatim() {
        let inputs = vec![
            SaleLineInput {
                name: "Flete Door-to-Door".into(),
                category: SaleCategory::Tariff,
                amount: 11000.0,
            },
            SaleLineInput {
                name: "Almacenaje".into(),
                category: SaleCategory::Extra,
                amount: 250.5,
            },
        ];
        let lines = SaleLineAllocator::default().manual(&inputs).unwrap();
        assert_eq!(amounts(&lines), vec![dec!(11000), dec!(250.50)]);
        assert_eq!(lines[1].category, SaleCategory::Extra);
    }

    #[test]
    fn test_manual_negative_line_rejected() {
        let inputs = vec![SaleLineInput {
            name: "Descuento".into(),
            category: SaleCategory::Extra,
            amount: -10.0,
        }];
        let err = SaleLineAllocator::default().manual(&inputs).unwrap_err();
        match err {
            PricingError::InvalidAmount { field, .. } => {
                assert_eq!(field, "sale_line_items[0].amount");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
