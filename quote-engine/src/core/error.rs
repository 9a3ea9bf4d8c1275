//! Pricing errors
//!
//! Every validation failure of the engine is a [`PricingError`]. They convert
//! into [`shared::error::AppError`] so an embedding application can surface
//! them with a stable numeric code.

use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("Invalid amount for {field}: {reason}")]
    InvalidAmount { field: String, reason: String },

    #[error("Invalid margin {value}%: must be at least 0 and below 100")]
    InvalidMargin { value: String },

    #[error("No cost components to derive a price from")]
    EmptyCostSet,

    #[error("Template weights sum to {sum}% (expected 100 ± {tolerance})")]
    AllocationRounding { sum: Decimal, tolerance: Decimal },

    #[error("Invalid route: {0}")]
    InvalidRoute(String),

    #[error("Invalid quote details: {0}")]
    InvalidQuoteDetails(String),

    #[error("Tariff not found: {0}")]
    TariffNotFound(String),
}

impl PricingError {
    pub fn invalid_amount(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAmount {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_margin(value: impl ToString) -> Self {
        Self::InvalidMargin {
            value: value.to_string(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidAmount { .. } => ErrorCode::InvalidAmount,
            Self::InvalidMargin { .. } => ErrorCode::InvalidMargin,
            Self::EmptyCostSet => ErrorCode::EmptyCostSet,
            Self::AllocationRounding { .. } => ErrorCode::AllocationRounding,
            Self::InvalidRoute(_) => ErrorCode::InvalidRoute,
            Self::InvalidQuoteDetails(_) => ErrorCode::InvalidQuoteDetails,
            Self::TariffNotFound(_) => ErrorCode::TariffNotFound,
        }
    }
}

pub type PricingResult<T> = Result<T, PricingError>;

impl From<PricingError> for AppError {
    fn from(err: PricingError) -> Self {
        let code = err.code();
        let message = err.to_string();
        let app = AppError::with_message(code, message);
        match err {
            PricingError::InvalidAmount { field, reason } => {
                app.with_detail("field", field).with_detail("reason", reason)
            }
            PricingError::InvalidMargin { value } => app.with_detail("margin_percent", value),
            PricingError::AllocationRounding { sum, tolerance } => app
                .with_detail("weight_sum", sum.to_string())
                .with_detail("tolerance", tolerance.to_string()),
            PricingError::InvalidRoute(reason) | PricingError::InvalidQuoteDetails(reason) => {
                app.with_detail("reason", reason)
            }
            PricingError::TariffNotFound(id) => app.with_detail("tariff_id", id),
            PricingError::EmptyCostSet => app,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_codes() {
        assert_eq!(
            PricingError::invalid_amount("x", "negative").code(),
            ErrorCode::InvalidAmount
        );
        assert_eq!(PricingError::invalid_margin(100).code(), ErrorCode::InvalidMargin);
        assert_eq!(PricingError::EmptyCostSet.code(), ErrorCode::EmptyCostSet);
        assert_eq!(
            PricingError::TariffNotFound("t".into()).code(),
            ErrorCode::TariffNotFound
        );
    }

    #[test]
    fn test_into_app_error_keeps_details() {
        let err = PricingError::AllocationRounding {
            sum: dec!(90),
            tolerance: dec!(0.5),
        };
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::AllocationRounding);
        let details = app.details.unwrap();
        assert_eq!(details.get("weight_sum").unwrap(), "90");
        assert_eq!(details.get("tolerance").unwrap(), "0.5");
    }

    #[test]
    fn test_display() {
        let err = PricingError::invalid_amount("cost_components[1].amount", "must be non-negative");
        assert_eq!(
            err.to_string(),
            "Invalid amount for cost_components[1].amount: must be non-negative"
        );
        assert_eq!(
            PricingError::invalid_margin(100).to_string(),
            "Invalid margin 100%: must be at least 0 and below 100"
        );
    }
}
