use rust_decimal::Decimal;
use shared::error::AppError;

use crate::pricing::allocator::DEFAULT_WEIGHT_TOLERANCE;
use crate::utils::money::MAX_TAX_RATE_PERCENT;

/// Engine configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | DEFAULT_TAX_RATE_PERCENT | 16 | Tax rate applied when a request omits it (IVA) |
/// | DEFAULT_MARGIN_PERCENT | 20 | Margin used by `suggest` when none is given |
/// | ALLOCATION_TOLERANCE_PERCENT | 0.5 | Allowed deviation of template weights from 100 |
/// | ROUTE_CATALOG_PATH | - | JSON route catalog file |
/// | LOG_LEVEL | info | tracing level |
/// | LOG_DIR | - | Rolling log directory |
/// | ENVIRONMENT | development | Environment name |
///
/// # Example
///
/// ```ignore
/// DEFAULT_TAX_RATE_PERCENT=8 quote-engine quote request.json
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub default_tax_rate_percent: Decimal,
    pub default_margin_percent: Decimal,
    pub allocation_tolerance_percent: Decimal,
    pub route_catalog_path: Option<String>,
    pub log_level: String,
    pub log_dir: Option<String>,
    /// development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset or unparsable variables fall back to their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_tax_rate_percent: std::env::var("DEFAULT_TAX_RATE_PERCENT")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.default_tax_rate_percent),
            default_margin_percent: std::env::var("DEFAULT_MARGIN_PERCENT")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.default_margin_percent),
            allocation_tolerance_percent: std::env::var("ALLOCATION_TOLERANCE_PERCENT")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.allocation_tolerance_percent),
            route_catalog_path: std::env::var("ROUTE_CATALOG_PATH")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_dir: std::env::var("LOG_DIR").ok().filter(|v| !v.trim().is_empty()),
            environment: std::env::var("ENVIRONMENT").unwrap_or(defaults.environment),
        }
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> Result<(), AppError> {
        if self.default_tax_rate_percent.is_sign_negative()
            || self.default_tax_rate_percent > MAX_TAX_RATE_PERCENT
        {
            return Err(AppError::config(format!(
                "DEFAULT_TAX_RATE_PERCENT must be in [0, {}], got {}",
                MAX_TAX_RATE_PERCENT, self.default_tax_rate_percent
            ))
            .with_detail("field", "DEFAULT_TAX_RATE_PERCENT"));
        }
        if self.default_margin_percent.is_sign_negative()
            || self.default_margin_percent >= Decimal::ONE_HUNDRED
        {
            return Err(AppError::config(format!(
                "DEFAULT_MARGIN_PERCENT must be in [0, 100), got {}",
                self.default_margin_percent
            ))
            .with_detail("field", "DEFAULT_MARGIN_PERCENT"));
        }
        if self.allocation_tolerance_percent.is_sign_negative() {
            return Err(AppError::config(format!(
                "ALLOCATION_TOLERANCE_PERCENT must be non-negative, got {}",
                self.allocation_tolerance_percent
            ))
            .with_detail("field", "ALLOCATION_TOLERANCE_PERCENT"));
        }
        Ok(())
    }

}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_tax_rate_percent: Decimal::from(16),
            default_margin_percent: Decimal::from(20),
            allocation_tolerance_percent: DEFAULT_WEIGHT_TOLERANCE,
            route_catalog_path: None,
            log_level: "info".into(),
            log_dir: None,
            environment: "development".into(),
        }
    }
}
