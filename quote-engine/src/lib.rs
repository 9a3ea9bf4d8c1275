//! Freight Quote Engine - margin-based pricing for freight quotations
//!
//! # Overview
//!
//! Turns a list of cost components and a target margin on price into a
//! quote or a route-keyed tariff with every derived figure (subtotal,
//! profit, realized margin, tax, total). Computation is synchronous and
//! deterministic; amounts are `rust_decimal::Decimal` end to end.
//!
//! # Module layout
//!
//! ```text
//! quote-engine/src/
//! ├── core/      # configuration, PricingError
//! ├── pricing/   # cost ledger, margin inversion, sale line allocation
//! ├── quotes/    # quote assembly and status
//! ├── tariffs/   # tariff assembly, tariff book, route catalog
//! └── utils/     # money helpers, logger
//! ```

pub mod core;
pub mod pricing;
pub mod quotes;
pub mod tariffs;
pub mod utils;

// Re-export public types
pub use core::{Config, PricingError, PricingResult};
pub use pricing::{CostLedger, MARGIN_PRESETS, SaleLineAllocator, compute_suggested_price};
pub use quotes::{QuoteAssembler, transition_status};
pub use tariffs::{InMemoryRouteCatalog, RouteCatalog, TariffAssembler, TariffBook};

// Re-export unified error types from shared
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env`, read the configuration and start logging
pub fn setup_environment() -> AppResult<Config> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    config.validate()?;

    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    Ok(config)
}
