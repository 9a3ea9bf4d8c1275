//! Shared types for the freight quotation workspace
//!
//! Value objects, request shapes and the unified error system used by the
//! quote engine and anything embedding it.

pub mod error;
pub mod models;
pub mod request;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode};
pub use models::{
    CostComponent, PriceBreakdown, Quote, QuoteDetails, QuoteStatus, RouteKey, RouteRate,
    SaleCategory, SaleLineItem, Tariff, TariffRecord, TariffSummary, TransportMode,
};
