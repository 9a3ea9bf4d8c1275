//! Data models
//!
//! Value objects consumed and produced by the quote engine. Monetary fields
//! are `Decimal` and travel as JSON numbers.

pub mod cost;
pub mod pricing;
pub mod quote;
pub mod route;
pub mod sale_line;
pub mod tariff;

// Re-exports
pub use cost::*;
pub use pricing::*;
pub use quote::*;
pub use route::*;
pub use sale_line::*;
pub use tariff::*;
