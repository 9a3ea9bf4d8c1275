//! Pricing primitives
//!
//! # Modules
//!
//! - [`ledger`]: cost components and their total
//! - [`margin`]: margin-on-price inversion
//! - [`allocator`]: manual and weighted sale lines

pub mod allocator;
pub mod ledger;
pub mod margin;

pub use allocator::{DEFAULT_WEIGHT_TOLERANCE, SaleLineAllocator, default_template, sum_lines};
pub use ledger::CostLedger;
pub use margin::{
    MARGIN_PRESETS, compute_suggested_price, implied_cost, markup_percent, parse_margin,
    realized_margin_percent, validate_margin,
};
