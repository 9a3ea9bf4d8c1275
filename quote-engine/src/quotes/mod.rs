//! Quote assembly and lifecycle

pub mod assembler;
pub mod status;


pub use assembler::{
    DEFAULT_TAX_RATE_PERCENT, IMPLIED_EXTRAS_COST_NAME, QuoteAssembler, SYNTHETIC_SALE_LINE,
};
pub use status::transition_status;
