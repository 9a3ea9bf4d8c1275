//! Core: configuration and errors

pub mod config;
pub mod error;

pub use config::Config;
pub use error::{PricingError, PricingResult};
