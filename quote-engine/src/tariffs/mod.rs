//! Pre-approved tariffs
//!
//! # Modules
//!
//! - [`assembler`]: route-keyed pricing and revisions
//! - [`book`]: in-memory tariff store and lookup
//! - [`catalog`]: route catalog collaborator

pub mod assembler;
pub mod book;
pub mod catalog;

pub use assembler::{TariffAssembler, validate_route};
pub use book::TariffBook;
pub use catalog::{CatalogError, InMemoryRouteCatalog, RouteCatalog};
