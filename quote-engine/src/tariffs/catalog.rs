//! Route catalog
//!
//! Candidate routes with the average observed freight cost. The engine only
//! reads it to seed a cost ledger; [`InMemoryRouteCatalog`] backs the CLI and
//! tests from a JSON file.

use std::path::Path;

use shared::error::AppError;
use shared::models::{RouteKey, RouteRate};
use thiserror::Error;

use crate::pricing::CostLedger;

/// Route lookup collaborator
pub trait RouteCatalog {
    fn lookup(&self, route: &RouteKey) -> Option<RouteRate>;

    fn routes(&self) -> Vec<RouteRate>;

    /// Cost ledger seeded with the route's base freight cost
    fn seed_ledger(&self, route: &RouteKey) -> CostLedger {
        CostLedger::seed_from_route(self, route)
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read route catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse route catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match &err {
            CatalogError::Io { path, .. } => {
                AppError::config(err.to_string()).with_detail("path", path.clone())
            }
            CatalogError::Parse(_) => AppError::config(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryRouteCatalog {
    rates: Vec<RouteRate>,
}

impl InMemoryRouteCatalog {
    pub fn new(rates: Vec<RouteRate>) -> Self {
        Self { rates }
    }

    /// Parse a JSON array of route rates
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let rates: Vec<RouteRate> = serde_json::from_str(json)?;
        Ok(Self::new(rates))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json_str(&json)?;
        tracing::info!(
            path = %path.display(),
            routes = catalog.rates.len(),
            "Route catalog loaded"
        );
        Ok(catalog)
    }

    /// Case-insensitive substring search over origin and destination
    pub fn search(&self, query: &str) -> Vec<&RouteRate> {
        let needle = query.trim().to_lowercase();
        self.rates
            .iter()
            .filter(|rate| {
                needle.is_empty()
                    || rate.route.origin.to_lowercase().contains(&needle)
                    || rate.route.destination.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl RouteCatalog for InMemoryRouteCatalog {
    fn lookup(&self, route: &RouteKey) -> Option<RouteRate> {
        self.rates
            .iter()
            .find(|rate| rate.route.same_route(route))
            .cloned()
    }

    fn routes(&self) -> Vec<RouteRate> {
        self.rates.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use shared::models::{BASE_COST_NAME, TransportMode};

    const CATALOG: &str = r#"[
        {"origin": "Manzanillo", "destination": "Guadalajara", "transport_mode": "intermodal",
         "container_size": "40HC", "route_id": "r-1", "avg_cost": 18500.5, "min_cost": 17000,
         "transit_days": 4},
        {"origin": "Veracruz", "destination": "Monterrey", "transport_mode": "rail",
         "container_size": "20DC", "min_cost": 9000},
        {"origin": "Lázaro Cárdenas", "destination": "CDMX", "transport_mode": "rail",
         "container_size": "40DC"}
    ]"#;

    fn catalog() -> InMemoryRouteCatalog {
        InMemoryRouteCatalog::from_json_str(CATALOG).unwrap()
    }

    #[test]
    fn test_lookup_ignores_case_and_whitespace() {
        let key = RouteKey::new(" manzanillo", "GUADALAJARA ", TransportMode::Intermodal, "40hc");
        let rate = catalog().lookup(&key).unwrap();
        assert_eq!(rate.route_id.as_deref(), Some("r-1"));
        assert_eq!(rate.transit_days, Some(4));
    }

    #[test]
    fn test_lookup_requires_same_mode() {
        let key = RouteKey::new("Manzanillo", "Guadalajara", TransportMode::Truck, "40HC");
        assert!(catalog().lookup(&key).is_none());
    }

    #[test]
    fn test_seed_prefers_avg_then_min_then_zero() {
        let catalog = catalog();

        let avg = catalog.seed_ledger(&RouteKey::new(
            "Manzanillo",
            "Guadalajara",
            TransportMode::Intermodal,
            "40HC",
        ));
        let base = avg.base_component().unwrap();
        assert_eq!(base.name, BASE_COST_NAME);
        assert_eq!(base.amount, dec!(18500.5));

        let min = catalog.seed_ledger(&RouteKey::new(
            "Veracruz",
            "Monterrey",
            TransportMode::Rail,
            "20DC",
        ));
        assert_eq!(min.total(), dec!(9000));

        let none = catalog.seed_ledger(&RouteKey::new(
            "Lázaro Cárdenas",
            "CDMX",
            TransportMode::Rail,
            "40DC",
        ));
        assert_eq!(none.total(), dec!(0));
        assert_eq!(none.len(), 1);

        let unknown =
            catalog.seed_ledger(&RouteKey::new("Altamira", "Saltillo", TransportMode::Truck, "53"));
        assert_eq!(unknown.total(), dec!(0));
        assert!(unknown.base_component().is_some());
    }

    #[test]
    fn test_search() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.search("monte").len(), 1);
        assert_eq!(catalog.search("  ").len(), 3);
        assert!(catalog.search("tijuana").is_empty());
    }

    #[test]
    fn test_parse_error_converts_to_config_error() {
        let err = InMemoryRouteCatalog::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
        let app: AppError = err.into();
        assert_eq!(app.code, shared::ErrorCode::ConfigError);
    }

    #[test]
    fn test_missing_file() {
        let err = InMemoryRouteCatalog::load("/nonexistent/routes.json").unwrap_err();
        let app: AppError = err.into();
        assert_eq!(app.code, shared::ErrorCode::ConfigError);
        assert!(app.details.unwrap().contains_key("path"));
    }
}
