//! Tariff Book
//!
//! In-memory store of pre-approved tariffs. Records are appended; several
//! tariffs for the same route may coexist. Listings are newest first.

use shared::models::{Quote, RouteKey, Tariff, TariffRecord, TariffSummary};
use shared::request::{QuoteFromTariffRequest, TariffFilter, TariffRevision};
use shared::util::now_millis;

use super::assembler::TariffAssembler;
use crate::core::{PricingError, PricingResult};

fn field_matches(wanted: Option<&String>, actual: &str) -> bool {
    wanted.is_none_or(|w| w.trim().eq_ignore_ascii_case(actual.trim()))
}

fn matches_filter(tariff: &Tariff, filter: &TariffFilter) -> bool {
    let route = &tariff.route;
    field_matches(filter.origin.as_ref(), &route.origin)
        && field_matches(filter.destination.as_ref(), &route.destination)
        && filter
            .transport_mode
            .is_none_or(|mode| mode == route.transport_mode)
        && field_matches(filter.container_size.as_ref(), &route.container_size)
}

#[derive(Debug, Clone, Default)]
pub struct TariffBook {
    assembler: TariffAssembler,
    records: Vec<TariffRecord>,
}

impl TariffBook {
    pub fn new(assembler: TariffAssembler) -> Self {
        Self {
            assembler,
            records: Vec::new(),
        }
    }

    /// Book holding previously stored records, oldest first
    pub fn with_records(assembler: TariffAssembler, records: Vec<TariffRecord>) -> Self {
        Self { assembler, records }
    }

    /// Store a tariff, returning its new id
    pub fn insert(&mut self, tariff: Tariff) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        let now = now_millis();
        tracing::debug!(
            tariff_id = %id,
            route = %tariff.route.description(),
            "Tariff stored"
        );
        self.records.push(TariffRecord {
            id: id.clone(),
            created_at: now,
            updated_at: now,
            tariff,
        });
        id
    }

    pub fn get(&self, id: &str) -> PricingResult<&TariffRecord> {
        self.records
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| PricingError::TariffNotFound(id.to_string()))
    }

    /// Re-assemble a stored tariff in place
    pub fn revise(&mut self, id: &str, revision: &TariffRevision) -> PricingResult<&TariffRecord> {
        let index = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| PricingError::TariffNotFound(id.to_string()))?;

        let revised = self.assembler.revise(&self.records[index].tariff, revision)?;
        let record = &mut self.records[index];
        record.tariff = revised;
        record.updated_at = now_millis().max(record.created_at);

        tracing::debug!(
            tariff_id = %id,
            total_sale = %record.tariff.total_sale(),
            margin_percent = %record.tariff.pricing.margin_percent,
            "Tariff revised"
        );
        Ok(record)
    }

    pub fn remove(&mut self, id: &str) -> PricingResult<TariffRecord> {
        let index = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| PricingError::TariffNotFound(id.to_string()))?;
        Ok(self.records.remove(index))
    }

    /// Quote a client from a stored tariff plus extra services
    pub fn quote(&self, request: &QuoteFromTariffRequest) -> PricingResult<Quote> {
        let record = self.get(&request.tariff_id)?;
        self.assembler.quotes().assemble_from_tariff(
            record,
            &request.extras,
            request.tax_rate_percent,
            request.details.clone(),
        )
    }

    /// Exact, case-insensitive match on every given filter field
    pub fn find(&self, filter: &TariffFilter) -> Vec<&TariffRecord> {
        self.records
            .iter()
            .rev()
            .filter(|r| matches_filter(&r.tariff, filter))
            .collect()
    }

    /// Case-insensitive substring search over origin, destination and mode
    pub fn search(&self, query: &str) -> Vec<&TariffRecord> {
        let needle = query.trim().to_lowercase();
        self.records
            .iter()
            .rev()
            .filter(|r| {
                let route = &r.tariff.route;
                needle.is_empty()
                    || route.origin.to_lowercase().contains(&needle)
                    || route.destination.to_lowercase().contains(&needle)
                    || route.transport_mode.as_str().contains(&needle)
            })
            .collect()
    }

    /// Tariffs for an identical route identity
    pub fn for_route(&self, route: &RouteKey) -> Vec<&TariffRecord> {
        self.records
            .iter()
            .rev()
            .filter(|r| r.tariff.route.same_route(route))
            .collect()
    }

    /// Lookup returning total sale and margin per matching tariff
    pub fn summaries(&self, filter: &TariffFilter) -> Vec<TariffSummary> {
        self.find(filter).into_iter().map(TariffSummary::from).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
