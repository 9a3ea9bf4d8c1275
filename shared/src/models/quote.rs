//! Quote Model

use serde::{Deserialize, Serialize};

use super::pricing::PriceBreakdown;

/// Quote lifecycle status
///
/// Nominal flow: `Draft -> Sent -> {Accepted, Rejected}` and `Sent -> Expired`.
/// Transitions are driven by the caller and never enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    #[default]
    Draft,
    Sent,
    Accepted,
    Rejected,
    Expired,
}

impl QuoteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Expired => "expired",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected | Self::Expired)
    }

    /// Whether `next` follows `self` in the nominal lifecycle
    pub fn is_nominal_transition(&self, next: QuoteStatus) -> bool {
        matches!(
            (self, next),
            (Self::Draft, Self::Sent)
                | (Self::Sent, Self::Accepted)
                | (Self::Sent, Self::Rejected)
                | (Self::Sent, Self::Expired)
        )
    }
}

/// Client-facing metadata carried verbatim on a quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct QuoteDetails {
    pub client_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_phone: Option<String>,
    #[serde(default)]
    pub is_new_client: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Assigned by the persistence layer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_number: Option<String>,
}

/// Finished quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(flatten)]
    pub pricing: PriceBreakdown,
    #[serde(default)]
    pub status: QuoteStatus,
    /// Pre-approved tariff the quote was built from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tariff_id: Option<String>,
    /// "origin → destination" of the tariff route
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<QuoteDetails>,
}
