//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// - 0xxx: General errors
/// - 1xxx: Pricing input errors
/// - 2xxx: Allocation errors
/// - 3xxx: Quote errors
/// - 4xxx: Tariff errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Pricing input errors (1xxx)
    Pricing,
    /// Allocation errors (2xxx)
    Allocation,
    /// Quote errors (3xxx)
    Quote,
    /// Tariff errors (4xxx)
    Tariff,
    /// System errors (everything else)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Pricing,
            2000..3000 => Self::Allocation,
            3000..4000 => Self::Quote,
            4000..5000 => Self::Tariff,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Pricing => "pricing",
            Self::Allocation => "allocation",
            Self::Quote => "quote",
            Self::Tariff => "tariff",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Pricing);
        assert_eq!(ErrorCategory::from_code(2001), ErrorCategory::Allocation);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::Quote);
        assert_eq!(ErrorCategory::from_code(4002), ErrorCategory::Tariff);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(5000), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::InvalidRequest.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::InvalidMargin.category(), ErrorCategory::Pricing);
        assert_eq!(
            ErrorCode::AllocationRounding.category(),
            ErrorCategory::Allocation
        );
        assert_eq!(ErrorCode::InvalidQuoteDetails.category(), ErrorCategory::Quote);
        assert_eq!(ErrorCode::TariffNotFound.category(), ErrorCategory::Tariff);
        assert_eq!(ErrorCode::ConfigError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_category_serialize() {
        let json = serde_json::to_string(&ErrorCategory::Allocation).unwrap();
        assert_eq!(json, "\"allocation\"");
        assert_eq!(ErrorCategory::Tariff.name(), "tariff");
    }
}
