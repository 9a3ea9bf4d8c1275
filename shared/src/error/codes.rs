//! Unified error codes for the quoting workspace
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Pricing input errors (amounts, margins, cost basis)
//! - 2xxx: Sale line allocation errors
//! - 3xxx: Quote errors
//! - 4xxx: Tariff errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so that callers embedding the
/// engine behind an API can forward them unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Malformed request document
    InvalidRequest = 5,

    // ==================== 1xxx: Pricing ====================
    /// Amount is negative, non-numeric or non-finite
    InvalidAmount = 1001,
    /// Margin percentage outside [0, 100)
    InvalidMargin = 1002,
    /// No cost basis available to derive a price
    EmptyCostSet = 1003,

    // ==================== 2xxx: Allocation ====================
    /// Template weights do not sum to ~100%
    AllocationRounding = 2001,

    // ==================== 3xxx: Quote ====================
    /// Quote client details are incomplete
    InvalidQuoteDetails = 3001,

    // ==================== 4xxx: Tariff ====================
    /// Route identity is incomplete
    InvalidRoute = 4001,
    /// Tariff not found
    TariffNotFound = 4002,

    // ==================== 9xxx: System ====================
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::InvalidRequest => "Invalid request",

            // Pricing
            ErrorCode::InvalidAmount => "Amount must be a finite, non-negative number",
            ErrorCode::InvalidMargin => "Margin percentage must be at least 0 and below 100",
            ErrorCode::EmptyCostSet => "At least one cost component is required to derive a price",

            // Allocation
            ErrorCode::AllocationRounding => "Template weights must sum to 100 percent",

            // Quote
            ErrorCode::InvalidQuoteDetails => "Quote client details are incomplete",

            // Tariff
            ErrorCode::InvalidRoute => "Route origin, destination, mode and size are required",
            ErrorCode::TariffNotFound => "Tariff not found",

            // System
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            5 => Ok(ErrorCode::InvalidRequest),

            // Pricing
            1001 => Ok(ErrorCode::InvalidAmount),
            1002 => Ok(ErrorCode::InvalidMargin),
            1003 => Ok(ErrorCode::EmptyCostSet),

            // Allocation
            2001 => Ok(ErrorCode::AllocationRounding),

            // Quote
            3001 => Ok(ErrorCode::InvalidQuoteDetails),

            // Tariff
            4001 => Ok(ErrorCode::InvalidRoute),
            4002 => Ok(ErrorCode::TariffNotFound),

            // System
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::InvalidRequest.code(), 5);

        assert_eq!(ErrorCode::InvalidAmount.code(), 1001);
        assert_eq!(ErrorCode::InvalidMargin.code(), 1002);
        assert_eq!(ErrorCode::EmptyCostSet.code(), 1003);
        assert_eq!(ErrorCode::AllocationRounding.code(), 2001);
        assert_eq!(ErrorCode::InvalidQuoteDetails.code(), 3001);
        assert_eq!(ErrorCode::InvalidRoute.code(), 4001);
        assert_eq!(ErrorCode::TariffNotFound.code(), 4002);
        assert_eq!(ErrorCode::ConfigError.code(), 9005);
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(1002), Ok(ErrorCode::InvalidMargin));
        assert_eq!(ErrorCode::try_from(2001), Ok(ErrorCode::AllocationRounding));
        assert_eq!(ErrorCode::try_from(9005), Ok(ErrorCode::ConfigError));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(1999), Err(InvalidErrorCode(1999)));
        assert_eq!(ErrorCode::try_from(65535), Err(InvalidErrorCode(65535)));
        assert_eq!(ErrorCode::try_from(9001), Err(InvalidErrorCode(9001)));
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&ErrorCode::EmptyCostSet).unwrap();
        assert_eq!(json, "1003");
    }

    #[test]
    fn test_deserialize() {
        let code: ErrorCode = serde_json::from_str("4001").unwrap();
        assert_eq!(code, ErrorCode::InvalidRoute);
    }

    #[test]
    fn test_deserialize_invalid() {
        let result: Result<ErrorCode, _> = serde_json::from_str("4999");
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::InvalidAmount.to_string(), "1001");
        assert_eq!(InvalidErrorCode(7).to_string(), "invalid error code: 7");
    }

    #[test]
    fn test_roundtrip() {
        let codes = [
            ErrorCode::Success,
            ErrorCode::InvalidRequest,
            ErrorCode::InvalidAmount,
            ErrorCode::InvalidMargin,
            ErrorCode::EmptyCostSet,
            ErrorCode::AllocationRounding,
            ErrorCode::InvalidQuoteDetails,
            ErrorCode::InvalidRoute,
            ErrorCode::TariffNotFound,
            ErrorCode::ConfigError,
        ];
        for code in codes {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }
}
