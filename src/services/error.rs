// src/services/error.rs
use std::fmt;

use crate::models::OptionLeg;

/// Failures of the fetch / lookup / validation stages. The collar model itself cannot fail.
#[derive(Debug, Clone, PartialEq)]
pub enum CollarError {
    /// No row in the fetched chain carries the requested strike.
    LookupNotFound { leg: OptionLeg, strike: f64 },
    /// The market data provider failed: unknown ticker, unlisted expiration, network, bad payload.
    DataProvider(String),
    /// A form field is below its floor or could not be parsed.
    InvalidInput(String),
}

impl CollarError {
    pub fn kind(&self) -> &'static str {
        match self {
            CollarError::LookupNotFound { .. } => "lookup_not_found",
            CollarError::DataProvider(_) => "data_provider_failure",
            CollarError::InvalidInput(_) => "invalid_input",
        }
    }
}

impl fmt::Display for CollarError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CollarError::LookupNotFound { leg, strike } => {
                write!(f, "no {} listed at strike {}", leg, strike)
            }
            CollarError::DataProvider(message) => write!(f, "{}", message),
            CollarError::InvalidInput(message) => write!(f, "invalid input: {}", message),
        }
    }
}

impl std::error::Error for CollarError {}

impl From<reqwest::Error> for CollarError {
    fn from(e: reqwest::Error) -> Self {
        CollarError::DataProvider(e.to_string())
    }
}

impl From<serde_json::Error> for CollarError {
    fn from(e: serde_json::Error) -> Self {
        CollarError::DataProvider(format!("malformed option chain payload: {}", e))
    }
}

pub type Result<T> = std::result::Result<T, CollarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_message_names_leg_and_strike() {
        let err = CollarError::LookupNotFound { leg: OptionLeg::Put, strike: 152.5 };
        assert_eq!(err.to_string(), "no put listed at strike 152.5");
        assert_eq!(err.kind(), "lookup_not_found");
    }

    #[test]
    fn provider_message_is_passed_through() {
        let err = CollarError::DataProvider("No data found for symbol ZZZZ".into());
        assert_eq!(err.to_string(), "No data found for symbol ZZZZ");
        assert_eq!(err.kind(), "data_provider_failure");
    }
}
