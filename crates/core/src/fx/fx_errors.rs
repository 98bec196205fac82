use finboard_rates::RateError;
use thiserror::Error;

/// Errors from the conversion service.
///
/// `RateUnavailable` is the degrade signal of the whole fx stack:
/// conversion entry points catch it and return the original amount
/// tagged with its source currency instead of failing the request.
#[derive(Error, Debug)]
pub enum FxError {
    #[error("No exchange rate available for {from}/{to}")]
    RateUnavailable { from: String, to: String },

    #[error("Invalid currency code: {0}")]
    InvalidCurrencyCode(String),

    #[error("Rate provider error: {0}")]
    Provider(String),
}

impl From<RateError> for FxError {
    fn from(err: RateError) -> Self {
        match err {
            RateError::RateUnavailable { from, to } => FxError::RateUnavailable { from, to },
            other => FxError::Provider(other.to_string()),
        }
    }
}
