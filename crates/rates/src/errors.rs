//! Error types and retry classification for the rates crate.

use thiserror::Error;

/// How a failed rate operation should be handled by callers.
///
/// - [`RetryClass::Never`]: terminal, retrying won't help
/// - [`RetryClass::WithBackoff`]: transient, retry after a delay
/// - [`RetryClass::Fallback`]: serve a cached/degraded value instead
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryClass {
    Never,
    WithBackoff,
    Fallback,
}

/// Errors that can occur while fetching or serving exchange rates.
#[derive(Error, Debug)]
pub enum RateError {
    /// No rate could be produced for the pair, from the provider or the cache.
    /// Callers are expected to degrade rather than fail the surrounding request.
    #[error("No exchange rate available for {from}/{to}")]
    RateUnavailable { from: String, to: String },

    /// The pair exists but has no observations in the requested period.
    #[error("No data for date range")]
    NoDataForRange,

    /// A rate record failed its own invariants (non-positive rate, identity pair).
    #[error("Invalid exchange rate: {0}")]
    InvalidRate(String),

    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited { provider: String },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout { provider: String },

    /// A provider-specific error occurred.
    #[error("Provider error: {provider} - {message}")]
    ProviderError { provider: String, message: String },

    /// The provider returned a payload that could not be interpreted.
    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),

    /// The operation is not supported by this provider.
    #[error("Operation '{operation}' not supported by {provider}")]
    NotSupported { operation: String, provider: String },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl RateError {
    /// Returns the retry classification for this error.
    pub fn retry_class(&self) -> RetryClass {
        match self {
            RateError::RateUnavailable { .. } => RetryClass::Fallback,
            RateError::NoDataForRange => RetryClass::Never,
            RateError::InvalidRate(_) => RetryClass::Never,
            RateError::RateLimited { .. } => RetryClass::WithBackoff,
            RateError::Timeout { .. } => RetryClass::WithBackoff,
            RateError::ProviderError { .. } => RetryClass::Fallback,
            RateError::InvalidResponse(_) => RetryClass::Fallback,
            RateError::NotSupported { .. } => RetryClass::Never,
            RateError::Network(_) => RetryClass::WithBackoff,
        }
    }
}
