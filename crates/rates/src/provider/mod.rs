//! Rate provider trait definitions and implementations.

mod frankfurter;
mod manual;

pub use frankfurter::FrankfurterProvider;
pub use manual::ManualRateProvider;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::RateError;
use crate::models::{ExchangeRate, HistoricalExchangeRate, SymbolSearchResult};

/// Trait for exchange-rate providers.
///
/// Implement this trait to add support for a new rate source. The cache
/// treats every provider as potentially unavailable at any time and
/// owns the fallback behavior.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Unique identifier for this provider, e.g. "FRANKFURTER".
    fn id(&self) -> &'static str;

    /// Fetch the latest rate for a distinct currency pair.
    async fn get_latest_rate(&self, from: &str, to: &str) -> Result<ExchangeRate, RateError>;

    /// Fetch historical rates for a date range (both ends inclusive).
    ///
    /// Results are ordered by ascending date. Days the source has no
    /// observation for are simply absent; nothing is interpolated.
    async fn get_historical_rates(
        &self,
        from: &str,
        to: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<HistoricalExchangeRate>, RateError>;

    /// Search for currency symbols matching the query.
    ///
    /// Default implementation returns `NotSupported`.
    async fn search_symbols(&self, query: &str) -> Result<Vec<SymbolSearchResult>, RateError> {
        let _ = query;
        Err(RateError::NotSupported {
            operation: "search".to_string(),
            provider: self.id().to_string(),
        })
    }
}
