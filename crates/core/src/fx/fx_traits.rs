use async_trait::async_trait;
use finboard_rates::{ExchangeRate, HistoricalExchangeRate, SymbolSearchResult};
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::money::CurrencyAmount;

/// Trait defining the contract for currency conversion operations.
///
/// Conversion methods only return `Err` for validation failures; a
/// failing rate provider yields a degraded, unconverted
/// [`CurrencyAmount`] so callers can keep the dashboard available.
#[async_trait]
pub trait FxServiceTrait: Send + Sync {
    /// Latest rate for a pair. Identity pairs short-circuit to rate 1.
    async fn get_rate(&self, from: &str, to: &str) -> Result<ExchangeRate>;

    /// Historical rates for the trailing `days`, ascending by date.
    async fn get_historical_rates(
        &self,
        from: &str,
        to: &str,
        days: i64,
    ) -> Result<Vec<HistoricalExchangeRate>>;

    /// Converts a single amount between currencies.
    async fn convert_amount(
        &self,
        amount: Decimal,
        from: &str,
        to: &str,
    ) -> Result<CurrencyAmount>;

    /// Converts an existing currency-tagged value into `to`.
    async fn convert_value(&self, value: &CurrencyAmount, to: &str) -> Result<CurrencyAmount>;

    /// Converts a batch, preserving input order. A failure on one
    /// element never aborts the batch; the element comes back
    /// unconverted.
    async fn convert_multiple_amounts(
        &self,
        values: &[CurrencyAmount],
        to: &str,
    ) -> Result<Vec<CurrencyAmount>>;

    /// Symbol search passthrough to the rate provider.
    async fn search_symbols(&self, query: &str) -> Result<Vec<SymbolSearchResult>>;
}
