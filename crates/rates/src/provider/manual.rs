//! Manual rate provider backed by a fixed in-memory table.
//!
//! Serves rates configured by the host (or a test) without any network
//! access. Inverse pairs are derived automatically.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::errors::RateError;
use crate::models::{ExchangeRate, HistoricalExchangeRate, RateSource};
use crate::provider::RateProvider;

/// Provider ID constant
const PROVIDER_ID: &str = "MANUAL";

/// Rate provider serving a fixed table of rates.
#[derive(Default)]
pub struct ManualRateProvider {
    rates: HashMap<(String, String), Decimal>,
}

impl ManualRateProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rate for a pair. Non-positive rates and identity pairs are ignored.
    pub fn with_rate(mut self, from: &str, to: &str, rate: Decimal) -> Self {
        if from != to && rate > Decimal::ZERO {
            self.rates
                .insert((from.to_string(), to.to_string()), rate);
        }
        self
    }

    fn lookup(&self, from: &str, to: &str) -> Option<Decimal> {
        if let Some(rate) = self.rates.get(&(from.to_string(), to.to_string())) {
            return Some(*rate);
        }
        // Derive the inverse when only the opposite direction is configured.
        self.rates
            .get(&(to.to_string(), from.to_string()))
            .map(|inverse| Decimal::ONE / inverse)
    }
}

#[async_trait]
impl RateProvider for ManualRateProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_latest_rate(&self, from: &str, to: &str) -> Result<ExchangeRate, RateError> {
        let rate = self.lookup(from, to).ok_or_else(|| RateError::RateUnavailable {
            from: from.to_string(),
            to: to.to_string(),
        })?;

        ExchangeRate::new(from, to, rate, Utc::now(), RateSource::Manual)
    }

    async fn get_historical_rates(
        &self,
        from: &str,
        to: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<HistoricalExchangeRate>, RateError> {
        if start > end {
            return Err(RateError::NoDataForRange);
        }

        let rate = self.lookup(from, to).ok_or(RateError::NoDataForRange)?;

        let mut rates = Vec::new();
        let mut date = start;
        while date <= end {
            rates.push(HistoricalExchangeRate {
                from_currency: from.to_string(),
                to_currency: to.to_string(),
                rate,
                date,
                timestamp: Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)),
                source: RateSource::Manual,
            });
            date = match date.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }

        Ok(rates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_direct_lookup() {
        let provider = ManualRateProvider::new().with_rate("USD", "EUR", dec!(0.92));

        let rate = provider.get_latest_rate("USD", "EUR").await.unwrap();
        assert_eq!(rate.rate, dec!(0.92));
        assert_eq!(rate.source, RateSource::Manual);
    }

    #[tokio::test]
    async fn test_inverse_lookup() {
        let provider = ManualRateProvider::new().with_rate("USD", "EUR", dec!(0.8));

        let rate = provider.get_latest_rate("EUR", "USD").await.unwrap();
        assert_eq!(rate.rate, dec!(1.25));
    }

    #[tokio::test]
    async fn test_unknown_pair_is_unavailable() {
        let provider = ManualRateProvider::new();

        let result = provider.get_latest_rate("USD", "JPY").await;
        assert!(matches!(result, Err(RateError::RateUnavailable { .. })));
    }

    #[tokio::test]
    async fn test_historical_covers_every_day() {
        let provider = ManualRateProvider::new().with_rate("USD", "CAD", dec!(1.36));

        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let rates = provider
            .get_historical_rates("USD", "CAD", start, end)
            .await
            .unwrap();

        assert_eq!(rates.len(), 5);
        assert_eq!(rates.first().unwrap().date, start);
        assert_eq!(rates.last().unwrap().date, end);
    }

    #[tokio::test]
    async fn test_search_not_supported() {
        let provider = ManualRateProvider::new();

        let result = provider.search_symbols("usd").await;
        assert!(matches!(result, Err(RateError::NotSupported { .. })));
    }
}
