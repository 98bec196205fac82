//! Frankfurter provider for foreign-exchange reference rates.
//!
//! Fetches the ECB daily reference fixes published by the free
//! Frankfurter API. Rates exist for business days only; weekends and
//! TARGET closing days come back absent from range queries, which is
//! exactly the gap behavior the cache contract expects.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use crate::errors::RateError;
use crate::models::{ExchangeRate, HistoricalExchangeRate, RateSource, SymbolSearchResult};
use crate::provider::RateProvider;

/// Provider ID constant
const PROVIDER_ID: &str = "FRANKFURTER";

/// Default API endpoint
const DEFAULT_BASE_URL: &str = "https://api.frankfurter.app";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Response for `/latest` and `/{date}` queries.
#[derive(Debug, Deserialize)]
struct LatestResponse {
    #[allow(dead_code)]
    base: String,
    date: NaiveDate,
    rates: HashMap<String, Decimal>,
}

/// Response for `/{start}..{end}` range queries. Keyed by calendar day;
/// `BTreeMap` keeps the days in ascending order.
#[derive(Debug, Deserialize)]
struct RangeResponse {
    #[allow(dead_code)]
    base: String,
    rates: BTreeMap<NaiveDate, HashMap<String, Decimal>>,
}

/// Frankfurter rate provider.
pub struct FrankfurterProvider {
    client: Client,
    base_url: String,
}

impl Default for FrankfurterProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FrankfurterProvider {
    /// Create a provider against the public Frankfurter endpoint.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    /// Create a provider against a custom endpoint (self-hosted instance).
    pub fn with_base_url(base_url: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, base_url }
    }

    fn map_send_error(err: reqwest::Error) -> RateError {
        if err.is_timeout() {
            RateError::Timeout {
                provider: PROVIDER_ID.to_string(),
            }
        } else {
            RateError::Network(err)
        }
    }

    fn check_status(status: StatusCode) -> Result<(), RateError> {
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(RateError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }
        if !status.is_success() {
            return Err(RateError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {}", status),
            });
        }
        Ok(())
    }

    fn map_latest(from: &str, to: &str, response: LatestResponse) -> Result<ExchangeRate, RateError> {
        let rate = response
            .rates
            .get(to)
            .copied()
            .ok_or_else(|| RateError::RateUnavailable {
                from: from.to_string(),
                to: to.to_string(),
            })?;

        let timestamp = Utc.from_utc_datetime(&response.date.and_time(NaiveTime::MIN));
        ExchangeRate::new(from, to, rate, timestamp, RateSource::Frankfurter)
    }

    fn map_range(from: &str, to: &str, response: RangeResponse) -> Vec<HistoricalExchangeRate> {
        response
            .rates
            .into_iter()
            .filter_map(|(date, day_rates)| {
                let rate = day_rates.get(to).copied()?;
                if rate <= Decimal::ZERO {
                    return None;
                }
                Some(HistoricalExchangeRate {
                    from_currency: from.to_string(),
                    to_currency: to.to_string(),
                    rate,
                    date,
                    timestamp: Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)),
                    source: RateSource::Frankfurter,
                })
            })
            .collect()
    }
}

#[async_trait]
impl RateProvider for FrankfurterProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_latest_rate(&self, from: &str, to: &str) -> Result<ExchangeRate, RateError> {
        let url = format!("{}/latest?from={}&to={}", self.base_url, from, to);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(Self::map_send_error)?;
        Self::check_status(response.status())?;

        let body: LatestResponse = response
            .json()
            .await
            .map_err(|e| RateError::InvalidResponse(e.to_string()))?;

        Self::map_latest(from, to, body)
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

        let url = format!(
            "{}/{}..{}?from={}&to={}",
            self.base_url,
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d"),
            from,
            to
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(Self::map_send_error)?;
        Self::check_status(response.status())?;

        let body: RangeResponse = response
            .json()
            .await
            .map_err(|e| RateError::InvalidResponse(e.to_string()))?;

        Ok(Self::map_range(from, to, body))
    }

    async fn search_symbols(&self, query: &str) -> Result<Vec<SymbolSearchResult>, RateError> {
        let url = format!("{}/currencies", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(Self::map_send_error)?;
        Self::check_status(response.status())?;

        let currencies: HashMap<String, String> = response
            .json()
            .await
            .map_err(|e| RateError::InvalidResponse(e.to_string()))?;

        let needle = query.to_lowercase();
        let mut results: Vec<SymbolSearchResult> = currencies
            .into_iter()
            .filter(|(code, name)| {
                code.to_lowercase().contains(&needle) || name.to_lowercase().contains(&needle)
            })
            .map(|(code, name)| SymbolSearchResult {
                symbol: code.clone(),
                name,
                currency: code,
            })
            .collect();

        results.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        Ok(results)
    }
}
