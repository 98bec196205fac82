//! Exchange-rate domain models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::RateError;

/// Where a rate observation came from.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RateSource {
    Frankfurter,
    Manual,
    Identity,
}

impl RateSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RateSource::Frankfurter => "FRANKFURTER",
            RateSource::Manual => "MANUAL",
            RateSource::Identity => "IDENTITY",
        }
    }
}

/// A single currency-pair rate observation.
///
/// Invariant: `from_currency != to_currency` and `rate > 0`. Identity
/// pairs never produce a stored rate record; [`ExchangeRate::identity`]
/// builds the transient rate-1 value the cache short-circuits with.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRate {
    pub from_currency: String,
    pub to_currency: String,
    #[serde(serialize_with = "serialize_decimal_6")]
    pub rate: Decimal,
    pub timestamp: DateTime<Utc>,
    pub source: RateSource,
}

impl ExchangeRate {
    /// Creates a validated rate record for a distinct currency pair.
    pub fn new(
        from_currency: &str,
        to_currency: &str,
        rate: Decimal,
        timestamp: DateTime<Utc>,
        source: RateSource,
    ) -> Result<Self, RateError> {
        if from_currency == to_currency {
            return Err(RateError::InvalidRate(format!(
                "identity pair {}/{} cannot be stored as a rate record",
                from_currency, to_currency
            )));
        }
        if rate <= Decimal::ZERO {
            return Err(RateError::InvalidRate(format!(
                "non-positive rate {} for {}/{}",
                rate, from_currency, to_currency
            )));
        }
        Ok(ExchangeRate {
            from_currency: from_currency.to_string(),
            to_currency: to_currency.to_string(),
            rate,
            timestamp,
            source,
        })
    }

    /// Transient rate-1 value for an identity pair. Never cached.
    pub fn identity(currency: &str) -> Self {
        ExchangeRate {
            from_currency: currency.to_string(),
            to_currency: currency.to_string(),
            rate: Decimal::ONE,
            timestamp: Utc::now(),
            source: RateSource::Identity,
        }
    }

    /// Lookup key for this pair. Returns format: "EUR/USD".
    pub fn pair_key(from: &str, to: &str) -> String {
        format!("{}/{}", from, to)
    }
}

/// A rate pinned to the calendar day it applies to.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalExchangeRate {
    pub from_currency: String,
    pub to_currency: String,
    #[serde(serialize_with = "serialize_decimal_6")]
    pub rate: Decimal,
    pub date: NaiveDate,
    pub timestamp: DateTime<Utc>,
    pub source: RateSource,
}

/// Passthrough shape for provider symbol search results.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SymbolSearchResult {
    pub symbol: String,
    pub name: String,
    pub currency: String,
}

fn serialize_decimal_6<S>(decimal: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let rounded = decimal.round_dp(6);
    serializer.serialize_str(&rounded.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rejects_identity_pair_record() {
        let result = ExchangeRate::new("USD", "USD", dec!(1), Utc::now(), RateSource::Manual);
        assert!(matches!(result, Err(RateError::InvalidRate(_))));
    }

    #[test]
    fn test_rejects_non_positive_rate() {
        let zero = ExchangeRate::new("USD", "EUR", dec!(0), Utc::now(), RateSource::Manual);
        assert!(matches!(zero, Err(RateError::InvalidRate(_))));

        let negative = ExchangeRate::new("USD", "EUR", dec!(-0.9), Utc::now(), RateSource::Manual);
        assert!(matches!(negative, Err(RateError::InvalidRate(_))));
    }

    #[test]
    fn test_identity_is_rate_one() {
        let rate = ExchangeRate::identity("CHF");
        assert_eq!(rate.rate, Decimal::ONE);
        assert_eq!(rate.from_currency, "CHF");
        assert_eq!(rate.to_currency, "CHF");
        assert_eq!(rate.source, RateSource::Identity);
    }

    #[test]
    fn test_rate_serializes_camel_case() {
        let rate =
            ExchangeRate::new("USD", "EUR", dec!(0.9123456789), Utc::now(), RateSource::Manual)
                .unwrap();
        let json = serde_json::to_value(&rate).unwrap();
        assert_eq!(json["fromCurrency"], "USD");
        assert_eq!(json["toCurrency"], "EUR");
        // rate is rounded to 6 decimal places on the wire
        assert_eq!(json["rate"], "0.912346");
        assert_eq!(json["source"], "MANUAL");
    }
}
