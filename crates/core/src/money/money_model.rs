//! The currency-tagged amount value type used by every calculation.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// An amount tagged with its ISO-4217 currency and, when a conversion
/// has happened, the conversion outcome.
///
/// Invariant: a present `converted_amount` always comes with the
/// `exchange_rate` that produced it. The reverse is not required, which
/// keeps "amount known, not yet converted" representable.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyAmount {
    pub amount: Decimal,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub converted_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange_rate: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl CurrencyAmount {
    /// An amount with no conversion state.
    pub fn new(amount: Decimal, currency: impl Into<String>) -> Self {
        CurrencyAmount {
            amount,
            currency: currency.into(),
            converted_amount: None,
            exchange_rate: None,
            last_updated: None,
        }
    }

    /// An amount carrying the outcome of a conversion. The only way to
    /// set `converted_amount`, so the rate is always present with it.
    pub fn converted(
        amount: Decimal,
        currency: impl Into<String>,
        converted_amount: Decimal,
        exchange_rate: Decimal,
        last_updated: DateTime<Utc>,
    ) -> Self {
        CurrencyAmount {
            amount,
            currency: currency.into(),
            converted_amount: Some(converted_amount),
            exchange_rate: Some(exchange_rate),
            last_updated: Some(last_updated),
        }
    }

    /// Builds an amount from an `f64` at the host boundary, rejecting
    /// NaN and infinities before they reach any calculation.
    pub fn from_f64(amount: f64, currency: &str) -> Result<Self> {
        if !amount.is_finite() {
            return Err(ValidationError::NonFiniteAmount(amount.to_string()).into());
        }
        validate_currency_code(currency)?;
        let amount = Decimal::from_f64(amount)
            .ok_or_else(|| ValidationError::InvalidInput(format!("unrepresentable amount {}", amount)))?;
        Ok(CurrencyAmount::new(amount, currency))
    }

    pub fn is_converted(&self) -> bool {
        self.converted_amount.is_some()
    }

    /// The converted amount when present, the native amount otherwise.
    /// Degraded (unconverted) results flow through aggregations at face
    /// value instead of failing them.
    pub fn effective_amount(&self) -> Decimal {
        self.converted_amount.unwrap_or(self.amount)
    }
}

/// Validates an ISO-4217 style currency code: exactly three alphabetic
/// characters. Minor-unit variants like `GBp` pass and are handled by
/// the registry's normalization rules.
pub fn validate_currency_code(code: &str) -> Result<()> {
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::InvalidCurrencyCode(code.to_string()).into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_has_no_conversion_state() {
        let amount = CurrencyAmount::new(dec!(100), "USD");
        assert!(!amount.is_converted());
        assert!(amount.exchange_rate.is_none());
        assert!(amount.last_updated.is_none());
        assert_eq!(amount.effective_amount(), dec!(100));
    }

    #[test]
    fn test_converted_carries_rate() {
        let amount = CurrencyAmount::converted(dec!(100), "EUR", dec!(92), dec!(0.92), Utc::now());
        assert!(amount.is_converted());
        assert_eq!(amount.exchange_rate, Some(dec!(0.92)));
        assert_eq!(amount.effective_amount(), dec!(92));
    }

    #[test]
    fn test_from_f64_rejects_non_finite() {
        assert!(CurrencyAmount::from_f64(f64::NAN, "USD").is_err());
        assert!(CurrencyAmount::from_f64(f64::INFINITY, "USD").is_err());
        assert!(CurrencyAmount::from_f64(f64::NEG_INFINITY, "USD").is_err());
        assert!(CurrencyAmount::from_f64(1234.56, "USD").is_ok());
    }

    #[test]
    fn test_validate_currency_code() {
        assert!(validate_currency_code("USD").is_ok());
        assert!(validate_currency_code("GBp").is_ok());
        assert!(validate_currency_code("US").is_err());
        assert!(validate_currency_code("USDX").is_err());
        assert!(validate_currency_code("U$D").is_err());
        assert!(validate_currency_code("").is_err());
    }

    #[test]
    fn test_serialization_skips_absent_conversion_fields() {
        let plain = CurrencyAmount::new(dec!(42.5), "CHF");
        let json = serde_json::to_value(&plain).unwrap();
        assert_eq!(json["currency"], "CHF");
        assert!(json.get("convertedAmount").is_none());
        assert!(json.get("exchangeRate").is_none());

        let converted =
            CurrencyAmount::converted(dec!(42.5), "USD", dec!(46.75), dec!(1.1), Utc::now());
        let json = serde_json::to_value(&converted).unwrap();
        assert!(json.get("convertedAmount").is_some());
        assert!(json.get("exchangeRate").is_some());
    }
}
