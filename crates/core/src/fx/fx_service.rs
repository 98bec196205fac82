use async_trait::async_trait;
use chrono::Utc;
use futures::TryStreamExt;
use log::{debug, warn};
use rust_decimal::Decimal;
use std::sync::Arc;

use finboard_rates::{ExchangeRate, HistoricalExchangeRate, RateService, SymbolSearchResult};

use super::fx_errors::FxError;
use super::fx_traits::FxServiceTrait;
use crate::errors::Result;
use crate::money::{
    denormalization_multiplier, normalize_currency_code, validate_currency_code, CurrencyAmount,
};

/// Currency conversion service over the injected rate cache.
#[derive(Clone)]
pub struct FxService {
    rates: Arc<dyn RateService>,
}

impl FxService {
    pub fn new(rates: Arc<dyn RateService>) -> Self {
        Self { rates }
    }

    /// Maps a possibly minor-unit pair onto major codes plus the
    /// multipliers that carry amounts across the quote styles.
    fn normalize_currency_pair<'a>(
        from_currency: &'a str,
        to_currency: &'a str,
    ) -> (&'a str, &'a str, Decimal, Decimal) {
        let normalized_from = normalize_currency_code(from_currency);
        let normalized_to = normalize_currency_code(to_currency);

        let source_multiplier = if normalized_from == from_currency {
            Decimal::ONE
        } else {
            Decimal::ONE / denormalization_multiplier(from_currency)
        };

        let target_multiplier = denormalization_multiplier(to_currency);

        (
            normalized_from,
            normalized_to,
            source_multiplier,
            target_multiplier,
        )
    }
}

#[async_trait]
impl FxServiceTrait for FxService {
    async fn get_rate(&self, from: &str, to: &str) -> Result<ExchangeRate> {
        validate_currency_code(from)?;
        validate_currency_code(to)?;

        let normalized_from = normalize_currency_code(from);
        let normalized_to = normalize_currency_code(to);

        // Minor-unit pairs resolve to their major-pair record; the
        // conversion entry points compose the unit multipliers.
        let rate = self
            .rates
            .get_rate(normalized_from, normalized_to)
            .await
            .map_err(FxError::from)?;
        Ok(rate)
    }

    async fn get_historical_rates(
        &self,
        from: &str,
        to: &str,
        days: i64,
    ) -> Result<Vec<HistoricalExchangeRate>> {
        validate_currency_code(from)?;
        validate_currency_code(to)?;

        let normalized_from = normalize_currency_code(from).to_string();
        let normalized_to = normalize_currency_code(to).to_string();

        let end = Utc::now().date_naive();
        let start = end - chrono::Duration::days(days.max(0));

        let rates = self
            .rates
            .historical_rates(&normalized_from, &normalized_to, start, end)
            .try_collect()
            .await
            .map_err(FxError::from)?;
        Ok(rates)
    }

    async fn convert_amount(
        &self,
        amount: Decimal,
        from: &str,
        to: &str,
    ) -> Result<CurrencyAmount> {
        validate_currency_code(from)?;
        validate_currency_code(to)?;

        if from == to {
            return Ok(CurrencyAmount::new(amount, to));
        }

        let (normalized_from, normalized_to, source_multiplier, target_multiplier) =
            Self::normalize_currency_pair(from, to);

        // Same major currency in different quote units: pure scaling.
        if normalized_from == normalized_to {
            let rate = source_multiplier * target_multiplier;
            return Ok(CurrencyAmount::converted(
                amount,
                to,
                amount * rate,
                rate,
                Utc::now(),
            ));
        }

        match self.rates.get_rate(normalized_from, normalized_to).await {
            Ok(exchange) => {
                let rate = source_multiplier * exchange.rate * target_multiplier;
                Ok(CurrencyAmount::converted(
                    amount,
                    to,
                    amount * rate,
                    rate,
                    Utc::now(),
                ))
            }
            Err(e) => {
                // Degraded but well-typed: the original amount keeps its
                // source currency so downstream can tell "unconverted".
                warn!(
                    "Conversion {}->{} unavailable, returning original amount: {}",
                    from, to, e
                );
                Ok(CurrencyAmount::new(amount, from))
            }
        }
    }

    async fn convert_value(&self, value: &CurrencyAmount, to: &str) -> Result<CurrencyAmount> {
        self.convert_amount(value.amount, &value.currency, to).await
    }

    async fn convert_multiple_amounts(
        &self,
        values: &[CurrencyAmount],
        to: &str,
    ) -> Result<Vec<CurrencyAmount>> {
        let mut converted = Vec::with_capacity(values.len());

        for value in values {
            match self.convert_value(value, to).await {
                Ok(result) => converted.push(result),
                Err(e) => {
                    // Per-item isolation: a malformed element stays
                    // unconverted instead of aborting the batch.
                    warn!(
                        "Batch conversion of {} {} failed, keeping original: {}",
                        value.amount, value.currency, e
                    );
                    converted.push(CurrencyAmount::new(value.amount, value.currency.clone()));
                }
            }
        }

        debug!("Converted batch of {} amounts to {}", converted.len(), to);
        Ok(converted)
    }

    async fn search_symbols(&self, query: &str) -> Result<Vec<SymbolSearchResult>> {
        let results = self
            .rates
            .search_symbols(query)
            .await
            .map_err(FxError::from)?;
        Ok(results)
    }
}
