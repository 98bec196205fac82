#[cfg(test)]
mod tests {
    use crate::fx::{FxService, FxServiceTrait};
    use crate::money::CurrencyAmount;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use finboard_rates::{
        ExchangeRate, HistoricalExchangeRate, ManualRateProvider, RateCache, RateError,
        RateService, SymbolSearchResult,
    };
    use futures::stream::{self, BoxStream, StreamExt};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn service_with_rates(rates: &[(&str, &str, Decimal)]) -> FxService {
        let mut provider = ManualRateProvider::new();
        for (from, to, rate) in rates {
            provider = provider.with_rate(from, to, *rate);
        }
        FxService::new(Arc::new(RateCache::new(Arc::new(provider))))
    }

    type RateResult<T> = std::result::Result<T, RateError>;

    /// Rate service that is always down.
    struct DownRateService;

    #[async_trait]
    impl RateService for DownRateService {
        async fn get_rate(&self, from: &str, to: &str) -> RateResult<ExchangeRate> {
            Err(RateError::RateUnavailable {
                from: from.to_string(),
                to: to.to_string(),
            })
        }

        fn historical_rates(
            &self,
            _from: &str,
            _to: &str,
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> BoxStream<'static, RateResult<HistoricalExchangeRate>> {
            stream::empty().boxed()
        }

        async fn search_symbols(&self, _query: &str) -> RateResult<Vec<SymbolSearchResult>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_identity_conversion_has_no_rate_fields() {
        let service = service_with_rates(&[]);

        let result = service
            .convert_amount(dec!(123.45), "USD", "USD")
            .await
            .unwrap();

        assert_eq!(result.amount, dec!(123.45));
        assert_eq!(result.currency, "USD");
        assert!(result.converted_amount.is_none());
        assert!(result.exchange_rate.is_none());
        assert!(result.last_updated.is_none());
    }

    #[tokio::test]
    async fn test_conversion_applies_rate() {
        let service = service_with_rates(&[("USD", "EUR", dec!(0.92))]);

        let result = service
            .convert_amount(dec!(100), "USD", "EUR")
            .await
            .unwrap();

        assert_eq!(result.currency, "EUR");
        assert_eq!(result.amount, dec!(100));
        assert_eq!(result.converted_amount, Some(dec!(92.00)));
        assert_eq!(result.exchange_rate, Some(dec!(0.92)));
        assert!(result.last_updated.is_some());
    }

    #[tokio::test]
    async fn test_conversion_is_linear() {
        let service = service_with_rates(&[("USD", "EUR", dec!(0.87321))]);

        let single = service
            .convert_amount(dec!(17.5), "USD", "EUR")
            .await
            .unwrap();
        let scaled = service
            .convert_amount(dec!(87.5), "USD", "EUR")
            .await
            .unwrap();

        assert_eq!(
            scaled.converted_amount.unwrap(),
            single.converted_amount.unwrap() * dec!(5)
        );
    }

    #[tokio::test]
    async fn test_round_trip_conversion_approximately_inverts() {
        let service = service_with_rates(&[("USD", "EUR", dec!(0.92))]);

        let there = service
            .convert_amount(dec!(100), "USD", "EUR")
            .await
            .unwrap();
        let back = service
            .convert_amount(there.converted_amount.unwrap(), "EUR", "USD")
            .await
            .unwrap();

        let round_trip = back.converted_amount.unwrap();
        assert!((round_trip - dec!(100)).abs() < dec!(0.0001));
    }

    #[tokio::test]
    async fn test_provider_failure_degrades_to_source_amount() {
        let service = FxService::new(Arc::new(DownRateService));

        let result = service
            .convert_amount(dec!(250), "USD", "EUR")
            .await
            .unwrap();

        // Original amount, tagged with the *source* currency, no rate fields.
        assert_eq!(result.amount, dec!(250));
        assert_eq!(result.currency, "USD");
        assert!(!result.is_converted());
    }

    #[tokio::test]
    async fn test_invalid_currency_code_is_rejected() {
        let service = service_with_rates(&[]);

        assert!(service.convert_amount(dec!(1), "US", "EUR").await.is_err());
        assert!(service
            .convert_amount(dec!(1), "USD", "EURO")
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_batch_preserves_order_and_isolates_failures() {
        let service = service_with_rates(&[("USD", "EUR", dec!(0.92)), ("GBP", "EUR", dec!(1.17))]);

        let inputs = vec![
            CurrencyAmount::new(dec!(100), "USD"),
            // No CHF rate configured: this element degrades, the batch survives.
            CurrencyAmount::new(dec!(50), "CHF"),
            CurrencyAmount::new(dec!(10), "GBP"),
        ];

        let results = service
            .convert_multiple_amounts(&inputs, "EUR")
            .await
            .unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].converted_amount, Some(dec!(92.00)));
        assert_eq!(results[1].currency, "CHF");
        assert!(!results[1].is_converted());
        assert_eq!(results[2].converted_amount, Some(dec!(11.70)));
    }

    #[tokio::test]
    async fn test_minor_unit_quote_converts_through_major_pair() {
        let service = service_with_rates(&[("GBP", "USD", dec!(1.25))]);

        // 150 pence -> GBP is pure scaling, no rate lookup needed.
        let pence_to_pound = service
            .convert_amount(dec!(150), "GBp", "GBP")
            .await
            .unwrap();
        assert_eq!(pence_to_pound.converted_amount, Some(dec!(1.50)));

        // 200 pence -> USD goes through the GBP/USD rate.
        let pence_to_usd = service
            .convert_amount(dec!(200), "GBp", "USD")
            .await
            .unwrap();
        assert_eq!(pence_to_usd.converted_amount, Some(dec!(2.5000)));
    }
}
