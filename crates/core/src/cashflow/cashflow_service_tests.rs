#[cfg(test)]
mod tests {
    use crate::cashflow::{monthly_equivalent, CashflowService, Expense, Frequency, Income};
    use crate::errors::Result;
    use crate::fx::FxServiceTrait;
    use crate::money::CurrencyAmount;
    use async_trait::async_trait;
    use chrono::Utc;
    use finboard_rates::{
        ExchangeRate, HistoricalExchangeRate, RateSource, SymbolSearchResult,
    };
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::sync::Arc;

    // --- Mock FxService with a fixed rate table ---
    struct FixedRateFx {
        rates: HashMap<(String, String), Decimal>,
    }

    impl FixedRateFx {
        fn new() -> Self {
            Self {
                rates: HashMap::new(),
            }
        }

        fn with_rate(mut self, from: &str, to: &str, rate: Decimal) -> Self {
            self.rates
                .insert((from.to_string(), to.to_string()), rate);
            self
        }
    }

    #[async_trait]
    impl FxServiceTrait for FixedRateFx {
        async fn get_rate(&self, from: &str, to: &str) -> Result<ExchangeRate> {
            if from == to {
                return Ok(ExchangeRate::identity(from));
            }
            let rate = self
                .rates
                .get(&(from.to_string(), to.to_string()))
                .copied()
                .unwrap_or(Decimal::ONE);
            Ok(ExchangeRate::new(from, to, rate, Utc::now(), RateSource::Manual).unwrap())
        }

        async fn get_historical_rates(
            &self,
            _from: &str,
            _to: &str,
            _days: i64,
        ) -> Result<Vec<HistoricalExchangeRate>> {
            Ok(Vec::new())
        }

        async fn convert_amount(
            &self,
            amount: Decimal,
            from: &str,
            to: &str,
        ) -> Result<CurrencyAmount> {
            if from == to {
                return Ok(CurrencyAmount::new(amount, to));
            }
            match self.rates.get(&(from.to_string(), to.to_string())) {
                Some(rate) => Ok(CurrencyAmount::converted(
                    amount,
                    to,
                    amount * rate,
                    *rate,
                    Utc::now(),
                )),
                None => Ok(CurrencyAmount::new(amount, from)),
            }
        }

        async fn convert_value(
            &self,
            value: &CurrencyAmount,
            to: &str,
        ) -> Result<CurrencyAmount> {
            self.convert_amount(value.amount, &value.currency, to).await
        }

        async fn convert_multiple_amounts(
            &self,
            values: &[CurrencyAmount],
            to: &str,
        ) -> Result<Vec<CurrencyAmount>> {
            let mut out = Vec::new();
            for value in values {
                out.push(self.convert_value(value, to).await?);
            }
            Ok(out)
        }

        async fn search_symbols(&self, _query: &str) -> Result<Vec<SymbolSearchResult>> {
            Ok(Vec::new())
        }
    }

    fn income(amount: Decimal, currency: &str, frequency: Frequency, is_active: bool) -> Income {
        Income {
            id: "inc-1".to_string(),
            user_id: "user-1".to_string(),
            source: "Salary".to_string(),
            amount,
            currency: currency.to_string(),
            frequency,
            is_active,
        }
    }

    fn expense(amount: Decimal, currency: &str, frequency: Frequency) -> Expense {
        Expense {
            id: "exp-1".to_string(),
            user_id: "user-1".to_string(),
            category: "Rent".to_string(),
            amount,
            currency: currency.to_string(),
            frequency,
        }
    }

    #[test]
    fn test_monthly_equivalent_multipliers() {
        assert_eq!(
            monthly_equivalent(dec!(1000), Frequency::Weekly),
            dec!(4330.00)
        );
        assert_eq!(monthly_equivalent(dec!(10), Frequency::Daily), dec!(304.40));
        assert_eq!(
            monthly_equivalent(dec!(100), Frequency::BiWeekly),
            dec!(217.00)
        );
        assert_eq!(monthly_equivalent(dec!(500), Frequency::Monthly), dec!(500));
        assert_eq!(monthly_equivalent(dec!(300), Frequency::Quarterly), dec!(100));
        assert_eq!(
            monthly_equivalent(dec!(60000), Frequency::Annually),
            dec!(5000)
        );
    }

    #[tokio::test]
    async fn test_income_filters_on_active_flag() {
        let service = CashflowService::new(Arc::new(FixedRateFx::new()));

        let incomes = vec![
            income(dec!(3000), "USD", Frequency::Monthly, true),
            income(dec!(9999), "USD", Frequency::Monthly, false),
        ];

        let total = service.total_monthly_income(&incomes, "USD").await.unwrap();
        assert_eq!(total, dec!(3000));
    }

    #[tokio::test]
    async fn test_expenses_have_no_active_filter() {
        let service = CashflowService::new(Arc::new(FixedRateFx::new()));

        let expenses = vec![
            expense(dec!(1200), "USD", Frequency::Monthly),
            expense(dec!(60), "USD", Frequency::Annually),
        ];

        let total = service
            .total_monthly_expenses(&expenses, "USD")
            .await
            .unwrap();
        assert_eq!(total, dec!(1205));
    }

    #[tokio::test]
    async fn test_income_converted_before_normalizing() {
        let fx = FixedRateFx::new().with_rate("EUR", "USD", dec!(1.10));
        let service = CashflowService::new(Arc::new(fx));

        let incomes = vec![income(dec!(1000), "EUR", Frequency::Weekly, true)];

        let total = service.total_monthly_income(&incomes, "USD").await.unwrap();
        // 1000 EUR -> 1100 USD per week -> x4.33
        assert_eq!(total, dec!(4763.00));
    }
}
