//! Normalizes heterogeneous payment frequencies into monthly figures.

use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

use super::cashflow_model::{Expense, Frequency, Income};
use crate::errors::Result;
use crate::fx::FxServiceTrait;

/// Converts an amount at the given cadence into its monthly
/// equivalent using fixed calendar-average multipliers.
pub fn monthly_equivalent(amount: Decimal, frequency: Frequency) -> Decimal {
    match frequency {
        Frequency::Daily => amount * dec!(30.44),
        Frequency::Weekly => amount * dec!(4.33),
        Frequency::BiWeekly => amount * dec!(2.17),
        Frequency::Monthly => amount,
        // Implemented as divisions so exact thirds and twelfths hold.
        Frequency::Quarterly => amount / dec!(3),
        Frequency::Annually => amount / dec!(12),
    }
}

/// Aggregates incomes and expenses into base-currency monthly totals.
pub struct CashflowService {
    fx_service: Arc<dyn FxServiceTrait>,
}

impl CashflowService {
    pub fn new(fx_service: Arc<dyn FxServiceTrait>) -> Self {
        Self { fx_service }
    }

    /// Monthly-equivalent income in the base currency.
    ///
    /// Only incomes flagged active are counted while expenses have no
    /// such flag; the asymmetry is intentional product behavior.
    pub async fn total_monthly_income(
        &self,
        incomes: &[Income],
        base_currency: &str,
    ) -> Result<Decimal> {
        let mut total = Decimal::ZERO;

        for income in incomes.iter().filter(|income| income.is_active) {
            let converted = self
                .fx_service
                .convert_amount(income.amount, &income.currency, base_currency)
                .await?;
            total += monthly_equivalent(converted.effective_amount(), income.frequency);
        }

        debug!("Total monthly income: {} {}", total, base_currency);
        Ok(total)
    }

    /// Monthly-equivalent expenses in the base currency. Every expense
    /// record counts.
    pub async fn total_monthly_expenses(
        &self,
        expenses: &[Expense],
        base_currency: &str,
    ) -> Result<Decimal> {
        let mut total = Decimal::ZERO;

        for expense in expenses {
            let converted = self
                .fx_service
                .convert_amount(expense.amount, &expense.currency, base_currency)
                .await?;
            total += monthly_equivalent(converted.effective_amount(), expense.frequency);
        }

        debug!("Total monthly expenses: {} {}", total, base_currency);
        Ok(total)
    }
}
