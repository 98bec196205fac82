//! Fixed-payment amortization math and multi-currency projection.

use chrono::{Months, NaiveDate};
use log::{error, warn};
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use std::sync::Arc;

use super::loans_model::{
    AmortizationEntry, AmortizationResult, Loan, LoanProjection, LoanProjectionEntry,
};
use crate::constants::MAX_SCHEDULE_MONTHS;
use crate::errors::{CalculationError, Result};
use crate::fx::FxServiceTrait;

/// Balances below this are considered settled.
const BALANCE_EPSILON: Decimal = dec!(0.005);

/// Standard fixed-payment amortization formula
/// `P*r*(1+r)^n / ((1+r)^n - 1)` with `r = rate/100/12`, special-cased
/// to straight principal division when the rate is zero.
pub fn calculate_monthly_payment(
    principal: Decimal,
    annual_rate_percent: Decimal,
    term_months: u32,
) -> std::result::Result<Decimal, CalculationError> {
    if term_months == 0 {
        return Err(CalculationError::DivisionByZero(
            "loan term is zero months".to_string(),
        ));
    }
    if principal <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }

    let term = Decimal::from(term_months);

    if annual_rate_percent.is_zero() {
        return Ok((principal / term).round_dp(2));
    }

    let monthly_rate = annual_rate_percent / dec!(100) / dec!(12);
    let growth = (Decimal::ONE + monthly_rate)
        .checked_powi(term_months as i64)
        .ok_or_else(|| CalculationError::Overflow("amortization growth factor".to_string()))?;

    let denominator = growth - Decimal::ONE;
    if denominator.is_zero() {
        return Err(CalculationError::DivisionByZero(
            "degenerate amortization denominator".to_string(),
        ));
    }

    let payment = principal * monthly_rate * growth / denominator;
    Ok(payment.round_dp(2))
}

/// Iterates the schedule month by month. Interest accrues on the
/// running balance; the principal portion is capped by the remaining
/// balance so the final payment never drives it negative. Terminates
/// as soon as the balance reaches zero, which is before `term_months`
/// whenever the payment overshoots the required amount.
pub fn generate_amortization_schedule(
    principal: Decimal,
    annual_rate_percent: Decimal,
    term_months: u32,
    monthly_payment: Decimal,
) -> std::result::Result<Vec<AmortizationEntry>, CalculationError> {
    if principal <= Decimal::ZERO || monthly_payment <= Decimal::ZERO {
        return Ok(Vec::new());
    }

    let monthly_rate = annual_rate_percent / dec!(100) / dec!(12);
    let mut balance = principal;
    let mut schedule = Vec::with_capacity(term_months as usize);
    let mut payment_number = 0u32;

    while balance > BALANCE_EPSILON {
        payment_number += 1;
        if payment_number > MAX_SCHEDULE_MONTHS {
            warn!(
                "Amortization schedule truncated at {} months; payment {} barely covers interest",
                MAX_SCHEDULE_MONTHS, monthly_payment
            );
            break;
        }

        let interest = (balance * monthly_rate).round_dp(2);
        let principal_portion = (monthly_payment - interest).min(balance);
        if principal_portion <= Decimal::ZERO {
            return Err(CalculationError::Numeric(format!(
                "payment {} does not cover accruing interest {}",
                monthly_payment, interest
            )));
        }

        balance -= principal_portion;
        let remaining = balance.max(Decimal::ZERO).round_dp(2);

        schedule.push(AmortizationEntry {
            payment_number,
            principal_payment: principal_portion.round_dp(2),
            interest_payment: interest,
            remaining_balance: remaining,
        });

        balance = remaining;
    }

    Ok(schedule)
}

/// Sum of interest across a schedule.
pub fn calculate_total_interest(schedule: &[AmortizationEntry]) -> Decimal {
    schedule
        .iter()
        .map(|entry| entry.interest_payment)
        .sum::<Decimal>()
        .round_dp(2)
}

/// Schedule length in months added to the as-of date.
pub fn calculate_payoff_date(as_of: NaiveDate, months: u32) -> Option<NaiveDate> {
    as_of.checked_add_months(Months::new(months))
}

/// Loan calculations that need currency context.
pub struct LoanService {
    fx_service: Arc<dyn FxServiceTrait>,
}

impl LoanService {
    pub fn new(fx_service: Arc<dyn FxServiceTrait>) -> Self {
        Self { fx_service }
    }

    /// Full amortization report for a loan, in its native currency.
    ///
    /// A settled loan (balance at or below zero) short-circuits to an
    /// empty schedule with the paid-off signal; an unexpected numeric
    /// failure is logged and yields an empty result instead of failing
    /// the surrounding dashboard request.
    pub fn amortization_report(&self, loan: &Loan, as_of: NaiveDate) -> AmortizationResult {
        if loan.current_balance <= Decimal::ZERO {
            return AmortizationResult::settled();
        }

        match Self::build_report(loan, as_of) {
            Ok(result) => result,
            Err(e) => {
                error!("Amortization failed for loan {}: {}", loan.id, e);
                AmortizationResult::empty()
            }
        }
    }

    fn build_report(
        loan: &Loan,
        as_of: NaiveDate,
    ) -> std::result::Result<AmortizationResult, CalculationError> {
        let monthly_payment = calculate_monthly_payment(
            loan.current_balance,
            loan.annual_rate_percent,
            loan.term_months,
        )?;
        let schedule = generate_amortization_schedule(
            loan.current_balance,
            loan.annual_rate_percent,
            loan.term_months,
            monthly_payment,
        )?;

        let total_interest = calculate_total_interest(&schedule);
        let total_payments = schedule.len() as u32;
        let payoff_date = calculate_payoff_date(as_of, total_payments);

        Ok(AmortizationResult {
            schedule,
            monthly_payment,
            total_interest,
            payoff_date,
            total_payments,
            paid_off: false,
        })
    }

    /// Projects the loan's balance into the user's base currency over
    /// a rolling horizon, attributing each month's change to
    /// amortization vs. exchange-rate movement.
    ///
    /// `rate_scenario` supplies one rate per projected month; without
    /// it the projection holds the current spot rate flat, so the fx
    /// impact column stays zero by construction.
    pub async fn project_in_base_currency(
        &self,
        loan: &Loan,
        base_currency: &str,
        horizon_months: u32,
        rate_scenario: Option<&[Decimal]>,
    ) -> Result<LoanProjection> {
        let anchor_rate = if loan.currency == base_currency {
            Decimal::ONE
        } else {
            match self.fx_service.get_rate(&loan.currency, base_currency).await {
                Ok(rate) => rate.rate,
                Err(e) => {
                    warn!(
                        "No {}/{} rate for loan projection, assuming parity: {}",
                        loan.currency, base_currency, e
                    );
                    Decimal::ONE
                }
            }
        };

        let report = self.amortization_report(loan, chrono::Utc::now().date_naive());
        let horizon = horizon_months.min(report.schedule.len() as u32);

        let mut entries = Vec::with_capacity(horizon as usize);
        for entry in report.schedule.iter().take(horizon as usize) {
            let month = entry.payment_number;
            let rate = rate_scenario
                .and_then(|rates| rates.get((month - 1) as usize).copied())
                .unwrap_or(anchor_rate);

            let balance_converted = (entry.remaining_balance * rate).round_dp(2);
            let amortization_component = (entry.remaining_balance * anchor_rate).round_dp(2);

            entries.push(LoanProjectionEntry {
                month,
                exchange_rate: rate,
                balance_native: entry.remaining_balance,
                balance_converted,
                payment_converted: (report.monthly_payment * rate).round_dp(2),
                amortization_component,
                fx_impact: balance_converted - amortization_component,
            });
        }

        let total_fx_impact = entries
            .last()
            .map(|entry| entry.fx_impact)
            .unwrap_or(Decimal::ZERO);

        Ok(LoanProjection {
            loan_id: loan.id.clone(),
            native_currency: loan.currency.clone(),
            base_currency: base_currency.to_string(),
            anchor_rate,
            entries,
            total_fx_impact,
        })
    }
}
