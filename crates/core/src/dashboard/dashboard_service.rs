//! Aggregates portfolio, cashflow, debt, and goals into dashboard metrics.

use chrono::Utc;
use log::error;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

use super::dashboard_model::{DashboardMetrics, GoalProgress};
use crate::cashflow::{CashflowService, Expense, Income};
use crate::errors::Result;
use crate::fx::FxServiceTrait;
use crate::goals::Goal;
use crate::investments::Investment;
use crate::loans::Loan;

/// `max(0, (income - expenses) / income * 100)`; zero when there is no
/// income or expenses exceed it.
pub fn calculate_savings_rate(monthly_income: Decimal, monthly_expenses: Decimal) -> Decimal {
    if monthly_income <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let rate = (monthly_income - monthly_expenses) / monthly_income * dec!(100);
    rate.max(Decimal::ZERO).round_dp(2)
}

/// Total debt over annualized income, as a percentage; zero when there
/// is no income.
pub fn calculate_debt_to_income_ratio(total_debt: Decimal, monthly_income: Decimal) -> Decimal {
    if monthly_income <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (total_debt / (monthly_income * dec!(12)) * dec!(100)).round_dp(2)
}

/// Progress per active goal, `min(100, current/target * 100)`; zero
/// for a zero target.
pub fn calculate_goal_progress(goals: &[Goal]) -> Vec<GoalProgress> {
    goals
        .iter()
        .filter(|goal| goal.is_active)
        .map(|goal| {
            let progress = if goal.target_amount <= Decimal::ZERO {
                Decimal::ZERO
            } else {
                (goal.current_amount / goal.target_amount * dec!(100))
                    .min(dec!(100))
                    .round_dp(1)
            };
            GoalProgress {
                goal_id: goal.id.clone(),
                title: goal.title.clone(),
                progress,
            }
        })
        .collect()
}

/// Additive 0-100 health score from four independently capped buckets:
/// savings rate (0-30), debt-to-income inverse (0-25), emergency-fund
/// months (0-25), and a flat bonus for holding any portfolio at all
/// (0-20). Fixed breakpoints per bucket.
pub fn financial_health_score(
    savings_rate: Decimal,
    debt_to_income_ratio: Decimal,
    emergency_fund_months: Decimal,
    has_portfolio: bool,
) -> Decimal {
    let savings_points = if savings_rate >= dec!(20) {
        dec!(30)
    } else if savings_rate >= dec!(10) {
        dec!(20)
    } else if savings_rate >= dec!(5) {
        dec!(10)
    } else {
        Decimal::ZERO
    };

    let debt_points = if debt_to_income_ratio <= Decimal::ZERO {
        dec!(25)
    } else if debt_to_income_ratio < dec!(15) {
        dec!(20)
    } else if debt_to_income_ratio < dec!(30) {
        dec!(15)
    } else if debt_to_income_ratio < dec!(40) {
        dec!(10)
    } else if debt_to_income_ratio < dec!(50) {
        dec!(5)
    } else {
        Decimal::ZERO
    };

    let emergency_points = if emergency_fund_months >= dec!(6) {
        dec!(25)
    } else if emergency_fund_months >= dec!(3) {
        dec!(15)
    } else if emergency_fund_months >= dec!(1) {
        dec!(5)
    } else {
        Decimal::ZERO
    };

    let portfolio_points = if has_portfolio { dec!(20) } else { Decimal::ZERO };

    savings_points + debt_points + emergency_points + portfolio_points
}

/// Computes the full dashboard metric set for one request.
pub struct DashboardService {
    fx_service: Arc<dyn FxServiceTrait>,
    cashflow_service: CashflowService,
}

impl DashboardService {
    pub fn new(fx_service: Arc<dyn FxServiceTrait>) -> Self {
        Self {
            cashflow_service: CashflowService::new(Arc::clone(&fx_service)),
            fx_service,
        }
    }

    /// Composes all dashboard metrics in the base currency. An
    /// unexpected calculation failure is logged and yields zeroed
    /// metrics rather than failing the request.
    #[allow(clippy::too_many_arguments)]
    pub async fn calculate_dashboard_metrics(
        &self,
        investments: &[Investment],
        incomes: &[Income],
        expenses: &[Expense],
        loans: &[Loan],
        goals: &[Goal],
        cash_savings: Decimal,
        base_currency: &str,
    ) -> DashboardMetrics {
        match self
            .compute(
                investments,
                incomes,
                expenses,
                loans,
                goals,
                cash_savings,
                base_currency,
            )
            .await
        {
            Ok(metrics) => metrics,
            Err(e) => {
                error!("Dashboard metrics failed, returning zeroed result: {}", e);
                DashboardMetrics::zeroed(base_currency)
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    async fn compute(
        &self,
        investments: &[Investment],
        incomes: &[Income],
        expenses: &[Expense],
        loans: &[Loan],
        goals: &[Goal],
        cash_savings: Decimal,
        base_currency: &str,
    ) -> Result<DashboardMetrics> {
        let mut portfolio_value = Decimal::ZERO;
        for investment in investments {
            let value = self
                .fx_service
                .convert_amount(investment.market_value(), &investment.currency, base_currency)
                .await?;
            portfolio_value += value.effective_amount();
        }

        let mut total_debt = Decimal::ZERO;
        for loan in loans {
            let balance = loan.current_balance.max(Decimal::ZERO);
            if balance > Decimal::ZERO {
                let value = self
                    .fx_service
                    .convert_amount(balance, &loan.currency, base_currency)
                    .await?;
                total_debt += value.effective_amount();
            }
        }

        let monthly_income = self
            .cashflow_service
            .total_monthly_income(incomes, base_currency)
            .await?;
        let monthly_expenses = self
            .cashflow_service
            .total_monthly_expenses(expenses, base_currency)
            .await?;

        let net_worth = portfolio_value + cash_savings - total_debt;
        let savings_rate = calculate_savings_rate(monthly_income, monthly_expenses);
        let debt_to_income_ratio = calculate_debt_to_income_ratio(total_debt, monthly_income);
        let goal_progress = calculate_goal_progress(goals);

        let emergency_fund_months = if monthly_expenses > Decimal::ZERO {
            portfolio_value / monthly_expenses
        } else if portfolio_value > Decimal::ZERO {
            dec!(6)
        } else {
            Decimal::ZERO
        };

        let financial_health_score = financial_health_score(
            savings_rate,
            debt_to_income_ratio,
            emergency_fund_months,
            portfolio_value > Decimal::ZERO,
        );

        Ok(DashboardMetrics {
            base_currency: base_currency.to_string(),
            portfolio_value: portfolio_value.round_dp(2),
            cash_savings: cash_savings.round_dp(2),
            total_debt: total_debt.round_dp(2),
            monthly_income: monthly_income.round_dp(2),
            monthly_expenses: monthly_expenses.round_dp(2),
            net_worth: net_worth.round_dp(2),
            savings_rate,
            debt_to_income_ratio,
            goal_progress,
            financial_health_score,
            as_of: Utc::now(),
        })
    }
}
