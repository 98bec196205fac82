//! Dashboard metric result shapes.
//!
//! Derived per request and never stored. Field names are a stable
//! contract consumed by the chart layer.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Progress toward one active goal, capped at 100%.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub goal_id: String,
    pub title: String,
    pub progress: Decimal,
}

/// Aggregated dashboard metrics in the user's base currency.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub base_currency: String,
    pub portfolio_value: Decimal,
    pub cash_savings: Decimal,
    pub total_debt: Decimal,
    pub monthly_income: Decimal,
    pub monthly_expenses: Decimal,
    pub net_worth: Decimal,
    pub savings_rate: Decimal,
    pub debt_to_income_ratio: Decimal,
    pub goal_progress: Vec<GoalProgress>,
    pub financial_health_score: Decimal,
    pub as_of: DateTime<Utc>,
}

impl DashboardMetrics {
    /// All-zero metrics, used when an unexpected calculation failure
    /// must not take the dashboard down.
    pub fn zeroed(base_currency: &str) -> Self {
        DashboardMetrics {
            base_currency: base_currency.to_string(),
            portfolio_value: Decimal::ZERO,
            cash_savings: Decimal::ZERO,
            total_debt: Decimal::ZERO,
            monthly_income: Decimal::ZERO,
            monthly_expenses: Decimal::ZERO,
            net_worth: Decimal::ZERO,
            savings_rate: Decimal::ZERO,
            debt_to_income_ratio: Decimal::ZERO,
            goal_progress: Vec::new(),
            financial_health_score: Decimal::ZERO,
            as_of: Utc::now(),
        }
    }
}
