//! Budget alert models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::CurrencyAmount;

/// Alert severity by budget utilization.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
    Danger,
}

/// Per-category spending against its configured limit. Spend and limit
/// may be tracked in different currencies; the generator converts the
/// spend into the limit currency before comparing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBudget {
    pub category_id: String,
    pub category_name: String,
    pub spent: CurrencyAmount,
    pub limit: CurrencyAmount,
}

/// One severity-tagged budget alert.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAlert {
    pub id: String,
    pub category_id: String,
    pub category_name: String,
    pub severity: AlertSeverity,
    pub percentage_used: Decimal,
    pub spent: CurrencyAmount,
    pub limit: CurrencyAmount,
    pub message: String,
}

/// Alerts plus the derived textual recommendations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAlertReport {
    pub alerts: Vec<BudgetAlert>,
    pub recommendations: Vec<String>,
    pub generated_at: DateTime<Utc>,
}
