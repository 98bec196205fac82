//! Generates severity-tagged budget alerts from per-category spending.

use chrono::Utc;
use log::warn;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use uuid::Uuid;

use super::budget_model::{AlertSeverity, BudgetAlert, BudgetAlertReport, CategoryBudget};
use crate::errors::Result;
use crate::fx::FxServiceTrait;

/// Utilization above which the single highest-spend category is called out.
const HIGH_UTILIZATION_THRESHOLD: Decimal = dec!(50);

/// Classifies budget utilization: `< 80 -> info`, `80..100 -> warning`,
/// `>= 100 -> danger`.
pub fn classify_utilization(percentage_used: Decimal) -> AlertSeverity {
    if percentage_used >= dec!(100) {
        AlertSeverity::Danger
    } else if percentage_used >= dec!(80) {
        AlertSeverity::Warning
    } else {
        AlertSeverity::Info
    }
}

/// Builds budget alerts and recommendations for one user's categories.
pub struct BudgetAlertService {
    fx_service: Arc<dyn FxServiceTrait>,
}

impl BudgetAlertService {
    pub fn new(fx_service: Arc<dyn FxServiceTrait>) -> Self {
        Self { fx_service }
    }

    /// Compares spending against limits (after conversion into each
    /// limit's currency) and emits severity-tagged alerts plus textual
    /// recommendations.
    pub async fn generate_alerts(&self, categories: &[CategoryBudget]) -> Result<BudgetAlertReport> {
        let mut alerts = Vec::with_capacity(categories.len());
        // (name, spend in limit currency, utilization, currencies differ)
        let mut utilization: Vec<(String, Decimal, Decimal, bool)> = Vec::new();

        for category in categories {
            let cross_currency = category.spent.currency != category.limit.currency;
            let spent_in_limit_currency = if cross_currency {
                let converted = self
                    .fx_service
                    .convert_value(&category.spent, &category.limit.currency)
                    .await?;
                if !converted.is_converted() {
                    warn!(
                        "Budget category {} compared without conversion ({} vs {})",
                        category.category_name,
                        category.spent.currency,
                        category.limit.currency
                    );
                }
                converted.effective_amount()
            } else {
                category.spent.amount
            };

            let percentage_used = if category.limit.amount > Decimal::ZERO {
                (spent_in_limit_currency / category.limit.amount * dec!(100)).round_dp(1)
            } else if spent_in_limit_currency > Decimal::ZERO {
                // No meaningful limit but money spent: treat as blown.
                dec!(100)
            } else {
                Decimal::ZERO
            };

            let severity = classify_utilization(percentage_used);
            let message = match severity {
                AlertSeverity::Danger => format!(
                    "{} is over budget: {}% of the limit used.",
                    category.category_name, percentage_used
                ),
                AlertSeverity::Warning => format!(
                    "{} is close to its limit: {}% used.",
                    category.category_name, percentage_used
                ),
                AlertSeverity::Info => format!(
                    "{} is within budget: {}% used.",
                    category.category_name, percentage_used
                ),
            };

            utilization.push((
                category.category_name.clone(),
                spent_in_limit_currency,
                percentage_used,
                cross_currency,
            ));
            alerts.push(BudgetAlert {
                id: Uuid::new_v4().to_string(),
                category_id: category.category_id.clone(),
                category_name: category.category_name.clone(),
                severity,
                percentage_used,
                spent: category.spent.clone(),
                limit: category.limit.clone(),
                message,
            });
        }

        let recommendations = Self::build_recommendations(&alerts, &utilization);

        Ok(BudgetAlertReport {
            alerts,
            recommendations,
            generated_at: Utc::now(),
        })
    }

    fn build_recommendations(
        alerts: &[BudgetAlert],
        utilization: &[(String, Decimal, Decimal, bool)],
    ) -> Vec<String> {
        let mut recommendations = Vec::new();

        let danger: Vec<&str> = alerts
            .iter()
            .filter(|alert| alert.severity == AlertSeverity::Danger)
            .map(|alert| alert.category_name.as_str())
            .collect();
        if !danger.is_empty() {
            recommendations.push(format!(
                "Over budget in: {}. Cut spending or raise the limits.",
                danger.join(", ")
            ));
        }

        let warning: Vec<&str> = alerts
            .iter()
            .filter(|alert| alert.severity == AlertSeverity::Warning)
            .map(|alert| alert.category_name.as_str())
            .collect();
        if !warning.is_empty() {
            recommendations.push(format!(
                "Approaching the limit in: {}. Watch these for the rest of the period.",
                warning.join(", ")
            ));
        }

        // Single biggest spender, when it has burned more than half its budget.
        if let Some((name, _, percentage, _)) = utilization
            .iter()
            .max_by(|a, b| a.1.cmp(&b.1))
            .filter(|(_, _, percentage, _)| *percentage > HIGH_UTILIZATION_THRESHOLD)
        {
            recommendations.push(format!(
                "{} is the largest spending category at {}% of its limit.",
                name, percentage
            ));
        }

        for (name, _, _, cross_currency) in utilization {
            if *cross_currency {
                recommendations.push(format!(
                    "{} tracks spending and limit in different currencies and is exposed to exchange-rate volatility.",
                    name
                ));
            }
        }

        recommendations
    }
}
