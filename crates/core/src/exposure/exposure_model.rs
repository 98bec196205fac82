//! Exposure and risk analysis models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::exposure_constants::{
    DEFAULT_DEVELOPED_CURRENCIES, DEFAULT_DIVERSIFICATION_SCORE_THRESHOLD,
    DEFAULT_RESERVE_CURRENCIES,
};
use crate::money::CurrencyAmount;

/// Currency risk tier from the static classification table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// One currency's share of the portfolio.
///
/// Exposures of one snapshot sum their `percentage` to 100 up to
/// rounding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyExposure {
    pub currency: String,
    pub total_value: CurrencyAmount,
    pub percentage: Decimal,
    pub risk_level: RiskLevel,
}

/// Trailing standard deviation of daily rate returns against the base
/// currency. `None` when not enough history was available.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyVolatility {
    pub currency: String,
    pub volatility_30d: Option<f64>,
    pub volatility_90d: Option<f64>,
    pub volatility_365d: Option<f64>,
}

/// A suggested partial hedge for one oversized foreign exposure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HedgingSuggestion {
    pub currency: String,
    pub exposure_percentage: Decimal,
    pub hedge_ratio: Decimal,
    /// In the base currency.
    pub suggested_hedge_amount: Decimal,
    pub rationale: String,
}

/// Result of one risk analysis run. Derived per request, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyRiskAnalysis {
    pub id: String,
    pub base_currency: String,
    pub risk_score: Decimal,
    pub exposures: Vec<CurrencyExposure>,
    pub volatility: Vec<CurrencyVolatility>,
    pub recommendations: Vec<String>,
    pub hedging_suggestions: Vec<HedgingSuggestion>,
    pub analyzed_at: DateTime<Utc>,
}

/// Risk analysis tuning. Configuration data rather than hardcoded
/// constants: tier tables and weights can be revised by the host
/// without code changes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RiskConfig {
    pub reserve_currencies: HashSet<String>,
    pub developed_currencies: HashSet<String>,
    pub concentration_weight: f64,
    pub foreign_weight: f64,
    pub volatility_weight: f64,
    pub diversification_score_threshold: f64,
    pub hedging_exposure_threshold: Decimal,
    /// Fraction of an exposure to hedge; clamped to [0.4, 0.6] at use.
    pub hedge_ratio: Decimal,
    pub volatility_score_scale: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            reserve_currencies: DEFAULT_RESERVE_CURRENCIES
                .iter()
                .map(|c| c.to_string())
                .collect(),
            developed_currencies: DEFAULT_DEVELOPED_CURRENCIES
                .iter()
                .map(|c| c.to_string())
                .collect(),
            concentration_weight: 0.40,
            foreign_weight: 0.35,
            volatility_weight: 0.25,
            diversification_score_threshold: DEFAULT_DIVERSIFICATION_SCORE_THRESHOLD,
            hedging_exposure_threshold: dec!(25),
            hedge_ratio: dec!(0.5),
            volatility_score_scale: 250.0,
        }
    }
}

impl RiskConfig {
    /// Static tier lookup: reserve -> low, developed -> medium,
    /// everything else -> high.
    pub fn classify(&self, currency: &str) -> RiskLevel {
        if self.reserve_currencies.contains(currency) {
            RiskLevel::Low
        } else if self.developed_currencies.contains(currency) {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    pub fn clamped_hedge_ratio(&self) -> Decimal {
        self.hedge_ratio.clamp(dec!(0.4), dec!(0.6))
    }
}
