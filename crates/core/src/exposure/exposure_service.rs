//! Currency exposure grouping and portfolio risk scoring.

use chrono::Utc;
use log::warn;
use num_traits::ToPrimitive;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

use super::exposure_model::{
    CurrencyExposure, CurrencyRiskAnalysis, CurrencyVolatility, HedgingSuggestion, RiskConfig,
};
use crate::errors::Result;
use crate::fx::FxServiceTrait;
use crate::investments::Investment;
use crate::money::round_for_currency;

/// Trading days per year, for annualizing daily volatility.
const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Groups holdings by currency and scores the resulting exposure.
pub struct ExposureService {
    fx_service: Arc<dyn FxServiceTrait>,
    config: RiskConfig,
}

impl ExposureService {
    pub fn new(fx_service: Arc<dyn FxServiceTrait>) -> Self {
        Self::with_config(fx_service, RiskConfig::default())
    }

    pub fn with_config(fx_service: Arc<dyn FxServiceTrait>, config: RiskConfig) -> Self {
        Self { fx_service, config }
    }

    /// Groups holdings by native currency, values each group in the
    /// base currency, and assigns static risk tiers. Output is sorted
    /// by descending percentage; percentages sum to 100 up to rounding.
    pub async fn calculate_currency_exposure(
        &self,
        investments: &[Investment],
        base_currency: &str,
    ) -> Result<Vec<CurrencyExposure>> {
        let mut native_totals: BTreeMap<String, Decimal> = BTreeMap::new();
        for investment in investments {
            *native_totals
                .entry(investment.currency.clone())
                .or_default() += investment.market_value();
        }

        let mut groups = Vec::with_capacity(native_totals.len());
        for (currency, native_total) in native_totals {
            let total_value = self
                .fx_service
                .convert_amount(native_total, &currency, base_currency)
                .await?;
            groups.push((currency, total_value));
        }

        let grand_total: Decimal = groups
            .iter()
            .map(|(_, value)| value.effective_amount())
            .sum();
        if grand_total <= Decimal::ZERO {
            return Ok(Vec::new());
        }

        let mut exposures: Vec<CurrencyExposure> = groups
            .into_iter()
            .map(|(currency, total_value)| {
                let percentage =
                    (total_value.effective_amount() / grand_total * dec!(100)).round_dp(2);
                let risk_level = self.config.classify(&currency);
                CurrencyExposure {
                    currency,
                    total_value,
                    percentage,
                    risk_level,
                }
            })
            .collect();

        exposures.sort_by(|a, b| {
            b.percentage
                .cmp(&a.percentage)
                .then_with(|| a.currency.cmp(&b.currency))
        });

        Ok(exposures)
    }

    /// Scores overall currency risk 0-100 from concentration, foreign
    /// share, and observed volatility, and derives recommendations and
    /// hedging suggestions.
    pub async fn analyze_currency_risk(
        &self,
        investments: &[Investment],
        base_currency: &str,
    ) -> Result<CurrencyRiskAnalysis> {
        let exposures = self
            .calculate_currency_exposure(investments, base_currency)
            .await?;

        if exposures.is_empty() {
            return Ok(CurrencyRiskAnalysis {
                id: Uuid::new_v4().to_string(),
                base_currency: base_currency.to_string(),
                risk_score: Decimal::ZERO,
                exposures,
                volatility: Vec::new(),
                recommendations: vec!["No holdings to analyze.".to_string()],
                hedging_suggestions: Vec::new(),
                analyzed_at: Utc::now(),
            });
        }

        let concentration = herfindahl(&exposures);
        let foreign_percentage: f64 = exposures
            .iter()
            .filter(|exposure| exposure.currency != base_currency)
            .map(|exposure| exposure.percentage.to_f64().unwrap_or(0.0))
            .sum();

        let mut volatility = Vec::new();
        for exposure in exposures.iter().filter(|e| e.currency != base_currency) {
            volatility.push(
                self.currency_volatility(&exposure.currency, base_currency)
                    .await,
            );
        }

        let volatility_component = self.volatility_component(&volatility);
        let score = (self.config.concentration_weight * concentration * 100.0
            + self.config.foreign_weight * foreign_percentage
            + self.config.volatility_weight * volatility_component)
            .clamp(0.0, 100.0);
        let risk_score = Decimal::from_f64(score).unwrap_or_default().round_dp(1);

        let mut recommendations = Vec::new();
        if score > self.config.diversification_score_threshold {
            recommendations.push(
                "Currency risk is elevated; consider spreading holdings across more currencies."
                    .to_string(),
            );
        }

        let mut hedging_suggestions = Vec::new();
        let hedge_ratio = self.config.clamped_hedge_ratio();
        for exposure in exposures.iter().filter(|e| {
            e.currency != base_currency && e.percentage > self.config.hedging_exposure_threshold
        }) {
            recommendations.push(format!(
                "{}% of the portfolio is denominated in {}; consider hedging part of this exposure.",
                exposure.percentage, exposure.currency
            ));
            let suggested_hedge_amount = round_for_currency(
                exposure.total_value.effective_amount() * hedge_ratio,
                base_currency,
            );
            hedging_suggestions.push(HedgingSuggestion {
                currency: exposure.currency.clone(),
                exposure_percentage: exposure.percentage,
                hedge_ratio,
                suggested_hedge_amount,
                rationale: format!(
                    "Hedging {}% of the {} exposure caps downside from {}/{} swings while keeping upside participation.",
                    hedge_ratio * dec!(100),
                    exposure.currency,
                    exposure.currency,
                    base_currency
                ),
            });
        }

        if recommendations.is_empty() {
            recommendations
                .push("Currency exposure is well balanced; no action needed.".to_string());
        }

        Ok(CurrencyRiskAnalysis {
            id: Uuid::new_v4().to_string(),
            base_currency: base_currency.to_string(),
            risk_score,
            exposures,
            volatility,
            recommendations,
            hedging_suggestions,
            analyzed_at: Utc::now(),
        })
    }

    async fn currency_volatility(&self, currency: &str, base_currency: &str) -> CurrencyVolatility {
        match self
            .fx_service
            .get_historical_rates(currency, base_currency, 365)
            .await
        {
            Ok(rates) => {
                let closes: Vec<f64> = rates.iter().filter_map(|r| r.rate.to_f64()).collect();
                CurrencyVolatility {
                    currency: currency.to_string(),
                    volatility_30d: trailing_volatility(&closes, 30),
                    volatility_90d: trailing_volatility(&closes, 90),
                    volatility_365d: trailing_volatility(&closes, 365),
                }
            }
            Err(e) => {
                warn!(
                    "No rate history for {}/{}, volatility omitted from risk score: {}",
                    currency, base_currency, e
                );
                CurrencyVolatility {
                    currency: currency.to_string(),
                    volatility_30d: None,
                    volatility_90d: None,
                    volatility_365d: None,
                }
            }
        }
    }

    fn volatility_component(&self, volatility: &[CurrencyVolatility]) -> f64 {
        let observed: Vec<f64> = volatility
            .iter()
            .filter_map(|v| {
                v.volatility_30d
                    .or(v.volatility_90d)
                    .or(v.volatility_365d)
            })
            .collect();

        if observed.is_empty() {
            return 0.0;
        }

        let average = observed.iter().sum::<f64>() / observed.len() as f64;
        let annualized = average * TRADING_DAYS_PER_YEAR.sqrt();
        (annualized * self.config.volatility_score_scale).min(100.0)
    }
}

/// Herfindahl-style concentration: sum of squared shares, in [1/n, 1].
fn herfindahl(exposures: &[CurrencyExposure]) -> f64 {
    exposures
        .iter()
        .map(|exposure| {
            let share = exposure.percentage.to_f64().unwrap_or(0.0) / 100.0;
            share * share
        })
        .sum()
}

/// Sample standard deviation of daily returns over the trailing
/// `window` observations. `None` below the minimum sample size.
fn trailing_volatility(closes: &[f64], window: usize) -> Option<f64> {
    let tail = if closes.len() > window {
        &closes[closes.len() - window..]
    } else {
        closes
    };
    if tail.len() < 3 {
        return None;
    }

    let returns: Vec<f64> = tail
        .windows(2)
        .filter(|pair| pair[0] != 0.0)
        .map(|pair| pair[1] / pair[0] - 1.0)
        .collect();
    if returns.len() < 2 {
        return None;
    }

    let mean = returns.iter().sum::<f64>() / returns.len() as f64;
    let variance = returns
        .iter()
        .map(|r| (r - mean) * (r - mean))
        .sum::<f64>()
        / (returns.len() - 1) as f64;
    Some(variance.sqrt())
}
