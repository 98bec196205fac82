//! Loan domain models and amortization result shapes.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A fixed-rate loan snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub principal: Decimal,
    pub current_balance: Decimal,
    /// Nominal annual rate in percent, e.g. 5.5 for 5.5% p.a.
    pub annual_rate_percent: Decimal,
    pub term_months: u32,
    pub currency: String,
    pub start_date: Option<NaiveDate>,
}

/// One month of an amortization schedule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationEntry {
    pub payment_number: u32,
    pub principal_payment: Decimal,
    pub interest_payment: Decimal,
    pub remaining_balance: Decimal,
}

/// Host-facing amortization report. Field names are a stable contract
/// for the chart layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationResult {
    pub schedule: Vec<AmortizationEntry>,
    pub monthly_payment: Decimal,
    pub total_interest: Decimal,
    pub payoff_date: Option<NaiveDate>,
    pub total_payments: u32,
    pub paid_off: bool,
}

impl AmortizationResult {
    /// Report for a loan that is already settled, or whose schedule
    /// could not be computed: empty schedule, zero interest.
    pub fn settled() -> Self {
        AmortizationResult {
            schedule: Vec::new(),
            monthly_payment: Decimal::ZERO,
            total_interest: Decimal::ZERO,
            payoff_date: None,
            total_payments: 0,
            paid_off: true,
        }
    }

    pub fn empty() -> Self {
        AmortizationResult {
            paid_off: false,
            ..Self::settled()
        }
    }
}

/// One month of a loan projection in the user's base currency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoanProjectionEntry {
    pub month: u32,
    pub exchange_rate: Decimal,
    pub balance_native: Decimal,
    pub balance_converted: Decimal,
    pub payment_converted: Decimal,
    /// Balance at the anchor (month-zero) rate: what the converted
    /// balance would be if the exchange rate never moved.
    pub amortization_component: Decimal,
    /// Converted balance minus the amortization-only component.
    pub fx_impact: Decimal,
}

/// Multi-currency loan projection over a rolling horizon.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanProjection {
    pub loan_id: String,
    pub native_currency: String,
    pub base_currency: String,
    pub anchor_rate: Decimal,
    pub entries: Vec<LoanProjectionEntry>,
    /// Fx impact at the end of the horizon.
    pub total_fx_impact: Decimal,
}
