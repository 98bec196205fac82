//! Cashflow module - income/expense records and monthly normalization.

mod cashflow_model;
mod cashflow_service;

#[cfg(test)]
mod cashflow_service_tests;

pub use cashflow_model::{Expense, Frequency, Income};
pub use cashflow_service::{monthly_equivalent, CashflowService};
