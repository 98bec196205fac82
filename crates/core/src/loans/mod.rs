//! Loans module - amortization engine and multi-currency projection.

mod loans_model;
mod loans_service;


pub use loans_model::{
    AmortizationEntry, AmortizationResult, Loan, LoanProjection, LoanProjectionEntry,
};
pub use loans_service::{
    calculate_monthly_payment, calculate_payoff_date, calculate_total_interest,
    generate_amortization_schedule, LoanService,
};
