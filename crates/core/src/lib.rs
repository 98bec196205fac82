//! Finboard Core - financial calculation engine.
//!
//! This crate contains the calculation core for the Finboard dashboard:
//! multi-currency conversion, currency exposure and risk analysis, loan
//! amortization, cashflow normalization, dashboard metric aggregation,
//! and budget alerts. It is persistence- and web-framework-agnostic:
//! collaborators hand it well-typed record snapshots and it hands back
//! JSON-serializable result shapes.

pub mod budget;
pub mod cashflow;
pub mod constants;
pub mod dashboard;
pub mod errors;
pub mod exposure;
pub mod fx;
pub mod goals;
pub mod investments;
pub mod loans;
pub mod money;

// Re-export error types
pub use errors::Error;
pub use errors::Result;

// Re-export the common value type
pub use money::CurrencyAmount;
