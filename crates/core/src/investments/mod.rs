//! Investments module - immutable holding snapshots.

mod investments_model;

pub use investments_model::Investment;
