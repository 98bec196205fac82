//! Goals module - savings goal snapshots.

mod goals_model;

pub use goals_model::Goal;
