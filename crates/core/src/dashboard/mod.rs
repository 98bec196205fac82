//! Dashboard module - top-level metric aggregation.

mod dashboard_model;
mod dashboard_service;


pub use dashboard_model::{DashboardMetrics, GoalProgress};
pub use dashboard_service::{
    calculate_debt_to_income_ratio, calculate_goal_progress, calculate_savings_rate,
    financial_health_score, DashboardService,
};
