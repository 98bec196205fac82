//! Exposure module - currency exposure grouping and risk analysis.

mod exposure_constants;
mod exposure_model;
mod exposure_service;


pub use exposure_constants::*;
pub use exposure_model::{
    CurrencyExposure, CurrencyRiskAnalysis, CurrencyVolatility, HedgingSuggestion, RiskConfig,
    RiskLevel,
};
pub use exposure_service::ExposureService;
