//! Finboard Rates Crate
//!
//! Provider-agnostic exchange-rate fetching and caching for the Finboard
//! calculation core.
//!
//! # Overview
//!
//! The rates crate supports:
//! - Latest and historical FX rates from pluggable providers
//! - A process-wide TTL cache with per-pair request coalescing
//! - Stale-rate fallback when the upstream provider is unavailable
//! - Currency symbol search passthrough
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |  Calculation     | --> |   RateService    |  (cache-facing contract)
//! |  core (fx)       |     +------------------+
//! +------------------+              |
//!                                   v
//!                           +------------------+
//!                           |    RateCache     |  (TTL + coalescing)
//!                           +------------------+
//!                                   |
//!                                   v
//!                           +------------------+
//!                           |   RateProvider   |  (Frankfurter, Manual)
//!                           +------------------+
//!                                   |
//!                                   v
//!                           +------------------+
//!                           |  ExchangeRate    |  (rate data)
//!                           +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`ExchangeRate`] - A single currency-pair rate observation
//! - [`HistoricalExchangeRate`] - A rate pinned to a calendar day
//! - [`SymbolSearchResult`] - Provider search passthrough shape
//! - [`RateSource`] - Where a rate came from
//!
//! Identity pairs short-circuit to rate 1 inside the cache and never
//! reach a provider or the cache storage.

pub mod cache;
pub mod errors;
pub mod models;
pub mod provider;

pub use cache::{RateCache, RateCacheConfig, RateService};
pub use errors::{RateError, RetryClass};
pub use models::{ExchangeRate, HistoricalExchangeRate, RateSource, SymbolSearchResult};
pub use provider::{FrankfurterProvider, ManualRateProvider, RateProvider};
