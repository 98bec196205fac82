//! FX (Foreign Exchange) module - conversion service over the rate cache.

mod fx_errors;
mod fx_service;
mod fx_traits;

#[cfg(test)]
mod fx_service_tests;

pub use fx_errors::FxError;
pub use fx_service::FxService;
pub use fx_traits::FxServiceTrait;
