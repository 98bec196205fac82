//! Core error types for the Finboard calculation engine.
//!
//! The taxonomy follows the availability-first design of the dashboard:
//! rate unavailability degrades to unconverted amounts, validation
//! failures reject the input before computation, and unexpected numeric
//! failures are caught at result boundaries and turned into
//! empty/zeroed result shapes instead of failing the whole request.

use thiserror::Error;

use crate::fx::FxError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the calculation core.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Fx error: {0}")]
    Fx(#[from] FxError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Calculation failed: {0}")]
    Calculation(#[from] CalculationError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Validation errors for caller-supplied input.
///
/// Surfaced as a client error by the web layer; nothing is computed
/// from an input that fails validation.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid currency code: {0}")]
    InvalidCurrencyCode(String),

    #[error("Amount is not a finite number: {0}")]
    NonFiniteAmount(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),
}

/// Unexpected numeric failures inside a calculation.
///
/// Caught locally by the owning service, logged, and converted into an
/// empty/zeroed result structure so one bad record cannot take the
/// dashboard down.
#[derive(Error, Debug)]
pub enum CalculationError {
    #[error("Division by zero: {0}")]
    DivisionByZero(String),

    #[error("Numeric overflow: {0}")]
    Overflow(String),

    #[error("Calculation failed: {0}")]
    Numeric(String),
}

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
