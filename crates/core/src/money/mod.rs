//! Money module - the common currency value type and reference data.

mod currency_registry;
mod money_model;

pub use currency_registry::{
    denormalization_multiplier, get_currency, normalize_amount, normalize_currency_code,
    round_for_currency, Currency,
};
pub use money_model::{validate_currency_code, CurrencyAmount};
