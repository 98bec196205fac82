//! Immutable currency reference data and minor-unit normalization.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::constants::DISPLAY_DECIMAL_PRECISION;

/// Immutable reference data for one currency.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    pub code: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
    pub decimal_places: u32,
    pub countries: &'static [&'static str],
}

static CURRENCIES: OnceLock<HashMap<&'static str, Currency>> = OnceLock::new();

fn registry() -> &'static HashMap<&'static str, Currency> {
    CURRENCIES.get_or_init(|| {
        let entries = [
            Currency { code: "USD", name: "US Dollar", symbol: "$", decimal_places: 2, countries: &["United States"] },
            Currency { code: "EUR", name: "Euro", symbol: "\u{20ac}", decimal_places: 2, countries: &["Germany", "France", "Italy", "Spain", "Netherlands"] },
            Currency { code: "GBP", name: "Pound Sterling", symbol: "\u{a3}", decimal_places: 2, countries: &["United Kingdom"] },
            Currency { code: "JPY", name: "Japanese Yen", symbol: "\u{a5}", decimal_places: 0, countries: &["Japan"] },
            Currency { code: "CHF", name: "Swiss Franc", symbol: "CHF", decimal_places: 2, countries: &["Switzerland", "Liechtenstein"] },
            Currency { code: "CAD", name: "Canadian Dollar", symbol: "CA$", decimal_places: 2, countries: &["Canada"] },
            Currency { code: "AUD", name: "Australian Dollar", symbol: "A$", decimal_places: 2, countries: &["Australia"] },
            Currency { code: "NZD", name: "New Zealand Dollar", symbol: "NZ$", decimal_places: 2, countries: &["New Zealand"] },
            Currency { code: "SEK", name: "Swedish Krona", symbol: "kr", decimal_places: 2, countries: &["Sweden"] },
            Currency { code: "NOK", name: "Norwegian Krone", symbol: "kr", decimal_places: 2, countries: &["Norway"] },
            Currency { code: "DKK", name: "Danish Krone", symbol: "kr", decimal_places: 2, countries: &["Denmark"] },
            Currency { code: "SGD", name: "Singapore Dollar", symbol: "S$", decimal_places: 2, countries: &["Singapore"] },
            Currency { code: "HKD", name: "Hong Kong Dollar", symbol: "HK$", decimal_places: 2, countries: &["Hong Kong"] },
            Currency { code: "CNY", name: "Chinese Yuan", symbol: "\u{a5}", decimal_places: 2, countries: &["China"] },
            Currency { code: "INR", name: "Indian Rupee", symbol: "\u{20b9}", decimal_places: 2, countries: &["India"] },
            Currency { code: "KRW", name: "South Korean Won", symbol: "\u{20a9}", decimal_places: 0, countries: &["South Korea"] },
            Currency { code: "BRL", name: "Brazilian Real", symbol: "R$", decimal_places: 2, countries: &["Brazil"] },
            Currency { code: "MXN", name: "Mexican Peso", symbol: "MX$", decimal_places: 2, countries: &["Mexico"] },
            Currency { code: "ZAR", name: "South African Rand", symbol: "R", decimal_places: 2, countries: &["South Africa"] },
            Currency { code: "TRY", name: "Turkish Lira", symbol: "\u{20ba}", decimal_places: 2, countries: &["Turkey"] },
            Currency { code: "PLN", name: "Polish Zloty", symbol: "z\u{142}", decimal_places: 2, countries: &["Poland"] },
            Currency { code: "CZK", name: "Czech Koruna", symbol: "K\u{10d}", decimal_places: 2, countries: &["Czech Republic"] },
            Currency { code: "HUF", name: "Hungarian Forint", symbol: "Ft", decimal_places: 2, countries: &["Hungary"] },
            Currency { code: "THB", name: "Thai Baht", symbol: "\u{e3f}", decimal_places: 2, countries: &["Thailand"] },
            Currency { code: "ILS", name: "Israeli New Shekel", symbol: "\u{20aa}", decimal_places: 2, countries: &["Israel"] },
            Currency { code: "AED", name: "UAE Dirham", symbol: "AED", decimal_places: 2, countries: &["United Arab Emirates"] },
            Currency { code: "SAR", name: "Saudi Riyal", symbol: "SR", decimal_places: 2, countries: &["Saudi Arabia"] },
            Currency { code: "KWD", name: "Kuwaiti Dinar", symbol: "KD", decimal_places: 3, countries: &["Kuwait"] },
            Currency { code: "BHD", name: "Bahraini Dinar", symbol: "BD", decimal_places: 3, countries: &["Bahrain"] },
        ];

        entries
            .into_iter()
            .map(|currency| (currency.code, currency))
            .collect()
    })
}

/// Looks up reference data for a currency code.
pub fn get_currency(code: &str) -> Option<&'static Currency> {
    registry().get(code)
}

/// Rounds an amount to the currency's decimal places, falling back to
/// the display precision for unknown codes.
pub fn round_for_currency(amount: Decimal, code: &str) -> Decimal {
    let places = get_currency(code)
        .map(|c| c.decimal_places)
        .unwrap_or(DISPLAY_DECIMAL_PRECISION);
    amount.round_dp(places)
}

#[derive(Debug, Clone)]
struct MinorUnitRule {
    major_code: &'static str,
    factor: Decimal,
}

static MINOR_UNIT_RULES: OnceLock<HashMap<&'static str, MinorUnitRule>> = OnceLock::new();

/// Quote-style minor units seen in market data feeds. Amounts quoted in
/// these are scaled into their major unit before any rate lookup.
fn minor_unit_rules() -> &'static HashMap<&'static str, MinorUnitRule> {
    MINOR_UNIT_RULES.get_or_init(|| {
        let mut map = HashMap::new();
        map.insert("GBp", MinorUnitRule { major_code: "GBP", factor: dec!(0.01) });
        map.insert("GBX", MinorUnitRule { major_code: "GBP", factor: dec!(0.01) });
        map.insert("ZAc", MinorUnitRule { major_code: "ZAR", factor: dec!(0.01) });
        map.insert("ZAC", MinorUnitRule { major_code: "ZAR", factor: dec!(0.01) });
        map.insert("ILA", MinorUnitRule { major_code: "ILS", factor: dec!(0.01) });
        map
    })
}

/// Maps a minor-unit code to its major currency; other codes pass through.
pub fn normalize_currency_code(currency: &str) -> &str {
    minor_unit_rules()
        .get(currency)
        .map(|rule| rule.major_code)
        .unwrap_or(currency)
}

/// Multiplier that converts a major-unit amount back into the given
/// (possibly minor-unit) quote currency. 1 for regular codes.
pub fn denormalization_multiplier(currency: &str) -> Decimal {
    minor_unit_rules()
        .get(currency)
        .map(|rule| Decimal::ONE / rule.factor)
        .unwrap_or(Decimal::ONE)
}

/// Converts an amount from a potentially minor-unit quote currency into
/// its major-unit equivalent, returning the major code alongside.
pub fn normalize_amount(amount: Decimal, currency: &str) -> (Decimal, &str) {
    match minor_unit_rules().get(currency) {
        Some(rule) => (amount * rule.factor, rule.major_code),
        None => (amount, currency),
    }
}
