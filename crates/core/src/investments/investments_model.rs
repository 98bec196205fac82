//! Investment domain model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A holding snapshot as supplied by the persistence collaborator.
/// The calculation core only reads these; create/update/delete live
/// with the collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub id: String,
    pub user_id: String,
    pub symbol: String,
    pub name: Option<String>,
    pub quantity: Decimal,
    pub purchase_price: Decimal,
    /// Latest quoted price; absent when no quote has been synced yet.
    pub current_price: Option<Decimal>,
    pub currency: String,
    pub purchase_date: Option<NaiveDate>,
}

impl Investment {
    /// Current market value in the holding's native currency, falling
    /// back to the purchase price when no quote is known.
    pub fn market_value(&self) -> Decimal {
        let price = self.current_price.unwrap_or(self.purchase_price);
        price * self.quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn investment(quantity: Decimal, purchase: Decimal, current: Option<Decimal>) -> Investment {
        Investment {
            id: "inv-1".to_string(),
            user_id: "user-1".to_string(),
            symbol: "VWRL".to_string(),
            name: None,
            quantity,
            purchase_price: purchase,
            current_price: current,
            currency: "EUR".to_string(),
            purchase_date: None,
        }
    }

    #[test]
    fn test_market_value_prefers_current_price() {
        let inv = investment(dec!(10), dec!(90), Some(dec!(110)));
        assert_eq!(inv.market_value(), dec!(1100));
    }

    #[test]
    fn test_market_value_falls_back_to_purchase_price() {
        let inv = investment(dec!(10), dec!(90), None);
        assert_eq!(inv.market_value(), dec!(900));
    }
}
