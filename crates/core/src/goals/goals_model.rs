//! Goals domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A savings goal snapshot. Target and current amounts share the
/// goal's native currency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub currency: String,
    pub is_active: bool,
}
