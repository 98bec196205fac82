//! Income and expense domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment cadence of a recurring income or expense.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Frequency {
    Daily,
    Weekly,
    BiWeekly,
    Monthly,
    Quarterly,
    Annually,
}

/// A recurring income snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Income {
    pub id: String,
    pub user_id: String,
    pub source: String,
    pub amount: Decimal,
    pub currency: String,
    pub frequency: Frequency,
    pub is_active: bool,
}

/// A recurring expense snapshot. Unlike incomes, expenses carry no
/// active flag and always count toward totals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub user_id: String,
    pub category: String,
    pub amount: Decimal,
    pub currency: String,
    pub frequency: Frequency,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_serialization() {
        assert_eq!(
            serde_json::to_string(&Frequency::BiWeekly).unwrap(),
            "\"biWeekly\""
        );
        assert_eq!(
            serde_json::to_string(&Frequency::Annually).unwrap(),
            "\"annually\""
        );
        assert_eq!(
            serde_json::from_str::<Frequency>("\"quarterly\"").unwrap(),
            Frequency::Quarterly
        );
    }
}
