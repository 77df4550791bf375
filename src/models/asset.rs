//! Asset model
//!
//! Liquid or invested holdings (cash, stocks, crypto, gold, ...). The balance
//! only changes through routed transactions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::history::{HistoryEntry, HistoryLabel};
use super::ids::AssetId;
use super::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AssetType {
    #[default]
    Cash,
    Stock,
    Crypto,
    Gold,
    Other,
}

impl AssetType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "cash" | "bank" => Some(Self::Cash),
            "stock" | "stocks" => Some(Self::Stock),
            "crypto" => Some(Self::Crypto),
            "gold" => Some(Self::Gold),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Icon used when the user does not pick one
    pub fn default_icon(&self) -> &'static str {
        match self {
            Self::Cash => "💳",
            Self::Stock => "📈",
            Self::Crypto | Self::Gold | Self::Other => "💎",
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cash => write!(f, "Cash"),
            Self::Stock => write!(f, "Stock"),
            Self::Crypto => write!(f, "Crypto"),
            Self::Gold => write!(f, "Gold"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// A standing monthly contribution the user has noted for an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringContribution {
    pub amount: Money,
    pub day_of_month: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,

    pub name: String,

    #[serde(rename = "type")]
    pub asset_type: AssetType,

    /// Free-text type name when `asset_type` is `Other`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    pub balance: Money,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring: Option<RecurringContribution>,

    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

impl Asset {
    /// Create an asset with an opening balance and its `Initial` history line
    pub fn new(
        name: impl Into<String>,
        asset_type: AssetType,
        opening_balance: Money,
        opened_on: NaiveDate,
    ) -> Self {
        Self {
            id: AssetId::new(),
            name: name.into(),
            asset_type,
            custom_type: None,
            icon: None,
            balance: opening_balance,
            recurring: None,
            history: vec![HistoryEntry::new(
                opened_on,
                opening_balance,
                HistoryLabel::Initial,
            )],
        }
    }

    pub fn icon(&self) -> &str {
        self.icon
            .as_deref()
            .unwrap_or_else(|| self.asset_type.default_icon())
    }

    /// Type label shown to the user, preferring the custom name for `Other`
    pub fn type_label(&self) -> String {
        match (&self.asset_type, &self.custom_type) {
            (AssetType::Other, Some(custom)) if !custom.trim().is_empty() => custom.clone(),
            (t, _) => t.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), AssetValidationError> {
        if self.name.trim().is_empty() {
            return Err(AssetValidationError::EmptyName);
        }
        if self.name.len() > 100 {
            return Err(AssetValidationError::NameTooLong(self.name.len()));
        }
        if let Some(recurring) = &self.recurring {
            if !recurring.amount.is_positive() {
                return Err(AssetValidationError::RecurringAmount);
            }
            if !(1..=31).contains(&recurring.day_of_month) {
                return Err(AssetValidationError::RecurringDay(recurring.day_of_month));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.type_label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssetValidationError {
    #[error("Asset name cannot be empty")]
    EmptyName,
    #[error("Asset name too long ({0} chars, max 100)")]
    NameTooLong(usize),
    #[error("Recurring amount must be positive")]
    RecurringAmount,
    #[error("Recurring day must be between 1 and 31, got {0}")]
    RecurringDay(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 10, 1).unwrap()
    }

    #[test]
    fn test_new_asset_has_initial_history() {
        let asset = Asset::new("BCA Savings", AssetType::Cash, Money::from_major(45_000_000), day());
        assert_eq!(asset.balance, Money::from_major(45_000_000));
        assert_eq!(asset.history.len(), 1);
        assert_eq!(asset.history[0].label, HistoryLabel::Initial);
        assert_eq!(asset.history[0].amount, Money::from_major(45_000_000));
    }

    #[test]
    fn test_icon_and_type_label() {
        let mut asset = Asset::new("Vault", AssetType::Other, Money::zero(), day());
        assert_eq!(asset.icon(), "💎");
        assert_eq!(asset.type_label(), "Other");

        asset.custom_type = Some("Watches".into());
        asset.icon = Some("⌚".into());
        assert_eq!(asset.icon(), "⌚");
        assert_eq!(asset.type_label(), "Watches");
    }

    #[test]
    fn test_validation() {
        let mut asset = Asset::new("Wallet", AssetType::Cash, Money::zero(), day());
        assert!(asset.validate().is_ok());

        asset.recurring = Some(RecurringContribution {
            amount: Money::from_major(100),
            day_of_month: 32,
        });
        assert_eq!(asset.validate(), Err(AssetValidationError::RecurringDay(32)));

        asset.recurring = None;
        asset.name = " ".into();
        assert_eq!(asset.validate(), Err(AssetValidationError::EmptyName));
    }

    #[test]
    fn test_type_parse() {
        assert_eq!(AssetType::parse("STOCK"), Some(AssetType::Stock));
        assert_eq!(AssetType::parse("bonds"), None);
    }
}
