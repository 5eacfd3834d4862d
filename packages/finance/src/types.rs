// ABOUTME: Financial entry type definitions
// ABOUTME: Entry rows, create/update inputs and the closed category enumeration

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryCategory {
    Income,
    Expense,
    Investment,
    Asset,
    Liability,
}

impl EntryCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryCategory::Income => "income",
            EntryCategory::Expense => "expense",
            EntryCategory::Investment => "investment",
            EntryCategory::Asset => "asset",
            EntryCategory::Liability => "liability",
        }
    }
}

impl fmt::Display for EntryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Invalid category '{0}'. Expected one of: income, expense, investment, asset, liability")]
pub struct UnknownCategory(pub String);

impl FromStr for EntryCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(EntryCategory::Income),
            "expense" => Ok(EntryCategory::Expense),
            "investment" => Ok(EntryCategory::Investment),
            "asset" => Ok(EntryCategory::Asset),
            "liability" => Ok(EntryCategory::Liability),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// A stored entry. `category` is kept as text because rows written outside
/// this service may carry values the enumeration does not know.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialEntry {
    pub id: i64,
    pub user_id: i64,
    pub category: String,
    #[serde(rename = "type")]
    pub entry_type: String,
    pub amount: f64,
    pub description: Option<String>,
    pub recurring: bool,
    pub frequency: Option<String>,
    pub date: DateTime<Utc>,
}

impl FinancialEntry {
    pub fn parsed_category(&self) -> Option<EntryCategory> {
        self.category.parse().ok()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FinancialEntryCreate {
    pub user_id: i64,
    pub category: String,
    #[serde(rename = "type")]
    pub entry_type: String,
    pub amount: f64,
    pub description: Option<String>,
    #[serde(default)]
    pub recurring: Option<bool>,
    pub frequency: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

impl FinancialEntryCreate {
    pub fn validate(&self) -> Result<EntryCategory, String> {
        let category = self.category.parse::<EntryCategory>().map_err(|e| e.to_string())?;
        if self.entry_type.trim().is_empty() {
            return Err("Entry type must not be empty".to_string());
        }
        validate_amount(self.amount)?;
        Ok(category)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FinancialEntryUpdate {
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub entry_type: Option<String>,
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub recurring: Option<bool>,
    pub frequency: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

impl FinancialEntryUpdate {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(category) = &self.category {
            category.parse::<EntryCategory>().map_err(|e| e.to_string())?;
        }
        if let Some(entry_type) = &self.entry_type {
            if entry_type.trim().is_empty() {
                return Err("Entry type must not be empty".to_string());
            }
        }
        if let Some(amount) = self.amount {
            validate_amount(amount)?;
        }
        Ok(())
    }
}

fn validate_amount(amount: f64) -> Result<(), String> {
    if !amount.is_finite() {
        return Err("Amount must be a finite number".to_string());
    }
    if amount < 0.0 {
        return Err("Amount must not be negative".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(category: &str, amount: f64) -> FinancialEntryCreate {
        FinancialEntryCreate {
            user_id: 1,
            category: category.to_string(),
            entry_type: "salary".to_string(),
            amount,
            description: None,
            recurring: None,
            frequency: None,
            date: None,
        }
    }

    #[test]
    fn test_category_round_trip() {
        for category in [
            EntryCategory::Income,
            EntryCategory::Expense,
            EntryCategory::Investment,
            EntryCategory::Asset,
            EntryCategory::Liability,
        ] {
            assert_eq!(category.as_str().parse::<EntryCategory>().unwrap(), category);
        }
        assert!("Income".parse::<EntryCategory>().is_err());
        assert!("savings".parse::<EntryCategory>().is_err());
    }

    #[test]
    fn test_create_validation() {
        assert_eq!(create("income", 1000.0).validate().unwrap(), EntryCategory::Income);
        assert!(create("income", 0.0).validate().is_ok());
        assert!(create("gift", 10.0).validate().is_err());
        assert!(create("expense", -5.0).validate().is_err());
        assert!(create("expense", f64::NAN).validate().is_err());
    }

    #[test]
    fn test_update_validation() {
        assert!(FinancialEntryUpdate::default().validate().is_ok());
        assert!(FinancialEntryUpdate {
            amount: Some(-1.0),
            ..Default::default()
        }
        .validate()
        .is_err());
        assert!(FinancialEntryUpdate {
            category: Some("bonus".to_string()),
            ..Default::default()
        }
        .validate()
        .is_err());
    }

    #[test]
    fn test_entry_serializes_type_field() {
        let entry = FinancialEntry {
            id: 1,
            user_id: 1,
            category: "expense".to_string(),
            entry_type: "groceries".to_string(),
            amount: 2500.0,
            description: None,
            recurring: true,
            frequency: Some("monthly".to_string()),
            date: Utc::now(),
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "groceries");
        assert!(json.get("entry_type").is_none());
    }
}
