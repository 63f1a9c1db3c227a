//! Transaction model
//!
//! The kind and payment-method enumerations shared by the draft engine, and
//! the immutable record handed to the remote API on submit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::category::Category;
use super::ids::TransactionId;
use super::money::Money;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money going out
    #[default]
    Expense,
    /// Money coming in
    Income,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "expense" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            other => Err(format!("unknown transaction kind: {}", other)),
        }
    }
}

/// How a transaction was paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
}

impl PaymentMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Card => "card",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(Self::Cash),
            "card" => Ok(Self::Card),
            other => Err(format!("unknown payment method: {}", other)),
        }
    }
}

/// A validated transaction, ready to leave the client
///
/// Built only by the draft engine after validation succeeds. The amount is a
/// parsed value, never the raw edit string, and carries no locale formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Client-generated identifier so the server can de-duplicate retries
    pub id: TransactionId,

    /// Amount in minor units, always positive
    #[serde(rename = "amount_minor")]
    pub amount: Money,

    pub kind: TransactionKind,

    pub category: Category,

    /// Calendar date the transaction occurred on
    pub date: NaiveDate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    pub payment_method: PaymentMethod,

    #[serde(default)]
    pub is_recurring: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> TransactionRecord {
        TransactionRecord {
            id: TransactionId::new(),
            amount: Money::from_minor(1250),
            kind: TransactionKind::Expense,
            category: Category::Food,
            date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            note: None,
            payment_method: PaymentMethod::Card,
            is_recurring: false,
        }
    }

    #[test]
    fn test_kind_parse_and_display() {
        assert_eq!("Income".parse::<TransactionKind>().unwrap(), TransactionKind::Income);
        assert_eq!(TransactionKind::Expense.to_string(), "expense");
        assert!("transfer".parse::<TransactionKind>().is_err());
    }

    #[test]
    fn test_payment_method_parse() {
        assert_eq!("CASH".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cash);
        assert!("crypto".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_record_wire_shape() {
        let record = sample_record();
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["amount_minor"], 1250);
        assert_eq!(value["kind"], "expense");
        assert_eq!(value["category"], "food");
        assert_eq!(value["date"], "2025-03-14");
        assert_eq!(value["payment_method"], "card");
        assert_eq!(value["is_recurring"], false);
        assert!(value.get("note").is_none());
    }
}
