//! Core data models for Walletline
//!
//! This module contains the value types a transaction is composed from and
//! the record that is submitted once a draft validates.

pub mod category;
pub mod ids;
pub mod money;
pub mod transaction;

pub use category::Category;
pub use ids::{DraftId, TransactionId};
pub use money::{Money, MoneyParseError};
pub use transaction::{PaymentMethod, TransactionKind, TransactionRecord};
