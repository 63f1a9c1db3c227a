//! Custom error types for Walletline
//!
//! This module defines the error hierarchy for the crate using thiserror.
//! Rejected amount keystrokes and failed preference writes are deliberately
//! absent: they are reported as outcomes, not errors.

use thiserror::Error;

use crate::api::ClientError;
use crate::draft::DraftIssue;
use crate::models::{Category, TransactionKind};

/// The main error type for Walletline operations
#[derive(Error, Debug)]
pub enum WalletError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Preference or settings storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Locale code that has no resource set
    #[error("Unknown locale: {0}")]
    UnknownLocale(String),

    /// A category was offered that does not belong to the draft's kind
    #[error("Category '{category}' is not valid for {kind} transactions")]
    CategoryMismatch {
        category: Category,
        kind: TransactionKind,
    },

    /// Submit was called on a draft that does not validate
    #[error("Transaction is not submittable: {}", format_issues(.0))]
    NotSubmittable(Vec<DraftIssue>),

    /// The remote API rejected or failed the submission
    #[error("API error: {0}")]
    Api(#[from] ClientError),
}

fn format_issues(issues: &[DraftIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl WalletError {
    /// Check if this is an unknown locale error
    pub fn is_unknown_locale(&self) -> bool {
        matches!(self, Self::UnknownLocale(_))
    }

    /// Check if this is a category/kind mismatch
    pub fn is_category_mismatch(&self) -> bool {
        matches!(self, Self::CategoryMismatch { .. })
    }

    /// Check if this is a not-submittable error
    pub fn is_not_submittable(&self) -> bool {
        matches!(self, Self::NotSubmittable(_))
    }

    /// The missing-field reasons carried by a `NotSubmittable` error
    pub fn draft_issues(&self) -> &[DraftIssue] {
        match self {
            Self::NotSubmittable(issues) => issues,
            _ => &[],
        }
    }
}

impl From<std::io::Error> for WalletError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for WalletError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Walletline operations
pub type WalletResult<T> = Result<T, WalletError>;
