//! Transaction categories
//!
//! Categories are a fixed set split by transaction kind. The expense set and
//! the income set are disjoint: every category belongs to exactly one kind.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::transaction::TransactionKind;

/// A transaction category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    // Expense categories
    Food,
    Transport,
    Shopping,
    Entertainment,
    Health,
    Bills,
    Education,
    OtherExpense,

    // Income categories
    Salary,
    Freelance,
    Investment,
    Gift,
    OtherIncome,
}

const EXPENSE_CATEGORIES: &[Category] = &[
    Category::Food,
    Category::Transport,
    Category::Shopping,
    Category::Entertainment,
    Category::Health,
    Category::Bills,
    Category::Education,
    Category::OtherExpense,
];

const INCOME_CATEGORIES: &[Category] = &[
    Category::Salary,
    Category::Freelance,
    Category::Investment,
    Category::Gift,
    Category::OtherIncome,
];

impl Category {
    /// The categories offered for a transaction kind, in display order
    pub fn for_kind(kind: TransactionKind) -> &'static [Category] {
        match kind {
            TransactionKind::Expense => EXPENSE_CATEGORIES,
            TransactionKind::Income => INCOME_CATEGORIES,
        }
    }

    /// The kind this category belongs to
    pub fn kind(self) -> TransactionKind {
        match self {
            Self::Salary | Self::Freelance | Self::Investment | Self::Gift | Self::OtherIncome => {
                TransactionKind::Income
            }
            _ => TransactionKind::Expense,
        }
    }

    /// Whether this category may be used with `kind`
    pub fn belongs_to(self, kind: TransactionKind) -> bool {
        self.kind() == kind
    }

    /// Stable identifier, also the key in the `categories` namespace
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Transport => "transport",
            Self::Shopping => "shopping",
            Self::Entertainment => "entertainment",
            Self::Health => "health",
            Self::Bills => "bills",
            Self::Education => "education",
            Self::OtherExpense => "other_expense",
            Self::Salary => "salary",
            Self::Freelance => "freelance",
            Self::Investment => "investment",
            Self::Gift => "gift",
            Self::OtherIncome => "other_income",
        }
    }

    /// Every category, expense set first
    pub fn all() -> impl Iterator<Item = Category> {
        EXPENSE_CATEGORIES
            .iter()
            .chain(INCOME_CATEGORIES.iter())
            .copied()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Category::all()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| format!("unknown category: {}", s))
    }
}
