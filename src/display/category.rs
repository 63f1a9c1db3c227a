//! Category display formatting

use crate::i18n::{Locale, LocaleTable};
use crate::models::{Category, TransactionKind};

/// Localized category list for one kind, identifier alongside the label
pub fn format_category_list(kind: TransactionKind, table: &LocaleTable, locale: &Locale) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}:\n", table.translate(locale, "transactions", kind.as_str())));

    for category in Category::for_kind(kind) {
        output.push_str(&format!(
            "  {:<16} {}\n",
            category.as_str(),
            table.translate(locale, "categories", category.as_str())
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_only_categories_of_kind() {
        let table = LocaleTable::bundled().unwrap();
        let output = format_category_list(TransactionKind::Income, &table, &Locale::en());

        assert!(output.starts_with("Income:\n"));
        assert!(output.contains("salary"));
        assert!(!output.contains("food"));
    }

    #[test]
    fn test_labels_follow_locale() {
        let table = LocaleTable::bundled().unwrap();
        let output = format_category_list(TransactionKind::Expense, &table, &Locale::kz());
        assert!(output.contains("Тамақ"));
    }
}
