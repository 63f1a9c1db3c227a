//! Draft and record formatting
//!
//! Everything here is localized through the resource table; the records
//! themselves stay locale-independent.

use chrono::NaiveDate;

use super::date::format_date_label;
use crate::draft::DraftIssue;
use crate::i18n::{Locale, LocaleTable};
use crate::models::TransactionRecord;

/// Localized, field-specific messages for each validation issue
pub fn format_issues(issues: &[DraftIssue], table: &LocaleTable, locale: &Locale) -> Vec<String> {
    issues
        .iter()
        .map(|issue| table.translate(locale, "validation", issue.message_key()).to_string())
        .collect()
}

/// Multi-line summary of a submitted record
pub fn format_record(
    record: &TransactionRecord,
    today: NaiveDate,
    currency_symbol: &str,
    table: &LocaleTable,
    locale: &Locale,
) -> String {
    let t = |ns: &str, key: &'static str| table.translate(locale, ns, key);
    let yes_no = if record.is_recurring { t("common", "yes") } else { t("common", "no") };

    let mut output = String::new();
    output.push_str(&format!(
        "{:<16} {}\n",
        t("transactions", "amount"),
        record.amount.format_with_symbol(currency_symbol)
    ));
    output.push_str(&format!(
        "{:<16} {}\n",
        t("transactions", "kind"),
        t("transactions", record.kind.as_str())
    ));
    output.push_str(&format!(
        "{:<16} {}\n",
        t("transactions", "category"),
        t("categories", record.category.as_str())
    ));
    output.push_str(&format!(
        "{:<16} {}\n",
        t("transactions", "date"),
        format_date_label(record.date, today, table, locale)
    ));
    output.push_str(&format!(
        "{:<16} {}\n",
        t("transactions", "payment_method"),
        t("transactions", record.payment_method.as_str())
    ));
    output.push_str(&format!("{:<16} {}\n", t("transactions", "recurring"), yes_no));

    if let Some(note) = &record.note {
        output.push_str(&format!("{:<16} {}\n", t("transactions", "note"), note));
    }

    output
}
