//! Date labels
//!
//! The current calendar day gets a distinct "Today, ..." label; every other
//! date renders as day, abbreviated month, year.

use chrono::{Datelike, NaiveDate};

use crate::i18n::{Locale, LocaleTable};

const MONTH_KEYS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// "15 Jun 2025", with the month abbreviated in `locale`
pub fn format_date(date: NaiveDate, table: &LocaleTable, locale: &Locale) -> String {
    let month = table.translate(locale, "dates", MONTH_KEYS[date.month0() as usize]);
    format!("{} {} {}", date.day(), month, date.year())
}

/// Label for a date field: "Today, 15 Jun 2025" when `date` is `today`
pub fn format_date_label(
    date: NaiveDate,
    today: NaiveDate,
    table: &LocaleTable,
    locale: &Locale,
) -> String {
    let formatted = format_date(date, table, locale);
    if date == today {
        format!("{}, {}", table.translate(locale, "dates", "today"), formatted)
    } else {
        formatted
    }
}
