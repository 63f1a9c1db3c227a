//! Display formatting for terminal output
//!
//! Localized labels for dates, categories, validation issues and submitted
//! records.

pub mod category;
pub mod date;
pub mod transaction;

pub use category::format_category_list;
pub use date::{format_date, format_date_label};
pub use transaction::{format_issues, format_record};
